//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod agents;
mod output;
mod review;

pub use agents::{FileAgentEntry, FileAgentsConfig, entry_for};
pub use output::FileOutputConfig;
pub use review::FileReviewConfig;

use council_application::ReviewOptions;
use council_domain::{DesignContext, ExpertiseLevel, Severity, Specialty};
use serde::{Deserialize, Serialize};

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Review loop settings
    pub review: FileReviewConfig,
    /// Per-specialty roster overrides
    pub agents: FileAgentsConfig,
    /// Project metadata handed to every agent
    pub context: DesignContext,
    /// Output settings
    pub output: FileOutputConfig,
}

/// A problem detected while validating a loaded configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigIssue {
    /// `Warning` issues fall back to a default; `Error` issues abort startup.
    pub severity: Severity,
    /// Dotted path of the offending key, e.g. `agents.cost.expertise`
    pub field: String,
    pub message: String,
}

impl ConfigIssue {
    fn warning(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            field: field.into(),
            message: message.into(),
        }
    }

    fn error(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity >= Severity::Error
    }
}

impl std::fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    ///
    /// Review loop settings that would be rejected by the coordinator are
    /// errors. Unknown specialties and out-of-range expertise are warnings
    /// because the roster ignores or replaces them.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        if let Err(e) = self.review_options().validate() {
            issues.push(ConfigIssue::error("review", e.to_string()));
        }

        for (name, entry) in &self.agents {
            let Ok(specialty) = name.parse::<Specialty>() else {
                issues.push(ConfigIssue::warning(
                    format!("agents.{}", name),
                    format!("unknown specialty '{}', section ignored", name),
                ));
                continue;
            };
            if let Some(value) = entry.expertise
                && ExpertiseLevel::new(value).is_err()
            {
                issues.push(ConfigIssue::warning(
                    format!("agents.{}.expertise", name),
                    format!(
                        "expertise {} is outside (0, 1], using default {}",
                        value,
                        specialty.default_expertise().value()
                    ),
                ));
            }
        }

        if Specialty::all()
            .into_iter()
            .all(|s| entry_for(&self.agents, s).is_some_and(|e| !e.enabled))
        {
            issues.push(ConfigIssue::error(
                "agents",
                "every specialist is disabled, nothing can review a proposal",
            ));
        }

        if let Some(budget) = self.context.budget
            && !(budget.is_finite() && budget > 0.0)
        {
            issues.push(ConfigIssue::warning(
                "context.budget",
                format!(
                    "budget {} is not a positive amount and will be ignored by cost checks",
                    budget
                ),
            ));
        }

        issues
    }

    /// Coordinator options described by the `[review]` section.
    pub fn review_options(&self) -> ReviewOptions {
        self.review.to_review_options()
    }
}
