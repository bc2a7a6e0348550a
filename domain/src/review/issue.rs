//! Design issues raised by specialist agents

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Severity of a design issue, ordered from least to most severe.
///
/// ```
/// use council_domain::review::Severity;
///
/// assert!(Severity::Critical > Severity::Error);
/// assert!(Severity::Warning > Severity::Info);
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Info,
    Warning,
    Error,
    /// Veto: forces rejection regardless of the numeric consensus.
    Critical,
}

impl Severity {
    /// Score penalty applied per issue of this severity.
    pub fn penalty(&self) -> f64 {
        match self {
            Severity::Info => 0.01,
            Severity::Warning => 0.05,
            Severity::Error => 0.15,
            Severity::Critical => 0.35,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
            Severity::Critical => "critical",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "info" => Ok(Severity::Info),
            "warning" | "warn" => Ok(Severity::Warning),
            "error" => Ok(Severity::Error),
            "critical" => Ok(Severity::Critical),
            _ => Err(format!("Unknown severity: {}", s)),
        }
    }
}

/// A single problem found in a proposal (value object).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignIssue {
    /// Stable machine-readable code, e.g. `STR_WALL_TOO_THIN`.
    pub code: String,
    pub description: String,
    pub severity: Severity,
    /// Element id or label the issue refers to; empty for proposal-wide issues.
    #[serde(default)]
    pub location: String,
    /// Referenced standard or code clause.
    #[serde(default)]
    pub standard: Option<String>,
    #[serde(default)]
    pub suggested_fix: Option<String>,
    #[serde(default)]
    pub details: BTreeMap<String, Value>,
}

impl DesignIssue {
    pub fn new(
        code: impl Into<String>,
        description: impl Into<String>,
        severity: Severity,
    ) -> Self {
        Self {
            code: code.into(),
            description: description.into(),
            severity,
            location: String::new(),
            standard: None,
            suggested_fix: None,
            details: BTreeMap::new(),
        }
    }

    pub fn info(code: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(code, description, Severity::Info)
    }

    pub fn warning(code: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(code, description, Severity::Warning)
    }

    pub fn error(code: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(code, description, Severity::Error)
    }

    pub fn critical(code: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(code, description, Severity::Critical)
    }

    pub fn at(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    pub fn per_standard(mut self, standard: impl Into<String>) -> Self {
        self.standard = Some(standard.into());
        self
    }

    pub fn with_fix(mut self, fix: impl Into<String>) -> Self {
        self.suggested_fix = Some(fix.into());
        self
    }

    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }

    pub fn is_critical(&self) -> bool {
        self.severity == Severity::Critical
    }

    /// Key used when merging issues from several agents.
    pub fn dedup_key(&self) -> (&str, &str) {
        (&self.code, &self.location)
    }
}
