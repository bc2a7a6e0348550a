//! Review loop configuration from TOML (`[review]` section)
//!
//! Example configuration:
//!
//! ```toml
//! [review]
//! max_rounds = 3
//! convergence_epsilon = 0.01
//! revision_epsilon = 0.001
//! approve_threshold = 0.75
//! agent_timeout_secs = 30
//! ```

use council_application::ReviewOptions;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Raw review loop configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileReviewConfig {
    pub max_rounds: usize,
    pub convergence_epsilon: f64,
    pub revision_epsilon: f64,
    /// Consensus score required for approval (inclusive)
    pub approve_threshold: f64,
    /// Per-agent, per-round deadline in seconds
    pub agent_timeout_secs: u64,
}

impl Default for FileReviewConfig {
    fn default() -> Self {
        let options = ReviewOptions::default();
        Self {
            max_rounds: options.max_rounds,
            convergence_epsilon: options.convergence_epsilon,
            revision_epsilon: options.revision_epsilon,
            approve_threshold: options.approve_threshold,
            agent_timeout_secs: options.agent_timeout.as_secs(),
        }
    }
}

impl FileReviewConfig {
    pub fn to_review_options(&self) -> ReviewOptions {
        ReviewOptions::default()
            .with_max_rounds(self.max_rounds)
            .with_convergence_epsilon(self.convergence_epsilon)
            .with_revision_epsilon(self.revision_epsilon)
            .with_approve_threshold(self.approve_threshold)
            .with_agent_timeout(Duration::from_secs(self.agent_timeout_secs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_review_options() {
        assert_eq!(
            FileReviewConfig::default().to_review_options(),
            ReviewOptions::default()
        );
    }

    #[test]
    fn test_partial_section() {
        let toml_str = r#"
[review]
max_rounds = 5
approve_threshold = 0.8
"#;
        let config: super::super::FileConfig = toml::from_str(toml_str).unwrap();
        let options = config.review.to_review_options();
        assert_eq!(options.max_rounds, 5);
        assert_eq!(options.approve_threshold, 0.8);
        assert_eq!(options.convergence_epsilon, 0.01);
    }
}
