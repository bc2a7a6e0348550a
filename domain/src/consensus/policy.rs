//! Verdict rules for design-review consensus

use super::aggregate::{AttributedIssue, WeightedOpinion, aggregate_issues, consensus_score};
use crate::review::issue::Severity;
use crate::review::verdict::Verdict;
use serde::{Deserialize, Serialize};

/// Default consensus score required for approval.
pub const DEFAULT_APPROVE_THRESHOLD: f64 = 0.75;

/// Rule for turning a final opinion set into a verdict.
///
/// Evaluated in order:
/// 1. any Critical issue -> `Rejected` (veto, ignores the score)
/// 2. consensus >= `approve_threshold` and no Error issue -> `Approved`
/// 3. otherwise -> `NeedsRevision`
///
/// # Example
///
/// ```
/// use council_domain::consensus::ConsensusPolicy;
/// use council_domain::review::Verdict;
///
/// let policy = ConsensusPolicy::default();
/// assert_eq!(policy.verdict(0.8, false, false), Verdict::Approved);
/// assert_eq!(policy.verdict(1.0, true, false), Verdict::Rejected);
/// assert_eq!(policy.verdict(0.9, false, true), Verdict::NeedsRevision);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConsensusPolicy {
    pub approve_threshold: f64,
}

impl Default for ConsensusPolicy {
    fn default() -> Self {
        Self {
            approve_threshold: DEFAULT_APPROVE_THRESHOLD,
        }
    }
}

/// Outcome of aggregating one opinion set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConsensusOutcome {
    pub consensus_score: f64,
    pub verdict: Verdict,
    pub issues: Vec<AttributedIssue>,
}

impl ConsensusPolicy {
    pub fn new(approve_threshold: f64) -> Self {
        Self { approve_threshold }
    }

    /// Threshold must lie in `[0, 1]`.
    pub fn is_valid(&self) -> bool {
        self.approve_threshold.is_finite() && (0.0..=1.0).contains(&self.approve_threshold)
    }

    /// Apply the verdict rule to precomputed inputs.
    pub fn verdict(&self, consensus: f64, has_critical: bool, has_error: bool) -> Verdict {
        if has_critical {
            Verdict::Rejected
        } else if consensus >= self.approve_threshold && !has_error {
            Verdict::Approved
        } else {
            Verdict::NeedsRevision
        }
    }

    /// Score, decide and merge issues for a final opinion set.
    pub fn aggregate(&self, opinions: &[WeightedOpinion<'_>]) -> ConsensusOutcome {
        let consensus_score = consensus_score(opinions);
        let has_critical = opinions.iter().any(|w| w.opinion.has_critical_issues());
        let has_error = opinions
            .iter()
            .flat_map(|w| w.opinion.issues())
            .any(|i| i.severity == Severity::Error);

        ConsensusOutcome {
            consensus_score,
            verdict: self.verdict(consensus_score, has_critical, has_error),
            issues: aggregate_issues(opinions.iter().map(|w| w.opinion)),
        }
    }

    pub fn description(&self) -> String {
        format!(
            "approve at consensus >= {:.2}, Critical issues veto",
            self.approve_threshold
        )
    }
}

impl std::fmt::Display for ConsensusPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.description())
    }
}
