//! Review verdict

use serde::{Deserialize, Serialize};

/// Final outcome of a review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Approved,
    NeedsRevision,
    /// Vetoed or failing; must not be committed.
    Rejected,
    /// The review was cancelled before completing; the proposal is un-reviewed.
    Cancelled,
}

impl Verdict {
    pub fn is_approved(&self) -> bool {
        matches!(self, Verdict::Approved)
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, Verdict::Rejected)
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Verdict::Cancelled)
    }

    /// Whether the commit layer may apply the proposal.
    pub fn permits_commit(&self) -> bool {
        matches!(self, Verdict::Approved | Verdict::NeedsRevision)
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Verdict::Approved => write!(f, "Approved"),
            Verdict::NeedsRevision => write!(f, "Needs Revision"),
            Verdict::Rejected => write!(f, "Rejected"),
            Verdict::Cancelled => write!(f, "Cancelled"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verdict_display() {
        assert_eq!(Verdict::Approved.to_string(), "Approved");
        assert_eq!(Verdict::NeedsRevision.to_string(), "Needs Revision");
        assert_eq!(Verdict::Rejected.to_string(), "Rejected");
        assert_eq!(Verdict::Cancelled.to_string(), "Cancelled");
    }

    #[test]
    fn test_permits_commit() {
        assert!(Verdict::Approved.permits_commit());
        assert!(Verdict::NeedsRevision.permits_commit());
        assert!(!Verdict::Rejected.permits_commit());
        assert!(!Verdict::Cancelled.permits_commit());
    }
}
