//! Review session phases

use serde::{Deserialize, Serialize};

/// Phase of a review session.
///
/// ```text
/// Idle -> Dispatching -> Collecting -> Broadcasting -> Revising -> Collecting ...
///                                   \-> Converged -> Reported
/// any non-terminal phase -> Cancelled
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReviewPhase {
    Idle,
    /// Round-1 evaluations are being launched
    Dispatching,
    /// Awaiting the current round's opinions
    Collecting,
    /// Delivering peer opinions to every agent
    Broadcasting,
    /// Re-evaluations are being launched
    Revising,
    /// The feedback loop has ended (fixed point or round cap)
    Converged,
    Reported,
    Cancelled,
}

impl ReviewPhase {
    pub fn as_str(&self) -> &str {
        match self {
            ReviewPhase::Idle => "idle",
            ReviewPhase::Dispatching => "dispatching",
            ReviewPhase::Collecting => "collecting",
            ReviewPhase::Broadcasting => "broadcasting",
            ReviewPhase::Revising => "revising",
            ReviewPhase::Converged => "converged",
            ReviewPhase::Reported => "reported",
            ReviewPhase::Cancelled => "cancelled",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, ReviewPhase::Reported | ReviewPhase::Cancelled)
    }

    /// Whether `next` is a legal successor of this phase.
    pub fn can_transition_to(&self, next: ReviewPhase) -> bool {
        use ReviewPhase::*;

        if next == Cancelled {
            return !self.is_terminal();
        }
        matches!(
            (self, next),
            (Idle, Dispatching)
                | (Dispatching, Collecting)
                | (Revising, Collecting)
                | (Collecting, Broadcasting)
                | (Collecting, Converged)
                | (Broadcasting, Revising)
                | (Converged, Reported)
        )
    }
}

impl std::fmt::Display for ReviewPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_happy_path_transitions() {
        let path = [
            ReviewPhase::Idle,
            ReviewPhase::Dispatching,
            ReviewPhase::Collecting,
            ReviewPhase::Broadcasting,
            ReviewPhase::Revising,
            ReviewPhase::Collecting,
            ReviewPhase::Converged,
            ReviewPhase::Reported,
        ];
        for pair in path.windows(2) {
            assert!(
                pair[0].can_transition_to(pair[1]),
                "{} -> {}",
                pair[0],
                pair[1]
            );
        }
    }

    #[test]
    fn test_cancel_from_non_terminal_only() {
        assert!(ReviewPhase::Idle.can_transition_to(ReviewPhase::Cancelled));
        assert!(ReviewPhase::Revising.can_transition_to(ReviewPhase::Cancelled));
        assert!(!ReviewPhase::Reported.can_transition_to(ReviewPhase::Cancelled));
        assert!(!ReviewPhase::Cancelled.can_transition_to(ReviewPhase::Cancelled));
    }

    #[test]
    fn test_illegal_transitions() {
        assert!(!ReviewPhase::Idle.can_transition_to(ReviewPhase::Reported));
        assert!(!ReviewPhase::Broadcasting.can_transition_to(ReviewPhase::Collecting));
        assert!(!ReviewPhase::Reported.can_transition_to(ReviewPhase::Idle));
    }
}
