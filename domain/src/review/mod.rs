//! Review domain
//!
//! Values exchanged during a design review: issues, opinions, suggestions,
//! single-action validation results, verdicts and the final report.

pub mod issue;
pub mod opinion;
pub mod phase;
pub mod report;
pub mod suggestion;
pub mod validation;
pub mod verdict;

pub use issue::{DesignIssue, Severity};
pub use opinion::{ABSTAIN_ISSUE_CODE, ABSTAIN_SCORE, AgentOpinion, POSITIVE_THRESHOLD};
pub use phase::ReviewPhase;
pub use report::{AgentFailure, ReviewReport, RoundSummary};
pub use suggestion::{AgentSuggestion, SuggestionType};
pub use validation::ValidationResult;
pub use verdict::Verdict;
