//! Specialist agent domain
//!
//! Everything an agent needs that does not involve concurrency: its
//! specialty and expertise weight, the per-discipline rule tables, the
//! feedback inbox peers write into between rounds, and the score card that
//! turns findings into an [`AgentOpinion`](crate::review::AgentOpinion).

pub mod feedback;
pub mod rules;
pub mod scoring;
pub mod specialty;

pub use feedback::FeedbackInbox;
pub use rules::{DesignRuleSet, evaluate_proposal, rules_for};
pub use scoring::{FEEDBACK_WEIGHT, MAX_FEEDBACK_CORRECTION, ScoreCard, apply_feedback};
pub use specialty::{ExpertiseLevel, Specialty};
