//! Domain layer for design-council
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Proposal
//!
//! A set of new elements and parameter modifications submitted for review,
//! together with the [`DesignContext`] of the project it belongs to.
//!
//! ## Specialist review
//!
//! Six disciplines (architectural, structural, MEP, cost, safety,
//! sustainability) each apply a [`DesignRuleSet`] and produce an
//! [`AgentOpinion`]. Between rounds every agent sees its peers' latest
//! opinions through a [`FeedbackInbox`] and may nudge its score toward
//! theirs.
//!
//! ## Consensus
//!
//! The final-round opinions are folded into an expertise-weighted score and
//! a [`Verdict`]. Any critical issue vetoes approval regardless of score.

pub mod agent;
pub mod config;
pub mod consensus;
pub mod core;
pub mod proposal;
pub mod review;
pub mod util;

// Re-export commonly used types
pub use agent::{
    DesignRuleSet, ExpertiseLevel, FeedbackInbox, ScoreCard, Specialty, evaluate_proposal,
    rules_for,
};
pub use config::OutputFormat;
pub use consensus::{
    AttributedIssue, ConsensusOutcome, ConsensusPolicy, DEFAULT_APPROVE_THRESHOLD,
    WeightedOpinion, aggregate_issues, consensus_score,
};
pub use core::error::DomainError;
pub use proposal::{
    DesignContext, ElementType, GeometryInfo, Parameters, Proposal, ProposedAction,
    ProposedElement, ProposedModification,
};
pub use review::{
    AgentFailure, AgentOpinion, AgentSuggestion, DesignIssue, ReviewPhase, ReviewReport,
    RoundSummary, Severity, SuggestionType, ValidationResult, Verdict,
};
