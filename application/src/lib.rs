//! Application layer for design-council
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::ReviewOptions;
pub use ports::{
    progress::{NoProgress, ReviewProgressNotifier},
    specialist_agent::{AgentError, SpecialistAgent},
};
pub use use_cases::gather_suggestions::gather_suggestions;
pub use use_cases::precheck_action::precheck_action;
pub use use_cases::review_proposal::{
    ReviewError, ReviewProposalInput, ReviewProposalUseCase,
};
