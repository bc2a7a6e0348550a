//! Infrastructure layer for design-council
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration and proposal
//! file loading.

pub mod agents;
pub mod config;
pub mod proposal;

// Re-export commonly used types
pub use agents::{AgentRoster, RuleBasedAgent};
pub use config::{
    ConfigIssue, ConfigLoader, FileAgentEntry, FileAgentsConfig, FileConfig, FileOutputConfig,
    FileReviewConfig,
};
pub use proposal::{ProposalLoadError, ProposalLoader};
