//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("Expertise level must be in (0, 1], got {0}")]
    InvalidExpertiseLevel(f64),

    #[error("Invalid proposal: {0}")]
    InvalidProposal(String),

    #[error("Invalid agent id: {0}")]
    InvalidAgentId(String),

    #[error("Operation cancelled")]
    Cancelled,
}

impl DomainError {
    /// Check if this error represents a cancellation
    pub fn is_cancelled(&self) -> bool {
        matches!(self, DomainError::Cancelled)
    }
}
