//! Specialist agent port
//!
//! Defines the capability interface every review participant implements.

use async_trait::async_trait;
use council_domain::{
    AgentOpinion, AgentSuggestion, DesignContext, ExpertiseLevel, FeedbackInbox, Proposal,
    ProposedAction, Specialty, ValidationResult,
};
use futures::stream::BoxStream;
use std::time::Duration;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

/// Errors an agent may return from an evaluation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AgentError {
    #[error("Evaluation cancelled")]
    Cancelled,

    #[error("Evaluation timed out after {0:?}")]
    Timeout(Duration),

    #[error("Evaluation failed: {0}")]
    EvaluationFailed(String),

    #[error("Agent panicked: {0}")]
    Panicked(String),
}

impl AgentError {
    /// Check if this error represents a cancellation
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

/// A domain-specialist reviewer.
///
/// Implementations live in the infrastructure layer. Peer feedback is held
/// in a [`FeedbackInbox`] owned by the review that delivers it, so one
/// instance can take part in several independent reviews at once.
#[async_trait]
pub trait SpecialistAgent: Send + Sync {
    fn agent_id(&self) -> &str;

    fn specialty(&self) -> Specialty;

    /// Weight of this agent's score in the consensus.
    fn expertise_level(&self) -> ExpertiseLevel;

    /// Inactive agents are skipped by the coordinator.
    fn is_active(&self) -> bool {
        true
    }

    /// Evaluate a proposal, taking the peer feedback received so far in
    /// this review into account.
    ///
    /// Must return [`AgentError::Cancelled`] without producing an opinion
    /// if the token is already cancelled.
    async fn evaluate(
        &self,
        proposal: &Proposal,
        context: Option<&DesignContext>,
        feedback: &FeedbackInbox,
        cancellation: &CancellationToken,
    ) -> Result<AgentOpinion, AgentError>;

    /// Proposal-agnostic suggestions. Each call returns a fresh stream.
    fn suggest(&self, context: &DesignContext) -> BoxStream<'static, AgentSuggestion>;

    /// Fast synchronous pre-check of a single action.
    fn validate_action(&self, action: &ProposedAction) -> ValidationResult;

    /// Store a peer's opinion in this agent's inbox for the next evaluation.
    ///
    /// Opinions carrying this agent's own id are ignored.
    fn receive_feedback(&self, inbox: &mut FeedbackInbox, opinion: &AgentOpinion) {
        inbox.receive(opinion.clone());
    }
}
