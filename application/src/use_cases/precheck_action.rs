//! Precheck Action use case
//!
//! Asks every active agent for its fast verdict on a single action.

use crate::ports::specialist_agent::SpecialistAgent;
use council_domain::{ProposedAction, ValidationResult};
use std::sync::Arc;
use tracing::debug;

/// Merge every active agent's pre-check: invalid if any agent rejects,
/// with all agents' issues concatenated in council order.
pub fn precheck_action(
    agents: &[Arc<dyn SpecialistAgent>],
    action: &ProposedAction,
) -> ValidationResult {
    agents
        .iter()
        .filter(|agent| agent.is_active())
        .fold(ValidationResult::valid(), |merged, agent| {
            let result = agent.validate_action(action);
            if !result.is_valid {
                debug!("{} rejected {} action", agent.agent_id(), action.kind());
            }
            merged.merge(result)
        })
}
