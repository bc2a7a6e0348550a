//! Gather Suggestions use case
//!
//! Merges the suggestion streams of every active agent into one ranked list.

use crate::ports::specialist_agent::SpecialistAgent;
use council_domain::{AgentSuggestion, DesignContext};
use futures::StreamExt;
use futures::stream;
use std::sync::Arc;
use tracing::debug;

/// Collect all active agents' suggestions, highest confidence × impact
/// first, ties broken by agent id then title.
pub async fn gather_suggestions(
    agents: &[Arc<dyn SpecialistAgent>],
    context: &DesignContext,
) -> Vec<AgentSuggestion> {
    let streams = agents
        .iter()
        .filter(|agent| agent.is_active())
        .map(|agent| agent.suggest(context));

    let mut suggestions: Vec<AgentSuggestion> = stream::select_all(streams).collect().await;
    suggestions.sort_by(|a, b| {
        b.priority()
            .total_cmp(&a.priority())
            .then_with(|| a.agent_id.cmp(&b.agent_id))
            .then_with(|| a.title.cmp(&b.title))
    });

    debug!("Gathered {} suggestions", suggestions.len());
    suggestions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::test_support::MockAgent;

    #[tokio::test]
    async fn test_suggestions_ranked_by_priority_then_agent() {
        let agents = vec![MockAgent::fixed("b", 1.0).shared(), MockAgent::fixed("a", 1.0).shared()];
        let suggestions = gather_suggestions(&agents, &DesignContext::default()).await;

        let order: Vec<(&str, &str)> = suggestions
            .iter()
            .map(|s| (s.agent_id.as_str(), s.title.as_str()))
            .collect();
        assert_eq!(order, vec![("a", "high"), ("b", "high"), ("a", "low"), ("b", "low")]);
    }

    #[tokio::test]
    async fn test_streams_are_restartable() {
        let agents = vec![MockAgent::fixed("a", 1.0).shared()];
        let first = gather_suggestions(&agents, &DesignContext::default()).await;
        let second = gather_suggestions(&agents, &DesignContext::default()).await;
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_no_agents_no_suggestions() {
        assert!(gather_suggestions(&[], &DesignContext::default()).await.is_empty());
    }
}
