//! Council membership assembled from the standard specialists

use super::rule_based::RuleBasedAgent;
use crate::config::{FileAgentsConfig, entry_for};
use council_application::SpecialistAgent;
use council_domain::Specialty;
use std::sync::Arc;
use tracing::{debug, warn};

/// The set of agents taking part in a review.
#[derive(Clone)]
pub struct AgentRoster {
    agents: Vec<Arc<RuleBasedAgent>>,
}

impl AgentRoster {
    /// One agent per specialty with default ids and expertise.
    pub fn standard() -> Self {
        Self {
            agents: Specialty::all()
                .into_iter()
                .map(|s| Arc::new(RuleBasedAgent::standard(s)))
                .collect(),
        }
    }

    /// Standard roster with `[agents.*]` overrides applied.
    ///
    /// Disabled specialties stay in the roster as inactive agents so that
    /// the coordinator reports them as skipped rather than missing.
    pub fn from_config(config: &FileAgentsConfig) -> Self {
        let agents = Specialty::all()
            .into_iter()
            .map(|specialty| {
                let mut agent = RuleBasedAgent::standard(specialty);
                if let Some(entry) = entry_for(config, specialty) {
                    agent = agent.with_active(entry.enabled);
                    match (entry.expertise, entry.parse_expertise()) {
                        (_, Some(expertise)) => agent = agent.with_expertise(expertise),
                        (Some(raw), None) => warn!(
                            "Ignoring expertise {} for {}, using default {}",
                            raw,
                            specialty.as_str(),
                            specialty.default_expertise().value()
                        ),
                        (None, None) => {}
                    }
                }
                Arc::new(agent)
            })
            .collect::<Vec<_>>();

        debug!(
            "Roster: {}",
            agents
                .iter()
                .map(|a| format!("{}{}", a.agent_id(), if a.is_active() { "" } else { " (off)" }))
                .collect::<Vec<_>>()
                .join(", ")
        );
        Self { agents }
    }

    /// Agents as coordinator ports.
    pub fn agents(&self) -> Vec<Arc<dyn SpecialistAgent>> {
        self.agents
            .iter()
            .map(|a| Arc::clone(a) as Arc<dyn SpecialistAgent>)
            .collect()
    }

    pub fn get(&self, agent_id: &str) -> Option<&Arc<RuleBasedAgent>> {
        self.agents.iter().find(|a| a.agent_id() == agent_id)
    }

    pub fn active_count(&self) -> usize {
        self.agents.iter().filter(|a| a.is_active()).count()
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }
}

impl Default for AgentRoster {
    fn default() -> Self {
        Self::standard()
    }
}
