//! Specialist agent adapters

mod roster;
mod rule_based;

#[cfg(test)]
mod scenarios;

pub use roster::AgentRoster;
pub use rule_based::RuleBasedAgent;
