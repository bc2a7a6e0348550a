//! Council membership from TOML (`[agents.<specialty>]` sections)
//!
//! Example configuration:
//!
//! ```toml
//! [agents.cost]
//! enabled = false
//!
//! [agents.structural]
//! expertise = 0.9
//! ```

use council_domain::{ExpertiseLevel, Specialty};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Overrides for one specialist
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileAgentEntry {
    pub enabled: bool,
    /// Consensus weight in (0, 1]; the specialty default when unset
    pub expertise: Option<f64>,
}

impl Default for FileAgentEntry {
    fn default() -> Self {
        Self {
            enabled: true,
            expertise: None,
        }
    }
}

impl FileAgentEntry {
    /// Parsed expertise override, `None` when unset or out of range.
    pub fn parse_expertise(&self) -> Option<ExpertiseLevel> {
        self.expertise.and_then(|e| ExpertiseLevel::new(e).ok())
    }
}

/// Per-specialty overrides keyed by specialty name
pub type FileAgentsConfig = BTreeMap<String, FileAgentEntry>;

/// Resolve the entry for a specialty, accepting any alias it parses from.
pub fn entry_for(agents: &FileAgentsConfig, specialty: Specialty) -> Option<&FileAgentEntry> {
    agents
        .iter()
        .find(|(key, _)| key.parse::<Specialty>().ok() == Some(specialty))
        .map(|(_, entry)| entry)
}
