//! Port definitions (interfaces for external adapters)

pub mod progress;
pub mod specialist_agent;
