//! Configuration file loading for design-council
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `--config <path>` specified file
//! 2. Project root: `./council.toml` or `./.council.toml`
//! 3. XDG config: `$XDG_CONFIG_HOME/design-council/config.toml`
//! 4. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigIssue, FileAgentEntry, FileAgentsConfig, FileConfig, FileOutputConfig,
    FileReviewConfig, entry_for,
};
pub use loader::ConfigLoader;
