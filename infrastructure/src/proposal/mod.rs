//! Proposal file loading

mod loader;

pub use loader::{ProposalLoadError, ProposalLoader};
