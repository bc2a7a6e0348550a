//! Proposal domain
//!
//! Proposed building changes as they arrive from the creation pipeline, the
//! single-action form used for pre-checks, and the project context used to
//! pick thresholds.

pub mod action;
pub mod context;
pub mod element_type;
pub mod entities;

pub use action::ProposedAction;
pub use context::DesignContext;
pub use element_type::ElementType;
pub use entities::{GeometryInfo, Parameters, Proposal, ProposedElement, ProposedModification};
