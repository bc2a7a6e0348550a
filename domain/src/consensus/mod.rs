//! Consensus domain
//!
//! Pure, side-effect-free aggregation of a final-round opinion set into a
//! consensus score, a verdict and a merged issue list.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  final-round opinions (one per active agent)                 │
//! │          │                                                   │
//! │          ├──> consensus_score   Σ(score·expertise)/Σexpertise│
//! │          ├──> verdict           veto > threshold > revision  │
//! │          └──> aggregate_issues  dedup (code, location)       │
//! │                                 sort severity desc, agent id │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every function here is insensitive to the order in which opinions were
//! produced.

pub mod aggregate;
pub mod policy;

pub use aggregate::{AttributedIssue, WeightedOpinion, aggregate_issues, consensus_score};
pub use policy::{ConsensusOutcome, ConsensusPolicy, DEFAULT_APPROVE_THRESHOLD};
