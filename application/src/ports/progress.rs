//! Progress notification port
//!
//! Defines the interface for reporting progress during a design review.

use council_domain::{RoundSummary, Verdict};

/// Callback for progress updates during a review
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (progress bars, plain log lines, etc.)
pub trait ReviewProgressNotifier: Send + Sync {
    /// Called once before the first round
    fn on_review_start(&self, _proposal_id: &str, _agents: usize) {}

    /// Called when a round starts
    fn on_round_start(&self, round: usize, agents: usize);

    /// Called when an agent returns an opinion
    fn on_agent_complete(&self, round: usize, agent_id: &str, score: f64);

    /// Called when an agent's evaluation is replaced by an abstain opinion
    fn on_agent_abstain(&self, round: usize, agent_id: &str, reason: &str);

    /// Called when a round completes
    fn on_round_complete(&self, summary: &RoundSummary);

    /// Called once the verdict is known
    fn on_verdict(&self, _verdict: Verdict, _consensus_score: f64) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl ReviewProgressNotifier for NoProgress {
    fn on_round_start(&self, _round: usize, _agents: usize) {}
    fn on_agent_complete(&self, _round: usize, _agent_id: &str, _score: f64) {}
    fn on_agent_abstain(&self, _round: usize, _agent_id: &str, _reason: &str) {}
    fn on_round_complete(&self, _summary: &RoundSummary) {}
}
