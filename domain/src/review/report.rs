//! Review report returned by the coordinator

use super::opinion::AgentOpinion;
use super::verdict::Verdict;
use crate::consensus::AttributedIssue;
use crate::util::current_timestamp;
use serde::Serialize;
use std::collections::BTreeMap;

/// Summary of one completed round.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoundSummary {
    /// 1-indexed
    pub round: usize,
    /// Largest absolute per-agent score change versus the previous round;
    /// `None` for round 1.
    pub max_delta: Option<f64>,
    /// Agents whose score moved by more than the revision epsilon.
    pub revised_agents: Vec<String>,
    pub abstentions: usize,
}

/// Diagnostic recorded when an agent's evaluation was replaced by an abstain
/// opinion.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgentFailure {
    pub agent_id: String,
    pub round: usize,
    pub reason: String,
}

/// Outcome of reviewing one proposal.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewReport {
    pub proposal_id: String,
    pub verdict: Verdict,
    pub consensus_score: f64,
    /// Final-round opinions keyed by agent id.
    pub opinions: BTreeMap<String, AgentOpinion>,
    /// Deduplicated issues, most severe first.
    pub issues: Vec<AttributedIssue>,
    /// Number of completed rounds.
    pub rounds: usize,
    pub converged: bool,
    pub history: Vec<RoundSummary>,
    pub failures: Vec<AgentFailure>,
    /// Milliseconds since the Unix epoch.
    pub completed_at: u64,
}

impl ReviewReport {
    /// Report for a review that was cancelled: no opinions are recorded and
    /// the proposal stays un-reviewed.
    pub fn cancelled(proposal_id: impl Into<String>, rounds: usize) -> Self {
        Self {
            proposal_id: proposal_id.into(),
            verdict: Verdict::Cancelled,
            consensus_score: 0.0,
            opinions: BTreeMap::new(),
            issues: Vec::new(),
            rounds,
            converged: false,
            history: Vec::new(),
            failures: Vec::new(),
            completed_at: current_timestamp(),
        }
    }

    pub fn opinion(&self, agent_id: &str) -> Option<&AgentOpinion> {
        self.opinions.get(agent_id)
    }

    /// Opinions that came from a completed evaluation.
    pub fn genuine_opinions(&self) -> impl Iterator<Item = &AgentOpinion> {
        self.opinions.values().filter(|o| !o.is_abstained())
    }

    pub fn abstentions(&self) -> impl Iterator<Item = &AgentOpinion> {
        self.opinions.values().filter(|o| o.is_abstained())
    }

    pub fn positive_count(&self) -> usize {
        self.opinions.values().filter(|o| o.is_positive()).count()
    }

    /// Visual opinion summary, e.g. `[●●○●]` (● = positive).
    pub fn opinion_summary(&self) -> String {
        let mut summary = String::from("[");
        for opinion in self.opinions.values() {
            summary.push(if opinion.is_positive() { '●' } else { '○' });
        }
        summary.push(']');
        summary
    }
}
