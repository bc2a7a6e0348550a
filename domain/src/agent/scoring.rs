//! Turning rule findings into a scored opinion

use super::feedback::FeedbackInbox;
use super::specialty::Specialty;
use crate::review::issue::DesignIssue;
use crate::review::opinion::AgentOpinion;
use crate::util::clamp_unit;
use std::collections::BTreeMap;

/// Fraction of the gap to the peer mean applied as correction.
pub const FEEDBACK_WEIGHT: f64 = 0.2;

/// Largest correction peer feedback may apply, in either direction.
pub const MAX_FEEDBACK_CORRECTION: f64 = 0.05;

/// Accumulates findings while a rule set runs.
///
/// Every aspect starts at 1.0; each flagged issue subtracts its severity
/// penalty from the aspect it belongs to and from the overall baseline.
#[derive(Debug, Clone)]
pub struct ScoreCard {
    aspects: BTreeMap<String, f64>,
    issues: Vec<DesignIssue>,
    strengths: Vec<String>,
}

impl ScoreCard {
    pub fn new(aspects: &[&str]) -> Self {
        Self {
            aspects: aspects.iter().map(|a| (a.to_string(), 1.0)).collect(),
            issues: Vec::new(),
            strengths: Vec::new(),
        }
    }

    /// Record an issue against an aspect.
    pub fn flag(&mut self, aspect: &str, issue: DesignIssue) {
        let penalty = issue.severity.penalty();
        let slot = self.aspects.entry(aspect.to_string()).or_insert(1.0);
        *slot = clamp_unit(*slot - penalty);
        self.issues.push(issue);
    }

    pub fn strength(&mut self, strength: impl Into<String>) {
        self.strengths.push(strength.into());
    }

    pub fn issues(&self) -> &[DesignIssue] {
        &self.issues
    }

    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    /// `1.0 - Σ penalty`, clamped.
    pub fn base_score(&self) -> f64 {
        let penalty: f64 = self.issues.iter().map(|i| i.severity.penalty()).sum();
        clamp_unit(1.0 - penalty)
    }

    /// Build the opinion, nudging the base score toward peer feedback.
    pub fn into_opinion(
        self,
        agent_id: &str,
        specialty: Specialty,
        feedback: &FeedbackInbox,
    ) -> AgentOpinion {
        let score = apply_feedback(self.base_score(), feedback.peer_mean_score());
        let mut opinion = AgentOpinion::new(agent_id, specialty, score).with_issues(self.issues);
        for (aspect, value) in self.aspects {
            opinion = opinion.with_aspect(aspect, value);
        }
        for strength in self.strengths {
            opinion = opinion.with_strength(strength);
        }
        opinion
    }
}

/// Move `own` toward `peer_mean` by a bounded correction.
pub fn apply_feedback(own: f64, peer_mean: Option<f64>) -> f64 {
    match peer_mean {
        Some(mean) => {
            let correction = (FEEDBACK_WEIGHT * (mean - own))
                .clamp(-MAX_FEEDBACK_CORRECTION, MAX_FEEDBACK_CORRECTION);
            clamp_unit(own + correction)
        }
        None => clamp_unit(own),
    }
}
