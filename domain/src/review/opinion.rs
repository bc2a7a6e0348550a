//! Agent opinions
//!
//! An [`AgentOpinion`] is one agent's scored evaluation of a proposal in one
//! round. Opinions are built fresh every round and never mutated after
//! construction: the coordinator compares distinct values between rounds.

use super::issue::{DesignIssue, Severity};
use crate::agent::specialty::Specialty;
use crate::util::{clamp_unit, current_timestamp};
use serde::Serialize;
use std::collections::BTreeMap;

/// Minimum score for an opinion to count as positive (inclusive).
pub const POSITIVE_THRESHOLD: f64 = 0.70;

/// Score given to an abstain placeholder.
pub const ABSTAIN_SCORE: f64 = 0.5;

/// Issue code carried by abstain placeholders.
pub const ABSTAIN_ISSUE_CODE: &str = "AGENT_ABSTAINED";

/// One agent's evaluation of a proposal.
///
/// Every score is clamped into `[0, 1]` on the way in, so the invariant
/// holds for the lifetime of the value.
///
/// ```
/// use council_domain::review::AgentOpinion;
/// use council_domain::agent::Specialty;
///
/// let opinion = AgentOpinion::new("safety-agent", Specialty::Safety, 0.70);
/// assert!(opinion.is_positive());
///
/// let opinion = AgentOpinion::new("safety-agent", Specialty::Safety, 0.6999);
/// assert!(!opinion.is_positive());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgentOpinion {
    agent_id: String,
    specialty: Specialty,
    score: f64,
    aspect_scores: BTreeMap<String, f64>,
    issues: Vec<DesignIssue>,
    strengths: Vec<String>,
    is_revised: bool,
    abstained: bool,
    /// Milliseconds since the Unix epoch.
    timestamp: u64,
}

impl AgentOpinion {
    pub fn new(agent_id: impl Into<String>, specialty: Specialty, score: f64) -> Self {
        Self {
            agent_id: agent_id.into(),
            specialty,
            score: clamp_unit(score),
            aspect_scores: BTreeMap::new(),
            issues: Vec::new(),
            strengths: Vec::new(),
            is_revised: false,
            abstained: false,
            timestamp: current_timestamp(),
        }
    }

    /// Neutral placeholder substituted when an agent fails or times out.
    pub fn abstain(
        agent_id: impl Into<String>,
        specialty: Specialty,
        reason: impl Into<String>,
    ) -> Self {
        let agent_id = agent_id.into();
        let reason = reason.into();
        let issue = DesignIssue::warning(
            ABSTAIN_ISSUE_CODE,
            format!("{} could not complete its evaluation: {}", agent_id, reason),
        )
        .with_detail("reason", reason);

        let mut opinion = Self::new(agent_id, specialty, ABSTAIN_SCORE).with_issue(issue);
        opinion.abstained = true;
        opinion
    }

    pub fn with_aspect(mut self, aspect: impl Into<String>, score: f64) -> Self {
        self.aspect_scores.insert(aspect.into(), clamp_unit(score));
        self
    }

    pub fn with_issue(mut self, issue: DesignIssue) -> Self {
        self.issues.push(issue);
        self
    }

    pub fn with_issues(mut self, issues: impl IntoIterator<Item = DesignIssue>) -> Self {
        self.issues.extend(issues);
        self
    }

    pub fn with_strength(mut self, strength: impl Into<String>) -> Self {
        self.strengths.push(strength.into());
        self
    }

    /// Copy of this opinion flagged as revised relative to the prior round.
    pub fn into_revised(mut self, revised: bool) -> Self {
        self.is_revised = revised;
        self
    }

    pub fn agent_id(&self) -> &str {
        &self.agent_id
    }

    pub fn specialty(&self) -> Specialty {
        self.specialty
    }

    pub fn score(&self) -> f64 {
        self.score
    }

    pub fn aspect_scores(&self) -> &BTreeMap<String, f64> {
        &self.aspect_scores
    }

    pub fn aspect(&self, name: &str) -> Option<f64> {
        self.aspect_scores.get(name).copied()
    }

    pub fn issues(&self) -> &[DesignIssue] {
        &self.issues
    }

    pub fn strengths(&self) -> &[String] {
        &self.strengths
    }

    pub fn is_revised(&self) -> bool {
        self.is_revised
    }

    pub fn is_abstained(&self) -> bool {
        self.abstained
    }

    pub fn timestamp(&self) -> u64 {
        self.timestamp
    }

    /// `score >= 0.70`, closed boundary.
    pub fn is_positive(&self) -> bool {
        self.score >= POSITIVE_THRESHOLD
    }

    pub fn has_critical_issues(&self) -> bool {
        self.issues.iter().any(DesignIssue::is_critical)
    }

    pub fn has_issues_at_least(&self, severity: Severity) -> bool {
        self.issues.iter().any(|i| i.severity >= severity)
    }

    /// Highest severity among this opinion's issues.
    pub fn max_severity(&self) -> Option<Severity> {
        self.issues.iter().map(|i| i.severity).max()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positive_boundary_is_closed() {
        assert!(AgentOpinion::new("a", Specialty::Cost, 0.70).is_positive());
        assert!(!AgentOpinion::new("a", Specialty::Cost, 0.699999).is_positive());
        assert!(AgentOpinion::new("a", Specialty::Cost, 1.0).is_positive());
    }

    #[test]
    fn test_scores_are_clamped() {
        let opinion = AgentOpinion::new("a", Specialty::Mep, 1.4)
            .with_aspect("clearance", -0.3)
            .with_aspect("routing", 7.0);

        assert_eq!(opinion.score(), 1.0);
        assert_eq!(opinion.aspect("clearance"), Some(0.0));
        assert_eq!(opinion.aspect("routing"), Some(1.0));
    }

    #[test]
    fn test_has_critical_issues() {
        let calm = AgentOpinion::new("a", Specialty::Safety, 0.9)
            .with_issue(DesignIssue::error("E", "error"));
        assert!(!calm.has_critical_issues());
        assert_eq!(calm.max_severity(), Some(Severity::Error));

        let vetoed = calm.with_issue(DesignIssue::critical("C", "critical"));
        assert!(vetoed.has_critical_issues());
        assert!(vetoed.has_issues_at_least(Severity::Error));
    }

    #[test]
    fn test_abstain_opinion_shape() {
        let opinion = AgentOpinion::abstain("mep-agent", Specialty::Mep, "timed out");

        assert!(opinion.is_abstained());
        assert_eq!(opinion.score(), ABSTAIN_SCORE);
        assert_eq!(opinion.issues().len(), 1);
        assert_eq!(opinion.issues()[0].severity, Severity::Warning);
        assert_eq!(opinion.issues()[0].code, ABSTAIN_ISSUE_CODE);
        assert!(opinion.issues()[0].description.contains("timed out"));
    }

    #[test]
    fn test_into_revised_produces_flagged_value() {
        let original = AgentOpinion::new("a", Specialty::Cost, 0.8);
        let revised = original.clone().into_revised(true);

        assert!(!original.is_revised());
        assert!(revised.is_revised());
        assert_eq!(revised.score(), original.score());
    }
}
