//! Pure aggregation over a final-round opinion set

use crate::agent::specialty::ExpertiseLevel;
use crate::review::issue::DesignIssue;
use crate::review::opinion::AgentOpinion;
use serde::Serialize;
use std::cmp::Reverse;
use std::collections::HashSet;

/// An opinion paired with the expertise weight of the agent that gave it.
#[derive(Debug, Clone, Copy)]
pub struct WeightedOpinion<'a> {
    pub opinion: &'a AgentOpinion,
    pub expertise: ExpertiseLevel,
}

impl<'a> WeightedOpinion<'a> {
    pub fn new(opinion: &'a AgentOpinion, expertise: ExpertiseLevel) -> Self {
        Self { opinion, expertise }
    }
}

/// A design issue together with the agent that raised it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttributedIssue {
    pub agent_id: String,
    #[serde(flatten)]
    pub issue: DesignIssue,
}

/// Expertise-weighted mean of opinion scores.
///
/// Terms are summed in agent-id order, so the result is bit-identical for any
/// arrival order of the opinions. Returns `0.0` for an empty set.
///
/// ```
/// use council_domain::agent::{ExpertiseLevel, Specialty};
/// use council_domain::consensus::{consensus_score, WeightedOpinion};
/// use council_domain::review::AgentOpinion;
///
/// let a = AgentOpinion::new("a", Specialty::Cost, 1.0);
/// let b = AgentOpinion::new("b", Specialty::Safety, 0.5);
/// let score = consensus_score(&[
///     WeightedOpinion::new(&a, ExpertiseLevel::new(1.0).unwrap()),
///     WeightedOpinion::new(&b, ExpertiseLevel::new(1.0).unwrap()),
/// ]);
/// assert!((score - 0.75).abs() < 1e-12);
/// ```
pub fn consensus_score(opinions: &[WeightedOpinion<'_>]) -> f64 {
    let mut ordered: Vec<&WeightedOpinion<'_>> = opinions.iter().collect();
    ordered.sort_by(|a, b| a.opinion.agent_id().cmp(b.opinion.agent_id()));

    let (weighted, total) = ordered.iter().fold((0.0, 0.0), |(sum, weight), w| {
        let e = w.expertise.value();
        (sum + w.opinion.score() * e, weight + e)
    });

    if total > 0.0 { weighted / total } else { 0.0 }
}

/// Union of all opinions' issues, deduplicated by `(code, location)`.
///
/// Sorted by severity (most severe first), then agent id. When two agents
/// report the same `(code, location)`, the entry that sorts first is kept.
pub fn aggregate_issues<'a>(
    opinions: impl IntoIterator<Item = &'a AgentOpinion>,
) -> Vec<AttributedIssue> {
    let mut all: Vec<AttributedIssue> = opinions
        .into_iter()
        .flat_map(|opinion| {
            opinion.issues().iter().map(move |issue| AttributedIssue {
                agent_id: opinion.agent_id().to_string(),
                issue: issue.clone(),
            })
        })
        .collect();

    all.sort_by(|a, b| {
        (Reverse(a.issue.severity), &a.agent_id, &a.issue.code, &a.issue.location).cmp(&(
            Reverse(b.issue.severity),
            &b.agent_id,
            &b.issue.code,
            &b.issue.location,
        ))
    });

    let mut seen = HashSet::new();
    all.retain(|entry| {
        seen.insert((entry.issue.code.clone(), entry.issue.location.clone()))
    });
    all
}
