//! Peer feedback inbox held for one agent during one review

use crate::review::opinion::AgentOpinion;
use std::collections::BTreeMap;

/// Last opinion received from each peer.
///
/// One slot per peer id; a newer opinion from the same peer replaces the
/// older one. Opinions carrying the owner's own id are dropped.
#[derive(Debug, Clone, Default)]
pub struct FeedbackInbox {
    owner: String,
    slots: BTreeMap<String, AgentOpinion>,
}

impl FeedbackInbox {
    pub fn new(owner: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            slots: BTreeMap::new(),
        }
    }

    /// Store a peer opinion. Returns `false` if it was the owner's own.
    pub fn receive(&mut self, opinion: AgentOpinion) -> bool {
        if opinion.agent_id() == self.owner {
            return false;
        }
        self.slots.insert(opinion.agent_id().to_string(), opinion);
        true
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn get(&self, peer_id: &str) -> Option<&AgentOpinion> {
        self.slots.get(peer_id)
    }

    pub fn peers(&self) -> impl Iterator<Item = &AgentOpinion> {
        self.slots.values()
    }

    /// Mean score of stored peer opinions, ignoring abstain placeholders.
    pub fn peer_mean_score(&self) -> Option<f64> {
        let scores: Vec<f64> = self
            .slots
            .values()
            .filter(|o| !o.is_abstained())
            .map(AgentOpinion::score)
            .collect();
        if scores.is_empty() {
            None
        } else {
            Some(scores.iter().sum::<f64>() / scores.len() as f64)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::specialty::Specialty;

    #[test]
    fn test_own_opinion_ignored() {
        let mut inbox = FeedbackInbox::new("cost-agent");
        let accepted = inbox.receive(AgentOpinion::new("cost-agent", Specialty::Cost, 0.2));
        assert!(!accepted);
        assert!(inbox.is_empty());
    }

    #[test]
    fn test_last_write_wins_per_peer() {
        let mut inbox = FeedbackInbox::new("cost-agent");
        inbox.receive(AgentOpinion::new("safety-agent", Specialty::Safety, 0.2));
        inbox.receive(AgentOpinion::new("safety-agent", Specialty::Safety, 0.9));
        inbox.receive(AgentOpinion::new("mep-agent", Specialty::Mep, 0.5));

        assert_eq!(inbox.len(), 2);
        assert_eq!(inbox.get("safety-agent").map(|o| o.score()), Some(0.9));
    }

    #[test]
    fn test_peer_mean_skips_abstentions() {
        let mut inbox = FeedbackInbox::new("cost-agent");
        assert_eq!(inbox.peer_mean_score(), None);

        inbox.receive(AgentOpinion::new("a", Specialty::Safety, 0.8));
        inbox.receive(AgentOpinion::new("b", Specialty::Mep, 0.4));
        inbox.receive(AgentOpinion::abstain("c", Specialty::Structural, "panic"));

        let mean = inbox.peer_mean_score().unwrap();
        assert!((mean - 0.6).abs() < 1e-12);
    }
}
