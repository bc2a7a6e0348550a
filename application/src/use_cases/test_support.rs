//! Mock agents shared by use case tests.

use crate::ports::specialist_agent::{AgentError, SpecialistAgent};
use async_trait::async_trait;
use council_domain::agent::apply_feedback;
use council_domain::{
    AgentOpinion, AgentSuggestion, DesignContext, DesignIssue, ExpertiseLevel, FeedbackInbox,
    Proposal, ProposedAction, Specialty, SuggestionType, ValidationResult,
};
use futures::StreamExt;
use futures::stream::{self, BoxStream};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, Copy)]
pub(crate) enum Behavior {
    /// Always the same score.
    Fixed(f64),
    /// Base score nudged toward the peer mean.
    FollowPeers(f64),
    Fail,
    Panic,
    /// Runs until the review is cancelled.
    Hang,
}

pub(crate) struct MockAgent {
    id: String,
    specialty: Specialty,
    expertise: ExpertiseLevel,
    active: bool,
    behavior: Behavior,
    issues: Vec<DesignIssue>,
    rejects_actions: bool,
    last_feedback: Mutex<Vec<String>>,
    evaluations: AtomicUsize,
}

impl MockAgent {
    pub(crate) fn new(id: &str, behavior: Behavior) -> Self {
        Self {
            id: id.to_string(),
            specialty: Specialty::Architectural,
            expertise: ExpertiseLevel::full(),
            active: true,
            behavior,
            issues: Vec::new(),
            rejects_actions: false,
            last_feedback: Mutex::new(Vec::new()),
            evaluations: AtomicUsize::new(0),
        }
    }

    pub(crate) fn fixed(id: &str, score: f64) -> Self {
        Self::new(id, Behavior::Fixed(score))
    }

    pub(crate) fn with_expertise(mut self, expertise: f64) -> Self {
        self.expertise = ExpertiseLevel::new(expertise).unwrap();
        self
    }

    pub(crate) fn with_issue(mut self, issue: DesignIssue) -> Self {
        self.issues.push(issue);
        self
    }

    pub(crate) fn inactive(mut self) -> Self {
        self.active = false;
        self
    }

    pub(crate) fn rejecting_actions(mut self) -> Self {
        self.rejects_actions = true;
        self
    }

    pub(crate) fn shared(self) -> Arc<dyn SpecialistAgent> {
        Arc::new(self)
    }

    pub(crate) fn evaluations(&self) -> usize {
        self.evaluations.load(Ordering::SeqCst)
    }

    /// Peers present in the inbox at the latest evaluation.
    pub(crate) fn feedback_from(&self) -> Vec<String> {
        self.last_feedback.lock().unwrap().clone()
    }

    fn opinion(&self, score: f64) -> AgentOpinion {
        AgentOpinion::new(&self.id, self.specialty, score).with_issues(self.issues.clone())
    }
}

#[async_trait]
impl SpecialistAgent for MockAgent {
    fn agent_id(&self) -> &str {
        &self.id
    }

    fn specialty(&self) -> Specialty {
        self.specialty
    }

    fn expertise_level(&self) -> ExpertiseLevel {
        self.expertise
    }

    fn is_active(&self) -> bool {
        self.active
    }

    async fn evaluate(
        &self,
        _proposal: &Proposal,
        _context: Option<&DesignContext>,
        feedback: &FeedbackInbox,
        cancellation: &CancellationToken,
    ) -> Result<AgentOpinion, AgentError> {
        if cancellation.is_cancelled() {
            return Err(AgentError::Cancelled);
        }
        self.evaluations.fetch_add(1, Ordering::SeqCst);
        *self.last_feedback.lock().unwrap() =
            feedback.peers().map(|o| o.agent_id().to_string()).collect();

        match self.behavior {
            Behavior::Fixed(score) => Ok(self.opinion(score)),
            Behavior::FollowPeers(base) => {
                Ok(self.opinion(apply_feedback(base, feedback.peer_mean_score())))
            }
            Behavior::Fail => Err(AgentError::EvaluationFailed("rule table missing".into())),
            Behavior::Panic => panic!("mock agent blew up"),
            Behavior::Hang => {
                cancellation.cancelled().await;
                Err(AgentError::Cancelled)
            }
        }
    }

    fn suggest(&self, _context: &DesignContext) -> BoxStream<'static, AgentSuggestion> {
        let id = self.id.clone();
        stream::iter(vec![
            AgentSuggestion::new(&id, SuggestionType::Improvement, "low", "low priority")
                .with_confidence(0.5)
                .with_impact(0.2),
            AgentSuggestion::new(&id, SuggestionType::BestPractice, "high", "high priority")
                .with_confidence(0.9)
                .with_impact(0.9),
        ])
        .boxed()
    }

    fn validate_action(&self, _action: &ProposedAction) -> ValidationResult {
        if self.rejects_actions {
            ValidationResult::rejected_by(
                DesignIssue::error("MOCK_REJECT", "rejected").at(&self.id),
            )
        } else {
            ValidationResult::valid()
        }
    }
}
