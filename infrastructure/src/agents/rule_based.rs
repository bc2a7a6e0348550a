//! Rule-table backed specialist agent

use async_trait::async_trait;
use council_application::{AgentError, SpecialistAgent};
use council_domain::{
    AgentOpinion, AgentSuggestion, DesignContext, DesignRuleSet, ExpertiseLevel, FeedbackInbox,
    Proposal, ProposedAction, Specialty, ValidationResult, evaluate_proposal, rules_for,
};
use futures::StreamExt;
use futures::stream::{self, BoxStream};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Specialist agent that applies one discipline's [`DesignRuleSet`].
///
/// Immutable once built; peer feedback arrives with each evaluation.
pub struct RuleBasedAgent {
    agent_id: String,
    rules: Arc<dyn DesignRuleSet>,
    expertise: ExpertiseLevel,
    active: bool,
}

impl RuleBasedAgent {
    pub fn new(
        agent_id: impl Into<String>,
        rules: Box<dyn DesignRuleSet>,
        expertise: ExpertiseLevel,
    ) -> Self {
        Self {
            agent_id: agent_id.into(),
            rules: Arc::from(rules),
            expertise,
            active: true,
        }
    }

    /// Agent with the default id, rule table and expertise for a specialty.
    pub fn standard(specialty: Specialty) -> Self {
        Self::new(
            specialty.default_agent_id(),
            rules_for(specialty),
            specialty.default_expertise(),
        )
    }

    pub fn with_expertise(mut self, expertise: ExpertiseLevel) -> Self {
        self.expertise = expertise;
        self
    }

    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }
}

#[async_trait]
impl SpecialistAgent for RuleBasedAgent {
    fn agent_id(&self) -> &str {
        &self.agent_id
    }

    fn specialty(&self) -> Specialty {
        self.rules.specialty()
    }

    fn expertise_level(&self) -> ExpertiseLevel {
        self.expertise
    }

    fn is_active(&self) -> bool {
        self.active
    }

    async fn evaluate(
        &self,
        proposal: &Proposal,
        context: Option<&DesignContext>,
        feedback: &FeedbackInbox,
        cancellation: &CancellationToken,
    ) -> Result<AgentOpinion, AgentError> {
        if cancellation.is_cancelled() {
            return Err(AgentError::Cancelled);
        }

        let fallback = DesignContext::default();
        let context = context.unwrap_or(&fallback);

        let opinion = evaluate_proposal(
            self.rules.as_ref(),
            &self.agent_id,
            proposal,
            context,
            feedback,
        );
        debug!(
            "{} evaluated {}: score {:.3}, {} issues, {} peers",
            self.agent_id,
            proposal.id,
            opinion.score(),
            opinion.issues().len(),
            feedback.len()
        );
        Ok(opinion)
    }

    fn suggest(&self, context: &DesignContext) -> BoxStream<'static, AgentSuggestion> {
        let rules = Arc::clone(&self.rules);
        let agent_id = self.agent_id.clone();
        let context = context.clone();

        // Nothing is computed until the stream is first polled.
        stream::once(async move { rules.suggestions(&agent_id, &context) })
            .flat_map(stream::iter)
            .boxed()
    }

    fn validate_action(&self, action: &ProposedAction) -> ValidationResult {
        self.rules.validate_action(action)
    }

    fn receive_feedback(&self, inbox: &mut FeedbackInbox, opinion: &AgentOpinion) {
        if !inbox.receive(opinion.clone()) {
            debug!("{} ignored its own opinion", self.agent_id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use council_domain::{ProposedElement, Severity};

    fn wall_proposal(thickness: f64) -> Proposal {
        Proposal::new("p", "wall").with_element(ProposedElement::wall(thickness, 3.0, 5.0))
    }

    #[tokio::test]
    async fn test_standard_agent_identity() {
        let agent = RuleBasedAgent::standard(Specialty::Safety);
        assert_eq!(agent.agent_id(), "safety-agent");
        assert_eq!(agent.specialty(), Specialty::Safety);
        assert_eq!(agent.expertise_level(), Specialty::Safety.default_expertise());
        assert!(agent.is_active());
    }

    fn empty_inbox(agent: &RuleBasedAgent) -> FeedbackInbox {
        FeedbackInbox::new(agent.agent_id())
    }

    #[tokio::test]
    async fn test_evaluate_without_context() {
        let agent = RuleBasedAgent::standard(Specialty::Structural);
        let opinion = agent
            .evaluate(&wall_proposal(0.2), None, &empty_inbox(&agent), &CancellationToken::new())
            .await
            .unwrap();
        assert_eq!(opinion.agent_id(), "structural-agent");
        assert_eq!(opinion.score(), 1.0);
    }

    #[tokio::test]
    async fn test_cancelled_token_aborts() {
        let agent = RuleBasedAgent::standard(Specialty::Cost);
        let token = CancellationToken::new();
        token.cancel();
        let result = agent
            .evaluate(&wall_proposal(0.2), None, &empty_inbox(&agent), &token)
            .await;
        assert_eq!(result, Err(AgentError::Cancelled));
    }

    #[tokio::test]
    async fn test_feedback_nudges_next_evaluation() {
        let agent = RuleBasedAgent::standard(Specialty::Structural);
        let token = CancellationToken::new();
        let mut inbox = empty_inbox(&agent);

        let before = agent
            .evaluate(&wall_proposal(0.1), None, &inbox, &token)
            .await
            .unwrap();
        agent.receive_feedback(
            &mut inbox,
            &AgentOpinion::new("safety-agent", Specialty::Safety, 1.0),
        );
        let after = agent
            .evaluate(&wall_proposal(0.1), None, &inbox, &token)
            .await
            .unwrap();

        assert!(after.score() > before.score());
        assert!(after.score() - before.score() <= 0.05 + 1e-12);
    }

    #[tokio::test]
    async fn test_own_feedback_ignored_and_last_write_wins() {
        let agent = RuleBasedAgent::standard(Specialty::Mep);
        let mut inbox = empty_inbox(&agent);
        agent.receive_feedback(&mut inbox, &AgentOpinion::new("mep-agent", Specialty::Mep, 0.1));
        assert!(inbox.is_empty());

        agent.receive_feedback(&mut inbox, &AgentOpinion::new("cost-agent", Specialty::Cost, 0.2));
        agent.receive_feedback(&mut inbox, &AgentOpinion::new("cost-agent", Specialty::Cost, 0.9));
        assert_eq!(inbox.len(), 1);
        assert_eq!(inbox.get("cost-agent").unwrap().score(), 0.9);
    }

    #[tokio::test]
    async fn test_inbox_is_not_retained_by_agent() {
        let agent = RuleBasedAgent::standard(Specialty::Structural);
        let token = CancellationToken::new();
        let mut inbox = empty_inbox(&agent);
        agent.receive_feedback(&mut inbox, &AgentOpinion::new("cost-agent", Specialty::Cost, 1.0));
        agent
            .evaluate(&wall_proposal(0.1), None, &inbox, &token)
            .await
            .unwrap();

        let fresh = agent
            .evaluate(&wall_proposal(0.1), None, &empty_inbox(&agent), &token)
            .await
            .unwrap();
        let baseline = RuleBasedAgent::standard(Specialty::Structural)
            .evaluate(&wall_proposal(0.1), None, &empty_inbox(&agent), &token)
            .await
            .unwrap();
        assert_eq!(fresh.score(), baseline.score());
    }

    #[tokio::test]
    async fn test_suggest_is_restartable() {
        let agent = RuleBasedAgent::standard(Specialty::Architectural);
        let context = DesignContext::default();
        let first: Vec<_> = agent.suggest(&context).collect().await;
        let second: Vec<_> = agent.suggest(&context).collect().await;
        assert!(!first.is_empty());
        assert_eq!(first, second);
    }

    #[test]
    fn test_validate_action_delegates_to_rules() {
        let agent = RuleBasedAgent::standard(Specialty::Structural);
        let result = agent.validate_action(&ProposedAction::Delete {
            element_id: "W-1".into(),
            element_type: council_domain::ElementType::Wall,
            load_bearing: true,
        });
        assert!(!result.is_valid);
        assert_eq!(result.issues[0].severity, Severity::Critical);
    }
}
