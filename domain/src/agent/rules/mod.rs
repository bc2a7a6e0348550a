//! Specialist rule tables
//!
//! Each discipline is a [`DesignRuleSet`]: a small table of thresholds plus
//! the checks that apply them. Rule sets are plain values with no shared
//! base behaviour; [`evaluate_proposal`] is the one place that turns a rule
//! set's findings into an [`AgentOpinion`].

pub mod architectural;
pub mod cost;
pub mod mep;
pub mod safety;
pub mod structural;
pub mod sustainability;

pub use architectural::ArchitecturalRules;
pub use cost::CostRules;
pub use mep::MepRules;
pub use safety::SafetyRules;
pub use structural::StructuralRules;
pub use sustainability::SustainabilityRules;

use super::feedback::FeedbackInbox;
use super::scoring::ScoreCard;
use super::specialty::Specialty;
use crate::proposal::{DesignContext, Proposal, ProposedAction};
use crate::review::opinion::AgentOpinion;
use crate::review::suggestion::AgentSuggestion;
use crate::review::validation::ValidationResult;

/// Domain checks for one discipline.
pub trait DesignRuleSet: Send + Sync {
    fn specialty(&self) -> Specialty;

    /// Named sub-scores this rule set reports.
    fn aspects(&self) -> &'static [&'static str];

    /// Apply the rule table to every element and modification in the proposal.
    fn check(&self, proposal: &Proposal, context: &DesignContext, card: &mut ScoreCard);

    /// Proposal-agnostic advice for the given project context.
    fn suggestions(&self, agent_id: &str, context: &DesignContext) -> Vec<AgentSuggestion>;

    /// Minimal pre-check of a single action.
    fn validate_action(&self, action: &ProposedAction) -> ValidationResult;
}

/// Evaluate a proposal with a rule set and peer feedback.
///
/// An empty proposal yields a clean, positive opinion.
pub fn evaluate_proposal(
    rules: &dyn DesignRuleSet,
    agent_id: &str,
    proposal: &Proposal,
    context: &DesignContext,
    feedback: &FeedbackInbox,
) -> AgentOpinion {
    let mut card = ScoreCard::new(rules.aspects());

    if proposal.is_empty() {
        card.strength("No changes to evaluate");
    } else {
        rules.check(proposal, context, &mut card);
        if card.is_clean() {
            card.strength(format!(
                "No {} concerns found",
                rules.specialty().as_str()
            ));
        }
    }

    card.into_opinion(agent_id, rules.specialty(), feedback)
}

/// Standard rule set for a specialty.
pub fn rules_for(specialty: Specialty) -> Box<dyn DesignRuleSet> {
    match specialty {
        Specialty::Architectural => Box::new(ArchitecturalRules::default()),
        Specialty::Structural => Box::new(StructuralRules::default()),
        Specialty::Mep => Box::new(MepRules::default()),
        Specialty::Cost => Box::new(CostRules::default()),
        Specialty::Safety => Box::new(SafetyRules::default()),
        Specialty::Sustainability => Box::new(SustainabilityRules::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proposal::ProposedElement;

    #[test]
    fn test_empty_proposal_is_neutral_positive_for_every_specialty() {
        let proposal = Proposal::new("p-empty", "no-op");
        for specialty in Specialty::all() {
            let rules = rules_for(specialty);
            let opinion = evaluate_proposal(
                rules.as_ref(),
                specialty.default_agent_id(),
                &proposal,
                &DesignContext::default(),
                &FeedbackInbox::new(specialty.default_agent_id()),
            );
            assert!(opinion.issues().is_empty(), "{specialty}");
            assert!(opinion.score() > 0.0);
            assert!(opinion.is_positive());
        }
    }

    #[test]
    fn test_rules_for_matches_specialty() {
        for specialty in Specialty::all() {
            assert_eq!(rules_for(specialty).specialty(), specialty);
        }
    }

    #[test]
    fn test_reference_wall_is_clean_for_every_specialty() {
        let proposal =
            Proposal::new("p-wall", "wall").with_element(ProposedElement::wall(0.2, 3.0, 5.0));
        for specialty in Specialty::all() {
            let rules = rules_for(specialty);
            let opinion = evaluate_proposal(
                rules.as_ref(),
                specialty.default_agent_id(),
                &proposal,
                &DesignContext::default(),
                &FeedbackInbox::new(specialty.default_agent_id()),
            );
            assert!(
                opinion.issues().is_empty(),
                "{specialty}: {:?}",
                opinion.issues()
            );
            assert_eq!(opinion.score(), 1.0);
        }
    }

    #[test]
    fn test_every_rule_set_offers_suggestions() {
        for specialty in Specialty::all() {
            let rules = rules_for(specialty);
            let suggestions = rules.suggestions("x", &DesignContext::default());
            assert!(!suggestions.is_empty(), "{specialty}");
            assert!(suggestions.iter().all(|s| s.agent_id == "x"));
        }
    }
}
