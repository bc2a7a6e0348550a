//! MEP rules: duct headroom, plenum depth, service chases

use super::DesignRuleSet;
use crate::agent::scoring::ScoreCard;
use crate::agent::specialty::Specialty;
use crate::proposal::{DesignContext, ElementType, Proposal, ProposedAction, ProposedElement};
use crate::review::issue::{DesignIssue, Severity};
use crate::review::suggestion::{AgentSuggestion, SuggestionType};
use crate::review::validation::ValidationResult;

const CLEARANCE: &str = "clearance";
const ROUTING: &str = "routing";
const COORDINATION: &str = "coordination";

#[derive(Debug, Clone, PartialEq)]
pub struct MepRules {
    /// Minimum clear headroom below ducts and pipes (m).
    pub min_duct_clearance: f64,
    /// Minimum ceiling plenum depth for services (m).
    pub min_plenum_depth: f64,
    /// Minimum wall thickness for walls that carry services (m).
    pub min_service_wall_thickness: f64,
}

impl Default for MepRules {
    fn default() -> Self {
        Self {
            min_duct_clearance: 2.1,
            min_plenum_depth: 0.3,
            min_service_wall_thickness: 0.1,
        }
    }
}

impl MepRules {
    fn headroom_issue(&self, element: &ProposedElement, location: &str) -> Option<DesignIssue> {
        let clearance = element.geometry.z;
        (clearance < self.min_duct_clearance).then(|| {
            DesignIssue::error(
                "MEP_DUCT_HEADROOM",
                format!(
                    "{} underside at {:.2} m leaves less than {:.2} m headroom",
                    element.element_type, clearance, self.min_duct_clearance
                ),
            )
            .at(location)
            .with_fix("Raise the run into the ceiling void or reroute it")
            .with_detail("clearance", clearance)
        })
    }
}

impl DesignRuleSet for MepRules {
    fn specialty(&self) -> Specialty {
        Specialty::Mep
    }

    fn aspects(&self) -> &'static [&'static str] {
        &[CLEARANCE, ROUTING, COORDINATION]
    }

    fn check(&self, proposal: &Proposal, _context: &DesignContext, card: &mut ScoreCard) {
        for (index, element) in proposal.elements.iter().enumerate() {
            let location = element.location(index);
            match element.element_type {
                ElementType::Duct | ElementType::Pipe => {
                    if let Some(issue) = self.headroom_issue(element, &location) {
                        card.flag(CLEARANCE, issue);
                    }
                }
                ElementType::Ceiling => {
                    if let Some(depth) = element.param_f64("plenum_depth")
                        && depth < self.min_plenum_depth
                    {
                        card.flag(
                            ROUTING,
                            DesignIssue::warning(
                                "MEP_SHALLOW_PLENUM",
                                format!(
                                    "Plenum depth {:.2} m is below {:.2} m needed for ductwork",
                                    depth, self.min_plenum_depth
                                ),
                            )
                            .at(location),
                        );
                    }
                }
                ElementType::Wall => {
                    if element.param_bool("contains_services") == Some(true)
                        && element.geometry.width < self.min_service_wall_thickness
                    {
                        card.flag(
                            COORDINATION,
                            DesignIssue::warning(
                                "MEP_CHASE_TOO_THIN",
                                "Wall is too thin to conceal the services routed through it",
                            )
                            .at(location)
                            .with_fix("Thicken the wall or add a service void"),
                        );
                    }
                }
                _ => {}
            }
        }

        let runs = proposal
            .elements
            .iter()
            .filter(|e| e.element_type.is_mep())
            .count();
        if runs > 0 && card.is_clean() {
            card.strength("Service runs keep the required headroom");
        }
    }

    fn suggestions(&self, agent_id: &str, context: &DesignContext) -> Vec<AgentSuggestion> {
        let mut suggestions = vec![
            AgentSuggestion::new(
                agent_id,
                SuggestionType::BestPractice,
                "Coordinate duct routes with beam depths",
                "Route main ducts parallel to beams to avoid penetrations.",
            )
            .with_confidence(0.85)
            .with_impact(0.5),
        ];
        if context.is_hot_climate() {
            suggestions.push(
                AgentSuggestion::new(
                    agent_id,
                    SuggestionType::Improvement,
                    "Size cooling ducts for peak load",
                    "Hot climate zones need larger supply ducts; reserve plenum depth early.",
                )
                .with_confidence(0.75)
                .with_impact(0.6),
            );
        }
        suggestions
    }

    fn validate_action(&self, action: &ProposedAction) -> ValidationResult {
        match action {
            ProposedAction::Create(element) if element.element_type.is_mep() => {
                match self.headroom_issue(element, &element.location(0)) {
                    Some(issue) => ValidationResult::rejected_by(issue),
                    None => ValidationResult::valid(),
                }
            }
            ProposedAction::Delete {
                element_type: ElementType::Duct,
                element_id,
                ..
            } => ValidationResult::valid_with(vec![
                DesignIssue::new(
                    "MEP_SYSTEM_DISCONNECT",
                    "Removing a duct may disconnect downstream terminals",
                    Severity::Info,
                )
                .at(element_id),
            ]),
            _ => ValidationResult::valid(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::feedback::FeedbackInbox;
    use crate::agent::rules::evaluate_proposal;
    use crate::proposal::GeometryInfo;

    fn duct_at(z: f64) -> ProposedElement {
        ProposedElement::new(
            ElementType::Duct,
            GeometryInfo::sized(0.4, 0.3, 6.0).at(0.0, 0.0, z),
        )
    }

    #[test]
    fn test_low_duct_flagged() {
        let proposal = Proposal::new("p", "duct").with_element(duct_at(1.9));
        let opinion = evaluate_proposal(
            &MepRules::default(),
            "mep-agent",
            &proposal,
            &DesignContext::default(),
            &FeedbackInbox::new("mep-agent"),
        );
        assert!(opinion.issues().iter().any(|i| i.code == "MEP_DUCT_HEADROOM"));
    }

    #[test]
    fn test_high_duct_passes() {
        let proposal = Proposal::new("p", "duct").with_element(duct_at(2.6));
        let opinion = evaluate_proposal(
            &MepRules::default(),
            "mep-agent",
            &proposal,
            &DesignContext::default(),
            &FeedbackInbox::new("mep-agent"),
        );
        assert!(opinion.issues().is_empty());
        assert!(opinion.strengths().iter().any(|s| s.contains("headroom")));
    }

    #[test]
    fn test_shallow_plenum() {
        let ceiling =
            ProposedElement::new(ElementType::Ceiling, GeometryInfo::sized(5.0, 0.02, 5.0))
                .with_parameter("plenum_depth", 0.15);
        let proposal = Proposal::new("p", "ceiling").with_element(ceiling);
        let opinion = evaluate_proposal(
            &MepRules::default(),
            "mep-agent",
            &proposal,
            &DesignContext::default(),
            &FeedbackInbox::new("mep-agent"),
        );
        assert_eq!(opinion.issues()[0].code, "MEP_SHALLOW_PLENUM");
    }

    #[test]
    fn test_validate_low_duct_action() {
        let rules = MepRules::default();
        assert!(!rules.validate_action(&ProposedAction::Create(duct_at(1.5))).is_valid);
        assert!(rules.validate_action(&ProposedAction::Create(duct_at(2.5))).is_valid);
    }
}
