//! Safety and accessibility rules: door, corridor and stair dimensions

use super::DesignRuleSet;
use crate::agent::scoring::ScoreCard;
use crate::agent::specialty::Specialty;
use crate::proposal::{DesignContext, ElementType, Proposal, ProposedAction, ProposedElement};
use crate::review::issue::{DesignIssue, Severity};
use crate::review::suggestion::{AgentSuggestion, SuggestionType};
use crate::review::validation::ValidationResult;

const EGRESS: &str = "egress";
const ACCESSIBILITY: &str = "accessibility";
const FIRE: &str = "fire";

#[derive(Debug, Clone, PartialEq)]
pub struct SafetyRules {
    /// Minimum clear width of an accessible door (m).
    pub min_door_width: f64,
    /// Minimum clear door height (m).
    pub min_door_height: f64,
    /// Minimum corridor width (m).
    pub min_corridor_width: f64,
    /// Corridor width below which egress is considered blocked (m).
    pub blocked_corridor_width: f64,
    /// Minimum stair width (m).
    pub min_stair_width: f64,
    /// Maximum stair riser height (m).
    pub max_stair_riser: f64,
}

impl Default for SafetyRules {
    fn default() -> Self {
        Self {
            min_door_width: 0.815,
            min_door_height: 2.03,
            min_corridor_width: 1.2,
            blocked_corridor_width: 0.9,
            min_stair_width: 1.1,
            max_stair_riser: 0.18,
        }
    }
}

impl SafetyRules {
    fn is_corridor(element: &ProposedElement) -> bool {
        element.element_type == ElementType::Corridor
            || (element.element_type == ElementType::Room
                && element
                    .param_str("function")
                    .is_some_and(|f| f.eq_ignore_ascii_case("corridor")))
    }

    fn door_width_issue(&self, width: f64, location: &str) -> Option<DesignIssue> {
        (width < self.min_door_width).then(|| {
            DesignIssue::error(
                "SAFE_DOOR_TOO_NARROW",
                format!(
                    "Door clear width {:.3} m is below the accessible minimum of {:.3} m",
                    width, self.min_door_width
                ),
            )
            .at(location)
            .per_standard("ADA 404.2.3")
            .with_fix(format!(
                "Use a door leaf giving at least {:.0} mm clear",
                self.min_door_width * 1000.0
            ))
            .with_detail("width", width)
        })
    }

    fn check_corridor(&self, element: &ProposedElement, location: &str, card: &mut ScoreCard) {
        // Corridors run along their length; the short side is the clear width.
        let g = &element.geometry;
        let width = if g.length > 0.0 { g.width.min(g.length) } else { g.width };
        if width >= self.min_corridor_width || width <= 0.0 {
            return;
        }
        let severity = if width < self.blocked_corridor_width {
            Severity::Critical
        } else {
            Severity::Error
        };
        card.flag(
            EGRESS,
            DesignIssue::new(
                "SAFE_CORRIDOR_TOO_NARROW",
                format!(
                    "Corridor width {:.2} m is below the {:.2} m egress minimum",
                    width, self.min_corridor_width
                ),
                severity,
            )
            .at(location)
            .per_standard("IBC 1020.2")
            .with_detail("width", width),
        );
    }

    fn check_stair(&self, element: &ProposedElement, location: &str, card: &mut ScoreCard) {
        if element.geometry.width > 0.0 && element.geometry.width < self.min_stair_width {
            card.flag(
                EGRESS,
                DesignIssue::error(
                    "SAFE_STAIR_TOO_NARROW",
                    format!(
                        "Stair width {:.2} m is below {:.2} m",
                        element.geometry.width, self.min_stair_width
                    ),
                )
                .at(location)
                .per_standard("IBC 1011.2"),
            );
        }
        if let Some(riser) = element.param_f64("riser")
            && riser > self.max_stair_riser
        {
            card.flag(
                EGRESS,
                DesignIssue::error(
                    "SAFE_STAIR_RISER",
                    format!("Riser height {:.3} m exceeds {:.3} m", riser, self.max_stair_riser),
                )
                .at(location)
                .per_standard("IBC 1011.5.2"),
            );
        }
    }
}

impl DesignRuleSet for SafetyRules {
    fn specialty(&self) -> Specialty {
        Specialty::Safety
    }

    fn aspects(&self) -> &'static [&'static str] {
        &[EGRESS, ACCESSIBILITY, FIRE]
    }

    fn check(&self, proposal: &Proposal, _context: &DesignContext, card: &mut ScoreCard) {
        for (index, element) in proposal.elements.iter().enumerate() {
            let location = element.location(index);
            match element.element_type {
                ElementType::Door => {
                    if let Some(issue) = self.door_width_issue(element.geometry.width, &location) {
                        card.flag(ACCESSIBILITY, issue);
                    }
                    let height = element.geometry.height;
                    if height > 0.0 && height < self.min_door_height {
                        card.flag(
                            EGRESS,
                            DesignIssue::warning(
                                "SAFE_DOOR_LOW_HEADROOM",
                                format!(
                                    "Door height {:.2} m is below {:.2} m",
                                    height, self.min_door_height
                                ),
                            )
                            .at(&location),
                        );
                    }
                    if element.param_bool("fire_door") == Some(true)
                        && element.param_f64("fire_rating").is_none_or(|r| r <= 0.0)
                    {
                        card.flag(
                            FIRE,
                            DesignIssue::warning(
                                "SAFE_FIRE_DOOR_UNRATED",
                                "Fire door has no fire rating assigned",
                            )
                            .at(&location),
                        );
                    }
                }
                ElementType::Stair => self.check_stair(element, &location, card),
                _ if Self::is_corridor(element) => self.check_corridor(element, &location, card),
                _ => {}
            }
        }

        for modification in &proposal.modifications {
            if modification.element_type == ElementType::Door
                && modification.targets("width")
                && let Some(width) = modification.numeric_value()
                && let Some(issue) = self.door_width_issue(width, &modification.element_id)
            {
                card.flag(ACCESSIBILITY, issue);
            }
        }
    }

    fn suggestions(&self, agent_id: &str, _context: &DesignContext) -> Vec<AgentSuggestion> {
        vec![
            AgentSuggestion::new(
                agent_id,
                SuggestionType::CodeCompliance,
                "Provide a continuous accessible route",
                "Connect every accessible entrance to every accessible space without steps.",
            )
            .with_confidence(0.9)
            .with_impact(0.8),
            AgentSuggestion::new(
                agent_id,
                SuggestionType::Warning,
                "Check travel distance to exits",
                "Long dead-end corridors may exceed the maximum common path of travel.",
            )
            .with_confidence(0.7)
            .with_impact(0.7)
            .with_prerequisite("Exit locations placed"),
        ]
    }

    fn validate_action(&self, action: &ProposedAction) -> ValidationResult {
        match action {
            ProposedAction::Create(element) if element.element_type == ElementType::Door => {
                match self.door_width_issue(element.geometry.width, &element.location(0)) {
                    Some(issue) => ValidationResult::rejected_by(issue),
                    None => ValidationResult::valid(),
                }
            }
            ProposedAction::Create(element) if Self::is_corridor(element) => {
                let mut card = ScoreCard::new(self.aspects());
                self.check_corridor(element, &element.location(0), &mut card);
                match card.issues().first() {
                    Some(issue) => ValidationResult::rejected_by(issue.clone()),
                    None => ValidationResult::valid(),
                }
            }
            ProposedAction::Delete {
                element_type: ElementType::Door | ElementType::Stair,
                element_id,
                ..
            } => ValidationResult::valid_with(vec![
                DesignIssue::warning(
                    "SAFE_EGRESS_REMOVED",
                    "Removing this element may lengthen or cut an egress path",
                )
                .at(element_id),
            ]),
            _ => ValidationResult::valid(),
        }
    }
}
