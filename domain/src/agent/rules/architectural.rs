//! Architectural rules: ceiling heights, room areas, proportions

use super::DesignRuleSet;
use crate::agent::scoring::ScoreCard;
use crate::agent::specialty::Specialty;
use crate::proposal::{DesignContext, ElementType, Proposal, ProposedAction, ProposedElement};
use crate::review::issue::{DesignIssue, Severity};
use crate::review::suggestion::{AgentSuggestion, SuggestionType};
use crate::review::validation::ValidationResult;

const SPATIAL: &str = "spatial";
const PROPORTION: &str = "proportion";
const CODE: &str = "code";

#[derive(Debug, Clone, PartialEq)]
pub struct ArchitecturalRules {
    /// Minimum clear ceiling height of occupied spaces (m).
    pub min_ceiling_height: f64,
    /// Longest-to-shortest side ratio above which a room is flagged.
    pub max_room_aspect_ratio: f64,
}

impl Default for ArchitecturalRules {
    fn default() -> Self {
        Self {
            min_ceiling_height: 2.4,
            max_room_aspect_ratio: 4.0,
        }
    }
}

/// Minimum floor area (m²) for a room function.
pub fn min_room_area(function: &str) -> f64 {
    match function.to_lowercase().as_str() {
        "living" | "living_room" => 11.0,
        "bedroom" => 7.0,
        "kitchen" => 5.0,
        "office" => 6.5,
        "bathroom" | "wc" => 2.5,
        "storage" | "closet" => 1.0,
        _ => 4.0,
    }
}

impl ArchitecturalRules {
    fn room_function(element: &ProposedElement) -> &str {
        element.param_str("function").unwrap_or("generic")
    }

    fn check_space(
        &self,
        element: &ProposedElement,
        location: &str,
        code: &str,
        card: &mut ScoreCard,
    ) {
        let g = &element.geometry;

        if g.height > 0.0 && g.height < self.min_ceiling_height {
            card.flag(
                CODE,
                DesignIssue::error(
                    "ARCH_LOW_CEILING",
                    format!(
                        "Ceiling height {:.2} m is below the {:.2} m minimum",
                        g.height, self.min_ceiling_height
                    ),
                )
                .at(location)
                .per_standard(code)
                .with_fix(format!("Raise the ceiling to at least {:.2} m", self.min_ceiling_height))
                .with_detail("height", g.height),
            );
        }

        if element.element_type != ElementType::Room {
            return;
        }

        let function = Self::room_function(element);
        let required = min_room_area(function);
        let area = g.plan_area();
        if area > 0.0 && area < required {
            card.flag(
                SPATIAL,
                DesignIssue::error(
                    "ARCH_ROOM_TOO_SMALL",
                    format!(
                        "{} area {:.1} m² is below the {:.1} m² minimum",
                        function, area, required
                    ),
                )
                .at(location)
                .per_standard(code)
                .with_fix("Enlarge the room or change its function")
                .with_detail("area", area),
            );
        }

        let (short, long) = if g.width <= g.length {
            (g.width, g.length)
        } else {
            (g.length, g.width)
        };
        if short > 0.0 && long / short > self.max_room_aspect_ratio {
            card.flag(
                PROPORTION,
                DesignIssue::warning(
                    "ARCH_POOR_PROPORTION",
                    format!(
                        "Room proportions {:.1}:1 make the space hard to furnish",
                        long / short
                    ),
                )
                .at(location)
                .with_fix("Rebalance room width and length"),
            );
        }
    }
}

impl DesignRuleSet for ArchitecturalRules {
    fn specialty(&self) -> Specialty {
        Specialty::Architectural
    }

    fn aspects(&self) -> &'static [&'static str] {
        &[SPATIAL, PROPORTION, CODE]
    }

    fn check(&self, proposal: &Proposal, context: &DesignContext, card: &mut ScoreCard) {
        let code = context.code_label("IBC 1208");

        for (index, element) in proposal.elements.iter().enumerate() {
            let location = element.location(index);
            match element.element_type {
                ElementType::Room | ElementType::Corridor => {
                    self.check_space(element, &location, &code, card)
                }
                ElementType::Wall if element.geometry.height < self.min_ceiling_height => {
                    card.flag(
                        SPATIAL,
                        DesignIssue::info(
                            "ARCH_LOW_WALL",
                            "Wall is lower than a habitable ceiling; confirm it is partial height",
                        )
                        .at(location),
                    );
                }
                _ => {}
            }
        }

        for modification in &proposal.modifications {
            let is_space = matches!(
                modification.element_type,
                ElementType::Room | ElementType::Corridor | ElementType::Ceiling
            );
            if is_space
                && modification.targets("height")
                && let Some(height) = modification.numeric_value()
                && height < self.min_ceiling_height
            {
                card.flag(
                    CODE,
                    DesignIssue::error(
                        "ARCH_LOW_CEILING",
                        format!(
                            "Changing height to {:.2} m breaks the {:.2} m minimum",
                            height, self.min_ceiling_height
                        ),
                    )
                    .at(&modification.element_id)
                    .per_standard(&code),
                );
            }
        }

        let rooms = proposal.elements_of(ElementType::Room).count();
        if rooms > 0 && card.is_clean() {
            card.strength("Room sizes and ceiling heights meet functional minimums");
        }
    }

    fn suggestions(&self, agent_id: &str, context: &DesignContext) -> Vec<AgentSuggestion> {
        let mut suggestions = vec![
            AgentSuggestion::new(
                agent_id,
                SuggestionType::BestPractice,
                "Daylight every habitable room",
                "Give each habitable room at least one window on an exterior wall.",
            )
            .with_confidence(0.9)
            .with_impact(0.6),
            AgentSuggestion::new(
                agent_id,
                SuggestionType::Improvement,
                "Align openings on a grid",
                "Aligning doors and windows on a common grid simplifies framing and elevations.",
            )
            .with_confidence(0.7)
            .with_impact(0.3),
        ];
        if context.is_residential() {
            suggestions.push(
                AgentSuggestion::new(
                    agent_id,
                    SuggestionType::CodeCompliance,
                    "Verify bedroom egress windows",
                    "Sleeping rooms need an emergency escape opening.",
                )
                .with_confidence(0.85)
                .with_impact(0.8)
                .with_prerequisite("Bedroom functions assigned to rooms"),
            );
        }
        suggestions
    }

    fn validate_action(&self, action: &ProposedAction) -> ValidationResult {
        let ProposedAction::Create(element) = action else {
            return ValidationResult::valid();
        };
        let is_space = matches!(element.element_type, ElementType::Room | ElementType::Corridor);
        if is_space && element.geometry.height < self.min_ceiling_height {
            return ValidationResult::invalid(
                format!(
                    "Ceiling height {:.2} m is below the {:.2} m minimum",
                    element.geometry.height, self.min_ceiling_height
                ),
                Severity::Error,
            );
        }
        ValidationResult::valid()
    }
}
