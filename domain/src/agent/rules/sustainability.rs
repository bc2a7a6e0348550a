//! Sustainability rules: glazing ratio and envelope

use super::DesignRuleSet;
use crate::agent::scoring::ScoreCard;
use crate::agent::specialty::Specialty;
use crate::proposal::{DesignContext, ElementType, Proposal, ProposedAction, ProposedElement};
use crate::review::issue::{DesignIssue, Severity};
use crate::review::suggestion::{AgentSuggestion, SuggestionType};
use crate::review::validation::ValidationResult;

const ENERGY: &str = "energy";
const ENVELOPE: &str = "envelope";
const DAYLIGHT: &str = "daylight";

#[derive(Debug, Clone, PartialEq)]
pub struct SustainabilityRules {
    /// Window-to-wall ratio above which solar gain is flagged.
    pub max_window_wall_ratio: f64,
    /// Tighter ratio used in hot climate zones.
    pub max_window_wall_ratio_hot: f64,
    /// Ratio above which glazing is an error regardless of climate.
    pub excessive_window_wall_ratio: f64,
    /// Minimum exterior wall thickness for an insulated envelope (m).
    pub min_envelope_thickness: f64,
    /// Single-window area above which heat loss is noted (m²).
    pub large_window_area: f64,
}

impl Default for SustainabilityRules {
    fn default() -> Self {
        Self {
            max_window_wall_ratio: 0.4,
            max_window_wall_ratio_hot: 0.3,
            excessive_window_wall_ratio: 0.6,
            min_envelope_thickness: 0.2,
            large_window_area: 6.0,
        }
    }
}

impl SustainabilityRules {
    /// Glazed area over wall face area; `None` without both windows and walls.
    pub fn window_wall_ratio(proposal: &Proposal) -> Option<f64> {
        let glazing: f64 = proposal
            .elements_of(ElementType::Window)
            .map(|(_, e)| e.geometry.opening_area())
            .sum();
        let walls: f64 = proposal
            .elements_of(ElementType::Wall)
            .map(|(_, e)| e.geometry.face_area())
            .sum();
        (glazing > 0.0 && walls > 0.0).then(|| glazing / walls)
    }

    fn ratio_limit(&self, context: &DesignContext) -> f64 {
        if context.is_hot_climate() {
            self.max_window_wall_ratio_hot
        } else {
            self.max_window_wall_ratio
        }
    }

    fn large_window_issue(&self, element: &ProposedElement, location: &str) -> Option<DesignIssue> {
        let area = element.geometry.opening_area();
        (area > self.large_window_area).then(|| {
            DesignIssue::info(
                "SUST_LARGE_WINDOW",
                format!("Window area {:.1} m² will dominate heat loss through this wall", area),
            )
            .at(location)
            .with_fix("Specify triple glazing or split the opening")
        })
    }
}

impl DesignRuleSet for SustainabilityRules {
    fn specialty(&self) -> Specialty {
        Specialty::Sustainability
    }

    fn aspects(&self) -> &'static [&'static str] {
        &[ENERGY, ENVELOPE, DAYLIGHT]
    }

    fn check(&self, proposal: &Proposal, context: &DesignContext, card: &mut ScoreCard) {
        if let Some(ratio) = Self::window_wall_ratio(proposal) {
            let limit = self.ratio_limit(context);
            if ratio > self.excessive_window_wall_ratio || ratio > limit {
                let severity = if ratio > self.excessive_window_wall_ratio {
                    Severity::Error
                } else {
                    Severity::Warning
                };
                card.flag(
                    ENERGY,
                    DesignIssue::new(
                        "SUST_HIGH_WWR",
                        format!(
                            "Window-to-wall ratio {:.0}% exceeds the {:.0}% target",
                            ratio * 100.0,
                            limit * 100.0
                        ),
                        severity,
                    )
                    .per_standard("ASHRAE 90.1 5.5.4.2")
                    .with_fix("Reduce glazing or add external shading")
                    .with_detail("ratio", ratio),
                );
            } else {
                card.strength(format!(
                    "Window-to-wall ratio {:.0}% balances daylight and gain",
                    ratio * 100.0
                ));
            }
        }

        for (index, element) in proposal.elements.iter().enumerate() {
            let location = element.location(index);
            match element.element_type {
                ElementType::Wall
                    if element.param_bool("exterior") == Some(true)
                        && element.geometry.width < self.min_envelope_thickness =>
                {
                    card.flag(
                        ENVELOPE,
                        DesignIssue::info(
                            "SUST_THIN_ENVELOPE",
                            format!(
                                "Exterior wall {:.2} m thick leaves little room for insulation",
                                element.geometry.width
                            ),
                        )
                        .at(location),
                    );
                }
                ElementType::Window => {
                    if let Some(issue) = self.large_window_issue(element, &location) {
                        card.flag(DAYLIGHT, issue);
                    }
                }
                _ => {}
            }
        }
    }

    fn suggestions(&self, agent_id: &str, context: &DesignContext) -> Vec<AgentSuggestion> {
        let mut suggestions = vec![
            AgentSuggestion::new(
                agent_id,
                SuggestionType::Sustainability,
                "Favour south-facing glazing",
                "Concentrate glazing on the equator-facing facade for passive gain.",
            )
            .with_confidence(0.8)
            .with_impact(0.6),
        ];
        if context.is_hot_climate() {
            suggestions.push(
                AgentSuggestion::new(
                    agent_id,
                    SuggestionType::Sustainability,
                    "Add external shading",
                    "Overhangs or louvres on east and west glazing cut cooling load.",
                )
                .with_confidence(0.85)
                .with_impact(0.7),
            );
        }
        suggestions
    }

    fn validate_action(&self, action: &ProposedAction) -> ValidationResult {
        match action {
            ProposedAction::Create(element) if element.element_type == ElementType::Window => {
                match self.large_window_issue(element, &element.location(0)) {
                    Some(issue) => ValidationResult::valid_with(vec![issue]),
                    None => ValidationResult::valid(),
                }
            }
            _ => ValidationResult::valid(),
        }
    }
}
