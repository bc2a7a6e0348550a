//! Structural rules: wall thickness, unsupported spans, slenderness

use super::DesignRuleSet;
use crate::agent::scoring::ScoreCard;
use crate::agent::specialty::Specialty;
use crate::proposal::{DesignContext, ElementType, Proposal, ProposedAction, ProposedElement};
use crate::review::issue::{DesignIssue, Severity};
use crate::review::suggestion::{AgentSuggestion, SuggestionType};
use crate::review::validation::ValidationResult;

const CAPACITY: &str = "capacity";
const STABILITY: &str = "stability";
const CONTINUITY: &str = "continuity";

#[derive(Debug, Clone, PartialEq)]
pub struct StructuralRules {
    /// Minimum thickness of a load-bearing wall (m).
    pub min_load_bearing_thickness: f64,
    /// Minimum thickness of a non-bearing partition (m).
    pub min_partition_thickness: f64,
    /// Longest load-bearing wall run without intermediate support (m).
    pub max_unsupported_span: f64,
    /// Longest beam span before a deeper section is needed (m).
    pub max_beam_span: f64,
    /// Height-to-thickness ratio above which walls and columns are slender.
    pub max_slenderness: f64,
}

impl Default for StructuralRules {
    fn default() -> Self {
        Self {
            min_load_bearing_thickness: 0.15,
            min_partition_thickness: 0.075,
            max_unsupported_span: 8.0,
            max_beam_span: 12.0,
            max_slenderness: 25.0,
        }
    }
}

/// Walls are treated as load-bearing unless explicitly marked otherwise.
pub fn is_load_bearing(element: &ProposedElement) -> bool {
    element.param_bool("load_bearing").unwrap_or(true)
}

impl StructuralRules {
    fn min_thickness(&self, load_bearing: bool) -> f64 {
        if load_bearing {
            self.min_load_bearing_thickness
        } else {
            self.min_partition_thickness
        }
    }

    /// Classify a wall thickness: `None` when acceptable.
    fn thickness_issue(
        &self,
        thickness: f64,
        load_bearing: bool,
        location: &str,
    ) -> Option<DesignIssue> {
        let min = self.min_thickness(load_bearing);
        if thickness >= min {
            return None;
        }
        let kind = if load_bearing { "load-bearing wall" } else { "partition" };
        let issue = if thickness < min / 2.0 {
            DesignIssue::critical(
                "STR_WALL_CRITICALLY_THIN",
                format!(
                    "{} thickness {:.3} m is less than half the {:.3} m minimum",
                    kind, thickness, min
                ),
            )
        } else {
            DesignIssue::error(
                "STR_WALL_TOO_THIN",
                format!("{} thickness {:.3} m is below the {:.3} m minimum", kind, thickness, min),
            )
        };
        Some(
            issue
                .at(location)
                .with_fix(format!("Increase thickness to at least {:.0} mm", min * 1000.0))
                .with_detail("thickness", thickness)
                .with_detail("minimum", min),
        )
    }

    fn check_wall(
        &self,
        element: &ProposedElement,
        location: &str,
        code: &str,
        card: &mut ScoreCard,
    ) {
        let g = &element.geometry;
        let load_bearing = is_load_bearing(element);

        if let Some(issue) = self.thickness_issue(g.width, load_bearing, location) {
            card.flag(CAPACITY, issue.per_standard(code));
        }

        if load_bearing && g.length > self.max_unsupported_span {
            let severity = if g.length > self.max_unsupported_span * 1.5 {
                Severity::Error
            } else {
                Severity::Warning
            };
            card.flag(
                CONTINUITY,
                DesignIssue::new(
                    "STR_SPAN_EXCEEDED",
                    format!(
                        "Unsupported wall span {:.1} m exceeds {:.1} m",
                        g.length, self.max_unsupported_span
                    ),
                    severity,
                )
                .at(location)
                .with_fix("Add a pilaster, cross wall or column"),
            );
        }

        if g.width > 0.0 && g.height / g.width > self.max_slenderness {
            card.flag(
                STABILITY,
                DesignIssue::warning(
                    "STR_SLENDER_WALL",
                    format!(
                        "Height-to-thickness ratio {:.0} exceeds {:.0}",
                        g.height / g.width,
                        self.max_slenderness
                    ),
                )
                .at(location),
            );
        }
    }
}

impl DesignRuleSet for StructuralRules {
    fn specialty(&self) -> Specialty {
        Specialty::Structural
    }

    fn aspects(&self) -> &'static [&'static str] {
        &[CAPACITY, STABILITY, CONTINUITY]
    }

    fn check(&self, proposal: &Proposal, context: &DesignContext, card: &mut ScoreCard) {
        let code = context.code_label("IBC 2308");

        for (index, element) in proposal.elements.iter().enumerate() {
            let location = element.location(index);
            let g = &element.geometry;
            match element.element_type {
                ElementType::Wall => self.check_wall(element, &location, &code, card),
                ElementType::Beam if g.length > self.max_beam_span => card.flag(
                    CONTINUITY,
                    DesignIssue::warning(
                        "STR_BEAM_SPAN",
                        format!("Beam span {:.1} m exceeds {:.1} m", g.length, self.max_beam_span),
                    )
                    .at(location)
                    .with_fix("Use a deeper section or add a support"),
                ),
                ElementType::Column
                    if g.width > 0.0 && g.height / g.width > self.max_slenderness =>
                {
                    card.flag(
                        STABILITY,
                        DesignIssue::warning(
                            "STR_SLENDER_COLUMN",
                            format!(
                                "Column slenderness {:.0} exceeds {:.0}",
                                g.height / g.width,
                                self.max_slenderness
                            ),
                        )
                        .at(location),
                    )
                }
                _ => {}
            }
        }

        for modification in &proposal.modifications {
            if modification.element_type != ElementType::Wall {
                continue;
            }
            if (modification.targets("width") || modification.targets("thickness"))
                && let Some(thickness) = modification.numeric_value()
                && let Some(issue) = self.thickness_issue(thickness, true, &modification.element_id)
            {
                card.flag(CAPACITY, issue.per_standard(&code));
            }
            if modification.targets("load_bearing")
                && modification.new_value.as_bool() == Some(false)
            {
                card.flag(
                    CONTINUITY,
                    DesignIssue::warning(
                        "STR_LOAD_PATH_CHANGE",
                        "Wall is being released from load-bearing duty; verify the load path",
                    )
                    .at(&modification.element_id),
                );
            }
        }
    }

    fn suggestions(&self, agent_id: &str, _context: &DesignContext) -> Vec<AgentSuggestion> {
        vec![
            AgentSuggestion::new(
                agent_id,
                SuggestionType::BestPractice,
                "Stack load-bearing walls",
                "Keep load-bearing walls aligned between storeys to avoid transfer beams.",
            )
            .with_confidence(0.9)
            .with_impact(0.7),
            AgentSuggestion::new(
                agent_id,
                SuggestionType::Improvement,
                "Size lintels for wide openings",
                "Openings wider than 1.2 m in load-bearing walls need a designed lintel.",
            )
            .with_confidence(0.8)
            .with_impact(0.5)
            .with_prerequisite("Opening widths known"),
        ]
    }

    fn validate_action(&self, action: &ProposedAction) -> ValidationResult {
        match action {
            ProposedAction::Create(element) if element.element_type == ElementType::Wall => {
                match self.thickness_issue(
                    element.geometry.width,
                    is_load_bearing(element),
                    &element.location(0),
                ) {
                    Some(issue) => ValidationResult::rejected_by(issue),
                    None => ValidationResult::valid(),
                }
            }
            ProposedAction::Delete {
                element_id,
                load_bearing: true,
                ..
            } => ValidationResult::rejected_by(
                DesignIssue::critical(
                    "STR_REMOVES_SUPPORT",
                    "Removing a load-bearing element requires a structural redesign",
                )
                .at(element_id),
            ),
            _ => ValidationResult::valid(),
        }
    }
}
