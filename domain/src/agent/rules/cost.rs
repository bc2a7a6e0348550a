//! Cost rules: per-category thresholds and overall budget

use super::DesignRuleSet;
use crate::agent::scoring::ScoreCard;
use crate::agent::specialty::Specialty;
use crate::proposal::{DesignContext, ElementType, Proposal, ProposedAction, ProposedElement};
use crate::review::issue::DesignIssue;
use crate::review::suggestion::{AgentSuggestion, SuggestionType};
use crate::review::validation::ValidationResult;

const BUDGET: &str = "budget";
const EFFICIENCY: &str = "efficiency";

/// Share of the budget above which spending is flagged as tight.
const BUDGET_WARNING_RATIO: f64 = 0.9;

/// Indicative unit rate and single-element threshold for a category.
///
/// Real rates come from the project's cost database; these only need to be
/// in the right order of magnitude to flag outliers.
fn category_rates(element_type: ElementType) -> Option<(f64, f64)> {
    match element_type {
        // per m² of face
        ElementType::Wall => Some((120.0, 20_000.0)),
        // per unit
        ElementType::Door => Some((900.0, 3_000.0)),
        // per m² of opening
        ElementType::Window => Some((600.0, 4_000.0)),
        // per m² of plan
        ElementType::Floor | ElementType::Roof | ElementType::Ceiling => Some((150.0, 40_000.0)),
        // per m³
        ElementType::Column | ElementType::Beam => Some((2_500.0, 15_000.0)),
        // per m of run
        ElementType::Duct | ElementType::Pipe => Some((80.0, 5_000.0)),
        ElementType::Stair => Some((6_000.0, 12_000.0)),
        _ => None,
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CostRules;

impl CostRules {
    /// Estimated cost of one element; an explicit `cost` parameter wins.
    pub fn estimate(element: &ProposedElement) -> f64 {
        if let Some(cost) = element.param_f64("cost") {
            return cost.max(0.0);
        }
        let Some((rate, _)) = category_rates(element.element_type) else {
            return 0.0;
        };
        let g = &element.geometry;
        let quantity = match element.element_type {
            ElementType::Wall => g.face_area(),
            ElementType::Window => g.opening_area(),
            ElementType::Floor | ElementType::Roof | ElementType::Ceiling => g.plan_area(),
            ElementType::Column | ElementType::Beam => g.volume(),
            ElementType::Duct | ElementType::Pipe => g.length,
            _ => 1.0,
        };
        rate * quantity
    }

    pub fn estimate_total(proposal: &Proposal) -> f64 {
        proposal.elements.iter().map(Self::estimate).sum()
    }

    fn threshold_issue(element: &ProposedElement, location: &str) -> Option<DesignIssue> {
        let (_, threshold) = category_rates(element.element_type)?;
        let estimate = Self::estimate(element);
        (estimate > threshold).then(|| {
            DesignIssue::warning(
                "COST_ELEMENT_OVER_THRESHOLD",
                format!(
                    "Estimated {} cost {:.0} exceeds the {:.0} category threshold",
                    element.element_type, estimate, threshold
                ),
            )
            .at(location)
            .with_detail("estimate", estimate)
            .with_detail("threshold", threshold)
        })
    }
}

impl DesignRuleSet for CostRules {
    fn specialty(&self) -> Specialty {
        Specialty::Cost
    }

    fn aspects(&self) -> &'static [&'static str] {
        &[BUDGET, EFFICIENCY]
    }

    fn check(&self, proposal: &Proposal, context: &DesignContext, card: &mut ScoreCard) {
        for (index, element) in proposal.elements.iter().enumerate() {
            if let Some(issue) = Self::threshold_issue(element, &element.location(index)) {
                card.flag(EFFICIENCY, issue);
            }
        }

        let total = Self::estimate_total(proposal);
        let Some(budget) = context.budget.filter(|b| *b > 0.0) else {
            return;
        };

        if total > budget {
            card.flag(
                BUDGET,
                DesignIssue::error(
                    "COST_OVER_BUDGET",
                    format!("Estimated cost {:.0} exceeds the budget of {:.0}", total, budget),
                )
                .with_fix("Reduce scope or revisit specifications")
                .with_detail("estimate", total)
                .with_detail("budget", budget),
            );
        } else if total > budget * BUDGET_WARNING_RATIO {
            card.flag(
                BUDGET,
                DesignIssue::warning(
                    "COST_NEAR_BUDGET",
                    format!(
                        "Estimated cost {:.0} uses more than {:.0}% of the budget",
                        total,
                        BUDGET_WARNING_RATIO * 100.0
                    ),
                )
                .with_detail("estimate", total),
            );
        } else {
            card.strength(format!("Estimated cost {:.0} is within budget", total));
        }
    }

    fn suggestions(&self, agent_id: &str, context: &DesignContext) -> Vec<AgentSuggestion> {
        let mut suggestions = vec![
            AgentSuggestion::new(
                agent_id,
                SuggestionType::CostSaving,
                "Standardize door and window sizes",
                "Repeating a small set of opening sizes reduces procurement cost.",
            )
            .with_confidence(0.8)
            .with_impact(0.4),
            AgentSuggestion::new(
                agent_id,
                SuggestionType::CostSaving,
                "Use modular wall lengths",
                "Wall runs in board-width multiples cut waste.",
            )
            .with_confidence(0.7)
            .with_impact(0.3),
        ];
        if context.budget.is_none() {
            suggestions.push(
                AgentSuggestion::new(
                    agent_id,
                    SuggestionType::Warning,
                    "Set a project budget",
                    "Without a budget only per-element thresholds can be checked.",
                )
                .with_confidence(0.95)
                .with_impact(0.5),
            );
        }
        suggestions
    }

    fn validate_action(&self, action: &ProposedAction) -> ValidationResult {
        match action {
            ProposedAction::Create(element) => {
                match Self::threshold_issue(element, &element.location(0)) {
                    Some(issue) => ValidationResult::valid_with(vec![issue]),
                    None => ValidationResult::valid(),
                }
            }
            _ => ValidationResult::valid(),
        }
    }
}
