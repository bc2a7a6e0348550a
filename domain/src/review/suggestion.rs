//! Advisory suggestions produced outside the review loop

use crate::util::clamp_unit;
use serde::{Deserialize, Serialize};

/// Kind of advice a suggestion carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionType {
    Improvement,
    Alternative,
    Warning,
    BestPractice,
    CodeCompliance,
    CostSaving,
    Sustainability,
}

impl std::fmt::Display for SuggestionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            SuggestionType::Improvement => "improvement",
            SuggestionType::Alternative => "alternative",
            SuggestionType::Warning => "warning",
            SuggestionType::BestPractice => "best practice",
            SuggestionType::CodeCompliance => "code compliance",
            SuggestionType::CostSaving => "cost saving",
            SuggestionType::Sustainability => "sustainability",
        };
        write!(f, "{}", s)
    }
}

/// A proposal-agnostic piece of advice from one agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentSuggestion {
    pub agent_id: String,
    pub title: String,
    pub description: String,
    pub suggestion_type: SuggestionType,
    /// In `(0, 1]`.
    pub confidence: f64,
    /// In `[0, 1]`.
    pub impact: f64,
    #[serde(default)]
    pub prerequisites: Vec<String>,
}

impl AgentSuggestion {
    pub fn new(
        agent_id: impl Into<String>,
        suggestion_type: SuggestionType,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            agent_id: agent_id.into(),
            title: title.into(),
            description: description.into(),
            suggestion_type,
            confidence: 1.0,
            impact: 0.5,
            prerequisites: Vec::new(),
        }
    }

    /// Confidence is kept strictly positive.
    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = clamp_unit(confidence).max(f64::EPSILON);
        self
    }

    pub fn with_impact(mut self, impact: f64) -> Self {
        self.impact = clamp_unit(impact);
        self
    }

    pub fn with_prerequisite(mut self, prerequisite: impl Into<String>) -> Self {
        self.prerequisites.push(prerequisite.into());
        self
    }

    /// Ranking key: confidence weighted by impact.
    pub fn priority(&self) -> f64 {
        self.confidence * self.impact
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confidence_stays_positive() {
        let s = AgentSuggestion::new("a", SuggestionType::Improvement, "t", "d")
            .with_confidence(0.0);
        assert!(s.confidence > 0.0);

        let s = s.with_confidence(3.0);
        assert_eq!(s.confidence, 1.0);
    }

    #[test]
    fn test_priority() {
        let s = AgentSuggestion::new("a", SuggestionType::CostSaving, "t", "d")
            .with_confidence(0.8)
            .with_impact(0.5);
        assert!((s.priority() - 0.4).abs() < 1e-12);
    }

    #[test]
    fn test_suggestion_type_display() {
        assert_eq!(SuggestionType::BestPractice.to_string(), "best practice");
    }
}
