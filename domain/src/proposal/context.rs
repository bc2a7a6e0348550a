//! Project-level evaluation context

use serde::{Deserialize, Serialize};

/// Metadata about the project a proposal belongs to.
///
/// Supplied by project configuration loading; every field is optional and
/// rule tables fall back to generic thresholds when a field is missing.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DesignContext {
    /// e.g. "residential", "commercial", "healthcare"
    pub project_type: Option<String>,
    /// e.g. "IBC 2021", "ADA 2010"
    pub building_code: Option<String>,
    /// ASHRAE-style climate zone, e.g. "4A"
    pub climate_zone: Option<String>,
    /// Budget available for the proposal, in project currency.
    pub budget: Option<f64>,
}

impl DesignContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_project_type(mut self, project_type: impl Into<String>) -> Self {
        self.project_type = Some(project_type.into());
        self
    }

    pub fn with_building_code(mut self, code: impl Into<String>) -> Self {
        self.building_code = Some(code.into());
        self
    }

    pub fn with_climate_zone(mut self, zone: impl Into<String>) -> Self {
        self.climate_zone = Some(zone.into());
        self
    }

    pub fn with_budget(mut self, budget: f64) -> Self {
        self.budget = Some(budget);
        self
    }

    pub fn is_residential(&self) -> bool {
        self.project_type
            .as_deref()
            .is_some_and(|t| t.eq_ignore_ascii_case("residential"))
    }

    /// Hot climates are zones 1-3 in the ASHRAE numbering.
    pub fn is_hot_climate(&self) -> bool {
        self.climate_zone
            .as_deref()
            .and_then(|z| z.chars().next())
            .and_then(|c| c.to_digit(10))
            .is_some_and(|d| (1..=3).contains(&d))
    }

    /// Building code label used in issue references.
    pub fn code_label(&self, fallback: &str) -> String {
        self.building_code
            .clone()
            .unwrap_or_else(|| fallback.to_string())
    }
}
