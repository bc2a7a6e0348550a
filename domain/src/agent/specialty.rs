//! Specialist identity: specialty and expertise weight

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Discipline a specialist agent reviews for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Specialty {
    Architectural,
    Structural,
    Mep,
    Cost,
    Safety,
    Sustainability,
}

impl Specialty {
    /// All specialties in roster order.
    pub fn all() -> [Specialty; 6] {
        [
            Specialty::Architectural,
            Specialty::Structural,
            Specialty::Mep,
            Specialty::Cost,
            Specialty::Safety,
            Specialty::Sustainability,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Specialty::Architectural => "architectural",
            Specialty::Structural => "structural",
            Specialty::Mep => "mep",
            Specialty::Cost => "cost",
            Specialty::Safety => "safety",
            Specialty::Sustainability => "sustainability",
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Specialty::Architectural => "Architectural Design",
            Specialty::Structural => "Structural Engineering",
            Specialty::Mep => "MEP Systems",
            Specialty::Cost => "Cost Estimation",
            Specialty::Safety => "Safety & Accessibility",
            Specialty::Sustainability => "Sustainability",
        }
    }

    /// Stable agent id used by the standard roster.
    pub fn default_agent_id(&self) -> &'static str {
        match self {
            Specialty::Architectural => "architectural-agent",
            Specialty::Structural => "structural-agent",
            Specialty::Mep => "mep-agent",
            Specialty::Cost => "cost-agent",
            Specialty::Safety => "safety-agent",
            Specialty::Sustainability => "sustainability-agent",
        }
    }

    /// Default expertise weight used by the standard roster.
    ///
    /// Life-safety disciplines weigh more than cost and sustainability.
    pub fn default_expertise(&self) -> ExpertiseLevel {
        let value = match self {
            Specialty::Architectural => 0.85,
            Specialty::Structural => 0.95,
            Specialty::Mep => 0.80,
            Specialty::Cost => 0.70,
            Specialty::Safety => 0.95,
            Specialty::Sustainability => 0.75,
        };
        ExpertiseLevel(value)
    }
}

impl std::fmt::Display for Specialty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl std::str::FromStr for Specialty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "architectural" | "architecture" => Ok(Specialty::Architectural),
            "structural" | "structure" => Ok(Specialty::Structural),
            "mep" => Ok(Specialty::Mep),
            "cost" => Ok(Specialty::Cost),
            "safety" => Ok(Specialty::Safety),
            "sustainability" | "green" => Ok(Specialty::Sustainability),
            _ => Err(format!(
                "Unknown specialty: {}. Valid: architectural, structural, mep, cost, safety, \
                 sustainability",
                s
            )),
        }
    }
}

/// Weight of an agent's opinion in the consensus, in `(0, 1]`.
///
/// Fixed at construction; there is no setter.
///
/// ```
/// use council_domain::agent::ExpertiseLevel;
///
/// assert!(ExpertiseLevel::new(0.9).is_ok());
/// assert!(ExpertiseLevel::new(0.0).is_err());
/// assert!(ExpertiseLevel::new(1.2).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct ExpertiseLevel(f64);

impl ExpertiseLevel {
    pub fn new(value: f64) -> Result<Self, DomainError> {
        if value.is_finite() && value > 0.0 && value <= 1.0 {
            Ok(Self(value))
        } else {
            Err(DomainError::InvalidExpertiseLevel(value))
        }
    }

    /// Full weight.
    pub fn full() -> Self {
        Self(1.0)
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for ExpertiseLevel {
    type Error = DomainError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ExpertiseLevel> for f64 {
    fn from(level: ExpertiseLevel) -> Self {
        level.0
    }
}
