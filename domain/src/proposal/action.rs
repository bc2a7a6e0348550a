//! Single proposed actions for fast pre-checks

use super::element_type::ElementType;
use super::entities::{ProposedElement, ProposedModification};
use serde::{Deserialize, Serialize};

/// One change considered in isolation, before a full review cycle is worth
/// running.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ProposedAction {
    Create(ProposedElement),
    Modify(ProposedModification),
    Delete {
        element_id: String,
        element_type: ElementType,
        /// Whether the element is known to carry load.
        #[serde(default)]
        load_bearing: bool,
    },
}

impl ProposedAction {
    pub fn element_type(&self) -> ElementType {
        match self {
            ProposedAction::Create(element) => element.element_type,
            ProposedAction::Modify(modification) => modification.element_type,
            ProposedAction::Delete { element_type, .. } => *element_type,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ProposedAction::Create(_) => "create",
            ProposedAction::Modify(_) => "modify",
            ProposedAction::Delete { .. } => "delete",
        }
    }
}
