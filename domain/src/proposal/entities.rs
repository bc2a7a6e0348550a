//! Proposal entities
//!
//! A [`Proposal`] is the batch of building-element changes submitted to the
//! council. It is assembled by the creation pipeline and treated as immutable
//! once a review starts; the coordinator only ever borrows it through an
//! `Arc`.

use super::element_type::ElementType;
use crate::core::error::DomainError;
use crate::util::current_timestamp;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Free-form parameter map carried by proposals and elements.
pub type Parameters = BTreeMap<String, Value>;

/// Placement and extents of an element (meters / degrees).
///
/// Interpretation of the extents depends on the element type:
/// - walls: `width` is the thickness, `length` the run, `height` the height
/// - doors and windows: `width` x `height` is the clear opening
/// - rooms, corridors, floors: `width` x `length` is the plan area, `height`
///   the clear ceiling height
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GeometryInfo {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub width: f64,
    pub height: f64,
    pub length: f64,
    pub rotation: f64,
}

impl GeometryInfo {
    /// Geometry with the given extents placed at the origin.
    pub fn sized(width: f64, height: f64, length: f64) -> Self {
        Self {
            width,
            height,
            length,
            ..Self::default()
        }
    }

    pub fn at(mut self, x: f64, y: f64, z: f64) -> Self {
        self.x = x;
        self.y = y;
        self.z = z;
        self
    }

    /// Vertical face area of a wall run (`length` x `height`).
    pub fn face_area(&self) -> f64 {
        self.length * self.height
    }

    /// Opening area of a door or window (`width` x `height`).
    pub fn opening_area(&self) -> f64 {
        self.width * self.height
    }

    /// Plan area of a room, corridor or slab (`width` x `length`).
    pub fn plan_area(&self) -> f64 {
        self.width * self.length
    }

    pub fn volume(&self) -> f64 {
        self.width * self.height * self.length
    }

    fn is_well_formed(&self) -> bool {
        let all = [
            self.x,
            self.y,
            self.z,
            self.width,
            self.height,
            self.length,
            self.rotation,
        ];
        all.iter().all(|v| v.is_finite())
            && self.width >= 0.0
            && self.height >= 0.0
            && self.length >= 0.0
    }
}

/// A new element the proposal wants to create.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProposedElement {
    /// Optional identifier assigned by the creation pipeline.
    #[serde(default)]
    pub id: Option<String>,
    pub element_type: ElementType,
    /// Family / type name, e.g. "Basic Wall: Generic - 200mm".
    #[serde(default)]
    pub type_name: String,
    #[serde(default)]
    pub geometry: GeometryInfo,
    #[serde(default)]
    pub parameters: Parameters,
}

impl ProposedElement {
    pub fn new(element_type: ElementType, geometry: GeometryInfo) -> Self {
        Self {
            id: None,
            element_type,
            type_name: String::new(),
            geometry,
            parameters: Parameters::new(),
        }
    }

    /// Wall of the given thickness, height and run length.
    pub fn wall(thickness: f64, height: f64, length: f64) -> Self {
        Self::new(ElementType::Wall, GeometryInfo::sized(thickness, height, length))
    }

    /// Door with the given clear opening.
    pub fn door(width: f64, height: f64) -> Self {
        Self::new(ElementType::Door, GeometryInfo::sized(width, height, 0.05))
    }

    /// Window with the given clear opening.
    pub fn window(width: f64, height: f64) -> Self {
        Self::new(ElementType::Window, GeometryInfo::sized(width, height, 0.1))
    }

    /// Room with the given plan dimensions and ceiling height.
    pub fn room(width: f64, length: f64, ceiling_height: f64) -> Self {
        Self::new(
            ElementType::Room,
            GeometryInfo::sized(width, ceiling_height, length),
        )
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_type_name(mut self, type_name: impl Into<String>) -> Self {
        self.type_name = type_name.into();
        self
    }

    pub fn with_parameter(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.parameters.insert(name.into(), value.into());
        self
    }

    /// Location label used in issues: the element id when known, otherwise
    /// the type tag and its position in the proposal.
    pub fn location(&self, index: usize) -> String {
        match &self.id {
            Some(id) => id.clone(),
            None => format!("{}#{}", self.element_type, index),
        }
    }

    pub fn param_f64(&self, name: &str) -> Option<f64> {
        self.parameters.get(name).and_then(Value::as_f64)
    }

    pub fn param_bool(&self, name: &str) -> Option<bool> {
        self.parameters.get(name).and_then(Value::as_bool)
    }

    pub fn param_str(&self, name: &str) -> Option<&str> {
        self.parameters.get(name).and_then(Value::as_str)
    }
}

/// A parameter change on an existing element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProposedModification {
    pub element_id: String,
    #[serde(default = "other_element_type")]
    pub element_type: ElementType,
    pub parameter: String,
    pub new_value: Value,
}

fn other_element_type() -> ElementType {
    ElementType::Other
}

impl ProposedModification {
    pub fn new(
        element_id: impl Into<String>,
        element_type: ElementType,
        parameter: impl Into<String>,
        new_value: impl Into<Value>,
    ) -> Self {
        Self {
            element_id: element_id.into(),
            element_type,
            parameter: parameter.into(),
            new_value: new_value.into(),
        }
    }

    /// Case-insensitive parameter name match.
    pub fn targets(&self, parameter: &str) -> bool {
        self.parameter.eq_ignore_ascii_case(parameter)
    }

    pub fn numeric_value(&self) -> Option<f64> {
        self.new_value.as_f64()
    }
}

/// A batch of proposed building changes under review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Proposal {
    pub id: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub elements: Vec<ProposedElement>,
    #[serde(default)]
    pub modifications: Vec<ProposedModification>,
    #[serde(default)]
    pub parameters: Parameters,
    /// Creation time in milliseconds since the Unix epoch.
    #[serde(default = "current_timestamp")]
    pub created_at: u64,
}

impl Proposal {
    pub fn new(id: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            elements: Vec::new(),
            modifications: Vec::new(),
            parameters: Parameters::new(),
            created_at: current_timestamp(),
        }
    }

    pub fn with_element(mut self, element: ProposedElement) -> Self {
        self.elements.push(element);
        self
    }

    pub fn with_modification(mut self, modification: ProposedModification) -> Self {
        self.modifications.push(modification);
        self
    }

    pub fn with_parameter(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.parameters.insert(name.into(), value.into());
        self
    }

    /// A proposal with no elements and no modifications is a no-op.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty() && self.modifications.is_empty()
    }

    /// Elements of one type together with their index in the proposal.
    pub fn elements_of(
        &self,
        element_type: ElementType,
    ) -> impl Iterator<Item = (usize, &ProposedElement)> {
        self.elements
            .iter()
            .enumerate()
            .filter(move |(_, e)| e.element_type == element_type)
    }

    /// Structural sanity check performed before a review is started.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.id.trim().is_empty() {
            return Err(DomainError::InvalidProposal(
                "proposal id cannot be empty".to_string(),
            ));
        }
        for (index, element) in self.elements.iter().enumerate() {
            if !element.geometry.is_well_formed() {
                return Err(DomainError::InvalidProposal(format!(
                    "element {} has non-finite or negative geometry",
                    element.location(index)
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_proposal() {
        let proposal = Proposal::new("p-1", "nothing");
        assert!(proposal.is_empty());
        assert!(proposal.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_blank_id() {
        let proposal = Proposal::new("  ", "blank");
        assert!(matches!(
            proposal.validate(),
            Err(DomainError::InvalidProposal(_))
        ));
    }

    #[test]
    fn test_validate_rejects_negative_geometry() {
        let proposal =
            Proposal::new("p-2", "bad").with_element(ProposedElement::wall(-0.2, 3.0, 5.0));
        assert!(proposal.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_nan_geometry() {
        let proposal =
            Proposal::new("p-3", "bad").with_element(ProposedElement::wall(0.2, f64::NAN, 5.0));
        assert!(proposal.validate().is_err());
    }

    #[test]
    fn test_element_location_prefers_id() {
        let anonymous = ProposedElement::door(0.9, 2.1);
        assert_eq!(anonymous.location(3), "door#3");

        let named = ProposedElement::door(0.9, 2.1).with_id("D-101");
        assert_eq!(named.location(3), "D-101");
    }

    #[test]
    fn test_geometry_areas() {
        let wall = GeometryInfo::sized(0.2, 3.0, 5.0);
        assert_eq!(wall.face_area(), 15.0);
        assert!((wall.volume() - 3.0).abs() < 1e-9);

        let door = GeometryInfo::sized(0.9, 2.1, 0.05);
        assert!((door.opening_area() - 1.89).abs() < 1e-9);
    }

    #[test]
    fn test_parameter_accessors() {
        let wall = ProposedElement::wall(0.2, 3.0, 5.0)
            .with_parameter("load_bearing", false)
            .with_parameter("fire_rating", 60.0)
            .with_parameter("function", "partition");

        assert_eq!(wall.param_bool("load_bearing"), Some(false));
        assert_eq!(wall.param_f64("fire_rating"), Some(60.0));
        assert_eq!(wall.param_str("function"), Some("partition"));
        assert_eq!(wall.param_f64("missing"), None);
    }

    #[test]
    fn test_elements_of_keeps_indices() {
        let proposal = Proposal::new("p-4", "mixed")
            .with_element(ProposedElement::wall(0.2, 3.0, 5.0))
            .with_element(ProposedElement::door(0.9, 2.1))
            .with_element(ProposedElement::wall(0.2, 3.0, 4.0));

        let walls: Vec<usize> = proposal
            .elements_of(ElementType::Wall)
            .map(|(i, _)| i)
            .collect();
        assert_eq!(walls, vec![0, 2]);
    }

    #[test]
    fn test_deserialize_minimal_toml_like_json() {
        let json = r#"{
            "id": "p-5",
            "elements": [
                {
                    "element_type": "wall",
                    "geometry": { "width": 0.2, "height": 3.0, "length": 5.0 }
                }
            ]
        }"#;
        let proposal: Proposal = serde_json::from_str(json).unwrap();
        assert_eq!(proposal.elements.len(), 1);
        assert_eq!(proposal.elements[0].geometry.width, 0.2);
        assert!(proposal.created_at > 0);
    }

    #[test]
    fn test_modification_targets_case_insensitive() {
        let m = ProposedModification::new("W-1", ElementType::Wall, "Width", 0.1);
        assert!(m.targets("width"));
        assert_eq!(m.numeric_value(), Some(0.1));
    }
}
