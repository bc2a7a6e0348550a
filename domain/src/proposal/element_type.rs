//! Building element type tags

use serde::{Deserialize, Serialize};

/// Type tag of a proposed building element.
///
/// Unknown tags deserialize to [`ElementType::Other`] so that proposals from
/// newer pipelines still load; rule tables simply ignore them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementType {
    Wall,
    Door,
    Window,
    Floor,
    Ceiling,
    Roof,
    Room,
    Corridor,
    Column,
    Beam,
    Stair,
    Duct,
    Pipe,
    #[serde(other)]
    Other,
}

impl ElementType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ElementType::Wall => "wall",
            ElementType::Door => "door",
            ElementType::Window => "window",
            ElementType::Floor => "floor",
            ElementType::Ceiling => "ceiling",
            ElementType::Roof => "roof",
            ElementType::Room => "room",
            ElementType::Corridor => "corridor",
            ElementType::Column => "column",
            ElementType::Beam => "beam",
            ElementType::Stair => "stair",
            ElementType::Duct => "duct",
            ElementType::Pipe => "pipe",
            ElementType::Other => "other",
        }
    }

    /// Elements that carry or transfer building loads.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            ElementType::Wall
                | ElementType::Floor
                | ElementType::Roof
                | ElementType::Column
                | ElementType::Beam
        )
    }

    /// Openings hosted in a wall.
    pub fn is_opening(&self) -> bool {
        matches!(self, ElementType::Door | ElementType::Window)
    }

    /// Distribution elements routed through ceiling space.
    pub fn is_mep(&self) -> bool {
        matches!(self, ElementType::Duct | ElementType::Pipe)
    }
}

impl std::fmt::Display for ElementType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ElementType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "wall" | "walls" => Ok(ElementType::Wall),
            "door" | "doors" => Ok(ElementType::Door),
            "window" | "windows" => Ok(ElementType::Window),
            "floor" | "floors" | "slab" => Ok(ElementType::Floor),
            "ceiling" | "ceilings" => Ok(ElementType::Ceiling),
            "roof" | "roofs" => Ok(ElementType::Roof),
            "room" | "rooms" | "space" => Ok(ElementType::Room),
            "corridor" | "hallway" => Ok(ElementType::Corridor),
            "column" | "columns" => Ok(ElementType::Column),
            "beam" | "beams" | "framing" => Ok(ElementType::Beam),
            "stair" | "stairs" => Ok(ElementType::Stair),
            "duct" | "ducts" => Ok(ElementType::Duct),
            "pipe" | "pipes" => Ok(ElementType::Pipe),
            _ => Err(format!("Unknown element type: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_aliases() {
        assert_eq!("Walls".parse::<ElementType>().ok(), Some(ElementType::Wall));
        assert_eq!("slab".parse::<ElementType>().ok(), Some(ElementType::Floor));
        assert_eq!(
            "hallway".parse::<ElementType>().ok(),
            Some(ElementType::Corridor)
        );
        assert!("gazebo".parse::<ElementType>().is_err());
    }

    #[test]
    fn test_unknown_tag_deserializes_as_other() {
        let parsed: ElementType = serde_json::from_str("\"gazebo\"").unwrap();
        assert_eq!(parsed, ElementType::Other);
    }

    #[test]
    fn test_categories() {
        assert!(ElementType::Wall.is_structural());
        assert!(!ElementType::Door.is_structural());
        assert!(ElementType::Window.is_opening());
        assert!(ElementType::Duct.is_mep());
    }
}
