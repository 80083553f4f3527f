//! Mansion layout descriptions
//!
//! A layout is a flat list of rooms where each room names its left and right
//! children. Building a [`Mansion`](super::Mansion) from it checks that the
//! names form a single tree rooted at the entry room.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::Direction;

/// One room as written in a case file
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RoomSpec {
    /// Room name, unique within the layout
    pub name: String,

    /// Clue found in the room
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clue: Option<String>,

    /// Name of the room behind the left exit
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left: Option<String>,

    /// Name of the room behind the right exit
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right: Option<String>,
}

impl RoomSpec {
    /// Create a room with no exits
    pub fn new(name: &str, clue: Option<&str>) -> Self {
        Self {
            name: name.to_string(),
            clue: clue.map(str::to_string),
            left: None,
            right: None,
        }
    }

    /// Set the left exit
    pub fn left(mut self, to: &str) -> Self {
        self.left = Some(to.to_string());
        self
    }

    /// Set the right exit
    pub fn right(mut self, to: &str) -> Self {
        self.right = Some(to.to_string());
        self
    }

    /// Name of the room behind `direction`
    pub fn exit(&self, direction: Direction) -> Option<&str> {
        match direction {
            Direction::Left => self.left.as_deref(),
            Direction::Right => self.right.as_deref(),
        }
    }
}

/// Layout errors found while building a mansion
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    #[error("The mansion has no rooms")]
    NoRooms,

    #[error("Room #{index} has a blank name")]
    BlankName { index: usize },

    #[error("Room '{0}' is declared more than once")]
    DuplicateRoom(String),

    #[error("Entry room '{0}' is not declared")]
    UnknownEntry(String),

    #[error("Room '{room}' has a {direction} exit to undeclared room '{target}'")]
    UnknownExit {
        room: String,
        direction: Direction,
        target: String,
    },

    #[error("Room '{room}' leads back to the entry room")]
    EntryAsExit { room: String },

    #[error("Room '{room}' is reached from more than one room")]
    MultipleParents { room: String },

    #[error("Room '{0}' cannot be reached from the entry")]
    Unreachable(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_room_spec_builder() {
        let spec = RoomSpec::new("Hall", Some("glove")).left("Parlor").right("Library");
        assert_eq!(spec.exit(Direction::Left), Some("Parlor"));
        assert_eq!(spec.exit(Direction::Right), Some("Library"));
        assert_eq!(spec.clue.as_deref(), Some("glove"));
    }

    #[test]
    fn test_layout_error_display() {
        let err = LayoutError::UnknownExit {
            room: "Hall".to_string(),
            direction: Direction::Left,
            target: "Attic".to_string(),
        };
        assert!(err.to_string().contains("left exit"));
        assert!(err.to_string().contains("Attic"));
    }
}
