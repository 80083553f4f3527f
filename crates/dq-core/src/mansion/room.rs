//! Rooms and exits
//!
//! A room owns at most two exits, `left` and `right`, each naming the child
//! room it leads to. Rooms are addressed by [`RoomId`] inside their mansion.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Index of a room inside its mansion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RoomId(pub u32);

impl RoomId {
    /// Position of the room in the mansion's arena
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Exit directions out of a room
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(ascii_case_insensitive)]
pub enum Direction {
    #[strum(to_string = "left", serialize = "l")]
    Left,
    #[strum(to_string = "right", serialize = "r")]
    Right,
}

impl Direction {
    /// Both directions, in the order they are offered to the player
    pub const ALL: [Direction; 2] = [Direction::Left, Direction::Right];
}

/// One location in the mansion
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Room {
    /// Display name (e.g., "Library")
    pub name: String,

    /// Clue left in this room, if any
    pub clue: Option<String>,

    left: Option<RoomId>,
    right: Option<RoomId>,
}

impl Room {
    /// Create a room without exits. An empty clue means "no clue".
    pub fn new(name: &str, clue: Option<&str>) -> Self {
        Self {
            name: name.to_string(),
            clue: clue.filter(|c| !c.is_empty()).map(str::to_string),
            left: None,
            right: None,
        }
    }

    /// Clue text, if the room holds one
    pub fn clue(&self) -> Option<&str> {
        self.clue.as_deref()
    }

    /// Room reached through `direction`
    pub fn exit(&self, direction: Direction) -> Option<RoomId> {
        match direction {
            Direction::Left => self.left,
            Direction::Right => self.right,
        }
    }

    /// Check if the room has an exit in `direction`
    pub fn has_exit(&self, direction: Direction) -> bool {
        self.exit(direction).is_some()
    }

    /// Available exits, left before right
    pub fn exits(&self) -> impl Iterator<Item = (Direction, RoomId)> + '_ {
        Direction::ALL
            .into_iter()
            .filter_map(|dir| self.exit(dir).map(|id| (dir, id)))
    }

    /// A room with no exits ends the exploration
    pub fn is_dead_end(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    pub(crate) fn set_exit(&mut self, direction: Direction, to: RoomId) {
        match direction {
            Direction::Left => self.left = Some(to),
            Direction::Right => self.right = Some(to),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_empty_clue_is_no_clue() {
        assert_eq!(Room::new("Pantry", Some("")).clue(), None);
        assert_eq!(Room::new("Pantry", None).clue(), None);
        assert_eq!(Room::new("Pantry", Some("flour")).clue(), Some("flour"));
    }

    #[test]
    fn test_exits_in_offer_order() {
        let mut room = Room::new("Hall", None);
        assert!(room.is_dead_end());

        room.set_exit(Direction::Right, RoomId(2));
        room.set_exit(Direction::Left, RoomId(1));

        let exits: Vec<_> = room.exits().collect();
        assert_eq!(
            exits,
            vec![(Direction::Left, RoomId(1)), (Direction::Right, RoomId(2))]
        );
        assert!(room.has_exit(Direction::Left));
        assert!(!room.is_dead_end());
    }

    #[test]
    fn test_direction_parsing() {
        assert_eq!(Direction::from_str("left").unwrap(), Direction::Left);
        assert_eq!(Direction::from_str("R").unwrap(), Direction::Right);
        assert_eq!(Direction::from_str("LEFT").unwrap(), Direction::Left);
        assert!(Direction::from_str("up").is_err());
        assert_eq!(Direction::Right.to_string(), "right");
    }
}
