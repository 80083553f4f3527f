//! The mansion
//!
//! A fixed binary tree of rooms, built once from a layout and never mutated
//! afterwards. Rooms live in an arena and point at their children by id.

mod layout;
mod room;

pub use layout::{LayoutError, RoomSpec};
pub use room::{Direction, Room, RoomId};

use std::ops::Index;

use hashbrown::HashMap;
use tracing::debug;

/// The fixed room topology for one session
#[derive(Debug, Clone)]
pub struct Mansion {
    rooms: Vec<Room>,
    entry: RoomId,
    by_name: HashMap<String, RoomId>,
}

impl Mansion {
    /// Build the mansion from a layout, rooted at the room named `entry`.
    pub fn build(entry: &str, layout: &[RoomSpec]) -> Result<Self, LayoutError> {
        if layout.is_empty() {
            return Err(LayoutError::NoRooms);
        }

        let mut rooms = Vec::with_capacity(layout.len());
        let mut by_name = HashMap::with_capacity(layout.len());
        for (index, spec) in layout.iter().enumerate() {
            if spec.name.trim().is_empty() {
                return Err(LayoutError::BlankName { index });
            }
            let id = RoomId(index as u32);
            if by_name.insert(spec.name.clone(), id).is_some() {
                return Err(LayoutError::DuplicateRoom(spec.name.clone()));
            }
            rooms.push(Room::new(&spec.name, spec.clue.as_deref()));
        }

        let entry_id = *by_name
            .get(entry)
            .ok_or_else(|| LayoutError::UnknownEntry(entry.to_string()))?;

        // Wire exits, allowing each room a single parent
        let mut has_parent = vec![false; rooms.len()];
        for (index, spec) in layout.iter().enumerate() {
            for direction in Direction::ALL {
                let Some(target) = spec.exit(direction) else {
                    continue;
                };
                let child = *by_name.get(target).ok_or_else(|| LayoutError::UnknownExit {
                    room: spec.name.clone(),
                    direction,
                    target: target.to_string(),
                })?;
                if child == entry_id {
                    return Err(LayoutError::EntryAsExit {
                        room: spec.name.clone(),
                    });
                }
                if has_parent[child.index()] {
                    return Err(LayoutError::MultipleParents {
                        room: target.to_string(),
                    });
                }
                has_parent[child.index()] = true;
                rooms[index].set_exit(direction, child);
            }
        }

        let mansion = Self {
            rooms,
            entry: entry_id,
            by_name,
        };

        // Single parents plus full reachability rule out cycles
        let mut reached = vec![false; mansion.rooms.len()];
        for (id, _) in mansion.walk() {
            reached[id.index()] = true;
        }
        if let Some(lost) = reached.iter().position(|r| !r) {
            return Err(LayoutError::Unreachable(mansion.rooms[lost].name.clone()));
        }

        debug!(
            rooms = mansion.len(),
            entry = %mansion[mansion.entry].name,
            "mansion built"
        );
        Ok(mansion)
    }

    /// The room exploration starts in
    pub fn entry(&self) -> RoomId {
        self.entry
    }

    /// Get a room by id
    pub fn get(&self, id: RoomId) -> Option<&Room> {
        self.rooms.get(id.index())
    }

    /// Find a room by name
    pub fn find(&self, name: &str) -> Option<RoomId> {
        self.by_name.get(name).copied()
    }

    /// Number of rooms
    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    /// A built mansion always has its entry room
    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    /// Check if `room` has an exit in `direction`
    pub fn has_exit(&self, room: RoomId, direction: Direction) -> bool {
        self.get(room).is_some_and(|r| r.has_exit(direction))
    }

    /// Room behind the `direction` exit of `room`
    pub fn exit(&self, room: RoomId, direction: Direction) -> Option<RoomId> {
        self.get(room).and_then(|r| r.exit(direction))
    }

    /// Directions available from `room`, left before right
    pub fn exits(&self, room: RoomId) -> Vec<Direction> {
        self.get(room)
            .map(|r| r.exits().map(|(dir, _)| dir).collect())
            .unwrap_or_default()
    }

    /// Check if `room` has no exits
    pub fn is_dead_end(&self, room: RoomId) -> bool {
        self.get(room).is_some_and(Room::is_dead_end)
    }

    /// Room ids and depths in pre-order from the entry (room, left, right)
    pub fn walk(&self) -> Walk<'_> {
        Walk {
            mansion: self,
            stack: vec![(self.entry, 0)],
        }
    }

    /// Rooms with their depth below the entry, in pre-order
    pub fn rooms(&self) -> impl Iterator<Item = (usize, &Room)> + '_ {
        self.walk().map(|(id, depth)| (depth, &self[id]))
    }

    /// Release every room. Returns the number of rooms released.
    pub fn teardown(self) -> usize {
        let released = self.rooms.len();
        debug!(released, "mansion torn down");
        released
    }
}

impl Index<RoomId> for Mansion {
    type Output = Room;

    fn index(&self, id: RoomId) -> &Room {
        &self.rooms[id.index()]
    }
}

/// Pre-order walk over the mansion, yielding `(room, depth)`
pub struct Walk<'a> {
    mansion: &'a Mansion,
    stack: Vec<(RoomId, usize)>,
}

impl Iterator for Walk<'_> {
    type Item = (RoomId, usize);

    fn next(&mut self) -> Option<Self::Item> {
        let (id, depth) = self.stack.pop()?;
        let room = &self.mansion[id];
        // Right first so left pops first
        if let Some(right) = room.exit(Direction::Right) {
            self.stack.push((right, depth + 1));
        }
        if let Some(left) = room.exit(Direction::Left) {
            self.stack.push((left, depth + 1));
        }
        Some((id, depth))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_layout() -> Vec<RoomSpec> {
        vec![
            RoomSpec::new("Hall", Some("glove")).left("Parlor").right("Library"),
            RoomSpec::new("Parlor", Some("glass")).left("Kitchen"),
            RoomSpec::new("Library", None),
            RoomSpec::new("Kitchen", Some("knife")),
        ]
    }

    #[test]
    fn test_build_small_mansion() {
        let mansion = Mansion::build("Hall", &small_layout()).unwrap();

        assert_eq!(mansion.len(), 4);
        let hall = mansion.entry();
        assert_eq!(mansion[hall].name, "Hall");
        assert!(mansion.has_exit(hall, Direction::Left));
        assert!(mansion.has_exit(hall, Direction::Right));

        let parlor = mansion.exit(hall, Direction::Left).unwrap();
        assert_eq!(mansion[parlor].name, "Parlor");
        assert_eq!(mansion.exits(parlor), vec![Direction::Left]);
        assert!(!mansion.has_exit(parlor, Direction::Right));
        assert_eq!(mansion.exit(parlor, Direction::Right), None);

        let library = mansion.find("Library").unwrap();
        assert!(mansion.is_dead_end(library));
        assert_eq!(mansion[library].clue(), None);
    }

    #[test]
    fn test_entry_need_not_be_first() {
        let layout = vec![
            RoomSpec::new("Cellar", None),
            RoomSpec::new("Hall", None).right("Cellar"),
        ];
        let mansion = Mansion::build("Hall", &layout).unwrap();
        assert_eq!(mansion[mansion.entry()].name, "Hall");
    }

    #[test]
    fn test_walk_is_preorder() {
        let mansion = Mansion::build("Hall", &small_layout()).unwrap();
        let names: Vec<_> = mansion
            .rooms()
            .map(|(depth, room)| (depth, room.name.as_str()))
            .collect();
        assert_eq!(
            names,
            vec![(0, "Hall"), (1, "Parlor"), (2, "Kitchen"), (1, "Library")]
        );
    }

    #[test]
    fn test_no_rooms() {
        assert_eq!(Mansion::build("Hall", &[]).unwrap_err(), LayoutError::NoRooms);
    }

    #[test]
    fn test_blank_name() {
        let layout = vec![RoomSpec::new("Hall", None), RoomSpec::new("  ", None)];
        assert_eq!(
            Mansion::build("Hall", &layout).unwrap_err(),
            LayoutError::BlankName { index: 1 }
        );
    }

    #[test]
    fn test_duplicate_room() {
        let layout = vec![RoomSpec::new("Hall", None), RoomSpec::new("Hall", None)];
        assert_eq!(
            Mansion::build("Hall", &layout).unwrap_err(),
            LayoutError::DuplicateRoom("Hall".to_string())
        );
    }

    #[test]
    fn test_unknown_entry() {
        assert_eq!(
            Mansion::build("Foyer", &small_layout()).unwrap_err(),
            LayoutError::UnknownEntry("Foyer".to_string())
        );
    }

    #[test]
    fn test_unknown_exit() {
        let layout = vec![RoomSpec::new("Hall", None).right("Attic")];
        assert!(matches!(
            Mansion::build("Hall", &layout).unwrap_err(),
            LayoutError::UnknownExit { direction: Direction::Right, .. }
        ));
    }

    #[test]
    fn test_exit_back_to_entry() {
        let layout = vec![
            RoomSpec::new("Hall", None).left("Parlor"),
            RoomSpec::new("Parlor", None).left("Hall"),
        ];
        assert_eq!(
            Mansion::build("Hall", &layout).unwrap_err(),
            LayoutError::EntryAsExit {
                room: "Parlor".to_string()
            }
        );
    }

    #[test]
    fn test_shared_child() {
        let layout = vec![
            RoomSpec::new("Hall", None).left("Parlor").right("Library"),
            RoomSpec::new("Parlor", None).left("Kitchen"),
            RoomSpec::new("Library", None).right("Kitchen"),
            RoomSpec::new("Kitchen", None),
        ];
        assert_eq!(
            Mansion::build("Hall", &layout).unwrap_err(),
            LayoutError::MultipleParents {
                room: "Kitchen".to_string()
            }
        );
    }

    #[test]
    fn test_detached_cycle_is_unreachable() {
        let layout = vec![
            RoomSpec::new("Hall", None),
            RoomSpec::new("Attic", None).left("Loft"),
            RoomSpec::new("Loft", None).left("Attic"),
        ];
        assert!(matches!(
            Mansion::build("Hall", &layout).unwrap_err(),
            LayoutError::Unreachable(_)
        ));
    }

    #[test]
    fn test_teardown_counts_rooms() {
        let mansion = Mansion::build("Hall", &small_layout()).unwrap();
        assert_eq!(mansion.teardown(), 4);
    }
}
