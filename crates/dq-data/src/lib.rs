//! dq-data: Built-in case data for Detective Quest
//!
//! Contains the default mansion, its clues and the clue-to-suspect links.

pub mod manor;

pub use manor::{ENTRY, ROOMS, RoomSeed, SUSPECT_LINKS, TITLE, default_case};
