//! The Almeida manor
//!
//! Eight rooms laid out as a binary tree below the entrance hall, one clue in
//! each, and the suspects those clues implicate.

use dq_core::{CaseFile, RoomSpec};

/// Case title
pub const TITLE: &str = "Detective Quest: The Final Investigation";

/// Room the player starts in
pub const ENTRY: &str = "Entrance Hall";

/// Static room definition
#[derive(Debug, Clone, Copy)]
pub struct RoomSeed {
    pub name: &'static str,
    pub clue: Option<&'static str>,
    pub left: Option<&'static str>,
    pub right: Option<&'static str>,
}

impl RoomSeed {
    pub const fn new(
        name: &'static str,
        clue: Option<&'static str>,
        left: Option<&'static str>,
        right: Option<&'static str>,
    ) -> Self {
        Self {
            name,
            clue,
            left,
            right,
        }
    }

    pub fn to_spec(&self) -> RoomSpec {
        let mut spec = RoomSpec::new(self.name, self.clue);
        spec.left = self.left.map(str::to_string);
        spec.right = self.right.map(str::to_string);
        spec
    }
}

/// Rooms of the manor, entry first
pub static ROOMS: &[RoomSeed] = &[
    RoomSeed::new(
        ENTRY,
        Some("Leather glove left on the floor"),
        Some("Living Room"),
        Some("Library"),
    ),
    RoomSeed::new(
        "Living Room",
        Some("Broken glass with traces of wine"),
        Some("Kitchen"),
        Some("Garden"),
    ),
    RoomSeed::new(
        "Library",
        Some("Open book signed M."),
        Some("Study"),
        Some("Cellar"),
    ),
    // The kitchen only opens onto the balcony
    RoomSeed::new(
        "Kitchen",
        Some("Knife with fresh marks"),
        None,
        Some("Balcony"),
    ),
    RoomSeed::new("Garden", Some("Wet footprints up to the gate"), None, None),
    RoomSeed::new(
        "Study",
        Some("Torn letter reading 'forgive me'"),
        None,
        None,
    ),
    RoomSeed::new("Balcony", Some("Cigarette with a special filter"), None, None),
    RoomSeed::new(
        "Cellar",
        Some("Scrap of red cloth caught on a nail"),
        None,
        None,
    ),
];

/// Clue to suspect links as (clue, suspect)
pub static SUSPECT_LINKS: &[(&str, &str)] = &[
    ("Leather glove left on the floor", "Mr. Almeida"),
    ("Broken glass with traces of wine", "Mrs. Beatriz"),
    ("Open book signed M.", "Dr. Marcos"),
    ("Knife with fresh marks", "Mr. Almeida"),
    ("Wet footprints up to the gate", "Young Carlos"),
    ("Torn letter reading 'forgive me'", "Mrs. Beatriz"),
    ("Cigarette with a special filter", "Dr. Marcos"),
    ("Scrap of red cloth caught on a nail", "Mr. Almeida"),
];

/// Build the built-in case
pub fn default_case() -> CaseFile {
    let mut case = CaseFile::new(TITLE, ENTRY);
    case.rooms = ROOMS.iter().map(RoomSeed::to_spec).collect();
    for (clue, suspect) in SUSPECT_LINKS {
        case = case.link(clue, suspect);
    }
    case
}
