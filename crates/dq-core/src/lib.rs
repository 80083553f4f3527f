//! dq-core: investigation engine for Detective Quest
//!
//! This crate contains all game rules with no terminal I/O.
//! It is designed to be pure and testable.
//!
//! A session is built from a [`CaseFile`]: the mansion layout becomes a
//! [`Mansion`], the clue-to-suspect list becomes a [`SuspectDirectory`], and
//! clues found while exploring accumulate in a [`ClueIndex`]. Once the player
//! stops, an accusation is judged by counting the collected clues that point
//! at the accused.

pub mod casefile;
pub mod clues;
pub mod explore;
pub mod mansion;
pub mod session;
pub mod suspects;
pub mod verdict;

pub use casefile::{CaseFile, CaseFileError};
pub use clues::ClueIndex;
pub use explore::{
    Choice, Discovery, ExplorationReport, Explorer, NavigationError, Outcome, Step, Visit,
};
pub use mansion::{Direction, LayoutError, Mansion, Room, RoomId, RoomSpec};
pub use session::{Session, SessionSummary, SetupError, TeardownReport};
pub use suspects::{DirectoryError, SuspectDirectory, SuspectLink};
pub use verdict::{
    Accusation, AccusationError, CORROBORATION_THRESHOLD, Verdict, VerdictReport, evaluate,
};

/// Engine version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
