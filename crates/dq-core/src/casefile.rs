//! Case files
//!
//! A case file holds everything a session is built from: the mansion layout,
//! the entry room and the clue-to-suspect seed list. Case files are written
//! in TOML:
//!
//! ```toml
//! title = "The Glove Affair"
//! entry = "Hall"
//!
//! [[rooms]]
//! name = "Hall"
//! clue = "glove"
//! left = "Parlor"
//!
//! [[rooms]]
//! name = "Parlor"
//!
//! [[suspects]]
//! clue = "glove"
//! suspect = "Mr. A"
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::mansion::RoomSpec;
use crate::suspects::{DEFAULT_BUCKETS, SuspectLink};

/// Case file loading errors
#[derive(Error, Debug)]
pub enum CaseFileError {
    #[error("Could not read case file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Case file is not valid: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Case file could not be written: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Setup data for one investigation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseFile {
    /// Case title shown at the start of a session
    pub title: String,

    /// Name of the room exploration starts in
    pub entry: String,

    /// Bucket count of the suspect directory
    #[serde(default = "default_buckets")]
    pub buckets: usize,

    pub rooms: Vec<RoomSpec>,

    #[serde(default)]
    pub suspects: Vec<SuspectLink>,
}

fn default_buckets() -> usize {
    DEFAULT_BUCKETS
}

impl CaseFile {
    /// Create a case with no rooms or suspects
    pub fn new(title: &str, entry: &str) -> Self {
        Self {
            title: title.to_string(),
            entry: entry.to_string(),
            buckets: DEFAULT_BUCKETS,
            rooms: Vec::new(),
            suspects: Vec::new(),
        }
    }

    /// Add a room
    pub fn room(mut self, room: RoomSpec) -> Self {
        self.rooms.push(room);
        self
    }

    /// Add a clue-to-suspect association
    pub fn link(mut self, clue: &str, suspect: &str) -> Self {
        self.suspects.push(SuspectLink::new(clue, suspect));
        self
    }

    /// Parse a case from TOML text
    pub fn from_toml_str(contents: &str) -> Result<Self, CaseFileError> {
        let case: CaseFile = toml::from_str(contents)?;
        debug!(
            title = %case.title,
            rooms = case.rooms.len(),
            links = case.suspects.len(),
            "case file parsed"
        );
        Ok(case)
    }

    /// Load a case from a TOML file
    pub fn load_from_file(path: &Path) -> Result<Self, CaseFileError> {
        let contents = std::fs::read_to_string(path).map_err(|source| CaseFileError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    /// Render the case as TOML
    pub fn to_toml_string(&self) -> Result<String, CaseFileError> {
        Ok(toml::to_string(self)?)
    }
}
