//! Investigation sessions
//!
//! A session owns the three structures of one playthrough: the mansion, the
//! suspect directory and the clue index. It hands out the explorer, judges the
//! accusation and tears everything down in order.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::casefile::CaseFile;
use crate::clues::ClueIndex;
use crate::explore::{ExplorationReport, Explorer};
use crate::mansion::{LayoutError, Mansion};
use crate::suspects::{DirectoryError, SuspectDirectory};
use crate::verdict::{self, AccusationError, VerdictReport};

/// Errors building a session from a case file
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SetupError {
    #[error("Invalid mansion layout: {0}")]
    Layout(#[from] LayoutError),

    #[error("Invalid suspect directory: {0}")]
    Directory(#[from] DirectoryError),
}

/// Everything released at the end of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TeardownReport {
    pub clues: usize,
    pub suspect_links: usize,
    pub rooms: usize,
}

/// Final record of a playthrough, ready for rendering
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub title: String,
    pub exploration: ExplorationReport,
    /// Collected clues, alphabetically
    pub clues: Vec<String>,
    /// Absent when the player never named anyone
    pub verdict: Option<VerdictReport>,
}

/// One playthrough of a case
#[derive(Debug)]
pub struct Session {
    title: String,
    mansion: Mansion,
    suspects: SuspectDirectory,
    clues: ClueIndex,
}

impl Session {
    /// Build the mansion and preload the suspect directory
    pub fn new(case: &CaseFile) -> Result<Self, SetupError> {
        let mansion = Mansion::build(&case.entry, &case.rooms)?;
        let suspects = SuspectDirectory::from_links(case.buckets, &case.suspects)?;

        for (clue, suspect) in suspects.iter() {
            if !mansion.walk().any(|(id, _)| mansion[id].clue() == Some(clue)) {
                debug!(clue, suspect, "linked clue appears in no room");
            }
        }

        info!(
            title = %case.title,
            rooms = mansion.len(),
            links = suspects.len(),
            "session ready"
        );
        Ok(Self {
            title: case.title.clone(),
            mansion,
            suspects,
            clues: ClueIndex::new(),
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn mansion(&self) -> &Mansion {
        &self.mansion
    }

    pub fn suspects(&self) -> &SuspectDirectory {
        &self.suspects
    }

    pub fn clues(&self) -> &ClueIndex {
        &self.clues
    }

    /// Begin exploring from the entry room
    pub fn explore(&mut self) -> Explorer<'_> {
        Explorer::new(&self.mansion, &self.suspects, &mut self.clues)
    }

    /// Judge an accusation against the clues collected so far
    pub fn accuse(&self, accused: &str) -> Result<VerdictReport, AccusationError> {
        verdict::evaluate(&self.clues, &self.suspects, accused)
    }

    /// Bundle the results of a playthrough
    pub fn summary(
        &self,
        exploration: ExplorationReport,
        verdict: Option<VerdictReport>,
    ) -> SessionSummary {
        SessionSummary {
            title: self.title.clone(),
            exploration,
            clues: self.clues.iter().map(str::to_string).collect(),
            verdict,
        }
    }

    /// Release the clue index and directory, then the mansion
    pub fn teardown(self) -> TeardownReport {
        let report = TeardownReport {
            clues: self.clues.teardown(),
            suspect_links: self.suspects.teardown(),
            rooms: self.mansion.teardown(),
        };
        debug!(?report, "session torn down");
        report
    }
}
