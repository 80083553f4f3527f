//! Accusation verdicts
//!
//! Walks the collected clues in alphabetical order, resolves each one to its
//! suspect and counts the clues that point at the accused. Two corroborating
//! clues sustain the accusation.

use serde::{Deserialize, Serialize};
use strum::Display;
use thiserror::Error;
use tracing::info;

use crate::clues::ClueIndex;
use crate::suspects::SuspectDirectory;

/// Corroborating clues needed to sustain an accusation
pub const CORROBORATION_THRESHOLD: usize = 2;

/// Outcome of an accusation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum Verdict {
    #[strum(to_string = "sustained")]
    Sustained,
    #[strum(to_string = "not sustained")]
    NotSustained,
}

impl Verdict {
    /// Verdict for a corroborating-clue count
    pub const fn from_count(count: usize) -> Self {
        if count >= CORROBORATION_THRESHOLD {
            Verdict::Sustained
        } else {
            Verdict::NotSustained
        }
    }
}

/// Rejected accusations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AccusationError {
    #[error("No suspect was named")]
    Blank,
}

/// A validated accused name: trimmed and never empty
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Accusation {
    name: String,
}

impl Accusation {
    /// Validate raw player input
    pub fn new(raw: &str) -> Result<Self, AccusationError> {
        let name = raw.trim();
        if name.is_empty() {
            return Err(AccusationError::Blank);
        }
        Ok(Self {
            name: name.to_string(),
        })
    }

    /// The accused, as typed (trimmed)
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Case-insensitive comparison against a suspect name
    pub fn names(&self, suspect: &str) -> bool {
        self.name
            .chars()
            .flat_map(char::to_lowercase)
            .eq(suspect.chars().flat_map(char::to_lowercase))
    }
}

/// Everything the front end needs to announce a verdict
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerdictReport {
    /// Accused name (trimmed)
    pub accused: String,

    /// Clues pointing at the accused, alphabetically
    pub matching_clues: Vec<String>,

    /// Number of matching clues
    pub count: usize,

    /// Matches needed to sustain
    pub threshold: usize,

    pub verdict: Verdict,
}

/// Judge an accusation against the collected clues.
///
/// Blank names are rejected before any clue is examined.
pub fn evaluate(
    clues: &ClueIndex,
    suspects: &SuspectDirectory,
    accused: &str,
) -> Result<VerdictReport, AccusationError> {
    let accusation = Accusation::new(accused)?;
    Ok(judge(clues, suspects, &accusation))
}

/// Judge an already validated accusation
pub fn judge(
    clues: &ClueIndex,
    suspects: &SuspectDirectory,
    accusation: &Accusation,
) -> VerdictReport {
    let matching_clues: Vec<String> = clues
        .iter()
        .filter(|clue| {
            suspects
                .lookup(clue)
                .is_some_and(|suspect| accusation.names(suspect))
        })
        .map(str::to_string)
        .collect();

    let count = matching_clues.len();
    let verdict = Verdict::from_count(count);
    info!(accused = accusation.name(), count, %verdict, "accusation judged");

    VerdictReport {
        accused: accusation.name().to_string(),
        matching_clues,
        count,
        threshold: CORROBORATION_THRESHOLD,
        verdict,
    }
}
