//! Exploration controller
//!
//! Walks the player through the mansion one choice at a time. Entering a room
//! collects its clue into the [`ClueIndex`] and reports which suspect the
//! clue implicates. The walk ends when the player stops or reaches a room with
//! no exits.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::Display;
use thiserror::Error;
use tracing::{debug, info};

use crate::clues::ClueIndex;
use crate::mansion::{Direction, Mansion, RoomId};
use crate::suspects::SuspectDirectory;

/// A player choice at a room
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Choice {
    /// Walk through an exit
    Go(Direction),
    /// Stop exploring and move on to the accusation
    Stop,
}

impl Choice {
    /// Parse a typed token: `left`/`l`, `right`/`r`, `stop`/`s`, any case
    pub fn parse(token: &str) -> Result<Self, NavigationError> {
        let token = token.trim();
        if token.eq_ignore_ascii_case("stop") || token.eq_ignore_ascii_case("s") {
            return Ok(Choice::Stop);
        }
        Direction::from_str(token)
            .map(Choice::Go)
            .map_err(|_| NavigationError::Unrecognized(token.to_string()))
    }
}

impl FromStr for Choice {
    type Err = NavigationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Choice::parse(s)
    }
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Choice::Go(direction) => write!(f, "{}", direction),
            Choice::Stop => write!(f, "stop"),
        }
    }
}

/// Rejected choices. None of them change the exploration state.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NavigationError {
    #[error("Unrecognized choice '{0}'")]
    Unrecognized(String),

    #[error("There is no way {direction} from the {room}")]
    NoExit { room: String, direction: Direction },

    #[error("The exploration is over")]
    Finished,
}

/// How an exploration ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
pub enum Outcome {
    /// The player chose to stop
    #[strum(to_string = "stopped")]
    Stopped,
    /// The player reached a room with no exits
    #[strum(to_string = "dead end")]
    DeadEnd,
}

/// A clue found on entering a room
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Discovery {
    pub room: String,
    pub clue: String,
    /// False when the clue was already in the index
    pub new: bool,
    /// Suspect the clue points at, if any
    pub suspect: Option<String>,
}

/// What the player sees on entering a room
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Visit {
    pub room: RoomId,
    pub discovery: Option<Discovery>,
    /// Exits on offer; empty at a dead end
    pub exits: Vec<Direction>,
}

impl Visit {
    pub fn is_dead_end(&self) -> bool {
        self.exits.is_empty()
    }
}

/// Result of an accepted choice
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Entered another room
    Moved(Visit),
    /// The player stopped exploring
    Stopped,
}

/// Summary of a finished exploration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExplorationReport {
    /// Room names in visiting order, starting at the entry
    pub trail: Vec<String>,
    pub discoveries: Vec<Discovery>,
    pub outcome: Outcome,
}

/// Drives one walk through the mansion
pub struct Explorer<'s> {
    mansion: &'s Mansion,
    suspects: &'s SuspectDirectory,
    clues: &'s mut ClueIndex,
    current: RoomId,
    trail: Vec<RoomId>,
    discoveries: Vec<Discovery>,
    arrival: Visit,
    outcome: Option<Outcome>,
}

impl<'s> Explorer<'s> {
    /// Start at the mansion entry, collecting whatever is found there
    pub fn new(
        mansion: &'s Mansion,
        suspects: &'s SuspectDirectory,
        clues: &'s mut ClueIndex,
    ) -> Self {
        let entry = mansion.entry();
        let mut explorer = Self {
            mansion,
            suspects,
            clues,
            current: entry,
            trail: Vec::new(),
            discoveries: Vec::new(),
            arrival: Visit {
                room: entry,
                discovery: None,
                exits: Vec::new(),
            },
            outcome: None,
        };
        explorer.arrival = explorer.enter(entry);
        explorer
    }

    /// Mansion being explored
    pub fn mansion(&self) -> &'s Mansion {
        self.mansion
    }

    /// Room the player is standing in
    pub fn current(&self) -> RoomId {
        self.current
    }

    /// Visit record of the current room
    pub fn arrival(&self) -> &Visit {
        &self.arrival
    }

    /// Choices on offer; empty once the exploration is over
    pub fn options(&self) -> Vec<Choice> {
        if self.is_finished() {
            return Vec::new();
        }
        let mut options: Vec<Choice> = self.arrival.exits.iter().copied().map(Choice::Go).collect();
        options.push(Choice::Stop);
        options
    }

    pub fn is_finished(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    /// Apply a choice. Rejected choices leave everything untouched.
    pub fn choose(&mut self, choice: Choice) -> Result<Step, NavigationError> {
        if self.is_finished() {
            return Err(NavigationError::Finished);
        }

        match choice {
            Choice::Stop => {
                info!(room = %self.mansion[self.current].name, "exploration stopped");
                self.outcome = Some(Outcome::Stopped);
                Ok(Step::Stopped)
            }
            Choice::Go(direction) => {
                let next = self.mansion.exit(self.current, direction).ok_or_else(|| {
                    NavigationError::NoExit {
                        room: self.mansion[self.current].name.clone(),
                        direction,
                    }
                })?;
                debug!(
                    from = %self.mansion[self.current].name,
                    to = %self.mansion[next].name,
                    %direction,
                    "moved"
                );
                self.arrival = self.enter(next);
                Ok(Step::Moved(self.arrival.clone()))
            }
        }
    }

    /// Parse a typed token and apply it
    pub fn choose_token(&mut self, token: &str) -> Result<Step, NavigationError> {
        let choice = Choice::parse(token)?;
        self.choose(choice)
    }

    /// Number of rooms entered so far, the entry included
    pub fn rooms_visited(&self) -> usize {
        self.trail.len()
    }

    /// End the walk. An unfinished walk counts as stopped.
    pub fn finish(self) -> ExplorationReport {
        ExplorationReport {
            trail: self
                .trail
                .iter()
                .map(|id| self.mansion[*id].name.clone())
                .collect(),
            discoveries: self.discoveries,
            outcome: self.outcome.unwrap_or(Outcome::Stopped),
        }
    }

    fn enter(&mut self, id: RoomId) -> Visit {
        let mansion = self.mansion;
        let room = &mansion[id];
        self.current = id;
        self.trail.push(id);

        let mut discovery = None;
        if let Some(clue) = room.clue() {
            let new = self.clues.insert(clue);
            let suspect = self.suspects.lookup(clue).map(str::to_string);
            info!(
                room = %room.name,
                clue,
                new,
                suspect = suspect.as_deref().unwrap_or("-"),
                "clue found"
            );
            let found = Discovery {
                room: room.name.clone(),
                clue: clue.to_string(),
                new,
                suspect,
            };
            self.discoveries.push(found.clone());
            discovery = Some(found);
        }

        let exits = mansion.exits(id);
        if exits.is_empty() {
            info!(room = %room.name, "dead end, exploration over");
            self.outcome = Some(Outcome::DeadEnd);
        }

        Visit {
            room: id,
            discovery,
            exits,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mansion::RoomSpec;

    fn fixture() -> (Mansion, SuspectDirectory) {
        let mansion = Mansion::build(
            "Hall",
            &[
                RoomSpec::new("Hall", Some("glove")).left("Parlor").right("Library"),
                RoomSpec::new("Parlor", Some("glass")).left("Kitchen"),
                RoomSpec::new("Library", None),
                RoomSpec::new("Kitchen", Some("glove")),
            ],
        )
        .unwrap();
        let mut suspects = SuspectDirectory::new();
        suspects.insert_or_update("glove", "Mr. A");
        (mansion, suspects)
    }

    #[test]
    fn test_choice_parsing() {
        assert_eq!(Choice::parse("left"), Ok(Choice::Go(Direction::Left)));
        assert_eq!(Choice::parse(" R "), Ok(Choice::Go(Direction::Right)));
        assert_eq!(Choice::parse("STOP"), Ok(Choice::Stop));
        assert_eq!(Choice::parse("s"), Ok(Choice::Stop));
        assert_eq!(
            Choice::parse("upstairs"),
            Err(NavigationError::Unrecognized("upstairs".to_string()))
        );
        assert_eq!("l".parse::<Choice>(), Ok(Choice::Go(Direction::Left)));
        assert_eq!(Choice::Go(Direction::Right).to_string(), "right");
    }

    #[test]
    fn test_entry_clue_collected_on_start() {
        let (mansion, suspects) = fixture();
        let mut clues = ClueIndex::new();
        let explorer = Explorer::new(&mansion, &suspects, &mut clues);

        let found = explorer.arrival().discovery.clone().unwrap();
        assert_eq!(found.clue, "glove");
        assert!(found.new);
        assert_eq!(found.suspect.as_deref(), Some("Mr. A"));
        assert_eq!(
            explorer.options(),
            vec![
                Choice::Go(Direction::Left),
                Choice::Go(Direction::Right),
                Choice::Stop
            ]
        );
        drop(explorer);
        assert!(clues.contains("glove"));
    }

    #[test]
    fn test_missing_exit_rejected_without_change() {
        let (mansion, suspects) = fixture();
        let mut clues = ClueIndex::new();
        let mut explorer = Explorer::new(&mansion, &suspects, &mut clues);
        explorer.choose(Choice::Go(Direction::Left)).unwrap();
        let parlor = explorer.current();

        let err = explorer.choose(Choice::Go(Direction::Right)).unwrap_err();
        assert!(matches!(err, NavigationError::NoExit { direction: Direction::Right, .. }));
        assert_eq!(explorer.current(), parlor);
        assert_eq!(explorer.rooms_visited(), 2);

        assert!(explorer.choose_token("sideways").is_err());
        assert_eq!(explorer.current(), parlor);
        assert!(!explorer.is_finished());
    }

    #[test]
    fn test_repeat_clue_is_not_new() {
        let (mansion, suspects) = fixture();
        let mut clues = ClueIndex::new();
        let mut explorer = Explorer::new(&mansion, &suspects, &mut clues);
        explorer.choose_token("left").unwrap();
        let step = explorer.choose_token("left").unwrap();

        let Step::Moved(visit) = step else {
            panic!("expected a move");
        };
        let found = visit.discovery.unwrap();
        assert_eq!(found.clue, "glove");
        assert!(!found.new);

        let report = explorer.finish();
        assert_eq!(report.discoveries.len(), 3);
        assert_eq!(clues.len(), 2);
    }

    #[test]
    fn test_dead_end_ends_exploration() {
        let (mansion, suspects) = fixture();
        let mut clues = ClueIndex::new();
        let mut explorer = Explorer::new(&mansion, &suspects, &mut clues);

        let Step::Moved(visit) = explorer.choose_token("right").unwrap() else {
            panic!("expected a move");
        };
        assert!(visit.is_dead_end());
        assert!(visit.discovery.is_none());
        assert!(explorer.is_finished());
        assert_eq!(explorer.outcome(), Some(Outcome::DeadEnd));
        assert!(explorer.options().is_empty());
        assert_eq!(explorer.choose_token("left"), Err(NavigationError::Finished));
        assert_eq!(explorer.choose(Choice::Stop), Err(NavigationError::Finished));

        let report = explorer.finish();
        assert_eq!(report.trail, vec!["Hall", "Library"]);
        assert_eq!(report.outcome, Outcome::DeadEnd);
    }

    #[test]
    fn test_stop_ends_exploration() {
        let (mansion, suspects) = fixture();
        let mut clues = ClueIndex::new();
        let mut explorer = Explorer::new(&mansion, &suspects, &mut clues);
        assert_eq!(explorer.choose_token("stop"), Ok(Step::Stopped));
        assert_eq!(explorer.choose_token("left"), Err(NavigationError::Finished));

        let report = explorer.finish();
        assert_eq!(report.trail, vec!["Hall"]);
        assert_eq!(report.outcome, Outcome::Stopped);
    }

    #[test]
    fn test_single_room_mansion_is_over_at_once() {
        let mansion = Mansion::build("Cell", &[RoomSpec::new("Cell", Some("chalk"))]).unwrap();
        let suspects = SuspectDirectory::new();
        let mut clues = ClueIndex::new();
        let explorer = Explorer::new(&mansion, &suspects, &mut clues);

        assert!(explorer.is_finished());
        assert!(explorer.arrival().is_dead_end());
        assert_eq!(explorer.finish().outcome, Outcome::DeadEnd);
        assert!(clues.contains("chalk"));
    }
}
