//! Line-based game front end
//!
//! Reads choices from any [`BufRead`] and writes narration to any [`Write`],
//! so the binary drives it with stdin/stdout and tests with in-memory buffers.

use std::fmt;
use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use strum::IntoEnumIterator;
use tracing::{debug, info, warn};

use dq_core::{
    AccusationError, CaseFile, Direction, Discovery, ExplorationReport, Explorer, Mansion,
    Session, SessionSummary, Step, Verdict, VerdictReport, Visit,
};

use crate::cli::Args;

/// How a session is played
#[derive(Debug, Clone, Default)]
pub struct PlayOptions {
    /// Scripted moves; prompts are skipped when present
    pub path: Option<Vec<String>>,
    /// Name to accuse without prompting
    pub accuse: Option<String>,
    /// Suppress narration and print the summary as JSON
    pub json: bool,
}

impl From<&Args> for PlayOptions {
    fn from(args: &Args) -> Self {
        Self {
            path: args.path.clone(),
            accuse: args.accuse.clone(),
            json: args.json,
        }
    }
}

/// Terminal-style console over arbitrary streams
pub struct Console<R, W> {
    input: R,
    output: W,
    quiet: bool,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            quiet: false,
        }
    }

    /// Give back the output stream
    pub fn into_output(self) -> W {
        self.output
    }

    /// Play one session of `case` from start to teardown
    pub fn play(&mut self, case: &CaseFile, options: &PlayOptions) -> Result<SessionSummary> {
        self.quiet = options.json;
        let mut session = Session::new(case).context("Failed to set up the investigation")?;

        self.say(format_args!("=============================================="))?;
        self.say(format_args!("   {}", session.title()))?;
        self.say(format_args!("=============================================="))?;
        let entry = session.mansion().entry();
        self.say(format_args!(
            "You start in the {}. Explore the mansion and collect clues.",
            session.mansion()[entry].name
        ))?;
        self.say(format_args!(
            "Commands: [l] left, [r] right, [s] stop (go to the accusation)"
        ))?;

        let exploration = {
            let mut explorer = session.explore();
            match &options.path {
                Some(moves) => self.explore_scripted(&mut explorer, moves)?,
                None => self.explore_interactive(&mut explorer)?,
            }
            explorer.finish()
        };
        info!(
            rooms = exploration.trail.len(),
            outcome = %exploration.outcome,
            "exploration finished"
        );
        self.say(format_args!("\nYour path: {}", format_trail(&exploration)))?;

        self.list_clues(&session)?;
        let example = session.suspects().suspects().first().map(|s| s.to_string());
        let verdict = match &options.accuse {
            Some(name) => Some(session.accuse(name).context("Invalid accusation")?),
            None => self.prompt_accusation(&session, example.as_deref())?,
        };
        if let Some(report) = &verdict {
            self.show_verdict(report)?;
        }

        let summary = session.summary(exploration, verdict);
        let released = session.teardown();
        debug!(?released, "session closed");

        if options.json {
            serde_json::to_writer_pretty(&mut self.output, &summary)
                .context("Failed to write JSON report")?;
            writeln!(self.output)?;
        } else {
            self.say(format_args!("\nInvestigation closed. Thanks for playing!"))?;
        }
        self.output.flush()?;
        Ok(summary)
    }

    /// Print the mansion layout, one room per line, indented by depth
    pub fn show_map(&mut self, case: &CaseFile) -> Result<()> {
        let session = Session::new(case).context("Failed to set up the investigation")?;
        writeln!(self.output, "{}", session.title())?;
        for (depth, room) in session.mansion().rooms() {
            let indent = "  ".repeat(depth);
            match room.clue() {
                Some(clue) => writeln!(self.output, "{indent}{} [{clue}]", room.name)?,
                None => writeln!(self.output, "{indent}{}", room.name)?,
            }
        }
        self.output.flush()?;
        Ok(())
    }

    fn explore_interactive(&mut self, explorer: &mut Explorer<'_>) -> Result<()> {
        self.show_arrival(explorer.mansion(), explorer.arrival())?;
        while !explorer.is_finished() {
            self.show_options(explorer)?;
            self.prompt("Your choice: ")?;
            let Some(line) = self.read_line()? else {
                info!("input closed during exploration");
                self.say(format_args!("\nInput closed. Ending the exploration."))?;
                break;
            };
            match explorer.choose_token(&line) {
                Ok(step) => self.show_step(explorer.mansion(), step)?,
                Err(err) => {
                    debug!(%err, "choice rejected");
                    self.say(format_args!("{err}. Try again."))?;
                }
            }
        }
        Ok(())
    }

    fn explore_scripted(&mut self, explorer: &mut Explorer<'_>, moves: &[String]) -> Result<()> {
        self.show_arrival(explorer.mansion(), explorer.arrival())?;
        for (at, token) in moves.iter().enumerate() {
            if explorer.is_finished() {
                warn!(ignored = moves.len() - at, "exploration over, ignoring remaining moves");
                break;
            }
            self.say(format_args!("> {token}"))?;
            let step = explorer
                .choose_token(token)
                .with_context(|| format!("Scripted move #{} ('{token}') rejected", at + 1))?;
            self.show_step(explorer.mansion(), step)?;
        }
        Ok(())
    }

    fn show_step(&mut self, mansion: &Mansion, step: Step) -> io::Result<()> {
        match step {
            Step::Moved(visit) => self.show_arrival(mansion, &visit),
            Step::Stopped => self.say(format_args!(
                "Ending the exploration and heading to the accusation..."
            )),
        }
    }

    fn show_arrival(&mut self, mansion: &Mansion, visit: &Visit) -> io::Result<()> {
        self.say(format_args!("\n--- Current room: {} ---", mansion[visit.room].name))?;
        match &visit.discovery {
            Some(found) => self.show_discovery(found)?,
            None => self.say(format_args!("Nothing of interest here."))?,
        }
        if visit.is_dead_end() {
            self.say(format_args!("This room has no exits. The exploration is over."))?;
        }
        Ok(())
    }

    fn show_discovery(&mut self, found: &Discovery) -> io::Result<()> {
        if found.new {
            self.say(format_args!("Clue found: \"{}\"", found.clue))?;
        } else {
            self.say(format_args!("Clue found again: \"{}\" (already noted)", found.clue))?;
        }
        match &found.suspect {
            Some(suspect) => self.say(format_args!("   (this clue points to: {suspect})")),
            None => self.say(format_args!("   (no suspect implicated)")),
        }
    }

    fn show_options(&mut self, explorer: &Explorer<'_>) -> io::Result<()> {
        let mansion = explorer.mansion();
        let here = explorer.current();
        self.say(format_args!("\nOptions:"))?;
        for direction in Direction::iter() {
            if let Some(next) = mansion.exit(here, direction) {
                let label = direction.to_string();
                let key = &label[..1];
                self.say(format_args!(
                    "  [{key}] Go {direction} -> {}",
                    mansion[next].name
                ))?;
            }
        }
        self.say(format_args!("  [s] Stop exploring and go to the accusation"))
    }

    fn list_clues(&mut self, session: &Session) -> io::Result<()> {
        self.say(format_args!("\n=============================================="))?;
        self.say(format_args!(" Final phase: collected clues"))?;
        self.say(format_args!("=============================================="))?;
        if session.clues().is_empty() {
            return self.say(format_args!("No clues were collected during the investigation."));
        }
        self.say(format_args!("Collected clues (alphabetical):"))?;
        for clue in session.clues() {
            self.say(format_args!(" * {clue}"))?;
        }
        Ok(())
    }

    /// Ask for a name until a non-blank one arrives. `None` when input closes.
    fn prompt_accusation(
        &mut self,
        session: &Session,
        example: Option<&str>,
    ) -> Result<Option<VerdictReport>> {
        loop {
            match example {
                Some(name) => self.prompt(&format!(
                    "\nName the suspect you accuse (e.g. '{name}'): "
                ))?,
                None => self.prompt("\nName the suspect you accuse: ")?,
            }
            let Some(line) = self.read_line()? else {
                info!("input closed before an accusation");
                self.say(format_args!("\nNo name given. Closing without an accusation."))?;
                return Ok(None);
            };
            match session.accuse(&line) {
                Ok(report) => return Ok(Some(report)),
                Err(AccusationError::Blank) => {
                    self.say(format_args!("Please enter a name."))?;
                }
            }
        }
    }

    fn show_verdict(&mut self, report: &VerdictReport) -> io::Result<()> {
        self.say(format_args!("\nYou accused: {}", report.accused))?;
        self.say(format_args!(
            "Clues pointing at {}: {}",
            report.accused, report.count
        ))?;
        for clue in &report.matching_clues {
            self.say(format_args!(" * {clue}"))?;
        }
        match report.verdict {
            Verdict::Sustained => {
                self.say(format_args!("\nResult: ACCUSATION SUSTAINED"))?;
                self.say(format_args!(
                    "There is enough evidence to support the accusation against {}.",
                    report.accused
                ))
            }
            Verdict::NotSustained => {
                self.say(format_args!("\nResult: ACCUSATION NOT SUSTAINED"))?;
                self.say(format_args!(
                    "Not enough evidence to convict {}. Look for more clues.",
                    report.accused
                ))
            }
        }
    }

    /// Next input line without its terminator, `None` at end of input.
    /// Bytes that are not UTF-8 are replaced, never fatal.
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut raw = Vec::new();
        if self.input.read_until(b'\n', &mut raw)? == 0 {
            return Ok(None);
        }
        let line = String::from_utf8_lossy(&raw);
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn prompt(&mut self, text: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        write!(self.output, "{text}")?;
        self.output.flush()
    }

    fn say(&mut self, line: fmt::Arguments<'_>) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.output.write_fmt(line)?;
        writeln!(self.output)
    }
}

/// Run the front end for parsed arguments
pub fn run<R: BufRead, W: Write>(args: &Args, case: &CaseFile, input: R, output: W) -> Result<()> {
    let mut console = Console::new(input, output);
    if args.map {
        return console.show_map(case);
    }
    let summary = console.play(case, &PlayOptions::from(args))?;
    debug!(
        clues = summary.clues.len(),
        verdict = ?summary.verdict.as_ref().map(|v| v.verdict),
        "session summary"
    );
    Ok(())
}

/// Exploration trail as "A -> B -> C"
pub fn format_trail(report: &ExplorationReport) -> String {
    report.trail.join(" -> ")
}
