//! Command-line arguments and case discovery

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use tracing::{debug, info};

use dq_core::CaseFile;

/// Directory under the platform config dir holding user cases
pub const CONFIG_DIR_NAME: &str = "detective-quest";

/// Case file looked up inside [`CONFIG_DIR_NAME`]
pub const CASE_FILE_NAME: &str = "case.toml";

/// Detective Quest in the terminal
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "detective")]
#[command(author, version, long_about = None)]
#[command(about = "Detective Quest - explore the mansion and name the culprit")]
pub struct Args {
    /// Case file to investigate (TOML) instead of the built-in case
    #[arg(short = 'c', long = "case")]
    pub case: Option<PathBuf>,

    /// Scripted exploration, e.g. "left,right,stop"
    #[arg(short = 'p', long = "path", value_delimiter = ',')]
    pub path: Option<Vec<String>>,

    /// Accuse this suspect without prompting
    #[arg(short = 'a', long = "accuse")]
    pub accuse: Option<String>,

    /// Print the final report as JSON
    #[arg(long = "json")]
    pub json: bool,

    /// Print the mansion layout and exit
    #[arg(long = "map")]
    pub map: bool,

    /// Raise the log level (-v info, -vv debug)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// Log filter used when RUST_LOG is not set
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }
}

/// Default location of a user case file
pub fn default_case_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CASE_FILE_NAME))
}

/// Pick the case to play: `--case`, then the config dir, then the built-in one
pub fn load_case(args: &Args) -> Result<CaseFile> {
    if let Some(path) = &args.case {
        info!(path = %path.display(), "loading case file");
        return CaseFile::load_from_file(path)
            .with_context(|| format!("Failed to load case from {}", path.display()));
    }

    if let Some(path) = default_case_path().filter(|p| p.exists()) {
        info!(path = %path.display(), "loading case file from config dir");
        return CaseFile::load_from_file(&path)
            .with_context(|| format!("Failed to load case from {}", path.display()));
    }

    debug!("using built-in case");
    Ok(dq_data::default_case())
}
