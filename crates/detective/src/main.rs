//! Detective Quest in the terminal
//!
//! Main entry point for the game.

use std::io;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use detective::{Args, app, cli};

fn main() -> Result<()> {
    let args = Args::parse();

    // RUST_LOG wins over -v
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(args.log_filter()));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    tracing::debug!(version = dq_core::VERSION, "starting");

    let case = cli::load_case(&args)?;
    let stdin = io::stdin();
    let stdout = io::stdout();
    app::run(&args, &case, stdin.lock(), stdout.lock())
}
