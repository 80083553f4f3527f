//! detective: terminal front end for Detective Quest
//!
//! Argument parsing and case discovery live in [`cli`], the line-based game
//! loop in [`app`].

pub mod app;
pub mod cli;

pub use app::{Console, PlayOptions};
pub use cli::Args;
