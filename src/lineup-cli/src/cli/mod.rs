//! CLI argument definitions for lineup
//!
//! This module contains all clap-derived structs and enums for CLI parsing.

mod build;
mod core;
mod level;

pub use build::BuildArgs;
pub use core::{Cli, Commands};
pub use level::LevelCommand;
