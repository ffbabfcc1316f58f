//! Command dispatch functions
//!
//! Breaks up the main match statement into focused dispatch functions.

use std::path::Path;

use anyhow::Result;

use crate::cli::*;
use crate::commands;

/// Dispatch level subcommands
pub fn dispatch_level(catalog: Option<&Path>, command: LevelCommand) -> Result<()> {
    match command {
        LevelCommand::Set { id, level } => commands::level::set(catalog, &id, level),
        LevelCommand::Clear { id } => commands::level::clear(catalog, &id),
        LevelCommand::List => commands::level::list(catalog),
        LevelCommand::Reset { yes } => commands::level::reset(catalog, yes),
    }
}
