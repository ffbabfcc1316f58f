//! Core CLI definitions

use clap::{ArgAction, Parser, Subcommand};
use lineup::{Category, CharacterKind, Mode};
use std::path::PathBuf;

use super::build::BuildArgs;
use super::level::LevelCommand;

#[derive(Parser)]
#[command(name = "lineup")]
#[command(about = "Owned item tracker and lineup optimizer", long_about = None)]
pub struct Cli {
    /// Stat table JSON (overrides the configured one)
    #[arg(long, global = true, env = "LINEUP_CATALOG")]
    pub catalog: Option<PathBuf>,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List items in the stat table
    #[command(visible_alias = "ls")]
    Items {
        /// Only this category (e.g. "racket", "shoes")
        #[arg(short, long)]
        category: Option<Category>,

        /// Only characters of this kind (legends, champions)
        #[arg(short, long)]
        kind: Option<CharacterKind>,

        /// Only items with an owned level
        #[arg(short, long)]
        owned: bool,
    },

    /// Show one item's stats and upgrade costs per level
    #[command(visible_alias = "i")]
    Item {
        /// Item id as it appears in the stat table
        id: String,
    },

    /// Record owned levels (set, clear, list, reset)
    #[command(visible_alias = "l")]
    Level {
        #[command(subcommand)]
        command: LevelCommand,
    },

    /// Best owned items in one category
    Best {
        /// Category to rank
        category: Category,

        /// Competitive mode
        #[arg(short, long, default_value = "grand-tour")]
        mode: Mode,

        /// Level cap (clamped to what the mode allows)
        #[arg(short, long)]
        cap: Option<i64>,
    },

    /// Build and rank lineups from owned items
    #[command(visible_alias = "b")]
    Build(BuildArgs),

    /// Configure default settings
    #[command(visible_alias = "c")]
    Configure {
        /// Set default stat table path
        #[arg(long)]
        default_catalog: Option<PathBuf>,

        /// Set owned-levels storage file
        #[arg(long)]
        storage: Option<PathBuf>,

        /// Show current configuration
        #[arg(long)]
        show: bool,
    },
}
