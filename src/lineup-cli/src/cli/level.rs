//! Owned level command CLI definitions

use clap::Subcommand;

#[derive(Subcommand)]
pub enum LevelCommand {
    /// Record the level an item is owned at (0 removes it)
    Set {
        /// Item id
        id: String,

        /// Owned level (clamped to the item's max)
        level: u8,
    },

    /// Remove an item from the owned list
    Clear {
        /// Item id
        id: String,
    },

    /// List owned items and levels
    List,

    /// Remove every owned level
    Reset {
        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}
