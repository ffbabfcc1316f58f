//! Reference data for lineup building
//!
//! Fixed game concepts: the six stat dimensions, the seven equipment
//! categories, and the named tournament tiers. None of this depends on the
//! stat table; it is used for parsing, display, and slot ordering.

mod category;
mod stat;
mod tier;

pub use category::{Category, CharacterKind, CATEGORY_COUNT};
pub use stat::{Stat, StatLine, STAT_COUNT};
pub use tier::{nearest_tier, tier_by_cap, tier_by_name, TournamentTier, TOURNAMENT_TIERS};

use thiserror::Error;

/// Highest level any item can reach
pub const MAX_LEVEL: u8 = 15;

/// Lowest level a selectable cap can take
pub const MIN_LEVEL: u8 = 1;

/// Errors from parsing reference names supplied by a user
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Unknown stat: {0}")]
    UnknownStat(String),

    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    #[error("Unknown character kind: {0}")]
    UnknownCharacterKind(String),

    #[error("Unknown game mode: {0}")]
    UnknownMode(String),

    #[error("Unknown tournament tier: {0}")]
    UnknownTier(String),
}

/// Normalize a user-supplied name for case/separator-insensitive matching
pub(crate) fn normalize_name(s: &str) -> String {
    s.chars()
        .filter(|c| !matches!(c, '-' | '_' | ' '))
        .flat_map(char::to_lowercase)
        .collect()
}
