//! Competitive modes and their level-cap rules.
//!
//! Every mode maps to one [`CapPolicy`]. A policy knows three things: how a
//! user's cap input is clamped, which cap governs a particular lineup, and
//! which cap is used when ranking candidates before the lineup is known.

use serde::{Deserialize, Serialize};

use crate::reference::{
    nearest_tier, normalize_name, ParseError, MAX_LEVEL, MIN_LEVEL, TOURNAMENT_TIERS,
};

/// Headroom Regular mode grants over the character's level
pub const REGULAR_HEADROOM: u8 = 2;

/// Competitive mode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Mode {
    #[default]
    GrandTour,
    Regular,
    Tournament,
}

impl Mode {
    pub const ALL: [Mode; 3] = [Mode::GrandTour, Mode::Regular, Mode::Tournament];

    /// Cap selected when switching into this mode
    pub fn default_cap(self) -> u8 {
        match self {
            Mode::GrandTour | Mode::Regular => MAX_LEVEL,
            // Junior
            Mode::Tournament => TOURNAMENT_TIERS[1].cap,
        }
    }

    /// Cap rules for this mode
    pub fn policy(self) -> &'static dyn CapPolicy {
        match self {
            Mode::GrandTour => &SelectedCap,
            Mode::Regular => &CharacterHeadroom,
            Mode::Tournament => &TierCap,
        }
    }

    /// Whether the user picks the cap (false when it is derived per lineup)
    pub fn has_selectable_cap(self) -> bool {
        !matches!(self, Mode::Regular)
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::GrandTour => write!(f, "Grand Tour"),
            Self::Regular => write!(f, "Regular"),
            Self::Tournament => write!(f, "Tournament"),
        }
    }
}

impl std::str::FromStr for Mode {
    type Err = ParseError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_name(s).as_str() {
            "grandtour" | "gt" => Ok(Self::GrandTour),
            "regular" => Ok(Self::Regular),
            "tournament" | "tournaments" => Ok(Self::Tournament),
            _ => Err(ParseError::UnknownMode(s.to_string())),
        }
    }
}

/// Level-cap rules for one mode
pub trait CapPolicy: Sync {
    /// Clamp a requested cap to the nearest value this mode allows
    fn clamp_selection(&self, requested: i64) -> u8;

    /// Cap governing a lineup whose character is owned at `character_level`
    fn derive_cap(&self, character_level: u8, selected: u8) -> u8;

    /// Cap used to rank candidates before the lineup's character is known.
    /// Must never be lower than any cap [`derive_cap`](Self::derive_cap) can return.
    fn sorting_cap(&self, selected: u8) -> u8;
}

/// Grand Tour: any cap from 1 to 15, applied to every slot
#[derive(Debug, Clone, Copy)]
pub struct SelectedCap;

impl CapPolicy for SelectedCap {
    fn clamp_selection(&self, requested: i64) -> u8 {
        let clamped = requested.clamp(i64::from(MIN_LEVEL), i64::from(MAX_LEVEL));
        u8::try_from(clamped).unwrap_or(MAX_LEVEL)
    }

    fn derive_cap(&self, _character_level: u8, selected: u8) -> u8 {
        selected.clamp(MIN_LEVEL, MAX_LEVEL)
    }

    fn sorting_cap(&self, selected: u8) -> u8 {
        self.derive_cap(0, selected)
    }
}

/// Tournament: one of the fixed tier caps, applied to every slot
#[derive(Debug, Clone, Copy)]
pub struct TierCap;

impl CapPolicy for TierCap {
    fn clamp_selection(&self, requested: i64) -> u8 {
        nearest_tier(requested).cap
    }

    fn derive_cap(&self, _character_level: u8, selected: u8) -> u8 {
        nearest_tier(i64::from(selected)).cap
    }

    fn sorting_cap(&self, selected: u8) -> u8 {
        self.derive_cap(0, selected)
    }
}

/// Regular: the character's level plus headroom caps the whole lineup
#[derive(Debug, Clone, Copy)]
pub struct CharacterHeadroom;

impl CapPolicy for CharacterHeadroom {
    fn clamp_selection(&self, _requested: i64) -> u8 {
        MAX_LEVEL
    }

    fn derive_cap(&self, character_level: u8, _selected: u8) -> u8 {
        // No character owned: nothing to tie the cap to
        if character_level == 0 {
            return MAX_LEVEL;
        }
        character_level
            .saturating_add(REGULAR_HEADROOM)
            .min(MAX_LEVEL)
    }

    fn sorting_cap(&self, _selected: u8) -> u8 {
        MAX_LEVEL
    }
}

/// Owned level after applying a cap. Unowned items stay at 0.
pub fn effective_level(owned_level: u8, cap: u8) -> u8 {
    if owned_level == 0 {
        return 0;
    }
    owned_level.min(cap).min(MAX_LEVEL)
}

/// Effective level of an item within a lineup under `mode`
pub fn effective_level_for(mode: Mode, owned_level: u8, character_level: u8, selected: u8) -> u8 {
    let cap = mode.policy().derive_cap(character_level, selected);
    effective_level(owned_level, cap)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_from_str() {
        assert_eq!("grand-tour".parse::<Mode>(), Ok(Mode::GrandTour));
        assert_eq!("GrandTour".parse::<Mode>(), Ok(Mode::GrandTour));
        assert_eq!("regular".parse::<Mode>(), Ok(Mode::Regular));
        assert_eq!("Tournaments".parse::<Mode>(), Ok(Mode::Tournament));
        assert!("ranked".parse::<Mode>().is_err());
    }

    #[test]
    fn test_default_caps() {
        assert_eq!(Mode::GrandTour.default_cap(), 15);
        assert_eq!(Mode::Tournament.default_cap(), 9);
        assert_eq!(Mode::Regular.default_cap(), 15);
    }

    #[test]
    fn test_grand_tour_clamp() {
        let policy = Mode::GrandTour.policy();
        assert_eq!(policy.clamp_selection(0), 1);
        assert_eq!(policy.clamp_selection(-5), 1);
        assert_eq!(policy.clamp_selection(7), 7);
        assert_eq!(policy.clamp_selection(40), 15);
    }

    #[test]
    fn test_tournament_clamp() {
        let policy = Mode::Tournament.policy();
        assert_eq!(policy.clamp_selection(6), 6);
        assert_eq!(policy.clamp_selection(10), 9);
        assert_eq!(policy.clamp_selection(11), 12);
        assert_eq!(policy.clamp_selection(1), 6);
        assert_eq!(policy.clamp_selection(100), 15);
        // Unclamped values passed straight to derive_cap still snap to a tier
        assert_eq!(policy.derive_cap(3, 13), 12);
    }

    #[test]
    fn test_regular_derived_cap() {
        let policy = Mode::Regular.policy();
        assert_eq!(policy.derive_cap(8, 6), 10);
        assert_eq!(policy.derive_cap(13, 6), 15);
        assert_eq!(policy.derive_cap(14, 6), 15);
        assert_eq!(policy.derive_cap(15, 6), 15);
        assert_eq!(policy.derive_cap(0, 6), 15);
        assert_eq!(policy.derive_cap(1, 6), 3);
    }

    #[test]
    fn test_sorting_cap_never_below_derived() {
        for mode in Mode::ALL {
            let policy = mode.policy();
            for selected in 1..=MAX_LEVEL {
                for character in 0..=MAX_LEVEL {
                    assert!(
                        policy.sorting_cap(selected) >= policy.derive_cap(character, selected),
                        "{mode} selected={selected} character={character}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_effective_level_bounds() {
        for mode in Mode::ALL {
            for selected in 1..=MAX_LEVEL {
                for owned in 0..=MAX_LEVEL {
                    for character in 0..=MAX_LEVEL {
                        let level = effective_level_for(mode, owned, character, selected);
                        assert!(level <= owned);
                        assert!(level <= MAX_LEVEL);
                    }
                }
            }
        }
    }

    #[test]
    fn test_effective_level() {
        assert_eq!(effective_level(0, 15), 0);
        assert_eq!(effective_level(10, 12), 10);
        assert_eq!(effective_level(14, 9), 9);
        assert_eq!(effective_level(20, 99), 15);
    }
}
