//! Tournament tier definitions

use super::{normalize_name, MAX_LEVEL};

/// Tournament tier information
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TournamentTier {
    /// Level cap applied to every slot
    pub cap: u8,
    pub name: &'static str,
    /// Short label for narrow displays
    pub short: &'static str,
}

/// All tournament tiers, lowest cap first
pub const TOURNAMENT_TIERS: &[TournamentTier] = &[
    TournamentTier {
        cap: 6,
        name: "Rookie",
        short: "Rook",
    },
    TournamentTier {
        cap: 9,
        name: "Junior",
        short: "Jun",
    },
    TournamentTier {
        cap: 12,
        name: "Challenger",
        short: "Chal",
    },
    TournamentTier {
        cap: MAX_LEVEL,
        name: "Master",
        short: "Mast",
    },
];

/// Get tournament tier by exact cap
pub fn tier_by_cap(cap: u8) -> Option<&'static TournamentTier> {
    TOURNAMENT_TIERS.iter().find(|t| t.cap == cap)
}

/// Get tournament tier by name or short label (case-insensitive)
pub fn tier_by_name(name: &str) -> Option<&'static TournamentTier> {
    let key = normalize_name(name);
    TOURNAMENT_TIERS
        .iter()
        .find(|t| t.name.eq_ignore_ascii_case(&key) || t.short.eq_ignore_ascii_case(&key))
}

/// Tier whose cap is closest to `requested`; ties go to the higher tier
pub fn nearest_tier(requested: i64) -> &'static TournamentTier {
    let mut best = &TOURNAMENT_TIERS[0];
    for tier in TOURNAMENT_TIERS {
        let distance = (i64::from(tier.cap) - requested).abs();
        let best_distance = (i64::from(best.cap) - requested).abs();
        if distance <= best_distance {
            best = tier;
        }
    }
    best
}
