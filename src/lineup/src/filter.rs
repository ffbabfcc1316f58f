//! Minimum-stat thresholds applied to lineup totals

use serde::{Deserialize, Serialize};

use crate::reference::{Stat, StatLine, STAT_COUNT};

/// Six independent lower bounds, one per stat. Zero means no constraint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MinStats([u32; STAT_COUNT]);

impl MinStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, stat: Stat) -> u32 {
        self.0[stat.index()]
    }

    pub fn set(&mut self, stat: Stat, value: u32) {
        self.0[stat.index()] = value;
    }

    /// Builder form of [`set`](Self::set)
    pub fn with(mut self, stat: Stat, value: u32) -> Self {
        self.set(stat, value);
        self
    }

    /// Set a threshold from raw text input; see [`sanitize_input`]
    pub fn set_from_input(&mut self, stat: Stat, input: &str) -> u32 {
        let value = sanitize_input(input);
        self.set(stat, value);
        value
    }

    /// True when no threshold is set
    pub fn is_empty(&self) -> bool {
        self.0.iter().all(|&v| v == 0)
    }

    /// True when every total meets its threshold
    pub fn accepts(&self, totals: &StatLine) -> bool {
        self.0.iter().zip(totals.0).all(|(&min, total)| total >= min)
    }

    /// Thresholds that are actually set
    pub fn active(&self) -> impl Iterator<Item = (Stat, u32)> + '_ {
        Stat::ALL
            .into_iter()
            .map(move |stat| (stat, self.get(stat)))
            .filter(|(_, v)| *v > 0)
    }
}

/// Keep only ASCII digits from `input`. Empty means 0; overflow saturates.
pub fn sanitize_input(input: &str) -> u32 {
    input
        .chars()
        .filter_map(|c| c.to_digit(10))
        .fold(0u32, |acc, d| acc.saturating_mul(10).saturating_add(d))
}
