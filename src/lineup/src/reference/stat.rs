//! Stat dimensions and six-stat value lines

use serde::{Deserialize, Serialize};
use std::iter::Sum;
use std::ops::{Add, AddAssign};

use super::{normalize_name, ParseError};

/// Number of stat dimensions every item carries
pub const STAT_COUNT: usize = 6;

/// One of the six stat dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stat {
    Agility,
    Stamina,
    Serve,
    Volley,
    Forehand,
    Backhand,
}

impl Stat {
    /// All stats in table column order
    pub const ALL: [Stat; STAT_COUNT] = [
        Stat::Agility,
        Stat::Stamina,
        Stat::Serve,
        Stat::Volley,
        Stat::Forehand,
        Stat::Backhand,
    ];

    /// Column index of this stat within a [`StatLine`]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Lowercase name as used in stat tables
    pub fn name(self) -> &'static str {
        match self {
            Stat::Agility => "agility",
            Stat::Stamina => "stamina",
            Stat::Serve => "serve",
            Stat::Volley => "volley",
            Stat::Forehand => "forehand",
            Stat::Backhand => "backhand",
        }
    }

    /// Two-letter column header
    pub fn abbrev(self) -> &'static str {
        match self {
            Stat::Agility => "AG",
            Stat::Stamina => "ST",
            Stat::Serve => "SE",
            Stat::Volley => "VO",
            Stat::Forehand => "FO",
            Stat::Backhand => "BA",
        }
    }
}

impl std::fmt::Display for Stat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for Stat {
    type Err = ParseError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = normalize_name(s);
        Stat::ALL
            .into_iter()
            .find(|stat| stat.name() == key || stat.abbrev().eq_ignore_ascii_case(&key))
            .ok_or_else(|| ParseError::UnknownStat(s.to_string()))
    }
}

/// Values for all six stats, indexed by [`Stat::index`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StatLine(pub [u32; STAT_COUNT]);

impl StatLine {
    /// All stats zero (unowned item or placeholder slot)
    pub const ZERO: StatLine = StatLine([0; STAT_COUNT]);

    pub fn new(values: [u32; STAT_COUNT]) -> Self {
        StatLine(values)
    }

    pub fn get(&self, stat: Stat) -> u32 {
        self.0[stat.index()]
    }

    pub fn set(&mut self, stat: Stat, value: u32) {
        self.0[stat.index()] = value;
    }

    /// Sum of all six stats, saturating like `+=`
    pub fn power(&self) -> u32 {
        self.0.iter().fold(0u32, |acc, &v| acc.saturating_add(v))
    }

    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|&v| v == 0)
    }

    /// Iterate `(stat, value)` pairs in column order
    pub fn iter(&self) -> impl Iterator<Item = (Stat, u32)> + '_ {
        Stat::ALL.into_iter().map(move |stat| (stat, self.get(stat)))
    }
}

impl Add for StatLine {
    type Output = StatLine;

    fn add(mut self, rhs: StatLine) -> StatLine {
        self += rhs;
        self
    }
}

impl AddAssign for StatLine {
    fn add_assign(&mut self, rhs: StatLine) {
        for (lhs, rhs) in self.0.iter_mut().zip(rhs.0) {
            *lhs = lhs.saturating_add(rhs);
        }
    }
}

impl Sum for StatLine {
    fn sum<I: Iterator<Item = StatLine>>(iter: I) -> StatLine {
        iter.fold(StatLine::ZERO, Add::add)
    }
}
