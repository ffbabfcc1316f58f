//! Per-category candidate pools.
//!
//! Before enumeration each category is reduced to its strongest owned items,
//! ranked by power at the sorting cap and truncated to that category's top-K.
//! A category with nothing owned gets a single zero-stat placeholder so every
//! lineup still fills all seven slots.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::catalog::{Catalog, ItemDef};
use crate::cap::effective_level;
use crate::reference::{Category, StatLine};

/// Name shown for a slot with nothing owned
pub const PLACEHOLDER_NAME: &str = "(none)";

/// Candidate pool sizes and result bound
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct LineupLimits {
    pub character: usize,
    pub racket: usize,
    pub grip: usize,
    pub shoe: usize,
    pub wristband: usize,
    pub nutrition: usize,
    pub workout: usize,
    /// Lineups kept after ranking
    pub max_results: usize,
}

impl Default for LineupLimits {
    fn default() -> Self {
        Self {
            character: 10,
            racket: 10,
            grip: 10,
            shoe: 5,
            wristband: 5,
            nutrition: 5,
            workout: 5,
            max_results: 200,
        }
    }
}

impl LineupLimits {
    /// Pool size for a category. Never below 1 so no slot can be emptied.
    pub fn top_k(&self, category: Category) -> usize {
        let k = match category {
            Category::Character => self.character,
            Category::Racket => self.racket,
            Category::Grip => self.grip,
            Category::Shoe => self.shoe,
            Category::Wristband => self.wristband,
            Category::Nutrition => self.nutrition,
            Category::Workout => self.workout,
        };
        k.max(1)
    }

    pub fn with_top_k(mut self, category: Category, k: usize) -> Self {
        let slot = match category {
            Category::Character => &mut self.character,
            Category::Racket => &mut self.racket,
            Category::Grip => &mut self.grip,
            Category::Shoe => &mut self.shoe,
            Category::Wristband => &mut self.wristband,
            Category::Nutrition => &mut self.nutrition,
            Category::Workout => &mut self.workout,
        };
        *slot = k;
        self
    }

    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    /// Upper bound on combinations a full enumeration can visit
    pub fn worst_case_combinations(&self) -> usize {
        Category::ALL.into_iter().map(|c| self.top_k(c)).product()
    }
}

/// An item considered for one lineup slot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate<'a> {
    pub category: Category,
    /// None for the placeholder
    pub item: Option<&'a ItemDef>,
    pub owned_level: u8,
    /// Level the candidate was ranked at
    pub sort_level: u8,
    pub sort_stats: StatLine,
}

impl<'a> Candidate<'a> {
    fn owned(item: &'a ItemDef, owned_level: u8, sorting_cap: u8) -> Self {
        let sort_level = effective_level(owned_level, sorting_cap);
        Candidate {
            category: item.category,
            item: Some(item),
            owned_level,
            sort_level,
            sort_stats: item.stats_at(sort_level),
        }
    }

    pub fn placeholder(category: Category) -> Self {
        Candidate {
            category,
            item: None,
            owned_level: 0,
            sort_level: 0,
            sort_stats: StatLine::ZERO,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.item.is_none()
    }

    pub fn id(&self) -> Option<&'a str> {
        self.item.map(|i| i.id.as_str())
    }

    pub fn name(&self) -> &'a str {
        self.item.map_or(PLACEHOLDER_NAME, |i| i.name.as_str())
    }

    /// Power at the sorting cap
    pub fn power(&self) -> u32 {
        self.sort_stats.power()
    }

    /// Effective level and stats under a lineup cap
    pub fn at_cap(&self, cap: u8) -> (u8, StatLine) {
        match self.item {
            Some(item) => {
                let level = effective_level(self.owned_level, cap);
                (level, item.stats_at(level))
            }
            None => (0, StatLine::ZERO),
        }
    }
}

/// Ranked, truncated pool for one category
pub fn prepare_candidates<'a>(
    catalog: &'a Catalog,
    owned: &BTreeMap<String, u8>,
    category: Category,
    sorting_cap: u8,
    top_k: usize,
) -> Vec<Candidate<'a>> {
    let mut pool: Vec<Candidate<'a>> = catalog
        .in_category(category)
        .filter_map(|item| {
            let level = owned.get(&item.id).copied().unwrap_or(0).min(item.max_level);
            (level > 0).then(|| Candidate::owned(item, level, sorting_cap))
        })
        .collect();

    if pool.is_empty() {
        return vec![Candidate::placeholder(category)];
    }

    // Stable sort keeps id order among equal power
    pool.sort_by(|a, b| b.power().cmp(&a.power()));
    pool.truncate(top_k.max(1));
    pool
}

/// Pools for all seven categories, in slot order
pub fn prepare_all<'a>(
    catalog: &'a Catalog,
    owned: &BTreeMap<String, u8>,
    sorting_cap: u8,
    limits: &LineupLimits,
) -> Vec<Vec<Candidate<'a>>> {
    Category::ALL
        .into_iter()
        .map(|category| {
            let pool =
                prepare_candidates(catalog, owned, category, sorting_cap, limits.top_k(category));
            tracing::debug!(%category, candidates = pool.len(), "Prepared candidate pool");
            pool
        })
        .collect()
}
