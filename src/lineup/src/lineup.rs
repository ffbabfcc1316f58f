//! Lineup enumeration and ranking.
//!
//! Walks the cartesian product of the per-category candidate pools. For each
//! combination the mode's true cap is resolved from the chosen character,
//! every slot is re-evaluated at that cap, totals are filtered against the
//! minimum stats, and survivors are ranked by total power.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::candidates::{prepare_all, Candidate, LineupLimits};
use crate::cap::Mode;
use crate::catalog::Catalog;
use crate::filter::MinStats;
use crate::product::CartesianProduct;
use crate::reference::{Category, StatLine, CATEGORY_COUNT};

/// Everything besides ownership that a lineup computation depends on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LineupQuery {
    pub mode: Mode,
    /// Selected cap; ignored by modes that derive their own
    pub cap: u8,
    pub min_stats: MinStats,
}

impl LineupQuery {
    pub fn new(mode: Mode) -> Self {
        LineupQuery {
            mode,
            cap: mode.default_cap(),
            min_stats: MinStats::default(),
        }
    }

    pub fn with_cap(mut self, requested: i64) -> Self {
        self.cap = self.mode.policy().clamp_selection(requested);
        self
    }

    pub fn with_min_stats(mut self, min_stats: MinStats) -> Self {
        self.min_stats = min_stats;
        self
    }

    /// Cap used for ranking candidates ahead of enumeration
    pub fn sorting_cap(&self) -> u8 {
        self.mode.policy().sorting_cap(self.cap)
    }
}

impl Default for LineupQuery {
    fn default() -> Self {
        Self::new(Mode::default())
    }
}

/// One filled slot of a lineup
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Slot {
    pub category: Category,
    /// None when nothing in the category is owned
    pub item_id: Option<String>,
    pub name: String,
    pub owned_level: u8,
    /// Level after the lineup's cap
    pub level: u8,
    pub stats: StatLine,
}

/// A ranked lineup
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineupResult {
    /// 1-based position after ranking
    pub rank: usize,
    /// Cap that governed this lineup
    pub cap: u8,
    pub slots: Vec<Slot>,
    pub totals: StatLine,
    pub total_power: u32,
}

impl LineupResult {
    pub fn slot(&self, category: Category) -> Option<&Slot> {
        self.slots.iter().find(|s| s.category == category)
    }
}

/// A surviving combination before it is materialized
struct Scored {
    picks: [usize; CATEGORY_COUNT],
    cap: u8,
    totals: StatLine,
    power: u32,
}

/// Evaluate one combination at its mode-specific cap
fn score(pools: &[Vec<Candidate<'_>>], picks: &[usize], query: &LineupQuery) -> (u8, StatLine) {
    let character_level = pools[Category::Character.slot()][picks[Category::Character.slot()]]
        .owned_level;
    let cap = query.mode.policy().derive_cap(character_level, query.cap);

    let totals = pools
        .iter()
        .zip(picks)
        .map(|(pool, &pick)| pool[pick].at_cap(cap).1)
        .sum();
    (cap, totals)
}

fn materialize(pools: &[Vec<Candidate<'_>>], scored: Scored, rank: usize) -> LineupResult {
    let slots = pools
        .iter()
        .zip(&scored.picks)
        .map(|(pool, &pick)| {
            let candidate = &pool[pick];
            let (level, stats) = candidate.at_cap(scored.cap);
            Slot {
                category: candidate.category,
                item_id: candidate.id().map(str::to_string),
                name: candidate.name().to_string(),
                owned_level: candidate.owned_level,
                level,
                stats,
            }
        })
        .collect();

    LineupResult {
        rank,
        cap: scored.cap,
        slots,
        totals: scored.totals,
        total_power: scored.power,
    }
}

/// Rank every lineup buildable from the owned items.
///
/// Results are sorted by total power, highest first, ties kept in
/// enumeration order, and truncated to `limits.max_results` only after the
/// full filtered set has been sorted.
pub fn build_lineups(
    catalog: &Catalog,
    owned: &BTreeMap<String, u8>,
    query: &LineupQuery,
    limits: &LineupLimits,
) -> Vec<LineupResult> {
    let any_owned = owned
        .iter()
        .any(|(id, &level)| level > 0 && catalog.contains(id));
    if !any_owned {
        tracing::debug!("Nothing owned, skipping enumeration");
        return Vec::new();
    }

    let pools = prepare_all(catalog, owned, query.sorting_cap(), limits);
    debug_assert_eq!(pools.len(), CATEGORY_COUNT);

    let product = CartesianProduct::new(pools.iter().map(Vec::len).collect());
    let combinations = product.total();

    let mut survivors: Vec<Scored> = product
        .filter_map(|picks| {
            let (cap, totals) = score(&pools, &picks, query);
            if !query.min_stats.accepts(&totals) {
                return None;
            }
            let mut compact = [0usize; CATEGORY_COUNT];
            compact.copy_from_slice(&picks);
            Some(Scored {
                power: totals.power(),
                picks: compact,
                cap,
                totals,
            })
        })
        .collect();

    tracing::debug!(
        combinations,
        survivors = survivors.len(),
        mode = %query.mode,
        "Enumerated lineups"
    );

    // Stable: equal power keeps enumeration order
    survivors.sort_by(|a, b| b.power.cmp(&a.power));
    survivors.truncate(limits.max_results);

    survivors
        .into_iter()
        .enumerate()
        .map(|(i, scored)| materialize(&pools, scored, i + 1))
        .collect()
}
