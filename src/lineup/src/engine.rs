//! Stateful lineup engine.
//!
//! Bundles the stat table, the ownership store, and the current query. The
//! ranked results are memoized on `(query, limits, ownership revision)` so
//! repeated reads do not re-run the enumeration. Any input change clears the
//! selected lineup.

use thiserror::Error;

use crate::candidates::{prepare_candidates, Candidate, LineupLimits};
use crate::cap::{effective_level, Mode};
use crate::catalog::{Catalog, CatalogError};
use crate::filter::MinStats;
use crate::lineup::{build_lineups, LineupQuery, LineupResult};
use crate::reference::{Category, Stat, StatLine};
use crate::store::{OwnershipStore, SlotStorage, StoreError};

#[derive(Error, Debug)]
pub enum EngineError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CacheKey {
    query: LineupQuery,
    limits: LineupLimits,
    revision: u64,
}

#[derive(Debug)]
struct Cached {
    key: CacheKey,
    results: Vec<LineupResult>,
}

/// Lineup engine over one catalog and one ownership store
#[derive(Debug)]
pub struct LineupEngine<S> {
    catalog: Catalog,
    store: OwnershipStore<S>,
    limits: LineupLimits,
    query: LineupQuery,
    cache: Option<Cached>,
    selected: Option<usize>,
    computations: u64,
}

impl<S: SlotStorage> LineupEngine<S> {
    /// Create an engine. The store should already be loaded.
    pub fn new(catalog: Catalog, store: OwnershipStore<S>) -> Self {
        LineupEngine {
            catalog,
            store,
            limits: LineupLimits::default(),
            query: LineupQuery::default(),
            cache: None,
            selected: None,
            computations: 0,
        }
    }

    pub fn with_limits(mut self, limits: LineupLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn store(&self) -> &OwnershipStore<S> {
        &self.store
    }

    pub fn query(&self) -> &LineupQuery {
        &self.query
    }

    pub fn limits(&self) -> &LineupLimits {
        &self.limits
    }

    pub fn mode(&self) -> Mode {
        self.query.mode
    }

    pub fn cap(&self) -> u8 {
        self.query.cap
    }

    pub fn min_stats(&self) -> &MinStats {
        &self.query.min_stats
    }

    /// Times the full enumeration has run
    pub fn computations(&self) -> u64 {
        self.computations
    }

    // === Inputs ===

    /// Switch mode; the cap resets to the mode's default
    pub fn set_mode(&mut self, mode: Mode) {
        if self.query.mode == mode {
            return;
        }
        self.query.mode = mode;
        self.query.cap = mode.default_cap();
        self.inputs_changed();
    }

    /// Select a cap, clamped to what the current mode allows. Returns the applied cap.
    pub fn set_cap(&mut self, requested: i64) -> u8 {
        let cap = self.query.mode.policy().clamp_selection(requested);
        if i64::from(cap) != requested {
            tracing::warn!(requested, applied = cap, mode = %self.query.mode, "Cap clamped");
        }
        if cap != self.query.cap {
            self.query.cap = cap;
            self.inputs_changed();
        }
        cap
    }

    pub fn set_min_stat(&mut self, stat: Stat, value: u32) {
        if self.query.min_stats.get(stat) != value {
            self.query.min_stats.set(stat, value);
            self.inputs_changed();
        }
    }

    /// Set a threshold from raw text (non-digits dropped, empty = 0)
    pub fn set_min_stat_input(&mut self, stat: Stat, input: &str) -> u32 {
        let value = crate::filter::sanitize_input(input);
        self.set_min_stat(stat, value);
        value
    }

    pub fn set_limits(&mut self, limits: LineupLimits) {
        if self.limits != limits {
            self.limits = limits;
            self.inputs_changed();
        }
    }

    /// Record an owned level, clamped to the item's max. 0 removes the item.
    pub fn set_owned_level(&mut self, id: &str, level: u8) -> Result<u8, EngineError> {
        let item = self.catalog.require(id)?;
        let level = level.min(item.max_level);
        self.store.set(id, level)?;
        self.inputs_changed();
        Ok(level)
    }

    /// Forget one item, known to the catalog or not. Returns whether it was owned.
    pub fn clear_owned(&mut self, id: &str) -> Result<bool, EngineError> {
        let removed = self.store.delete(id)?;
        if removed {
            self.inputs_changed();
        }
        Ok(removed)
    }

    /// Forget every owned level
    pub fn reset_all(&mut self) -> Result<(), EngineError> {
        self.store.reset()?;
        self.inputs_changed();
        Ok(())
    }

    fn inputs_changed(&mut self) {
        self.selected = None;
    }

    // === Outputs ===

    fn cache_key(&self) -> CacheKey {
        CacheKey {
            query: self.query,
            limits: self.limits,
            revision: self.store.revision(),
        }
    }

    fn ensure_computed(&mut self) -> &[LineupResult] {
        let key = self.cache_key();
        let stale = self.cache.as_ref().map_or(true, |c| c.key != key);
        if stale {
            let results = build_lineups(&self.catalog, self.store.levels(), &key.query, &key.limits);
            self.computations += 1;
            // Ownership can change underneath via a fresh revision; never keep a stale pointer
            self.selected = None;
            self.cache = Some(Cached { key, results });
        }
        match &self.cache {
            Some(cached) => cached.results.as_slice(),
            None => &[],
        }
    }

    /// Ranked lineups for the current inputs
    pub fn ranked_results(&mut self) -> &[LineupResult] {
        self.ensure_computed()
    }

    /// Lineup at a 0-based position
    pub fn result_at(&mut self, index: usize) -> Option<&LineupResult> {
        self.ensure_computed().get(index)
    }

    /// Mark a lineup as selected; returns it if the index is valid
    pub fn select(&mut self, index: usize) -> Option<&LineupResult> {
        let valid = index < self.ensure_computed().len();
        self.selected = valid.then_some(index);
        self.selected_result()
    }

    /// Currently selected lineup, if any
    pub fn selected(&mut self) -> Option<&LineupResult> {
        self.ensure_computed();
        self.selected_result()
    }

    fn selected_result(&self) -> Option<&LineupResult> {
        let index = self.selected?;
        self.cache.as_ref()?.results.get(index)
    }

    /// Best owned items in one category, ranked at the current sorting cap
    pub fn candidates_for(&self, category: Category) -> Vec<Candidate<'_>> {
        prepare_candidates(
            &self.catalog,
            self.store.levels(),
            category,
            self.query.sorting_cap(),
            self.limits.top_k(category),
        )
    }

    /// Effective level and stats of an owned item at the current sorting cap
    pub fn effective_stats(&self, id: &str) -> Option<(u8, StatLine)> {
        let item = self.catalog.get(id)?;
        let owned = self.store.level(id).min(item.max_level);
        let level = effective_level(owned, self.query.sorting_cap());
        Some((level, item.stats_at(level)))
    }
}
