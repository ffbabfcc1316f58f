//! # lineup
//!
//! Lineup optimizer library - record owned item levels and compute the
//! strongest one-item-per-category lineup under competitive-mode level caps.
//!
//! This library provides functionality to:
//! - Load per-level stat tables for characters and equipment
//! - Track owned item levels with durable, load-gated persistence
//! - Apply Grand Tour, Regular, and Tournament level-cap rules
//! - Enumerate, filter, and rank lineups across the seven categories
//!
//! ## Example
//!
//! ```no_run
//! use lineup::{Catalog, JsonFileStorage, LineupEngine, Mode, OwnershipStore, Stat};
//! use std::path::Path;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let catalog = Catalog::load(Path::new("share/catalog.json"))?;
//! let mut store = OwnershipStore::new(JsonFileStorage::new("storage.json"));
//! store.load_validated(&catalog)?;
//!
//! let mut engine = LineupEngine::new(catalog, store);
//! engine.set_owned_level("characters/Jonah", 10)?;
//! engine.set_mode(Mode::Regular);
//! engine.set_min_stat(Stat::Agility, 40);
//!
//! for lineup in engine.ranked_results().iter().take(5) {
//!     println!("#{} power {}", lineup.rank, lineup.total_power);
//! }
//! # Ok(())
//! # }
//! ```

pub mod candidates;
pub mod cap;
pub mod catalog;
pub mod engine;
pub mod filter;
pub mod lineup;
pub mod product;
pub mod reference;
pub mod store;

// Re-export commonly used items
#[doc(inline)]
pub use candidates::{prepare_all, prepare_candidates, Candidate, LineupLimits, PLACEHOLDER_NAME};
#[doc(inline)]
pub use cap::{effective_level, effective_level_for, CapPolicy, Mode};
#[doc(inline)]
pub use catalog::{Catalog, CatalogError, ItemDef, UpgradeCost, UpgradeTotal};
#[doc(inline)]
pub use engine::{EngineError, LineupEngine};
#[doc(inline)]
pub use filter::{sanitize_input, MinStats};
#[doc(inline)]
pub use lineup::{build_lineups, LineupQuery, LineupResult, Slot};
#[doc(inline)]
pub use product::CartesianProduct;
#[doc(inline)]
pub use store::{
    JsonFileStorage, Lifecycle, MemoryStorage, OwnershipStore, SlotStorage, StoreError,
    OWNERSHIP_SLOT,
};

// Reference data (stats, categories, tournament tiers)
#[doc(inline)]
pub use reference::{
    nearest_tier, tier_by_cap, tier_by_name, Category, CharacterKind, ParseError, Stat, StatLine,
    TournamentTier, MAX_LEVEL, TOURNAMENT_TIERS,
};
