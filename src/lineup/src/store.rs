//! Owned-level store with durable persistence.
//!
//! The store maps item id to owned level. It starts `NotLoaded` and refuses
//! every mutation until [`OwnershipStore::load`] has read the durable slot, so
//! an empty initial state can never overwrite saved data. After that, every
//! mutation updates memory first and then writes the whole mapping back.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::catalog::Catalog;
use crate::reference::MAX_LEVEL;

/// Slot name the owned levels are persisted under
pub const OWNERSHIP_SLOT: &str = "savedLevels";

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Store has not been loaded yet")]
    NotLoaded,
}

/// Named durable slots holding serialized text
pub trait SlotStorage {
    /// Read a slot; `Ok(None)` when it was never written
    fn read_slot(&self, name: &str) -> Result<Option<String>, StoreError>;

    /// Replace a slot's contents
    fn write_slot(&mut self, name: &str, value: &str) -> Result<(), StoreError>;
}

/// In-memory slots, for tests and embedding
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    slots: HashMap<String, String>,
    writes: usize,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage with one slot already written
    pub fn with_slot(name: &str, value: &str) -> Self {
        let mut slots = HashMap::new();
        slots.insert(name.to_string(), value.to_string());
        MemoryStorage { slots, writes: 0 }
    }

    /// Number of writes performed so far
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl SlotStorage for MemoryStorage {
    fn read_slot(&self, name: &str) -> Result<Option<String>, StoreError> {
        Ok(self.slots.get(name).cloned())
    }

    fn write_slot(&mut self, name: &str, value: &str) -> Result<(), StoreError> {
        self.slots.insert(name.to_string(), value.to_string());
        self.writes += 1;
        Ok(())
    }
}

/// Slots kept as keys of one JSON object file
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileStorage { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_document(&self) -> Result<serde_json::Map<String, serde_json::Value>, StoreError> {
        if !self.path.exists() {
            return Ok(serde_json::Map::new());
        }
        let data = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&data)?)
    }
}

impl SlotStorage for JsonFileStorage {
    fn read_slot(&self, name: &str) -> Result<Option<String>, StoreError> {
        let document = self.read_document()?;
        Ok(document.get(name).map(|v| v.to_string()))
    }

    fn write_slot(&mut self, name: &str, value: &str) -> Result<(), StoreError> {
        let mut document = self.read_document().unwrap_or_else(|e| {
            tracing::warn!(path = %self.path.display(), error = %e, "Replacing unreadable storage file");
            serde_json::Map::new()
        });

        // Slot values that are not JSON are kept as plain strings
        let parsed = serde_json::from_str(value)
            .unwrap_or_else(|_| serde_json::Value::String(value.to_string()));
        document.insert(name.to_string(), parsed);

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(&document)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

/// Whether the durable copy has been read yet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Lifecycle {
    NotLoaded,
    Loaded,
}

/// Owned item levels, persisted after every change
#[derive(Debug)]
pub struct OwnershipStore<S> {
    storage: S,
    levels: BTreeMap<String, u8>,
    lifecycle: Lifecycle,
    revision: u64,
}

impl<S: SlotStorage> OwnershipStore<S> {
    pub fn new(storage: S) -> Self {
        OwnershipStore {
            storage,
            levels: BTreeMap::new(),
            lifecycle: Lifecycle::NotLoaded,
            revision: 0,
        }
    }

    /// Read the durable slot once. Missing or malformed data loads as empty.
    pub fn load(&mut self) -> Result<(), StoreError> {
        let levels = match self.storage.read_slot(OWNERSHIP_SLOT) {
            Ok(Some(text)) => parse_levels(&text),
            Ok(None) => BTreeMap::new(),
            Err(StoreError::Json(e)) => {
                tracing::warn!(error = %e, "Storage is not valid JSON, starting empty");
                BTreeMap::new()
            }
            Err(e) => return Err(e),
        };

        tracing::info!(items = levels.len(), "Loaded owned levels");
        self.levels = levels;
        self.lifecycle = Lifecycle::Loaded;
        self.revision += 1;
        Ok(())
    }

    /// Load, then clamp levels that exceed an item's max level
    pub fn load_validated(&mut self, catalog: &Catalog) -> Result<(), StoreError> {
        self.load()?;
        for (id, level) in self.levels.iter_mut() {
            if let Some(item) = catalog.get(id) {
                if *level > item.max_level {
                    tracing::warn!(%id, level = *level, max = item.max_level, "Clamping saved level");
                    *level = item.max_level;
                }
            }
        }
        Ok(())
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn is_loaded(&self) -> bool {
        self.lifecycle == Lifecycle::Loaded
    }

    /// Counter bumped by every change; equal revisions mean equal contents
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn levels(&self) -> &BTreeMap<String, u8> {
        &self.levels
    }

    /// Owned level of an item (0 when not owned)
    pub fn level(&self, id: &str) -> u8 {
        self.levels.get(id).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Record an owned level; 0 removes the item
    pub fn set(&mut self, id: &str, level: u8) -> Result<(), StoreError> {
        self.ensure_loaded()?;
        if level == 0 {
            self.delete(id)?;
            return Ok(());
        }
        if self.levels.get(id) == Some(&level) {
            return Ok(());
        }
        self.levels.insert(id.to_string(), level);
        self.changed()
    }

    /// Forget an item; returns whether it was owned
    pub fn delete(&mut self, id: &str) -> Result<bool, StoreError> {
        self.ensure_loaded()?;
        if self.levels.remove(id).is_none() {
            return Ok(false);
        }
        self.changed()?;
        Ok(true)
    }

    /// Forget every item
    pub fn reset(&mut self) -> Result<(), StoreError> {
        self.ensure_loaded()?;
        tracing::info!(items = self.levels.len(), "Resetting owned levels");
        self.levels.clear();
        self.changed()
    }

    fn ensure_loaded(&self) -> Result<(), StoreError> {
        match self.lifecycle {
            Lifecycle::Loaded => Ok(()),
            Lifecycle::NotLoaded => Err(StoreError::NotLoaded),
        }
    }

    fn changed(&mut self) -> Result<(), StoreError> {
        self.revision += 1;
        self.persist()
    }

    /// Write the full mapping to the durable slot
    fn persist(&mut self) -> Result<(), StoreError> {
        self.ensure_loaded()?;
        let json = serde_json::to_string(&self.levels)?;
        self.storage
            .write_slot(OWNERSHIP_SLOT, &json)
            .inspect_err(|e| tracing::warn!(error = %e, "Failed to persist owned levels"))
    }
}

/// Parse a persisted mapping, tolerating anything malformed
fn parse_levels(text: &str) -> BTreeMap<String, u8> {
    let value: serde_json::Value = match serde_json::from_str(text) {
        Ok(v) => v,
        Err(e) => {
            tracing::warn!(error = %e, "Saved levels are not valid JSON, starting empty");
            return BTreeMap::new();
        }
    };

    let Some(map) = value.as_object() else {
        tracing::warn!("Saved levels are not an object, starting empty");
        return BTreeMap::new();
    };

    map.iter()
        .filter_map(|(id, v)| {
            // Out-of-range levels clamp to the highest level any item has
            let level = v.as_u64()?.min(u64::from(MAX_LEVEL));
            let level = u8::try_from(level).ok()?;
            (level > 0).then(|| (id.clone(), level))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loaded() -> OwnershipStore<MemoryStorage> {
        let mut store = OwnershipStore::new(MemoryStorage::new());
        store.load().unwrap();
        store
    }

    #[test]
    fn test_writes_refused_before_load() {
        let mut store = OwnershipStore::new(MemoryStorage::with_slot(
            OWNERSHIP_SLOT,
            r#"{"chars/Jonah": 7}"#,
        ));
        assert_eq!(store.lifecycle(), Lifecycle::NotLoaded);
        assert!(matches!(store.set("gear/Eagle", 3), Err(StoreError::NotLoaded)));
        assert!(matches!(store.reset(), Err(StoreError::NotLoaded)));
        assert_eq!(store.storage().writes(), 0);

        store.load().unwrap();
        assert_eq!(store.level("chars/Jonah"), 7);
    }

    #[test]
    fn test_set_and_delete() {
        let mut store = loaded();
        store.set("chars/Jonah", 10).unwrap();
        store.set("gear/Eagle", 8).unwrap();
        assert_eq!(store.level("chars/Jonah"), 10);
        assert_eq!(store.len(), 2);

        store.set("chars/Jonah", 0).unwrap();
        assert_eq!(store.level("chars/Jonah"), 0);
        assert!(!store.levels().contains_key("chars/Jonah"));

        assert!(store.delete("gear/Eagle").unwrap());
        assert!(!store.delete("gear/Eagle").unwrap());
        assert!(store.is_empty());
    }

    #[test]
    fn test_every_mutation_persists() {
        let mut store = loaded();
        store.set("a", 1).unwrap();
        store.set("b", 2).unwrap();
        store.set("b", 2).unwrap(); // unchanged: no write
        store.delete("a").unwrap();
        assert_eq!(store.storage().writes(), 3);

        let saved = store.storage().read_slot(OWNERSHIP_SLOT).unwrap().unwrap();
        assert_eq!(saved, r#"{"b":2}"#);
    }

    #[test]
    fn test_revision_tracks_changes() {
        let mut store = loaded();
        let start = store.revision();
        store.set("a", 3).unwrap();
        assert_eq!(store.revision(), start + 1);
        store.set("a", 3).unwrap();
        assert_eq!(store.revision(), start + 1);
        store.reset().unwrap();
        assert_eq!(store.revision(), start + 2);
    }

    #[test]
    fn test_reset_then_reload_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");

        let mut store = OwnershipStore::new(JsonFileStorage::new(&path));
        store.load().unwrap();
        store.set("chars/Jonah", 5).unwrap();
        store.reset().unwrap();

        let mut reloaded = OwnershipStore::new(JsonFileStorage::new(&path));
        reloaded.load().unwrap();
        assert!(reloaded.is_empty());
    }

    #[test]
    fn test_malformed_data_loads_empty() {
        for bad in ["not json", "[1, 2, 3]", "42", r#""text""#] {
            let mut store =
                OwnershipStore::new(MemoryStorage::with_slot(OWNERSHIP_SLOT, bad));
            store.load().unwrap();
            assert!(store.is_empty(), "input {bad:?}");
            assert!(store.is_loaded());
        }
    }

    #[test]
    fn test_bad_entries_dropped() {
        let mut store = OwnershipStore::new(MemoryStorage::with_slot(
            OWNERSHIP_SLOT,
            r#"{"a": 3, "b": 0, "c": "7", "d": -1, "e": 999, "f": 15}"#,
        ));
        store.load().unwrap();
        let ids: Vec<_> = store.levels().keys().cloned().collect();
        assert_eq!(ids, vec!["a", "e", "f"]);
        assert_eq!(store.level("e"), MAX_LEVEL);
    }

    #[test]
    fn test_oversized_levels_clamp_like_fitting_ones() {
        use crate::catalog::ItemDef;
        use crate::reference::{Category, StatLine};

        let catalog = Catalog::from_items([
            ItemDef::new("gear/A", "A", Category::Racket, vec![StatLine::ZERO; 9]),
            ItemDef::new("gear/B", "B", Category::Racket, vec![StatLine::ZERO; 9]),
        ]);
        let mut store = OwnershipStore::new(MemoryStorage::with_slot(
            OWNERSHIP_SLOT,
            r#"{"gear/A": 20, "gear/B": 999}"#,
        ));
        store.load_validated(&catalog).unwrap();
        assert_eq!(store.level("gear/A"), 9);
        assert_eq!(store.level("gear/B"), 9);
    }

    #[test]
    fn test_load_validated_clamps() {
        use crate::catalog::ItemDef;
        use crate::reference::{Category, StatLine};

        let catalog = Catalog::from_items([ItemDef::new(
            "gear/Eagle",
            "Eagle",
            Category::Racket,
            vec![StatLine::ZERO; 8],
        )]);
        let mut store = OwnershipStore::new(MemoryStorage::with_slot(
            OWNERSHIP_SLOT,
            r#"{"gear/Eagle": 12, "gear/Unknown": 4}"#,
        ));
        store.load_validated(&catalog).unwrap();
        assert_eq!(store.level("gear/Eagle"), 8);
        assert_eq!(store.level("gear/Unknown"), 4);
    }

    #[test]
    fn test_file_storage_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("storage.json");

        let mut storage = JsonFileStorage::new(&path);
        assert_eq!(storage.read_slot(OWNERSHIP_SLOT).unwrap(), None);

        storage.write_slot(OWNERSHIP_SLOT, r#"{"a":4}"#).unwrap();
        storage.write_slot("other", "plain").unwrap();

        let text = storage.read_slot(OWNERSHIP_SLOT).unwrap().unwrap();
        assert_eq!(parse_levels(&text).get("a"), Some(&4));
        assert_eq!(
            storage.read_slot("other").unwrap().as_deref(),
            Some(r#""plain""#)
        );
    }

    #[test]
    fn test_corrupt_file_loads_empty_and_is_replaced() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        fs::write(&path, "{{{ garbage").unwrap();

        let mut store = OwnershipStore::new(JsonFileStorage::new(&path));
        store.load().unwrap();
        assert!(store.is_empty());

        store.set("gear/Eagle", 2).unwrap();
        let mut reloaded = OwnershipStore::new(JsonFileStorage::new(&path));
        reloaded.load().unwrap();
        assert_eq!(reloaded.level("gear/Eagle"), 2);
    }
}
