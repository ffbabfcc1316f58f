//! Opening the catalog and owned levels for a command

use std::path::Path;

use anyhow::{Context, Result};
use lineup::{Catalog, JsonFileStorage, LineupEngine, OwnershipStore};

use crate::config::Config;

pub type Engine = LineupEngine<JsonFileStorage>;

/// Load the stat table from an explicit path or the configured one
pub fn load_catalog(config: &Config, explicit: Option<&Path>) -> Result<Catalog> {
    let path = config.catalog_path(explicit);
    let catalog = Catalog::load(&path)
        .with_context(|| format!("Failed to load stat table from {}", path.display()))?;
    tracing::debug!(path = %path.display(), items = catalog.len(), "Loaded stat table");
    Ok(catalog)
}

/// Open an engine whose owned levels are already loaded
pub fn open_engine(explicit_catalog: Option<&Path>) -> Result<Engine> {
    let config = Config::load()?;
    open_engine_with(&config, explicit_catalog)
}

pub fn open_engine_with(config: &Config, explicit_catalog: Option<&Path>) -> Result<Engine> {
    let catalog = load_catalog(config, explicit_catalog)?;
    let storage_path = config.storage_path()?;

    let mut store = OwnershipStore::new(JsonFileStorage::new(&storage_path));
    store
        .load_validated(&catalog)
        .with_context(|| format!("Failed to read owned levels from {}", storage_path.display()))?;

    Ok(LineupEngine::new(catalog, store).with_limits(config.limits))
}
