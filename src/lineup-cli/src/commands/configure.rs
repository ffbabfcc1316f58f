//! Configuration command handlers
//!
//! Handles the `configure` subcommand for setting up lineup CLI defaults.

use crate::config::Config;
use anyhow::Result;
use std::path::PathBuf;

/// Handle the configure command
///
/// # Arguments
/// * `catalog` - Optional stat table path to set as default
/// * `storage` - Optional owned-levels file to use
/// * `show` - If true, show current configuration
pub fn handle(catalog: Option<PathBuf>, storage: Option<PathBuf>, show: bool) -> Result<()> {
    let mut config = Config::load()?;

    if show {
        show_config(&config)?;
        return Ok(());
    }

    if catalog.is_none() && storage.is_none() {
        show_usage();
        return Ok(());
    }

    if let Some(path) = catalog {
        println!("Stat table configured: {}", path.display());
        config.catalog = Some(path);
    }
    if let Some(path) = storage {
        println!("Storage configured: {}", path.display());
        config.storage = Some(path);
    }

    config.save()?;
    if let Ok(path) = Config::config_path() {
        println!("Config saved to: {}", path.display());
    }

    Ok(())
}

/// Display current configuration
fn show_config(config: &Config) -> Result<()> {
    println!("Stat table: {}", config.catalog_path(None).display());
    println!("Storage: {}", config.storage_path()?.display());

    let limits = &config.limits;
    println!(
        "Candidates: CH {} / RA {} / GR {} / SH {} / WR {} / NU {} / WO {}",
        limits.character,
        limits.racket,
        limits.grip,
        limits.shoe,
        limits.wristband,
        limits.nutrition,
        limits.workout
    );
    println!("Max results: {}", limits.max_results);

    if let Ok(path) = Config::config_path() {
        println!("Config file: {}", path.display());
    }

    Ok(())
}

/// Show usage help for the configure command
fn show_usage() {
    println!("Usage: lineup configure --default-catalog PATH");
    println!("   or: lineup configure --storage PATH");
    println!("   or: lineup configure --show");
    println!();
    println!("Candidate pool sizes can be tuned in the [limits] table of the config file.");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_show_usage_does_not_panic() {
        show_usage();
    }

    #[test]
    fn test_show_config_with_explicit_paths() {
        let config = Config {
            catalog: Some(PathBuf::from("a.json")),
            storage: Some(PathBuf::from("b.json")),
            ..Config::default()
        };
        assert!(show_config(&config).is_ok());
    }
}
