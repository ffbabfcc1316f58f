//! Stat table browsing commands

use std::path::Path;

use anyhow::{Context, Result};
use lineup::{Category, CharacterKind, ItemDef, Stat, UpgradeCost};

use crate::session;

/// Handle `items`: list the stat table, optionally filtered
pub fn list(
    catalog: Option<&Path>,
    category: Option<Category>,
    kind: Option<CharacterKind>,
    owned_only: bool,
) -> Result<()> {
    let engine = session::open_engine(catalog)?;
    let store = engine.store();

    let items: Vec<&ItemDef> = engine
        .catalog()
        .items()
        .filter(|item| category.map_or(true, |c| item.category == c))
        .filter(|item| kind.map_or(true, |k| item.kind == Some(k)))
        .filter(|item| !owned_only || store.level(&item.id) > 0)
        .collect();

    if items.is_empty() {
        println!("No items match.");
        return Ok(());
    }

    println!("{:<10} {:<32} {:>5} {:>5}", "Category", "Id", "Owned", "Max");
    println!("{}", "-".repeat(55));
    for item in &items {
        let owned = match store.level(&item.id) {
            0 => "-".to_string(),
            level => level.to_string(),
        };
        println!(
            "{:<10} {:<32} {:>5} {:>5}",
            item.category, item.id, owned, item.max_level
        );
    }
    println!("\n{} items", items.len());

    Ok(())
}

/// Handle `item`: per-level stats and upgrade costs for one item
pub fn show(catalog: Option<&Path>, id: &str) -> Result<()> {
    let engine = session::open_engine(catalog)?;
    let item = engine
        .catalog()
        .require(id)
        .with_context(|| format!("No item '{}' in the stat table", id))?;
    let owned = engine.store().level(id);

    print!("{} ({})", item.name, item.category);
    if let Some(kind) = item.kind {
        print!(" [{}]", kind);
    }
    println!();
    match owned {
        0 => println!("Not owned"),
        level => println!("Owned at level {} of {}", level, item.max_level),
    }
    println!();

    print!("  {:>3}", "Lvl");
    for stat in Stat::ALL {
        print!(" {:>4}", stat.abbrev());
    }
    println!(" {:>6} {:>8} {:>10}", "Power", "Cards", "Coins");

    for (level, stats) in item.stat_rows() {
        let marker = if level == owned { '*' } else { ' ' };
        print!("{} {:>3}", marker, level);
        for (_, value) in stats.iter() {
            print!(" {:>4}", value);
        }
        let (cards, coins) = format_cost(item.upgrade_cost(level));
        println!(" {:>6} {:>8} {:>10}", stats.power(), cards, coins);
    }

    if owned > 0 && owned < item.max_level {
        let total = item.upgrade_path_cost(owned, item.max_level);
        println!();
        print!("To max: {} cards, {} coins", total.cards, total.coins);
        if total.missing > 0 {
            print!(" ({} levels without cost data)", total.missing);
        }
        println!();
    }

    Ok(())
}

/// Zero cards means the level unlocks the item; zero coins means it is free
fn format_cost(cost: Option<&UpgradeCost>) -> (String, String) {
    match cost {
        None => ("-".to_string(), "-".to_string()),
        Some(cost) => {
            let cards = match cost.cards {
                0 => "Unlocked".to_string(),
                n => n.to_string(),
            };
            let coins = match cost.coins {
                0 => "Free".to_string(),
                n => n.to_string(),
            };
            (cards, coins)
        }
    }
}
