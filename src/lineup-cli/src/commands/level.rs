//! Owned level command handlers

use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};

use crate::session;

/// Handle `level set`
pub fn set(catalog: Option<&Path>, id: &str, level: u8) -> Result<()> {
    let mut engine = session::open_engine(catalog)?;
    let applied = engine
        .set_owned_level(id, level)
        .with_context(|| format!("Failed to record level for {}", id))?;

    match applied {
        0 => println!("Removed {}", id),
        n if n < level => println!("Set {} to level {} (max for this item)", id, n),
        n => println!("Set {} to level {}", id, n),
    }
    Ok(())
}

/// Handle `level clear`
pub fn clear(catalog: Option<&Path>, id: &str) -> Result<()> {
    let mut engine = session::open_engine(catalog)?;
    if engine.clear_owned(id)? {
        println!("Removed {}", id);
    } else {
        println!("{} was not owned", id);
    }
    Ok(())
}

/// Handle `level list`
pub fn list(catalog: Option<&Path>) -> Result<()> {
    let engine = session::open_engine(catalog)?;
    let levels = engine.store().levels();

    if levels.is_empty() {
        println!("No owned items recorded.");
        println!("Record one with: lineup level set <ID> <LEVEL>");
        return Ok(());
    }

    println!("{:<32} {:<10} {:>5}", "Id", "Category", "Level");
    println!("{}", "-".repeat(49));
    for (id, level) in levels {
        let category = match engine.catalog().get(id) {
            Some(item) => item.category.to_string(),
            None => "(unknown)".to_string(),
        };
        println!("{:<32} {:<10} {:>5}", id, category, level);
    }
    println!("\n{} owned", levels.len());
    Ok(())
}

/// Handle `level reset`
pub fn reset(catalog: Option<&Path>, yes: bool) -> Result<()> {
    let mut engine = session::open_engine(catalog)?;
    let count = engine.store().len();

    if count == 0 {
        println!("No owned items recorded.");
        return Ok(());
    }

    if !yes && !prompt_confirmation(&format!("Forget all {} owned levels?", count))? {
        println!("Cancelled.");
        return Ok(());
    }

    engine.reset_all()?;
    println!("Cleared {} owned levels", count);
    Ok(())
}

/// Ask a yes/no question on stdin, defaulting to no
fn prompt_confirmation(question: &str) -> Result<bool> {
    print!("{} [y/N] ", question);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(is_yes(&input))
}

fn is_yes(input: &str) -> bool {
    let input = input.trim();
    input.eq_ignore_ascii_case("y") || input.eq_ignore_ascii_case("yes")
}
