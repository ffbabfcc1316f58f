//! Lineup ranking command handlers

use std::path::Path;

use anyhow::{bail, Context, Result};
use lineup::{tier_by_name, Category, LineupResult, Mode, Stat, StatLine};

use crate::cli::BuildArgs;
use crate::session::{self, Engine};

/// Handle `best`: owned items in one category, strongest first
pub fn best(catalog: Option<&Path>, category: Category, mode: Mode, cap: Option<i64>) -> Result<()> {
    let mut engine = session::open_engine(catalog)?;
    engine.set_mode(mode);
    if let Some(cap) = cap {
        if mode.has_selectable_cap() {
            engine.set_cap(cap);
        } else {
            tracing::warn!(cap, mode = %mode, "Cap is derived per lineup in this mode; ignoring");
        }
    }

    let candidates = engine.candidates_for(category);
    if candidates.iter().all(|c| c.is_placeholder()) {
        println!("No owned {} items.", category);
        return Ok(());
    }

    println!(
        "Best {} ({}, ranked at level {})",
        category,
        mode,
        engine.query().sorting_cap()
    );
    print!("{:<4} {:<24} {:>5} {:>5}", "#", "Name", "Owned", "Lvl");
    print_stat_header();
    for (i, candidate) in candidates.iter().enumerate() {
        print!(
            "{:<4} {:<24} {:>5} {:>5}",
            i + 1,
            candidate.name(),
            candidate.owned_level,
            candidate.sort_level
        );
        print_stat_row(&candidate.sort_stats);
    }

    Ok(())
}

/// Handle `build`: rank full lineups
pub fn build(catalog: Option<&Path>, args: &BuildArgs) -> Result<()> {
    let mut engine = session::open_engine(catalog)?;
    apply_args(&mut engine, args)?;

    let query = *engine.query();
    let nothing_owned = engine.store().is_empty();
    let results = engine.ranked_results();

    if args.json {
        let shown = json_selection(results, args.show, args.top);
        println!("{}", serde_json::to_string_pretty(shown)?);
        return Ok(());
    }

    if results.is_empty() {
        if nothing_owned {
            println!("No owned items recorded. Add some with: lineup level set <ID> <LEVEL>");
        } else {
            println!("No lineup meets the minimum stats.");
        }
        return Ok(());
    }

    if let Some(rank) = args.show {
        let index = rank.checked_sub(1).context("Ranks start at 1")?;
        let count = results.len();
        match engine.select(index) {
            Some(lineup) => print_lineup(lineup),
            None => bail!("No lineup at rank {} ({} available)", rank, count),
        }
        return Ok(());
    }

    print!("{} lineups, {}", results.len(), query.mode);
    if query.mode.has_selectable_cap() {
        print!(" cap {}", query.cap);
    }
    println!();
    let active: Vec<String> = query
        .min_stats
        .active()
        .map(|(stat, value)| format!("{}>={}", stat.abbrev(), value))
        .collect();
    if !active.is_empty() {
        println!("Minimums: {}", active.join(" "));
    }
    println!();

    print!("{:<4} {:>3} {:<20} {:<20}", "#", "Cap", "Character", "Racket");
    print_stat_header();
    for lineup in results.iter().take(args.top) {
        let name = |category: Category| lineup.slot(category).map_or("", |s| s.name.as_str());
        print!(
            "{:<4} {:>3} {:<20} {:<20}",
            lineup.rank,
            lineup.cap,
            name(Category::Character),
            name(Category::Racket)
        );
        print_stat_row(&lineup.totals);
    }

    Ok(())
}

/// Lineups printed by `--json`: the one at `show` (1-based) or the first `top`
fn json_selection(results: &[LineupResult], show: Option<usize>, top: usize) -> &[LineupResult] {
    match show {
        Some(0) => &[],
        Some(rank) => results.get(rank - 1..rank).unwrap_or(&[]),
        None => &results[..top.min(results.len())],
    }
}

fn apply_args(engine: &mut Engine, args: &BuildArgs) -> Result<()> {
    engine.set_mode(args.mode);

    if let Some(name) = &args.tier {
        if args.mode != Mode::Tournament {
            bail!("--tier only applies to tournament mode");
        }
        let tier = tier_by_name(name).with_context(|| format!("Unknown tournament tier '{}'", name))?;
        engine.set_cap(i64::from(tier.cap));
    } else if let Some(cap) = args.cap {
        if !args.mode.has_selectable_cap() {
            tracing::warn!(cap, mode = %args.mode, "Cap is derived per lineup in this mode; ignoring");
        } else {
            engine.set_cap(cap);
        }
    }

    for (stat, input) in args.min_inputs() {
        engine.set_min_stat_input(stat, input);
    }

    Ok(())
}

fn print_lineup(lineup: &LineupResult) {
    println!("Lineup #{} (cap {})", lineup.rank, lineup.cap);
    print!("{:<10} {:<24} {:>5} {:>5}", "Slot", "Name", "Owned", "Lvl");
    print_stat_header();
    for slot in &lineup.slots {
        print!(
            "{:<10} {:<24} {:>5} {:>5}",
            slot.category, slot.name, slot.owned_level, slot.level
        );
        print_stat_row(&slot.stats);
    }
    print!("{:<10} {:<24} {:>5} {:>5}", "Total", "", "", "");
    print_stat_row(&lineup.totals);
}

fn print_stat_header() {
    for stat in Stat::ALL {
        print!(" {:>4}", stat.abbrev());
    }
    println!(" {:>6}", "Power");
}

fn print_stat_row(stats: &StatLine) {
    for (_, value) in stats.iter() {
        print!(" {:>4}", value);
    }
    println!(" {:>6}", stats.power());
}
