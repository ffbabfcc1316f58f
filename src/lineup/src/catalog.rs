//! Stat table loading and lookup.
//!
//! The stat table is a JSON object keyed by item id. Each entry carries the
//! item's category, its per-level stat columns, and an optional upgrade cost
//! table. The catalog is loaded once and never mutated.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::reference::{Category, CharacterKind, Stat, StatLine, MAX_LEVEL, STAT_COUNT};

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown item: {0}")]
    UnknownItem(String),

    #[error("Item {id} has invalid max level {max_level} (expected 1-15)")]
    InvalidMaxLevel { id: String, max_level: u8 },

    #[error("Level {level} is out of range for {id} (max {max_level})")]
    LevelOutOfRange { id: String, level: u8, max_level: u8 },
}

/// Cards and coins needed to reach one level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpgradeCost {
    pub level: u8,
    pub cards: u32,
    pub coins: u64,
}

/// Accumulated cost of several upgrades
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct UpgradeTotal {
    pub cards: u64,
    pub coins: u64,
    /// Levels in the requested range with no cost entry
    pub missing: u8,
}

/// Stat columns as they appear in the table; any column may be absent or `null`
#[derive(Debug, Default, Deserialize)]
struct StatColumns {
    #[serde(default, deserialize_with = "nullable_column")]
    agility: Vec<u32>,
    #[serde(default, deserialize_with = "nullable_column")]
    stamina: Vec<u32>,
    #[serde(default, deserialize_with = "nullable_column")]
    serve: Vec<u32>,
    #[serde(default, deserialize_with = "nullable_column")]
    volley: Vec<u32>,
    #[serde(default, deserialize_with = "nullable_column")]
    forehand: Vec<u32>,
    #[serde(default, deserialize_with = "nullable_column")]
    backhand: Vec<u32>,
}

/// A `null` column is empty and a `null` cell reads as zero
fn nullable_column<'de, D>(deserializer: D) -> Result<Vec<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let cells: Option<Vec<Option<u32>>> = Option::deserialize(deserializer)?;
    Ok(cells
        .unwrap_or_default()
        .into_iter()
        .map(|cell| cell.unwrap_or(0))
        .collect())
}

impl StatColumns {
    fn column(&self, stat: Stat) -> &[u32] {
        match stat {
            Stat::Agility => &self.agility,
            Stat::Stamina => &self.stamina,
            Stat::Serve => &self.serve,
            Stat::Volley => &self.volley,
            Stat::Forehand => &self.forehand,
            Stat::Backhand => &self.backhand,
        }
    }

    fn longest(&self) -> usize {
        Stat::ALL
            .into_iter()
            .map(|s| self.column(s).len())
            .max()
            .unwrap_or(0)
    }

    /// Pivot columns into one row per level; missing cells become zero
    fn rows(&self, max_level: u8) -> Vec<StatLine> {
        (0..usize::from(max_level))
            .map(|i| {
                let mut values = [0u32; STAT_COUNT];
                for stat in Stat::ALL {
                    values[stat.index()] = self.column(stat).get(i).copied().unwrap_or(0);
                }
                StatLine::new(values)
            })
            .collect()
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawItem {
    #[serde(default)]
    name: Option<String>,
    #[serde(rename = "type")]
    category: Category,
    #[serde(default)]
    type_character: Option<CharacterKind>,
    #[serde(default)]
    max_level: Option<u8>,
    #[serde(default)]
    stats: StatColumns,
    #[serde(default)]
    upgrade_costs: Vec<UpgradeCost>,
}

/// One item from the stat table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemDef {
    pub id: String,
    pub name: String,
    pub category: Category,
    /// Character sub-type (None for equipment)
    pub kind: Option<CharacterKind>,
    pub max_level: u8,
    /// Stats per level; index 0 is level 1
    levels: Vec<StatLine>,
    upgrade_costs: Vec<UpgradeCost>,
}

impl ItemDef {
    fn from_raw(id: String, raw: RawItem) -> Result<Self, CatalogError> {
        let longest = raw.stats.longest();
        let max_level = match raw.max_level {
            Some(level) => level,
            None if longest == 0 => MAX_LEVEL,
            None => u8::try_from(longest).unwrap_or(u8::MAX),
        };

        if max_level == 0 || max_level > MAX_LEVEL {
            return Err(CatalogError::InvalidMaxLevel { id, max_level });
        }

        if longest > usize::from(max_level) {
            tracing::debug!(%id, longest, max_level, "Ignoring stat entries past max level");
        }

        let kind = match raw.category {
            Category::Character => raw.type_character,
            _ => None,
        };

        let mut upgrade_costs = raw.upgrade_costs;
        upgrade_costs.sort_by_key(|c| c.level);

        Ok(ItemDef {
            name: raw.name.unwrap_or_else(|| display_name(&id)),
            levels: raw.stats.rows(max_level),
            id,
            category: raw.category,
            kind,
            max_level,
            upgrade_costs,
        })
    }

    /// Build an item directly from per-level rows
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: Category,
        levels: Vec<StatLine>,
    ) -> Self {
        let max_level = u8::try_from(levels.len()).unwrap_or(MAX_LEVEL).min(MAX_LEVEL);
        ItemDef {
            id: id.into(),
            name: name.into(),
            category,
            kind: None,
            max_level,
            levels,
            upgrade_costs: Vec::new(),
        }
    }

    pub fn with_kind(mut self, kind: CharacterKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn with_upgrade_costs(mut self, mut costs: Vec<UpgradeCost>) -> Self {
        costs.sort_by_key(|c| c.level);
        self.upgrade_costs = costs;
        self
    }

    /// Stats at a level. Level 0 and levels without data yield zeros.
    pub fn stats_at(&self, level: u8) -> StatLine {
        if level == 0 {
            return StatLine::ZERO;
        }
        self.levels
            .get(usize::from(level) - 1)
            .copied()
            .unwrap_or(StatLine::ZERO)
    }

    /// Strict variant of [`stats_at`](Self::stats_at) that rejects levels past max
    pub fn try_stats_at(&self, level: u8) -> Result<StatLine, CatalogError> {
        if level > self.max_level {
            return Err(CatalogError::LevelOutOfRange {
                id: self.id.clone(),
                level,
                max_level: self.max_level,
            });
        }
        Ok(self.stats_at(level))
    }

    /// `(level, stats)` rows from level 1 to max
    pub fn stat_rows(&self) -> impl Iterator<Item = (u8, StatLine)> + '_ {
        (1..=self.max_level).map(move |level| (level, self.stats_at(level)))
    }

    pub fn upgrade_costs(&self) -> &[UpgradeCost] {
        &self.upgrade_costs
    }

    /// Cost to reach `level`, if the table has it
    pub fn upgrade_cost(&self, level: u8) -> Option<&UpgradeCost> {
        self.upgrade_costs.iter().find(|c| c.level == level)
    }

    /// Total cost to go from level `from` to level `to` (exclusive of `from`)
    pub fn upgrade_path_cost(&self, from: u8, to: u8) -> UpgradeTotal {
        let to = to.min(self.max_level);
        let mut total = UpgradeTotal::default();
        for level in from.saturating_add(1)..=to {
            match self.upgrade_cost(level) {
                Some(cost) => {
                    total.cards += u64::from(cost.cards);
                    total.coins += cost.coins;
                }
                None => total.missing += 1,
            }
        }
        total
    }
}

/// Derive a display name from a path-like id ("chars/Jonah" -> "Jonah")
fn display_name(id: &str) -> String {
    id.rsplit('/').next().unwrap_or(id).to_string()
}

/// The full stat table, keyed by item id
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: BTreeMap<String, ItemDef>,
}

impl Catalog {
    /// Parse a stat table from JSON text
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let raw: BTreeMap<String, RawItem> = serde_json::from_str(json)?;
        let items = raw
            .into_iter()
            .map(|(id, item)| Ok((id.clone(), ItemDef::from_raw(id, item)?)))
            .collect::<Result<BTreeMap<_, _>, CatalogError>>()?;

        tracing::debug!(items = items.len(), "Loaded stat table");
        Ok(Catalog { items })
    }

    /// Load a stat table from a JSON file
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Build a catalog from already-constructed items
    pub fn from_items(items: impl IntoIterator<Item = ItemDef>) -> Self {
        Catalog {
            items: items.into_iter().map(|i| (i.id.clone(), i)).collect(),
        }
    }

    pub fn get(&self, id: &str) -> Option<&ItemDef> {
        self.items.get(id)
    }

    /// Like [`get`](Self::get), but unknown ids are an error
    pub fn require(&self, id: &str) -> Result<&ItemDef, CatalogError> {
        self.get(id)
            .ok_or_else(|| CatalogError::UnknownItem(id.to_string()))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.items.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// All items in id order
    pub fn items(&self) -> impl Iterator<Item = &ItemDef> {
        self.items.values()
    }

    /// Items of one category in id order
    pub fn in_category(&self, category: Category) -> impl Iterator<Item = &ItemDef> {
        self.items.values().filter(move |i| i.category == category)
    }

    /// Characters of one sub-type
    pub fn characters(&self, kind: CharacterKind) -> impl Iterator<Item = &ItemDef> {
        self.in_category(Category::Character)
            .filter(move |i| i.kind == Some(kind))
    }

    /// Stats of an item at a level; unknown items and missing levels are zero
    pub fn stats_at(&self, id: &str, level: u8) -> StatLine {
        self.get(id)
            .map(|item| item.stats_at(level))
            .unwrap_or(StatLine::ZERO)
    }
}
