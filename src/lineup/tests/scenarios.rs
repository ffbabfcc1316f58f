//! End-to-end lineup scenarios through the engine

use lineup::{
    Catalog, Category, JsonFileStorage, LineupEngine, LineupLimits, MemoryStorage, Mode,
    OwnershipStore, Stat, StatLine,
};

const TABLE: &str = r#"{
    "characters/CharacterA": {
        "name": "Character A",
        "type": "Character",
        "typeCharacter": "Legends",
        "maxLevel": 15,
        "stats": {
            "agility":  [5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19],
            "stamina":  [4, 5, 6, 7, 8,  9, 10, 11, 12, 13, 14, 15, 16, 17, 18],
            "serve":    [3, 3, 4, 4, 5,  5,  6,  6,  7,  7,  8,  8,  9,  9, 10],
            "volley":   [2, 2, 2, 3, 3,  3,  4,  4,  4,  5,  5,  5,  6,  6,  6],
            "forehand": [6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20],
            "backhand": [1, 1, 1, 1, 2,  2,  2,  2,  3,  3,  3,  3,  4,  4,  4]
        }
    },
    "characters/CharacterB": {
        "name": "Character B",
        "type": "Character",
        "typeCharacter": "Champions",
        "stats": {
            "agility":  [2, 4, 6, 8, 10, 12, 14, 16, 18, 20, 22, 24, 26, 28, 30]
        }
    },
    "rackets/RacketB": {
        "name": "Racket B",
        "type": "Racket",
        "maxLevel": 15,
        "stats": {
            "serve":    [1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15],
            "forehand": [2, 2, 3, 3, 4, 4, 5, 5, 6,  6,  7,  7,  8,  8,  9]
        }
    },
    "rackets/RacketC": {
        "name": "Racket C",
        "type": "Racket",
        "stats": {
            "backhand": [3, 3, 3, 3, 3, 3, 3, 3, 3, 3, 3, 3, 3, 3, 3]
        }
    },
    "shoes/ShoeA": {
        "name": "Shoe A",
        "type": "Shoe",
        "maxLevel": 9,
        "stats": {
            "agility":  [1, 2, 3, 4, 5, 6, 7, 8, 9],
            "stamina":  [1, 1, 1, 1, 1, 1, 1, 1, 1]
        }
    }
}"#;

fn engine() -> LineupEngine<MemoryStorage> {
    let catalog = Catalog::from_json(TABLE).unwrap();
    let mut store = OwnershipStore::new(MemoryStorage::new());
    store.load_validated(&catalog).unwrap();
    LineupEngine::new(catalog, store)
}

fn item_stats(engine: &LineupEngine<MemoryStorage>, id: &str, level: u8) -> StatLine {
    engine.catalog().stats_at(id, level)
}

#[test]
fn grand_tour_two_owned_items() {
    let mut engine = engine();
    engine.set_owned_level("characters/CharacterA", 10).unwrap();
    engine.set_owned_level("rackets/RacketB", 8).unwrap();
    engine.set_mode(Mode::GrandTour);
    engine.set_cap(15);

    let expected = item_stats(&engine, "characters/CharacterA", 10).power()
        + item_stats(&engine, "rackets/RacketB", 8).power();

    let results = engine.ranked_results();
    assert_eq!(results.len(), 1);

    let lineup = &results[0];
    assert_eq!(lineup.total_power, expected);
    assert_eq!(lineup.slots.len(), 7);
    let placeholders = lineup.slots.iter().filter(|s| s.item_id.is_none()).count();
    assert_eq!(placeholders, 5);
}

#[test]
fn regular_mode_levels_below_derived_cap() {
    let mut engine = engine();
    engine.set_owned_level("characters/CharacterA", 10).unwrap();
    engine.set_owned_level("rackets/RacketB", 8).unwrap();
    engine.set_mode(Mode::Regular);

    let lineup = engine.result_at(0).unwrap().clone();
    assert_eq!(lineup.cap, 12);
    assert_eq!(lineup.slot(Category::Character).unwrap().level, 10);
    assert_eq!(lineup.slot(Category::Racket).unwrap().level, 8);
}

#[test]
fn regular_mode_caps_equipment_to_character() {
    let mut engine = engine();
    engine.set_owned_level("characters/CharacterA", 2).unwrap();
    engine.set_owned_level("rackets/RacketB", 15).unwrap();
    engine.set_mode(Mode::Regular);

    let lineup = engine.result_at(0).unwrap();
    assert_eq!(lineup.cap, 4);
    assert_eq!(lineup.slot(Category::Racket).unwrap().level, 4);
}

#[test]
fn impossible_threshold_yields_nothing() {
    let mut engine = engine();
    engine.set_owned_level("characters/CharacterA", 15).unwrap();
    engine.set_owned_level("characters/CharacterB", 15).unwrap();
    engine.set_owned_level("shoes/ShoeA", 9).unwrap();
    engine.set_min_stat(Stat::Agility, 999);
    assert!(engine.ranked_results().is_empty());
}

#[test]
fn raising_a_threshold_never_grows_results() {
    let mut engine = engine();
    engine.set_owned_level("characters/CharacterA", 12).unwrap();
    engine.set_owned_level("characters/CharacterB", 7).unwrap();
    engine.set_owned_level("rackets/RacketB", 6).unwrap();
    engine.set_owned_level("rackets/RacketC", 3).unwrap();
    engine.set_owned_level("shoes/ShoeA", 5).unwrap();

    for stat in Stat::ALL {
        let mut previous = usize::MAX;
        for threshold in [0, 5, 10, 20, 30, 40, 80] {
            engine.set_min_stat(stat, threshold);
            let count = engine.ranked_results().len();
            assert!(count <= previous, "{stat} >= {threshold}");
            previous = count;
        }
        engine.set_min_stat(stat, 0);
    }
}

#[test]
fn ranking_is_descending_and_deterministic() {
    let mut engine = engine();
    engine.set_owned_level("characters/CharacterA", 9).unwrap();
    engine.set_owned_level("characters/CharacterB", 11).unwrap();
    engine.set_owned_level("rackets/RacketB", 13).unwrap();
    engine.set_owned_level("rackets/RacketC", 4).unwrap();
    engine.set_owned_level("shoes/ShoeA", 9).unwrap();

    for mode in Mode::ALL {
        engine.set_mode(mode);
        let first = engine.ranked_results().to_vec();
        assert!(first
            .windows(2)
            .all(|w| w[0].total_power >= w[1].total_power));

        let catalog = Catalog::from_json(TABLE).unwrap();
        let mut store = OwnershipStore::new(MemoryStorage::new());
        store.load().unwrap();
        let mut twin = LineupEngine::new(catalog, store);
        for (id, level) in engine.store().levels() {
            twin.set_owned_level(id, *level).unwrap();
        }
        twin.set_mode(mode);
        assert_eq!(twin.ranked_results(), first.as_slice());
    }
}

#[test]
fn truncation_keeps_the_strongest() {
    let mut engine = engine();
    engine.set_owned_level("characters/CharacterA", 9).unwrap();
    engine.set_owned_level("characters/CharacterB", 11).unwrap();
    engine.set_owned_level("rackets/RacketB", 13).unwrap();
    engine.set_owned_level("rackets/RacketC", 4).unwrap();

    let full: Vec<u32> = engine.ranked_results().iter().map(|r| r.total_power).collect();
    assert_eq!(full.len(), 4);

    engine.set_limits(LineupLimits::default().with_max_results(3));
    let top: Vec<u32> = engine.ranked_results().iter().map(|r| r.total_power).collect();
    assert_eq!(top, full[..3]);
}

#[test]
fn reset_then_reload_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storage.json");
    let catalog = Catalog::from_json(TABLE).unwrap();

    let mut store = OwnershipStore::new(JsonFileStorage::new(&path));
    store.load_validated(&catalog).unwrap();
    let mut engine = LineupEngine::new(catalog.clone(), store);
    engine.set_owned_level("shoes/ShoeA", 4).unwrap();
    engine.reset_all().unwrap();

    let mut reloaded = OwnershipStore::new(JsonFileStorage::new(&path));
    reloaded.load_validated(&catalog).unwrap();
    assert!(reloaded.is_empty());
}

#[test]
fn owned_levels_survive_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storage.json");
    let catalog = Catalog::from_json(TABLE).unwrap();

    {
        let mut store = OwnershipStore::new(JsonFileStorage::new(&path));
        store.load_validated(&catalog).unwrap();
        let mut engine = LineupEngine::new(catalog.clone(), store);
        engine.set_owned_level("characters/CharacterA", 6).unwrap();
        engine.set_owned_level("shoes/ShoeA", 14).unwrap();
    }

    let mut store = OwnershipStore::new(JsonFileStorage::new(&path));
    store.load_validated(&catalog).unwrap();
    assert_eq!(store.level("characters/CharacterA"), 6);
    assert_eq!(store.level("shoes/ShoeA"), 9);
}

#[test]
fn bounded_results_are_the_strongest_filtered_lineups() {
    let mut engine = engine();
    engine.set_owned_level("characters/CharacterA", 12).unwrap();
    engine.set_owned_level("characters/CharacterB", 7).unwrap();
    engine.set_owned_level("rackets/RacketB", 6).unwrap();
    engine.set_owned_level("rackets/RacketC", 3).unwrap();
    engine.set_owned_level("shoes/ShoeA", 5).unwrap();
    engine.set_min_stat(Stat::Backhand, 3);

    let filtered = engine.ranked_results().to_vec();
    assert_eq!(filtered.len(), 3);
    assert!(filtered.iter().all(|r| r.totals.get(Stat::Backhand) >= 3));

    engine.set_limits(LineupLimits::default().with_max_results(2));
    let bounded = engine.ranked_results();
    assert_eq!(bounded, &filtered[..2]);
}
