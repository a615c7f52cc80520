//! Integration test: saving, loading and tolerant decoding

use manaburn::catalog::{ItemId, NodeId, SkillId, TalentId};
use manaburn::core::{EngineConfig, HeroState, Intent, PrestigeData, Session};
use manaburn::save_manager::{
    decode_hero, encode_hero, load_hero, MemoryStore, SaveManager, SaveStore,
};
use serde_json::Value;
use tempfile::TempDir;

fn veteran_hero() -> HeroState {
    let mut hero = HeroState::new();
    hero.level = 17;
    hero.gold = 9_876;
    hero.highest_wave = 33;
    hero.inventory = vec![ItemId::Butterfly, ItemId::Crystalys];
    hero.backpack = vec![ItemId::GlovesHaste];
    hero.talents.insert(10, TalentId::T10Left);
    hero.skill_mut(SkillId::ManaVoid).unwrap().level = 2;
    hero.prestige.points = 4;
    hero.prestige.rebirth_count = 2;
    hero.prestige.unlocked_nodes.insert(NodeId::Root);
    hero
}

#[test]
fn test_missing_prestige_loads_as_default() {
    let hero = veteran_hero();
    let mut record: Value = serde_json::from_str(&encode_hero(&hero).unwrap()).unwrap();
    record["hero"].as_object_mut().unwrap().remove("prestige");

    let loaded = decode_hero(&record.to_string());
    assert_eq!(loaded.prestige, PrestigeData::default());
    assert_eq!(loaded.level, 17);
    assert_eq!(loaded.gold, 9_876);
    assert_eq!(loaded.inventory, hero.inventory);
    assert_eq!(loaded.talents, hero.talents);
}

#[test]
fn test_unknown_fields_are_ignored() {
    let mut record: Value = serde_json::from_str(&encode_hero(&veteran_hero()).unwrap()).unwrap();
    record["hero"]["favourite_colour"] = Value::from("blue");
    record["written_by"] = Value::from("an older build");

    assert_eq!(decode_hero(&record.to_string()), veteran_hero());
}

#[test]
fn test_file_store_round_trip() {
    let dir = TempDir::new().unwrap();
    let manager = SaveManager::in_dir(dir.path()).unwrap();
    manager.write(&encode_hero(&veteran_hero()).unwrap()).unwrap();

    assert_eq!(load_hero(&manager), veteran_hero());
    assert!(!dir.path().join("hero.json.tmp").exists());
}

#[test]
fn test_session_saves_immediately_on_rebirth() {
    let store = MemoryStore::new();
    let mut session = Session::with_origin(store, EngineConfig::seeded(11), 0);
    assert!(session.store().contents().is_none());

    let dir = TempDir::new().unwrap();
    let manager = SaveManager::in_dir(dir.path()).unwrap();
    manager.write(&encode_hero(&veteran_hero()).unwrap()).unwrap();
    let mut session_on_disk = Session::with_origin(manager, EngineConfig::seeded(11), 0);

    session.submit(Intent::Rebirth);
    session.tick(16);
    // A fresh hero has nothing to rebirth for
    assert!(session.store().contents().is_none());

    session_on_disk.submit(Intent::Rebirth);
    session_on_disk.tick(16);
    let saved = load_hero(session_on_disk.store());
    assert_eq!(saved.level, 1);
    assert_eq!(saved.prestige.rebirth_count, 3);
    assert_eq!(saved.prestige.points, 4 + 3);
}

#[test]
fn test_corrupt_file_starts_fresh() {
    let dir = TempDir::new().unwrap();
    let manager = SaveManager::in_dir(dir.path()).unwrap();
    manager.write("{\"version\": 1, \"hero\": [").unwrap();

    let session = Session::with_origin(manager, EngineConfig::seeded(1), 0);
    assert_eq!(session.engine().hero(), &HeroState::default());
}
