use crate::catalog::catalog;
use crate::core::constants::{SAVE_FILE_NAME, SAVE_VERSION};
use crate::core::game_state::{fresh_skills, HeroState};
use crate::error::PersistenceError;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// The single persisted record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SaveRecord {
    pub version: u32,
    pub hero: HeroState,
}

impl Default for SaveRecord {
    fn default() -> Self {
        Self {
            version: SAVE_VERSION,
            hero: HeroState::default(),
        }
    }
}

/// Durable storage for the encoded save record.
pub trait SaveStore {
    /// Returns the stored record, or `None` if nothing has been saved yet.
    fn read(&self) -> Result<Option<String>, PersistenceError>;

    fn write(&self, json: &str) -> Result<(), PersistenceError>;

    fn delete(&self) -> Result<(), PersistenceError>;
}

/// Saves the hero as JSON in the platform data directory.
#[derive(Debug, Clone)]
pub struct SaveManager {
    save_path: PathBuf,
}

impl SaveManager {
    /// Creates a SaveManager rooted at the platform data directory
    /// (via the `directories` crate).
    pub fn new() -> Result<Self, PersistenceError> {
        let project_dirs =
            ProjectDirs::from("", "", "manaburn").ok_or(PersistenceError::NoSaveDirectory)?;
        Self::in_dir(project_dirs.data_dir())
    }

    /// Creates a SaveManager that keeps its file in `dir`.
    pub fn in_dir(dir: &Path) -> Result<Self, PersistenceError> {
        fs::create_dir_all(dir)?;
        Ok(Self {
            save_path: dir.join(SAVE_FILE_NAME),
        })
    }

    pub fn save_path(&self) -> &Path {
        &self.save_path
    }

    pub fn save_exists(&self) -> bool {
        self.save_path.exists()
    }
}

impl SaveStore for SaveManager {
    fn read(&self) -> Result<Option<String>, PersistenceError> {
        if !self.save_exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(&self.save_path)?))
    }

    fn write(&self, json: &str) -> Result<(), PersistenceError> {
        // Write beside the target then rename, so a crash never leaves half a file
        let tmp = self.save_path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.save_path)?;
        Ok(())
    }

    fn delete(&self) -> Result<(), PersistenceError> {
        if self.save_exists() {
            fs::remove_file(&self.save_path)?;
        }
        Ok(())
    }
}

/// In-memory store for tests and hosts without a filesystem.
#[derive(Debug, Default)]
pub struct MemoryStore {
    data: RefCell<Option<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store preloaded with `json`.
    pub fn with_contents(json: impl Into<String>) -> Self {
        Self {
            data: RefCell::new(Some(json.into())),
        }
    }

    pub fn contents(&self) -> Option<String> {
        self.data.borrow().clone()
    }
}

impl SaveStore for MemoryStore {
    fn read(&self) -> Result<Option<String>, PersistenceError> {
        Ok(self.data.borrow().clone())
    }

    fn write(&self, json: &str) -> Result<(), PersistenceError> {
        *self.data.borrow_mut() = Some(json.to_string());
        Ok(())
    }

    fn delete(&self) -> Result<(), PersistenceError> {
        *self.data.borrow_mut() = None;
        Ok(())
    }
}

/// Encodes `hero` as a versioned save record.
pub fn encode_hero(hero: &HeroState) -> Result<String, PersistenceError> {
    let record = SaveRecord {
        version: SAVE_VERSION,
        hero: hero.clone(),
    };
    Ok(serde_json::to_string(&record)?)
}

/// Decodes a save record, tolerating schema drift.
///
/// Missing fields take their defaults and a field that fails to decode
/// falls back to its default on its own. A skill list whose length does
/// not match the catalog is replaced with fresh skills, and items past the
/// inventory and backpack capacity are dropped. A record that is not JSON
/// yields the default hero.
pub fn decode_hero(json: &str) -> HeroState {
    let record: Value = match serde_json::from_str(json) {
        Ok(record) => record,
        Err(e) => {
            warn!(error = %e, "save record unreadable, starting fresh");
            return HeroState::default();
        }
    };
    let version = record.get("version").and_then(Value::as_u64);
    if version != Some(u64::from(SAVE_VERSION)) {
        debug!(?version, "loading save from another version");
    }

    let mut hero = match record.get("hero") {
        Some(Value::Object(fields)) => merge_hero_fields(fields),
        _ => {
            warn!("save record has no hero, starting fresh");
            return HeroState::default();
        }
    };

    if hero.skills.len() != catalog().skill_count() {
        warn!(
            found = hero.skills.len(),
            expected = catalog().skill_count(),
            "skill list does not match catalog, resetting skills"
        );
        hero.skills = fresh_skills();
    }
    let dropped = hero.enforce_capacity();
    if dropped > 0 {
        warn!(dropped, "save holds more items than fit, dropping the excess");
    }
    hero
}

/// Lays the saved fields over a fresh hero one at a time, keeping the
/// default for any field that does not decode.
fn merge_hero_fields(fields: &Map<String, Value>) -> HeroState {
    let mut merged = match serde_json::to_value(HeroState::default()) {
        Ok(Value::Object(defaults)) => defaults,
        _ => return HeroState::default(),
    };

    for (key, value) in fields {
        let previous = merged.insert(key.clone(), value.clone());
        if serde_json::from_value::<HeroState>(Value::Object(merged.clone())).is_err() {
            warn!(field = %key, "save field unreadable, using default");
            match previous {
                Some(default) => merged.insert(key.clone(), default),
                None => merged.remove(key),
            };
        }
    }

    serde_json::from_value(Value::Object(merged)).unwrap_or_default()
}

/// Loads the hero from `store`, falling back to a fresh hero on any failure.
pub fn load_hero(store: &impl SaveStore) -> HeroState {
    match store.read() {
        Ok(Some(json)) => decode_hero(&json),
        Ok(None) => HeroState::default(),
        Err(e) => {
            warn!(error = %e, "failed to read save, starting fresh");
            HeroState::default()
        }
    }
}

/// Writes `hero` to `store`.
pub fn save_hero(store: &impl SaveStore, hero: &HeroState) -> Result<(), PersistenceError> {
    let json = encode_hero(hero)?;
    store.write(&json)?;
    info!(level = hero.level, gold = hero.gold, "hero saved");
    Ok(())
}
