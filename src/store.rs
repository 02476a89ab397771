//! Persistence boundary. Every record the engine keeps between runs goes
//! through a [`KeyValueStore`] under one of three logical keys.

use std::{
    collections::HashMap,
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use directories::ProjectDirs;
use serde::{Serialize, de::DeserializeOwned};

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreKey {
    Settings,
    Analytics,
    Preferences,
}

impl StoreKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Settings => "settings",
            Self::Analytics => "analytics",
            Self::Preferences => "preferences",
        }
    }

    fn file_name(&self) -> String {
        format!("{}.json", self.as_str())
    }
}

pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: StoreKey) -> Result<Option<String>>;
    fn set(&self, key: StoreKey, value: &str) -> Result<()>;
    fn remove(&self, key: StoreKey) -> Result<()>;
}

pub type SharedStore = Arc<dyn KeyValueStore>;

// ============================================================================
// Typed helpers
// ============================================================================

/// Reads `key` as JSON. Missing or unreadable records fall back to the
/// default value; nothing is surfaced beyond a log line.
pub fn load_or_default<T: DeserializeOwned + Default>(store: &dyn KeyValueStore, key: StoreKey) -> T {
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return T::default(),
        Err(e) => {
            tracing::warn!(key = key.as_str(), error = %e, "could not read record, using defaults");
            return T::default();
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(key = key.as_str(), error = %e, "corrupt record, using defaults");
            T::default()
        }
    }
}

pub fn save<T: Serialize>(store: &dyn KeyValueStore, key: StoreKey, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    store.set(key, &json)
}

// ============================================================================
// File-backed store
// ============================================================================

pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| Error::io(&dir, e))?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, key: StoreKey) -> PathBuf {
        self.dir.join(key.file_name())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: StoreKey) -> Result<Option<String>> {
        let path = self.path(key);
        if !path.exists() {
            return Ok(None);
        }
        fs::read_to_string(&path)
            .map(Some)
            .map_err(|e| Error::io(path, e))
    }

    fn set(&self, key: StoreKey, value: &str) -> Result<()> {
        atomic_write(&self.path(key), value)
    }

    fn remove(&self, key: StoreKey) -> Result<()> {
        let path = self.path(key);
        if path.exists() {
            fs::remove_file(&path).map_err(|e| Error::io(path, e))?;
        }
        Ok(())
    }
}

pub fn atomic_write(path: &Path, content: &str) -> Result<()> {
    let tmp_path = path.with_extension("tmp");
    let mut tmp_file = File::create(&tmp_path).map_err(|e| Error::io(&tmp_path, e))?;
    tmp_file
        .write_all(content.as_bytes())
        .map_err(|e| Error::io(&tmp_path, e))?;
    tmp_file.sync_all().map_err(|e| Error::io(&tmp_path, e))?;
    fs::rename(&tmp_path, path).map_err(|e| Error::io(path, e))?;
    Ok(())
}

pub fn default_data_dir() -> Result<PathBuf> {
    ProjectDirs::from("com", "bluehour", "bluehour")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or(Error::NoDataDir)
}

// ============================================================================
// In-memory store
// ============================================================================

#[derive(Default)]
pub struct MemoryStore {
    records: Mutex<HashMap<StoreKey, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: StoreKey) -> Result<Option<String>> {
        Ok(self.records.lock().unwrap_or_else(|p| p.into_inner()).get(&key).cloned())
    }

    fn set(&self, key: StoreKey, value: &str) -> Result<()> {
        self.records
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .insert(key, value.to_string());
        Ok(())
    }

    fn remove(&self, key: StoreKey) -> Result<()> {
        self.records.lock().unwrap_or_else(|p| p.into_inner()).remove(&key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::time::SystemTime;

    use serde::Deserialize;

    use super::*;

    fn unique_dir(prefix: &str) -> PathBuf {
        let now = SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        std::env::temp_dir().join(format!("{}_{}", prefix, now))
    }

    #[derive(Debug, Default, Serialize, Deserialize, PartialEq)]
    struct Sample {
        name: String,
        count: u32,
    }

    #[test]
    fn test_file_store_set_get_remove() {
        let dir = unique_dir("bluehour_store");
        let store = JsonFileStore::open(&dir).unwrap();

        assert_eq!(store.get(StoreKey::Settings).unwrap(), None);
        store.set(StoreKey::Settings, "{\"a\":1}").unwrap();
        assert_eq!(store.get(StoreKey::Settings).unwrap().as_deref(), Some("{\"a\":1}"));
        assert!(dir.join("settings.json").exists());
        assert!(!dir.join("settings.tmp").exists());

        store.remove(StoreKey::Settings).unwrap();
        store.remove(StoreKey::Settings).unwrap();
        assert_eq!(store.get(StoreKey::Settings).unwrap(), None);

        fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_records_are_independent() {
        let store = MemoryStore::new();
        store.set(StoreKey::Analytics, "x").unwrap();
        assert_eq!(store.get(StoreKey::Preferences).unwrap(), None);
        store.remove(StoreKey::Analytics).unwrap();
        assert_eq!(store.get(StoreKey::Analytics).unwrap(), None);
    }

    #[test]
    fn test_load_or_default_on_missing_and_corrupt() {
        let store = MemoryStore::new();
        let missing: Sample = load_or_default(&store, StoreKey::Preferences);
        assert_eq!(missing, Sample::default());

        store.set(StoreKey::Preferences, "{not json").unwrap();
        let corrupt: Sample = load_or_default(&store, StoreKey::Preferences);
        assert_eq!(corrupt, Sample::default());
    }

    #[test]
    fn test_save_then_load() {
        let store = MemoryStore::new();
        let value = Sample {
            name: "focus".into(),
            count: 3,
        };
        save(&store, StoreKey::Preferences, &value).unwrap();
        let loaded: Sample = load_or_default(&store, StoreKey::Preferences);
        assert_eq!(loaded, value);
    }
}
