//! Key-value persistence with file locking.
//!
//! The store is a flat string-to-string map held in a single JSON file:
//! per-user-scoped keys, JSON-encoded values for structured entries, last
//! write wins, no transactions. Saves are atomic (temp file + rename) and
//! serialized by advisory locks so concurrent invocations cannot interleave
//! partial writes.

use crate::{Error, Result};
use fs2::FileExt;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Well-known store keys
///
/// Per-user entries are suffixed with the owning user id so several local
/// profiles can share one store file.
pub mod keys {
    use uuid::Uuid;

    pub const PROFILE: &str = "profile";
    pub const APP_LANGUAGE: &str = "appLanguage";

    pub fn cycle(user_id: &Uuid) -> String {
        format!("cycle_{}", user_id)
    }

    pub fn logs(user_id: &Uuid) -> String {
        format!("logs_{}", user_id)
    }

    pub fn mood(user_id: &Uuid) -> String {
        format!("mood_{}", user_id)
    }

    pub fn avatar(user_id: &Uuid) -> String {
        format!("avatar_{}", user_id)
    }

    pub fn reminders(user_id: &Uuid) -> String {
        format!("reminders_{}", user_id)
    }
}

/// The persistent key-value map
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Store {
    entries: BTreeMap<String, String>,
}

/// Standard location of the store file inside a data directory
pub fn store_path(data_dir: &Path) -> PathBuf {
    data_dir.join("store.json")
}

impl Store {
    /// Load the store from a file with shared locking
    ///
    /// Returns an empty store if the file doesn't exist.
    /// If the file is corrupted, logs a warning and returns an empty store.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::info!("No store file found, starting empty");
            return Ok(Self::default());
        }

        let file = match File::open(path) {
            Ok(f) => f,
            Err(e) => {
                tracing::warn!("Unable to open store file {:?}: {}. Starting empty.", path, e);
                return Ok(Self::default());
            }
        };

        // Acquire shared lock for reading
        if let Err(e) = file.lock_shared() {
            tracing::warn!("Unable to lock store file {:?}: {}. Starting empty.", path, e);
            return Ok(Self::default());
        }

        let mut contents = String::new();
        let mut reader = std::io::BufReader::new(&file);
        if let Err(e) = reader.read_to_string(&mut contents) {
            let _ = file.unlock();
            tracing::warn!("Failed to read store file {:?}: {}. Starting empty.", path, e);
            return Ok(Self::default());
        }

        file.unlock()?;

        match serde_json::from_str::<Store>(&contents) {
            Ok(store) => {
                tracing::debug!("Loaded {} store entries from {:?}", store.entries.len(), path);
                Ok(store)
            }
            Err(e) => {
                tracing::warn!("Failed to parse store file {:?}: {}. Starting empty.", path, e);
                Ok(Self::default())
            }
        }
    }

    /// Save the store to a file with exclusive locking
    ///
    /// Atomically writes by:
    /// 1. Writing to a temp file in the same directory
    /// 2. Syncing to disk
    /// 3. Renaming over the original
    pub fn save(&self, path: &Path) -> Result<()> {
        let parent = path
            .parent()
            .ok_or_else(|| Error::Store(format!("Store path {:?} has no parent directory", path)))?;

        // Ensure parent directory exists
        std::fs::create_dir_all(parent)?;

        let temp = NamedTempFile::new_in(parent)?;

        // Exclusive lock on the temp file serializes concurrent writers
        temp.as_file().lock_exclusive()?;

        {
            let mut writer = std::io::BufWriter::new(temp.as_file());
            let contents = serde_json::to_string(self)?;
            writer.write_all(contents.as_bytes())?;
            writer.flush()?;
        }

        temp.as_file().sync_all()?;
        temp.as_file().unlock()?;

        temp.persist(path).map_err(|e| Error::Io(e.error))?;

        tracing::debug!("Saved {} store entries to {:?}", self.entries.len(), path);
        Ok(())
    }

    /// Load the store, modify it, and save it back atomically
    pub fn update<F>(path: &Path, f: F) -> Result<Self>
    where
        F: FnOnce(&mut Store) -> Result<()>,
    {
        let mut store = Self::load(path)?;
        f(&mut store)?;
        store.save(path)?;
        Ok(store)
    }

    /// Raw string value for a key
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(|s| s.as_str())
    }

    /// Set a raw string value (last write wins)
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Remove a key, reporting whether it was present
    pub fn remove(&mut self, key: &str) -> bool {
        self.entries.remove(key).is_some()
    }

    /// Decode a JSON-encoded value
    ///
    /// Missing keys yield `None`. A value that fails to decode is treated
    /// like a missing one, with a warning, so one corrupt entry cannot take
    /// the whole application down.
    pub fn get_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.entries.get(key)?;
        match serde_json::from_str(raw) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!("Store entry '{}' failed to decode: {}. Ignoring it.", key, e);
                None
            }
        }
    }

    /// JSON-encode and set a value
    pub fn set_json<T: Serialize>(&mut self, key: impl Into<String>, value: &T) -> Result<()> {
        let raw = serde_json::to_string(value)?;
        self.entries.insert(key.into(), raw);
        Ok(())
    }

    /// Remove every entry scoped to a user id
    ///
    /// Returns the number of entries removed.
    pub fn remove_user_entries(&mut self, user_id: &uuid::Uuid) -> usize {
        let suffix = format!("_{}", user_id);
        let before = self.entries.len();
        self.entries.retain(|key, _| !key.ends_with(&suffix));
        before - self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_save_and_load_roundtrip() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = store_path(temp_dir.path());

        let mut store = Store::default();
        store.set(keys::APP_LANGUAGE, "sw");
        store.set("free_form", "anything");

        store.save(&path).unwrap();
        let loaded = Store::load(&path).unwrap();

        assert_eq!(loaded.get(keys::APP_LANGUAGE), Some("sw"));
        assert_eq!(loaded.get("free_form"), Some("anything"));
        assert_eq!(loaded.len(), 2);
    }

    #[test]
    fn test_load_nonexistent_returns_empty() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("nonexistent.json");

        let store = Store::load(&path).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_corrupted_file_returns_empty() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = store_path(temp_dir.path());

        std::fs::write(&path, "{ invalid json }").unwrap();

        let store = Store::load(&path).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_update_pattern() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = store_path(temp_dir.path());

        Store::default().save(&path).unwrap();

        Store::update(&path, |store| {
            store.set("greeting", "karibu");
            Ok(())
        })
        .unwrap();

        let loaded = Store::load(&path).unwrap();
        assert_eq!(loaded.get("greeting"), Some("karibu"));
    }

    #[test]
    fn test_json_values_roundtrip() {
        let mut store = Store::default();
        store.set_json("flag", &true).unwrap();
        store.set_json("numbers", &vec![1, 2, 3]).unwrap();

        assert_eq!(store.get_json::<bool>("flag"), Some(true));
        assert_eq!(store.get_json::<Vec<i32>>("numbers"), Some(vec![1, 2, 3]));
        assert_eq!(store.get_json::<bool>("missing"), None);
    }

    #[test]
    fn test_corrupt_json_value_treated_as_missing() {
        let mut store = Store::default();
        store.set("flag", "not json at all {{");

        assert_eq!(store.get_json::<bool>("flag"), None);
    }

    #[test]
    fn test_last_write_wins() {
        let mut store = Store::default();
        store.set("k", "first");
        store.set("k", "second");

        assert_eq!(store.get("k"), Some("second"));
    }

    #[test]
    fn test_remove_user_entries_spares_other_users() {
        let alice = Uuid::new_v4();
        let bella = Uuid::new_v4();

        let mut store = Store::default();
        store.set(keys::cycle(&alice), "{}");
        store.set(keys::mood(&alice), "😊");
        store.set(keys::cycle(&bella), "{}");
        store.set(keys::APP_LANGUAGE, "en");

        let removed = store.remove_user_entries(&alice);

        assert_eq!(removed, 2);
        assert!(store.get(&keys::cycle(&alice)).is_none());
        assert!(store.get(&keys::cycle(&bella)).is_some());
        assert_eq!(store.get(keys::APP_LANGUAGE), Some("en"));
    }

    #[test]
    fn test_atomic_save_leaves_no_stray_files() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = store_path(temp_dir.path());

        Store::default().save(&path).unwrap();

        assert!(path.exists());
        let extras: Vec<_> = std::fs::read_dir(temp_dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name() != "store.json")
            .collect();
        assert!(
            extras.is_empty(),
            "Expected only store.json, found extras: {:?}",
            extras
        );
    }
}
