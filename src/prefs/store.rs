// Key-value backends for preferences

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::errors::StoreError;

/// Minimal string-keyed JSON value store.
pub trait KeyValueStore: Send {
    fn get(&self, key: &str) -> Option<Value>;
    fn set(&mut self, key: &str, value: Value) -> Result<(), StoreError>;
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

/// Volatile store, used in tests and when no data directory is available
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: BTreeMap<String, Value>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<Value> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: Value) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// One JSON object on disk, rewritten whole on every change
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: BTreeMap<String, Value>,
}

impl JsonFileStore {
    /// Open the store at `path`.
    ///
    /// A missing file starts empty. An unreadable or corrupt file also starts
    /// empty (with a warning) and is overwritten on the next write.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = Self::read_entries(&path);
        Self { path, entries }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(path: &Path) -> BTreeMap<String, Value> {
        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return BTreeMap::new(),
            Err(e) => {
                tracing::warn!(
                    event = "desk.prefs.read_failed",
                    path = %path.display(),
                    error = %e,
                );
                return BTreeMap::new();
            }
        };

        match serde_json::from_str(&content) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(
                    event = "desk.prefs.parse_failed",
                    path = %path.display(),
                    error = %e,
                    "Preferences file is not a JSON object, starting from defaults"
                );
                BTreeMap::new()
            }
        }
    }

    fn flush(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(&self.entries)?;
        std::fs::write(&self.path, json)?;

        tracing::debug!(
            event = "desk.prefs.saved",
            path = %self.path.display(),
            keys = self.entries.len()
        );
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<Value> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: Value) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value);
        self.flush()
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        if self.entries.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_starts_empty() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::open(dir.path().join("prefs.json"));
        assert!(store.get("soundEnabled").is_none());
    }

    #[test]
    fn test_values_survive_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("prefs.json");

        let mut store = JsonFileStore::open(&path);
        store.set("soundEnabled", json!(true)).unwrap();
        store.set("osTheme", json!("sunset")).unwrap();
        store.remove("osTheme").unwrap();

        let reopened = JsonFileStore::open(&path);
        assert_eq!(reopened.get("soundEnabled"), Some(json!(true)));
        assert!(reopened.get("osTheme").is_none());
    }

    #[test]
    fn test_corrupt_file_falls_back_to_empty_and_is_replaced() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("prefs.json");
        std::fs::write(&path, "{ not json").unwrap();

        let mut store = JsonFileStore::open(&path);
        assert!(store.get("anything").is_none());

        store.set("particlesEnabled", json!(false)).unwrap();
        let reopened = JsonFileStore::open(&path);
        assert_eq!(reopened.get("particlesEnabled"), Some(json!(false)));
    }

    #[test]
    fn test_memory_store() {
        let mut store = MemoryStore::new();
        store.set("k", json!(1)).unwrap();
        assert_eq!(store.get("k"), Some(json!(1)));
        store.remove("k").unwrap();
        assert!(store.get("k").is_none());
    }
}
