//! Key-value persistence for dayboard collections and timer settings.
//!
//! The store is deliberately dumb: string keys, string values, whole-value
//! overwrite. Typed load/save helpers sit on top and own the JSON encoding.
//! A missing key is never an error; it reads as an empty collection or the
//! default value.

use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use thiserror::Error;

pub const TASKS_KEY: &str = "tasks";
pub const REMINDERS_KEY: &str = "reminders";
pub const WORK_MINUTES_KEY: &str = "workMin";
pub const BREAK_MINUTES_KEY: &str = "breakMin";

pub const DEFAULT_WORK_MINUTES: u32 = 25;
pub const DEFAULT_BREAK_MINUTES: u32 = 5;

/// Longest accepted work or break duration: one day.
pub const MAX_MINUTES: u32 = 24 * 60;

pub fn minutes_in_range(minutes: u32) -> bool {
    (1..=MAX_MINUTES).contains(&minutes)
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("in-memory store lock poisoned")]
    Poisoned,
}

/// Durable string-keyed storage.
///
/// Implementations are cheap handles; cloning one shares the same backing data.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// Shared in-memory store. Used by tests and by callers that do not persist.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let map = self.inner.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(map.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut map = self.inner.lock().map_err(|_| StoreError::Poisoned)?;
        map.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Directory-backed store: one `<key>.json` file per key.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Open (and create if needed) a store rooted at `root`.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.key_path(key);
        match fs::read_to_string(&path) {
            Ok(s) => Ok(Some(s)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.key_path(key);
        let tmp = self.root.join(format!(".{key}.json.tmp"));
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }
}

/// Load a JSON array stored under `key`.
///
/// Absent keys, unreadable values and unparseable JSON all yield an empty
/// collection; the latter two are logged.
pub fn load_collection<T, S>(store: &S, key: &str) -> Vec<T>
where
    T: DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(e) => {
            tracing::warn!(key, error = %e, "failed to read collection, starting empty");
            return Vec::new();
        }
    };

    match serde_json::from_str::<Vec<T>>(&raw) {
        Ok(items) => items,
        Err(e) => {
            tracing::warn!(key, error = %e, "corrupted collection, starting empty");
            Vec::new()
        }
    }
}

/// Overwrite the whole collection stored under `key`.
pub fn save_collection<T, S>(store: &S, key: &str, items: &[T]) -> Result<(), StoreError>
where
    T: Serialize,
    S: KeyValueStore + ?Sized,
{
    let json = serde_json::to_string(items)?;
    store.set(key, &json)?;
    tracing::debug!(key, len = items.len(), "persisted collection");
    Ok(())
}

/// Load a minutes setting stored as a plain numeric string.
///
/// Values that do not parse or fall outside `1..=MAX_MINUTES` yield `default`.
pub fn load_minutes<S>(store: &S, key: &str, default: u32) -> u32
where
    S: KeyValueStore + ?Sized,
{
    match store.get(key) {
        Ok(Some(raw)) => match raw.trim().parse::<u32>() {
            Ok(n) if minutes_in_range(n) => n,
            _ => {
                tracing::warn!(
                    key,
                    value = %raw,
                    default,
                    "invalid minutes setting, using default"
                );
                default
            }
        },
        Ok(None) => default,
        Err(e) => {
            tracing::warn!(
                key,
                error = %e,
                default,
                "failed to read minutes setting, using default"
            );
            default
        }
    }
}

pub fn save_minutes<S>(store: &S, key: &str, minutes: u32) -> Result<(), StoreError>
where
    S: KeyValueStore + ?Sized,
{
    store.set(key, &minutes.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_read_as_defaults() {
        let store = MemoryStore::new();
        let items: Vec<u64> = load_collection(&store, TASKS_KEY);
        assert!(items.is_empty());
        assert_eq!(load_minutes(&store, WORK_MINUTES_KEY, DEFAULT_WORK_MINUTES), 25);
        assert_eq!(load_minutes(&store, BREAK_MINUTES_KEY, DEFAULT_BREAK_MINUTES), 5);
    }

    #[test]
    fn corrupted_collection_fails_closed() {
        let store = MemoryStore::new();
        store.set(TASKS_KEY, "{not json").unwrap();
        let items: Vec<u64> = load_collection(&store, TASKS_KEY);
        assert!(items.is_empty());
    }

    #[test]
    fn zero_or_garbage_minutes_fall_back() {
        let store = MemoryStore::new();
        store.set(WORK_MINUTES_KEY, "0").unwrap();
        store.set(BREAK_MINUTES_KEY, "soon").unwrap();
        assert_eq!(load_minutes(&store, WORK_MINUTES_KEY, 25), 25);
        assert_eq!(load_minutes(&store, BREAK_MINUTES_KEY, 5), 5);

        save_minutes(&store, WORK_MINUTES_KEY, 50).unwrap();
        assert_eq!(store.get(WORK_MINUTES_KEY).unwrap().as_deref(), Some("50"));
        assert_eq!(load_minutes(&store, WORK_MINUTES_KEY, 25), 50);
    }

    #[test]
    fn oversized_minutes_fall_back() {
        let store = MemoryStore::new();
        store.set(WORK_MINUTES_KEY, "100000000").unwrap();
        store.set(BREAK_MINUTES_KEY, &(MAX_MINUTES + 1).to_string()).unwrap();
        assert_eq!(load_minutes(&store, WORK_MINUTES_KEY, 25), 25);
        assert_eq!(load_minutes(&store, BREAK_MINUTES_KEY, 5), 5);

        store.set(WORK_MINUTES_KEY, &MAX_MINUTES.to_string()).unwrap();
        assert_eq!(load_minutes(&store, WORK_MINUTES_KEY, 25), MAX_MINUTES);
    }

    #[test]
    fn memory_store_clones_share_data() {
        let a = MemoryStore::new();
        let b = a.clone();
        save_collection(&a, REMINDERS_KEY, &[1u64, 2, 3]).unwrap();
        let back: Vec<u64> = load_collection(&b, REMINDERS_KEY);
        assert_eq!(back, vec![1, 2, 3]);
    }

    #[test]
    fn file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path().join("data")).unwrap();
        assert_eq!(store.get(TASKS_KEY).unwrap(), None);

        store.set(TASKS_KEY, "[1,2]").unwrap();
        store.set(TASKS_KEY, "[3]").unwrap();
        assert_eq!(store.get(TASKS_KEY).unwrap().as_deref(), Some("[3]"));
        assert!(store.root().join("tasks.json").exists());
        assert!(!store.root().join(".tasks.json.tmp").exists());
    }
}
