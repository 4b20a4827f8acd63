//! Preference stores: an in-memory one and a JSON file backed one.
//!
//! Both broadcast every successful write to their subscribers.

use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};
use tokio::sync::broadcast;

use crate::error::{Error, Result};
use crate::traits::{PreferenceChange, PreferenceStore};

/// Key under which the engine persists its filter state.
pub const FILTER_PREFERENCES_KEY: &str = "filterPreferences";

const CHANNEL_CAPACITY: usize = 64;

fn poisoned<T>(_: PoisonError<T>) -> Error {
    Error::Preference("preference store lock poisoned".to_string())
}

pub struct MemoryPreferenceStore {
    prefs: Mutex<Map<String, Value>>,
    tx: broadcast::Sender<PreferenceChange>,
}

impl Default for MemoryPreferenceStore {
    fn default() -> Self {
        Self::with_preferences(Map::new())
    }
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_preferences(prefs: Map<String, Value>) -> Self {
        let (tx, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { prefs: Mutex::new(prefs), tx }
    }

    /// Insert under the lock, run `persist` on the updated map, then notify.
    /// Nothing is stored or broadcast if `persist` fails.
    fn update<F>(&self, key: &str, value: Value, persist: F) -> Result<()>
    where
        F: FnOnce(&Map<String, Value>) -> Result<()>,
    {
        {
            let mut prefs = self.prefs.lock().map_err(poisoned)?;
            let mut next = prefs.clone();
            next.insert(key.to_string(), value.clone());
            persist(&next)?;
            *prefs = next;
        }
        // No receivers is not an error.
        let _ = self.tx.send(PreferenceChange { key: key.to_string(), value });
        Ok(())
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn get_preferences(&self) -> Result<Map<String, Value>> {
        Ok(self.prefs.lock().map_err(poisoned)?.clone())
    }

    fn set_preference(&self, key: &str, value: Value) -> Result<()> {
        self.update(key, value, |_| Ok(()))
    }

    fn subscribe(&self) -> broadcast::Receiver<PreferenceChange> {
        self.tx.subscribe()
    }
}

/// Preferences persisted as a single JSON object on disk.
pub struct JsonFilePreferenceStore {
    path: PathBuf,
    inner: MemoryPreferenceStore,
}

impl JsonFilePreferenceStore {
    /// Open (or start) the store at `path`. A missing file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let prefs = if path.exists() {
            let raw = std::fs::read_to_string(&path)?;
            match serde_json::from_str::<Value>(&raw)? {
                Value::Object(map) => map,
                _ => {
                    return Err(Error::Preference(format!(
                        "{} does not contain a JSON object",
                        path.display()
                    )))
                }
            }
        } else {
            Map::new()
        };
        tracing::debug!(path = %path.display(), keys = prefs.len(), "opened preference file");
        Ok(Self { path, inner: MemoryPreferenceStore::with_preferences(prefs) })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn write_json(path: &Path, prefs: &Map<String, Value>) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let body = serde_json::to_vec_pretty(prefs)?;
    std::fs::write(path, body)?;
    Ok(())
}

impl PreferenceStore for JsonFilePreferenceStore {
    fn get_preferences(&self) -> Result<Map<String, Value>> {
        self.inner.get_preferences()
    }

    fn set_preference(&self, key: &str, value: Value) -> Result<()> {
        self.inner.update(key, value, |prefs| write_json(&self.path, prefs))
    }

    fn subscribe(&self) -> broadcast::Receiver<PreferenceChange> {
        self.inner.subscribe()
    }
}
