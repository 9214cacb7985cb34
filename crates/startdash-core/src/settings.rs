//! User preference storage
//!
//! A small string/bool key-value store. Reads never fail: missing keys and
//! unreadable files fall back to the caller's default.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde_json::Value;
use tracing::warn;

use crate::error::StoreError;
use crate::storage::{read_optional, write_private};

/// File name of the settings inside the data directory
pub const SETTINGS_FILE: &str = "settings.json";

/// Display name entered during setup
pub const KEY_USER_NAME: &str = "user_name";

/// Key/value preference store
pub trait SettingsStore: Send + Sync {
    fn get_string(&self, key: &str, default: &str) -> String;
    fn set_string(&self, key: &str, value: &str) -> Result<(), StoreError>;
    fn get_bool(&self, key: &str, default: bool) -> bool;
    fn set_bool(&self, key: &str, value: bool) -> Result<(), StoreError>;
}

type SettingsMap = BTreeMap<String, Value>;

/// Settings persisted as a JSON object in the data directory
pub struct FileSettings {
    path: PathBuf,
    // Serializes read-modify-write cycles
    write_lock: Mutex<()>,
}

impl FileSettings {
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        Self {
            path: data_dir.as_ref().join(SETTINGS_FILE),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> SettingsMap {
        let contents = match read_optional(&self.path) {
            Ok(Some(contents)) => contents,
            Ok(None) => return SettingsMap::new(),
            Err(e) => {
                warn!("Failed to read settings: {}", e);
                return SettingsMap::new();
            }
        };

        serde_json::from_str(&contents).unwrap_or_else(|e| {
            warn!("Failed to parse settings: {}", e);
            SettingsMap::new()
        })
    }

    fn update(&self, key: &str, value: Value) -> Result<(), StoreError> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|e| StoreError::Unavailable(format!("Failed to lock settings: {}", e)))?;

        let mut map = self.load();
        map.insert(key.to_string(), value);
        write_private(&self.path, &serde_json::to_string_pretty(&map)?)?;
        Ok(())
    }
}

impl SettingsStore for FileSettings {
    fn get_string(&self, key: &str, default: &str) -> String {
        match self.load().get(key) {
            Some(Value::String(s)) => s.clone(),
            _ => default.to_string(),
        }
    }

    fn set_string(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.update(key, Value::String(value.to_string()))
    }

    fn get_bool(&self, key: &str, default: bool) -> bool {
        match self.load().get(key) {
            Some(Value::Bool(b)) => *b,
            _ => default,
        }
    }

    fn set_bool(&self, key: &str, value: bool) -> Result<(), StoreError> {
        self.update(key, Value::Bool(value))
    }
}

/// In-process settings
#[derive(Default)]
pub struct MemorySettings {
    values: Mutex<SettingsMap>,
}

impl MemorySettings {
    pub fn new() -> Self {
        Self::default()
    }

    fn get(&self, key: &str) -> Option<Value> {
        self.values.lock().ok().and_then(|m| m.get(key).cloned())
    }

    fn put(&self, key: &str, value: Value) -> Result<(), StoreError> {
        self.values
            .lock()
            .map_err(|e| StoreError::Unavailable(format!("Failed to lock settings: {}", e)))?
            .insert(key.to_string(), value);
        Ok(())
    }
}

impl SettingsStore for MemorySettings {
    fn get_string(&self, key: &str, default: &str) -> String {
        match self.get(key) {
            Some(Value::String(s)) => s,
            _ => default.to_string(),
        }
    }

    fn set_string(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.put(key, Value::String(value.to_string()))
    }

    fn get_bool(&self, key: &str, default: bool) -> bool {
        match self.get(key) {
            Some(Value::Bool(b)) => b,
            _ => default,
        }
    }

    fn set_bool(&self, key: &str, value: bool) -> Result<(), StoreError> {
        self.put(key, Value::Bool(value))
    }
}
