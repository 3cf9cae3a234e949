// src/storage/mod.rs
//! Key/value state for the hub's tools. Values are JSON; a read that fails
//! for any reason yields the caller's fallback.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

/// Well-known keys.
pub mod keys {
    pub const LAST_TOOL: &str = "lastTool";
    pub const THEME: &str = "theme";
    pub const COLOR: &str = "color_tool";
    pub const PASSWORD: &str = "password_tool";
    pub const JSON: &str = "json_tool";
    pub const REGEX: &str = "regex_tool";
    pub const CODEC: &str = "codec_tool";
    pub const UUID: &str = "uuid_tool";
    pub const CONVERT: &str = "convert_tool";
    pub const EPOCH: &str = "epoch_tool";
    pub const POMODORO: &str = "pomodoro_tool";
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, StorageError>;

pub trait KeyValueStore {
    fn get_value(&self, key: &str) -> Option<Value>;
    fn set_value(&mut self, key: &str, value: Value) -> Result<()>;
    fn remove(&mut self, key: &str) -> Result<()>;
    fn clear(&mut self) -> Result<()>;
    fn keys(&self) -> Vec<String>;

    /// Read a typed value, falling back when missing or malformed.
    fn get<T: DeserializeOwned>(&self, key: &str, fallback: T) -> T
    where
        Self: Sized,
    {
        match self.get_value(key) {
            Some(value) => serde_json::from_value(value).unwrap_or_else(|e| {
                log::warn!("Ignoring malformed state for '{}': {}", key, e);
                fallback
            }),
            None => fallback,
        }
    }

    fn set<T: Serialize>(&mut self, key: &str, value: &T) -> Result<()>
    where
        Self: Sized,
    {
        let value = serde_json::to_value(value)?;
        self.set_value(key, value)
    }
}

/// In-process store, used by tests and when no state file is wanted.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, Value>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_value(&self, key: &str) -> Option<Value> {
        self.entries.get(key).cloned()
    }

    fn set_value(&mut self, key: &str, value: Value) -> Result<()> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.entries.clear();
        Ok(())
    }

    fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.entries.keys().cloned().collect();
        keys.sort();
        keys
    }
}

/// A store persisted as one JSON object, rewritten on every change.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: Map<String, Value>,
}

impl JsonFileStore {
    /// Open the store at `path`. A missing file starts empty; an unreadable
    /// or corrupt one is logged and treated as empty.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match Self::load(&path) {
            Ok(entries) => entries,
            Err(e) => {
                log::warn!("Discarding unreadable state file {}: {}", path.display(), e);
                Map::new()
            }
        };

        log::debug!("Opened state file {} with {} key(s)", path.display(), entries.len());
        Self { path, entries }
    }

    fn load(path: &Path) -> Result<Map<String, Value>> {
        if !path.exists() {
            return Ok(Map::new());
        }

        let content = fs::read_to_string(path)?;
        if content.trim().is_empty() {
            return Ok(Map::new());
        }

        match serde_json::from_str(&content)? {
            Value::Object(map) => Ok(map),
            _ => Ok(Map::new()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let content = serde_json::to_string_pretty(&self.entries)?;
        fs::write(&self.path, content)?;
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get_value(&self, key: &str) -> Option<Value> {
        self.entries.get(key).cloned()
    }

    fn set_value(&mut self, key: &str, value: Value) -> Result<()> {
        self.entries.insert(key.to_string(), value);
        self.flush()
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        if self.entries.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.entries.clear();
        log::info!("Cleared state file {}", self.path.display());
        self.flush()
    }

    fn keys(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }
}
