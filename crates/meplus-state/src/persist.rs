//! Store persistence backends
//!
//! Every store owns its backend; a write failure in one store never touches
//! another store's state.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use thiserror::Error;

/// Where a store's state lives between sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistScope {
    /// In-memory only; gone when the session ends
    Session,
    /// Written under the state directory; survives restarts
    Durable,
}

/// Persistence errors
#[derive(Error, Debug)]
pub enum StateError {
    /// Writing the serialized value failed
    #[error("failed to persist {key}: {source}")]
    Write {
        /// Store key
        key: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Encoding the value failed
    #[error("failed to encode {key}: {source}")]
    Encode {
        /// Store key
        key: String,
        /// Underlying encoding error
        #[source]
        source: serde_json::Error,
    },
}

/// Key-value backend holding serialized store state.
pub trait StateBackend: Send + Sync {
    /// Load the serialized value for a key, if present.
    fn load(&self, key: &str) -> Option<String>;

    /// Persist the serialized value for a key.
    fn save(&self, key: &str, value: &str) -> Result<(), StateError>;
}

/// Session-only backend.
#[derive(Default)]
pub struct MemoryBackend {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryBackend {
    /// Create an empty in-memory backend.
    pub fn new() -> Self {
        Self::default()
    }
}

impl StateBackend for MemoryBackend {
    fn load(&self, key: &str) -> Option<String> {
        self.entries.lock().ok()?.get(key).cloned()
    }

    fn save(&self, key: &str, value: &str) -> Result<(), StateError> {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(key.to_string(), value.to_string());
        }
        Ok(())
    }
}

/// Durable backend writing one JSON file per key.
pub struct JsonFileBackend {
    dir: PathBuf,
}

impl JsonFileBackend {
    /// Backend rooted at the default state directory.
    ///
    /// The directory is resolved in order:
    /// 1. `MEPLUS_STATE_DIR` environment variable.
    /// 2. `<platform data dir>/meplus`.
    /// 3. `./` (fallback).
    pub fn new() -> Self {
        Self { dir: state_dir() }
    }

    /// Backend rooted at an explicit directory.
    pub fn with_dir(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl Default for JsonFileBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl StateBackend for JsonFileBackend {
    fn load(&self, key: &str) -> Option<String> {
        fs::read_to_string(self.path(key)).ok()
    }

    fn save(&self, key: &str, value: &str) -> Result<(), StateError> {
        let wrap = |source| StateError::Write {
            key: key.to_string(),
            source,
        };
        fs::create_dir_all(&self.dir).map_err(wrap)?;
        fs::write(self.path(key), value).map_err(wrap)
    }
}

fn state_dir() -> PathBuf {
    std::env::var("MEPLUS_STATE_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let mut p = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
            p.push("meplus");
            p
        })
}

/// Pick a backend for the given scope.
pub fn backend_for(scope: PersistScope) -> Arc<dyn StateBackend> {
    match scope {
        PersistScope::Session => Arc::new(MemoryBackend::new()),
        PersistScope::Durable => Arc::new(JsonFileBackend::new()),
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_backend_roundtrip() {
        let backend = MemoryBackend::new();
        assert!(backend.load("theme").is_none());
        backend.save("theme", "\"dark\"").unwrap();
        assert_eq!(backend.load("theme").as_deref(), Some("\"dark\""));
    }

    #[test]
    fn test_json_file_backend_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let backend = JsonFileBackend::with_dir(dir.path());

        assert!(backend.load("sidebar").is_none());
        backend.save("sidebar", "true").unwrap();
        assert_eq!(backend.load("sidebar").as_deref(), Some("true"));

        // A fresh backend over the same directory sees the value.
        let reopened = JsonFileBackend::with_dir(dir.path());
        assert_eq!(reopened.load("sidebar").as_deref(), Some("true"));
    }

    #[test]
    fn test_json_file_backend_creates_the_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("deeper/still");
        let backend = JsonFileBackend::with_dir(&nested);
        backend.save("theme", "\"light\"").unwrap();
        assert!(nested.join("theme.json").exists());
    }
}
