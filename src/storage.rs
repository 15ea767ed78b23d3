//! Persistent key/string storage for the session token.
//!
//! SYSTEM CONTEXT
//! ==============
//! The session manager owns exactly one key in this store and writes the raw
//! token to it with no envelope. `FileStorage` is the on-disk analogue of
//! browser local storage: one flat JSON object shared by every key.
//!
//! ERROR HANDLING
//! ==============
//! Storage unavailability is not part of the session contract. Read failures
//! surface as "absent" and write failures are dropped; both are logged so an
//! operator can see why a session did not survive a restart.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use std::collections::{BTreeMap, HashMap};
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::{Mutex, PoisonError};

use tracing::warn;

/// Synchronous key/string store.
pub trait TokenStorage: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

// =============================================================================
// MEMORY
// =============================================================================

/// Process-local store. Nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with one entry.
    #[must_use]
    pub fn with_entry(key: &str, value: &str) -> Self {
        let storage = Self::new();
        storage.set(key, value);
        storage
    }
}

impl TokenStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.insert(key.to_owned(), value.to_owned());
    }

    fn remove(&self, key: &str) {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.remove(key);
    }
}

// =============================================================================
// FILE
// =============================================================================

/// JSON-file store. Every call goes to disk so a new process sees what an
/// earlier one wrote.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileStorage {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), lock: Mutex::new(()) }
    }

    fn read_entries(&self) -> BTreeMap<String, String> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return BTreeMap::new(),
            Err(e) => {
                warn!(error = %e, path = %self.path.display(), "storage read failed");
                return BTreeMap::new();
            }
        };
        if raw.trim().is_empty() {
            return BTreeMap::new();
        }
        match serde_json::from_str(&raw) {
            Ok(entries) => entries,
            Err(e) => {
                warn!(error = %e, path = %self.path.display(), "storage file is not a JSON string map");
                BTreeMap::new()
            }
        }
    }

    fn write_entries(&self, entries: &BTreeMap<String, String>) {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            if let Err(e) = std::fs::create_dir_all(parent) {
                warn!(error = %e, path = %parent.display(), "storage directory create failed");
                return;
            }
        }
        let raw = match serde_json::to_string_pretty(entries) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(error = %e, "storage encode failed");
                return;
            }
        };
        if let Err(e) = std::fs::write(&self.path, raw) {
            warn!(error = %e, path = %self.path.display(), "storage write failed");
        }
    }
}

impl TokenStorage for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        self.read_entries().remove(key)
    }

    fn set(&self, key: &str, value: &str) {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut entries = self.read_entries();
        entries.insert(key.to_owned(), value.to_owned());
        self.write_entries(&entries);
    }

    fn remove(&self, key: &str) {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut entries = self.read_entries();
        if entries.remove(key).is_some() {
            self.write_entries(&entries);
        }
    }
}
