//! Key-value storage
//!
//! Values are plain strings, matching browser LocalStorage. Callers own the
//! encoding of what they store.

use std::collections::HashMap;
#[cfg(not(target_arch = "wasm32"))]
use std::collections::BTreeMap;
use std::fmt;

/// Errors from a storage backend
#[derive(Debug)]
pub enum StorageError {
    /// Backend could not be reached (no window, storage disabled, ...)
    Unavailable(String),
    /// Filesystem failure
    Io(std::io::Error),
    /// Value or backing file could not be (de)serialized
    Serialize(serde_json::Error),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            StorageError::Unavailable(why) => write!(f, "Storage unavailable: {}", why),
            StorageError::Io(e) => write!(f, "Storage I/O error: {}", e),
            StorageError::Serialize(e) => write!(f, "Storage serialization error: {}", e),
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StorageError::Unavailable(_) => None,
            StorageError::Io(e) => Some(e),
            StorageError::Serialize(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for StorageError {
    fn from(e: std::io::Error) -> Self {
        StorageError::Io(e)
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(e: serde_json::Error) -> Self {
        StorageError::Serialize(e)
    }
}

/// String key-value persistence
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// In-memory store (tests, or when nothing persistent is available)
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// JSON-file store for native builds. The whole map is rewritten on `set`.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone)]
pub struct FileStore {
    path: std::path::PathBuf,
    entries: BTreeMap<String, String>,
}

#[cfg(not(target_arch = "wasm32"))]
impl FileStore {
    /// Open a store backed by `path`. A missing file starts empty; a
    /// corrupt one is logged and replaced on the next write.
    pub fn open(path: impl AsRef<std::path::Path>) -> Result<Self, StorageError> {
        let path = path.as_ref().to_path_buf();

        let entries: BTreeMap<String, String> = match std::fs::read_to_string(&path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(entries) => entries,
                Err(e) => {
                    log::warn!("Ignoring corrupt store {}: {}", path.display(), e);
                    BTreeMap::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };

        log::info!("Opened store {} ({} keys)", path.display(), entries.len());
        Ok(Self { path, entries })
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        let json = serde_json::to_string_pretty(&self.entries)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }
}

/// Browser LocalStorage
#[cfg(target_arch = "wasm32")]
pub struct LocalStore {
    storage: Option<web_sys::Storage>,
}

#[cfg(target_arch = "wasm32")]
impl LocalStore {
    /// Grab `window.localStorage`. If it is unavailable every `get` misses
    /// and every `set` fails.
    pub fn open() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();
        if storage.is_none() {
            log::warn!("LocalStorage unavailable, scores will not persist");
        }
        Self { storage }
    }
}

#[cfg(target_arch = "wasm32")]
impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.as_ref()?.get_item(key).ok().flatten()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let storage = self
            .storage
            .as_ref()
            .ok_or_else(|| StorageError::Unavailable("no localStorage".to_string()))?;
        storage
            .set_item(key, value)
            .map_err(|e| StorageError::Unavailable(format!("{:?}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("a"), None);
        store.set("a", "1").unwrap();
        store.set("a", "2").unwrap();
        assert_eq!(store.get("a").as_deref(), Some("2"));
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!(
            "freezer-challenge-{}-{}.json",
            name,
            std::process::id()
        ))
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_file_store_persists() {
        let path = temp_path("persist");
        let _ = std::fs::remove_file(&path);

        let mut store = FileStore::open(&path).unwrap();
        assert_eq!(store.get("best"), None);
        store.set("best", "17").unwrap();

        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(reopened.get("best").as_deref(), Some("17"));

        let _ = std::fs::remove_file(&path);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_file_store_recovers_from_corruption() {
        let path = temp_path("corrupt");
        std::fs::write(&path, "{{{ definitely not json").unwrap();

        let mut store = FileStore::open(&path).unwrap();
        assert_eq!(store.get("best"), None);
        store.set("best", "3").unwrap();
        assert_eq!(FileStore::open(&path).unwrap().get("best").as_deref(), Some("3"));

        let _ = std::fs::remove_file(&path);
    }
}
