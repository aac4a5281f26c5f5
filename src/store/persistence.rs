//! Key-value blob storage backends.
//!
//! The feature store writes its whole collection as one JSON blob under a
//! single key. Backends only move strings; they know nothing about features.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::error::PersistenceError;

/// Storage port for persisted blobs.
pub trait BlobStore {
    /// Read the blob stored under `key`, `None` if absent.
    fn read(&self, key: &str) -> Result<Option<String>, PersistenceError>;

    /// Store `value` under `key`, replacing any previous blob.
    fn write(&mut self, key: &str, value: &str) -> Result<(), PersistenceError>;
}

/// In-memory backend.
///
/// Clones share the same map, so a test can keep a handle and inspect what
/// the store wrote.
#[derive(Debug, Clone, Default)]
pub struct MemoryBlobStore {
    blobs: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryBlobStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a copy of the blob under `key`.
    pub fn get(&self, key: &str) -> Option<String> {
        self.blobs.borrow().get(key).cloned()
    }

    /// Put a blob directly, bypassing the trait.
    pub fn insert(&self, key: impl Into<String>, value: impl Into<String>) {
        self.blobs.borrow_mut().insert(key.into(), value.into());
    }
}

impl BlobStore for MemoryBlobStore {
    fn read(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        Ok(self.get(key))
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), PersistenceError> {
        self.insert(key, value);
        Ok(())
    }
}

/// Directory backend storing each key as `<key>.json`.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone)]
pub struct FileBlobStore {
    dir: std::path::PathBuf,
}

#[cfg(not(target_arch = "wasm32"))]
impl FileBlobStore {
    /// Create a backend rooted at `dir`. The directory is created on first write.
    pub fn new(dir: impl Into<std::path::PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Default data directory (`<data dir>/aoi-sketch`).
    pub fn default_dir() -> Option<std::path::PathBuf> {
        if let Some(data_dir) = dirs::data_dir() {
            Some(data_dir.join("aoi-sketch"))
        } else {
            dirs::home_dir().map(|home| home.join(".local").join("share").join("aoi-sketch"))
        }
    }

    /// Path of the file holding `key`.
    pub fn path_for(&self, key: &str) -> std::path::PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl BlobStore for FileBlobStore {
    fn read(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        let path = self.path_for(key);
        match std::fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("No stored blob at {:?}", path);
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), PersistenceError> {
        std::fs::create_dir_all(&self.dir)?;
        std::fs::write(self.path_for(key), value)?;
        Ok(())
    }
}

/// Browser localStorage backend (WASM only).
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorageBlobStore;

#[cfg(target_arch = "wasm32")]
impl LocalStorageBlobStore {
    fn storage() -> Result<web_sys::Storage, PersistenceError> {
        let window = web_sys::window()
            .ok_or_else(|| PersistenceError::Storage("No window object available".to_string()))?;
        window
            .local_storage()
            .map_err(|e| PersistenceError::Storage(format!("localStorage access error: {:?}", e)))?
            .ok_or_else(|| PersistenceError::Storage("localStorage not available".to_string()))
    }
}

#[cfg(target_arch = "wasm32")]
impl BlobStore for LocalStorageBlobStore {
    fn read(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        Self::storage()?
            .get_item(key)
            .map_err(|e| PersistenceError::Storage(format!("Failed to read {key}: {:?}", e)))
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), PersistenceError> {
        Self::storage()?
            .set_item(key, value)
            .map_err(|e| PersistenceError::Storage(format!("Failed to write {key}: {:?}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_shares_state_between_clones() {
        let handle = MemoryBlobStore::new();
        let mut store = handle.clone();
        store.write("k", "v").unwrap();
        assert_eq!(handle.get("k").as_deref(), Some("v"));
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_file_store_round_trip() {
        let dir = std::env::temp_dir().join(format!("aoi-sketch-test-{}", uuid::Uuid::new_v4()));
        let mut store = FileBlobStore::new(&dir);

        assert_eq!(store.read("features").unwrap(), None);
        store.write("features", "[]").unwrap();
        assert_eq!(store.read("features").unwrap().as_deref(), Some("[]"));

        let _ = std::fs::remove_dir_all(&dir);
    }
}
