//! In-memory tree repository for testing.

use std::{
    collections::HashMap,
    path::Path,
    sync::{Arc, Mutex},
};

use crate::{Result, error::Error, ports::TreeRepository, tree::GameTree};

/// In-memory repository for tests.
///
/// Stores serialized trees in a shared map keyed by path, avoiding file
/// system I/O entirely. All clones share the same underlying storage.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    storage: Arc<Mutex<HashMap<String, Vec<u8>>>>,
}

impl InMemoryRepository {
    /// Create a new empty in-memory repository.
    pub fn new() -> Self {
        Self {
            storage: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Number of trees currently stored.
    pub fn count(&self) -> usize {
        self.storage.lock().unwrap().len()
    }

    /// Whether a tree exists at the given path.
    pub fn contains(&self, path: &Path) -> bool {
        let key = path.to_string_lossy().to_string();
        self.storage.lock().unwrap().contains_key(&key)
    }
}

impl TreeRepository for InMemoryRepository {
    fn save(&self, tree: &GameTree, path: &Path) -> Result<()> {
        let bytes = rmp_serde::to_vec(tree).map_err(|e| Error::SerializationContext {
            operation: "serialize tree to memory".to_string(),
            message: e.to_string(),
        })?;
        let key = path.to_string_lossy().to_string();
        self.storage.lock().unwrap().insert(key, bytes);
        Ok(())
    }

    fn load(&self, path: &Path) -> Result<GameTree> {
        let key = path.to_string_lossy().to_string();
        let storage = self.storage.lock().unwrap();
        let bytes = storage.get(&key).ok_or_else(|| Error::Io {
            operation: format!("open in-memory tree {path:?}"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no tree stored"),
        })?;
        rmp_serde::from_slice(bytes).map_err(|e| Error::SerializationContext {
            operation: "deserialize tree from memory".to_string(),
            message: e.to_string(),
        })
    }
}
