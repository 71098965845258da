//! MessagePack implementation of the tree repository.
//!
//! This adapter implements the TreeRepository port using rmp_serde for
//! compact binary serialization.

use std::{fs::File, path::Path};

use crate::{Result, error::Error, ports::TreeRepository, tree::GameTree};

/// MessagePack-based tree repository.
///
/// Stores the full tree arena (all action values, all children, and the
/// shared hyperparameters) in a single binary file.
#[derive(Debug, Clone, Copy, Default)]
pub struct MsgPackRepository;

impl MsgPackRepository {
    /// Create a new MessagePack repository.
    pub fn new() -> Self {
        Self
    }
}

impl TreeRepository for MsgPackRepository {
    fn save(&self, tree: &GameTree, path: &Path) -> Result<()> {
        let mut file = File::create(path).map_err(|source| Error::Io {
            operation: format!("create file {path:?}"),
            source,
        })?;

        rmp_serde::encode::write(&mut file, tree).map_err(|e| Error::SerializationContext {
            operation: "serialize tree to MessagePack".to_string(),
            message: e.to_string(),
        })?;

        Ok(())
    }

    fn load(&self, path: &Path) -> Result<GameTree> {
        let file = File::open(path).map_err(|source| Error::Io {
            operation: format!("open file {path:?}"),
            source,
        })?;

        let tree = rmp_serde::decode::from_read(&file).map_err(|e| Error::SerializationContext {
            operation: "deserialize tree from MessagePack".to_string(),
            message: e.to_string(),
        })?;

        Ok(tree)
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::types::{BoardSize, Move};

    fn sample_tree() -> GameTree {
        let size = BoardSize::new(5, 5).unwrap();
        let legal: Vec<Move> = (0..5).map(|col| Move::new(0, col)).collect();
        GameTree::new(size, 0.0, 10.0, 0.2, 0.9, &legal)
    }

    #[test]
    fn test_msgpack_roundtrip() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let file_path = temp_dir.path().join("test_tree.msgpack");

        let repo = MsgPackRepository::new();
        let mut tree = sample_tree();
        let root = tree.root();
        tree.add_child(root, Move::new(0, 2), &[Move::new(1, 2)])
            .unwrap();

        repo.save(&tree, &file_path).expect("Failed to save");
        let loaded = repo.load(&file_path).expect("Failed to load");

        assert_eq!(loaded.node_count(), tree.node_count());
        assert_eq!(loaded.board_size(), tree.board_size());
        assert!(loaded.find_child(loaded.root(), Move::new(0, 2)).is_some());
    }

    #[test]
    fn test_load_nonexistent_returns_error() {
        let repo = MsgPackRepository::new();
        let result = repo.load(Path::new("/tmp/nonexistent_12345.msgpack"));
        assert!(result.is_err());
    }

    #[test]
    fn test_save_to_invalid_path_returns_error() {
        let repo = MsgPackRepository::new();
        let tree = sample_tree();
        let result = repo.save(&tree, Path::new("/invalid_dir_12345/file.msgpack"));
        assert!(result.is_err());
    }
}
