//! Repository port for game-tree persistence.

use std::path::Path;

use crate::{Result, tree::GameTree};

/// Port for persisting and loading trained game trees.
///
/// The storage mechanism is opaque to the core: any format works as long
/// as the full recursive tree (every node's action values and children,
/// plus the shared hyperparameters) round-trips.
pub trait TreeRepository {
    /// Save a tree to persistent storage.
    ///
    /// # Errors
    ///
    /// Returns an error if the path cannot be written or serialization
    /// fails.
    fn save(&self, tree: &GameTree, path: &Path) -> Result<()>;

    /// Load a tree from persistent storage.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing, unreadable, or corrupt.
    /// This is a recoverable failure: callers constructing an agent may
    /// fall back to a freshly initialized tree.
    fn load(&self, path: &Path) -> Result<GameTree>;
}
