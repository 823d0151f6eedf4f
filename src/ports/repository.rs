//! Repository port for snapshot persistence.
//!
//! Agents turn their tables into plain snapshot documents; a repository only
//! decides how such a document is written to and read from disk.

use std::path::Path;

use serde::{Serialize, de::DeserializeOwned};

use crate::Result;

/// Port for persisting and loading agent snapshots.
///
/// Both operations are all-or-nothing: `load` either returns a complete
/// document or an error, never a partial one.
///
/// # Examples
///
/// ```no_run
/// use std::path::Path;
///
/// use qlearning_kit::{adapters::JsonRepository, ports::SnapshotRepository};
///
/// let repo = JsonRepository::new();
/// repo.save(&vec![vec![0.5, -0.25]], Path::new("weights.json"))?;
/// let weights: Vec<Vec<f64>> = repo.load(Path::new("weights.json"))?;
/// # Ok::<(), qlearning_kit::Error>(())
/// ```
pub trait SnapshotRepository {
    /// Save a snapshot document.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or written, or the
    /// document cannot be encoded.
    fn save<T: Serialize>(&self, snapshot: &T, path: &Path) -> Result<()>;

    /// Load a snapshot document.
    ///
    /// # Errors
    ///
    /// Returns an error if the file does not exist, cannot be read, or does
    /// not decode into `T`.
    fn load<T: DeserializeOwned>(&self, path: &Path) -> Result<T>;
}
