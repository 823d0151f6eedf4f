//! In-memory snapshot repository for testing.
//!
//! This adapter keeps encoded snapshots in a shared map keyed by path,
//! enabling persistence tests without any file system I/O.

use std::{
    cell::{RefCell, RefMut},
    collections::HashMap,
    path::Path,
    rc::Rc,
};

use serde::{Serialize, de::DeserializeOwned};

use crate::{Result, error::Error, ports::SnapshotRepository};

/// In-memory repository for testing.
///
/// Documents are stored as JSON text, so a save/load cycle goes through the
/// same encoding as [`super::JsonRepository`].
///
/// # Examples
///
/// ```
/// use std::path::Path;
///
/// use qlearning_kit::{adapters::InMemoryRepository, ports::SnapshotRepository};
///
/// let repo = InMemoryRepository::new();
/// repo.save(&vec![1.0, 2.0], Path::new("weights"))?;
///
/// let loaded: Vec<f64> = repo.load(Path::new("weights"))?;
/// assert_eq!(loaded, vec![1.0, 2.0]);
/// # Ok::<(), qlearning_kit::Error>(())
/// ```
///
/// All clones share the same underlying storage. The repository is not
/// `Send`; agents and their stores live on one thread.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    storage: Rc<RefCell<HashMap<String, String>>>,
}

impl InMemoryRepository {
    /// Create a new empty in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }

    fn storage(&self) -> RefMut<'_, HashMap<String, String>> {
        self.storage.borrow_mut()
    }

    /// Number of documents currently stored.
    pub fn count(&self) -> usize {
        self.storage().len()
    }

    /// Raw JSON text stored at `path`.
    pub fn document(&self, path: &Path) -> Option<String> {
        self.storage().get(&path.to_string_lossy().to_string()).cloned()
    }

    /// Overwrite the raw text stored at `path`.
    pub fn put_document(&self, path: &Path, text: impl Into<String>) {
        self.storage()
            .insert(path.to_string_lossy().to_string(), text.into());
    }

    /// Clear all stored documents.
    pub fn clear(&self) {
        self.storage().clear();
    }

    /// Check if a document exists at the given path.
    pub fn contains(&self, path: &Path) -> bool {
        self.storage()
            .contains_key(&path.to_string_lossy().to_string())
    }
}

impl SnapshotRepository for InMemoryRepository {
    fn save<T: Serialize>(&self, snapshot: &T, path: &Path) -> Result<()> {
        let text = serde_json::to_string(snapshot).map_err(|e| Error::SerializationContext {
            operation: "serialize snapshot for in-memory storage".to_string(),
            message: e.to_string(),
        })?;

        self.put_document(path, text);
        Ok(())
    }

    fn load<T: DeserializeOwned>(&self, path: &Path) -> Result<T> {
        let text = self.document(path).ok_or_else(|| Error::Io {
            operation: format!("load snapshot from in-memory storage at {path:?}"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "key not found in memory"),
        })?;

        serde_json::from_str(&text).map_err(|e| Error::SerializationContext {
            operation: "deserialize snapshot from in-memory storage".to_string(),
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_memory_save_and_load() {
        let repo = InMemoryRepository::new();
        let path = Path::new("weights");

        assert_eq!(repo.count(), 0);
        assert!(!repo.contains(path));

        repo.save(&vec![vec![0.1, 0.2]], path).unwrap();
        assert_eq!(repo.count(), 1);
        assert!(repo.contains(path));

        let loaded: Vec<Vec<f64>> = repo.load(path).unwrap();
        assert_eq!(loaded, vec![vec![0.1, 0.2]]);
    }

    #[test]
    fn test_load_nonexistent_returns_error() {
        let repo = InMemoryRepository::new();
        let result = repo.load::<Vec<f64>>(Path::new("nonexistent"));
        assert!(matches!(result, Err(Error::Io { .. })));
    }

    #[test]
    fn test_clear_removes_all() {
        let repo = InMemoryRepository::new();
        repo.save(&1.0, Path::new("a")).unwrap();
        repo.save(&2.0, Path::new("b")).unwrap();
        assert_eq!(repo.count(), 2);

        repo.clear();
        assert_eq!(repo.count(), 0);
    }

    #[test]
    fn test_clone_shares_storage() {
        let repo1 = InMemoryRepository::new();
        let repo2 = repo1.clone();
        let path = Path::new("shared");

        repo1.save(&vec![3.0], path).unwrap();
        let loaded: Vec<f64> = repo2.load(path).unwrap();

        assert_eq!(loaded, vec![3.0]);
        assert_eq!(repo2.count(), 1);
    }
}
