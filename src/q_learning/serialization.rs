//! Serialization support for the Q-learning agents.
//!
//! Each agent converts its table or weights into a snapshot document keyed by
//! the strings from [`crate::codec`]:
//!
//! | Agent | Document |
//! |-------|----------|
//! | Tabular | `{ base64(state): { "1": q, "2": q } }` |
//! | Linear | `{ "1": [w0, w1, ...], "2": [...] }` |
//! | Continuous | `[[w0, w1, ...], ...]`, one row per output |
//!
//! Action keys are assigned from the action list order at construction, so
//! an agent must be rebuilt with the same list for a saved document to load
//! back onto the same actions.

use std::{collections::BTreeMap, path::Path};

use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::{Result, adapters::JsonRepository, ports::SnapshotRepository};

/// Persisted tabular Q-values: encoded state -> action key -> value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TabularSnapshot(pub BTreeMap<String, BTreeMap<String, f64>>);

/// Persisted linear weights: action key -> weight vector.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LinearSnapshot(pub BTreeMap<String, Vec<f64>>);

/// Persisted continuous weights: one weight vector per output dimension.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContinuousSnapshot(pub Vec<Vec<f64>>);

/// Outcome of restoring a snapshot.
///
/// Keys that do not decode against the agent's codecs are skipped and
/// counted in `dropped` rather than failing the load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RestoreReport {
    /// Entries written into the agent
    pub restored: usize,
    /// Entries skipped because their key did not decode
    pub dropped: usize,
}

/// Save/load capability shared by all agents.
///
/// `restore` replaces the agent's learned values only after the whole
/// document has been validated, so a failed load leaves the agent as it was.
pub trait Persist {
    type Snapshot: Serialize + DeserializeOwned;

    /// Encode the learned values.
    fn snapshot(&self) -> Result<Self::Snapshot>;

    /// Replace the learned values with a decoded snapshot.
    fn restore(&mut self, snapshot: Self::Snapshot) -> Result<RestoreReport>;

    fn save_with<R: SnapshotRepository>(&self, repo: &R, path: &Path) -> Result<()> {
        repo.save(&self.snapshot()?, path)
    }

    fn load_with<R: SnapshotRepository>(&mut self, repo: &R, path: &Path) -> Result<RestoreReport> {
        let snapshot = repo.load::<Self::Snapshot>(path)?;
        self.restore(snapshot)
    }

    /// Save as JSON.
    fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.save_with(&JsonRepository::new(), path.as_ref())
    }

    /// Load from JSON.
    fn load<P: AsRef<Path>>(&mut self, path: P) -> Result<RestoreReport> {
        self.load_with(&JsonRepository::new(), path.as_ref())
    }
}
