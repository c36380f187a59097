use super::interchange::{export_document, parse_document};
use crate::config::FunnelConfig;
use crate::error::PersistenceError;
use crate::graph::Snapshot;
use std::fs;
use std::path::{Path, PathBuf};

/// Holds the single local snapshot of the funnel under a fixed key.
pub trait SnapshotStore {
    /// Returns the saved snapshot, or `None` when nothing has been saved yet.
    fn load(&self) -> Result<Option<Snapshot>, PersistenceError>;

    /// Overwrites the saved snapshot.
    fn save(&mut self, snapshot: &Snapshot) -> Result<(), PersistenceError>;
}

impl<S: SnapshotStore + ?Sized> SnapshotStore for Box<S> {
    fn load(&self) -> Result<Option<Snapshot>, PersistenceError> {
        (**self).load()
    }

    fn save(&mut self, snapshot: &Snapshot) -> Result<(), PersistenceError> {
        (**self).save(snapshot)
    }
}

/// Persists the snapshot as `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileSnapshotStore {
    path: PathBuf,
}

impl FileSnapshotStore {
    pub fn new(dir: impl AsRef<Path>, key: &str) -> Self {
        Self {
            path: dir.as_ref().join(format!("{}.json", key)),
        }
    }

    /// Uses the config's `storage_key` as the snapshot file name.
    pub fn from_config(dir: impl AsRef<Path>, config: &FunnelConfig) -> Self {
        Self::new(dir, &config.storage_key)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnapshotStore for FileSnapshotStore {
    fn load(&self) -> Result<Option<Snapshot>, PersistenceError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content =
            fs::read_to_string(&self.path).map_err(|e| PersistenceError::io(&self.path, e))?;
        let snapshot = parse_document(&content)?;
        log::info!(
            "Loaded funnel snapshot from {:?} ({} steps, {} connections)",
            self.path,
            snapshot.nodes.len(),
            snapshot.edges.len()
        );
        Ok(Some(snapshot))
    }

    fn save(&mut self, snapshot: &Snapshot) -> Result<(), PersistenceError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| PersistenceError::io(parent, e))?;
        }
        let content = serde_json::to_string(snapshot)
            .map_err(|e| PersistenceError::Serialization(e.to_string()))?;
        fs::write(&self.path, content).map_err(|e| PersistenceError::io(&self.path, e))?;
        log::debug!("Saved funnel snapshot to {:?}", self.path);
        Ok(())
    }
}

/// Keeps the snapshot document in memory. Useful for hosts without a
/// filesystem and for observing saves in tests.
#[derive(Debug, Clone, Default)]
pub struct MemorySnapshotStore {
    document: Option<String>,
    saves: usize,
}

impl MemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from a raw stored document, which may be malformed.
    pub fn with_document(document: impl Into<String>) -> Self {
        Self {
            document: Some(document.into()),
            saves: 0,
        }
    }

    pub fn document(&self) -> Option<&str> {
        self.document.as_deref()
    }

    pub fn save_count(&self) -> usize {
        self.saves
    }
}

impl SnapshotStore for MemorySnapshotStore {
    fn load(&self) -> Result<Option<Snapshot>, PersistenceError> {
        match &self.document {
            Some(document) => Ok(Some(parse_document(document)?)),
            None => Ok(None),
        }
    }

    fn save(&mut self, snapshot: &Snapshot) -> Result<(), PersistenceError> {
        self.document = Some(export_document(snapshot)?);
        self.saves += 1;
        Ok(())
    }
}
