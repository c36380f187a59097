use crate::error::PersistenceError;
use crate::graph::NodeSize;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const DEFAULT_STORAGE_KEY: &str = "funnel-builder-state";
pub const DEFAULT_EDGE_TYPE: &str = "smoothstep";

/// How `connect` and `reconnect` treat a second connection between the same
/// ordered pair of steps. Drop-connect always skips duplicates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicatePolicy {
    #[default]
    Allow,
    Reject,
}

/// Editor settings. Every field has a default, so a config file only needs
/// to name what it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FunnelConfig {
    pub node_width: f64,
    pub node_height: f64,
    pub edge_type: String,
    pub duplicate_connections: DuplicatePolicy,
    /// Snapshot key read by [`crate::persistence::FileSnapshotStore::from_config`].
    /// The editor itself never reads it.
    pub storage_key: String,
}

impl Default for FunnelConfig {
    fn default() -> Self {
        let size = NodeSize::default();
        Self {
            node_width: size.width,
            node_height: size.height,
            edge_type: DEFAULT_EDGE_TYPE.to_string(),
            duplicate_connections: DuplicatePolicy::default(),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
        }
    }
}

impl FunnelConfig {
    /// Loads a config from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, PersistenceError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| PersistenceError::io(path, e))?;
        serde_json::from_str(&content).map_err(|e| {
            PersistenceError::Serialization(format!(
                "Invalid config '{}': {}",
                path.display(),
                e
            ))
        })
    }

    pub fn node_size(&self) -> NodeSize {
        NodeSize::new(self.node_width, self.node_height)
    }
}
