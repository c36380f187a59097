use crate::error::{InterchangeError, PersistenceError};
use crate::graph::{FunnelEdge, FunnelNode, Snapshot};
use crate::step::StepType;
use ahash::{AHashMap, AHashSet};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// File name offered for an exported funnel.
pub const EXPORT_FILE_NAME: &str = "funnel.json";

/// Serializes a snapshot as a pretty-printed `{ nodes, edges }` document.
pub fn export_document(snapshot: &Snapshot) -> Result<String, PersistenceError> {
    serde_json::to_string_pretty(snapshot)
        .map_err(|e| PersistenceError::Serialization(e.to_string()))
}

/// Writes `funnel.json` into `dir` and returns the full path.
pub fn write_export(dir: impl AsRef<Path>, snapshot: &Snapshot) -> Result<PathBuf, PersistenceError> {
    let dir = dir.as_ref();
    let document = export_document(snapshot)?;
    fs::create_dir_all(dir).map_err(|e| PersistenceError::io(dir, e))?;
    let path = dir.join(EXPORT_FILE_NAME);
    fs::write(&path, document).map_err(|e| PersistenceError::io(&path, e))?;
    Ok(path)
}

/// Parses a funnel document.
///
/// Both `nodes` and `edges` must be present as lists; unknown fields are
/// ignored. The document is rejected as a whole when any element fails to
/// parse, when a node or connection id repeats, when a connection names a
/// missing node, or when a connection leaves a thank-you step.
pub fn parse_document(json: &str) -> Result<Snapshot, InterchangeError> {
    let mut root: Value =
        serde_json::from_str(json).map_err(|e| InterchangeError::InvalidJson(e.to_string()))?;

    let nodes: Vec<FunnelNode> = take_sequence(&mut root, "nodes")?;
    let edges: Vec<FunnelEdge> = take_sequence(&mut root, "edges")?;

    check_references(&nodes, &edges)?;
    Ok(Snapshot::new(nodes, edges))
}

fn check_references(nodes: &[FunnelNode], edges: &[FunnelEdge]) -> Result<(), InterchangeError> {
    let mut steps: AHashMap<&str, StepType> = AHashMap::with_capacity(nodes.len());
    for node in nodes {
        if steps.insert(node.id.as_str(), node.step()).is_some() {
            return Err(InterchangeError::DuplicateNodeId(node.id.clone()));
        }
    }

    let mut edge_ids = AHashSet::with_capacity(edges.len());
    for edge in edges {
        if !edge_ids.insert(edge.id.as_str()) {
            return Err(InterchangeError::DuplicateEdgeId(edge.id.clone()));
        }
        let dangling = |node_id: &String| InterchangeError::DanglingEdge {
            edge_id: edge.id.clone(),
            node_id: node_id.clone(),
        };
        let source = steps.get(edge.source.as_str()).ok_or_else(|| dangling(&edge.source))?;
        if !steps.contains_key(edge.target.as_str()) {
            return Err(dangling(&edge.target));
        }
        if !source.can_be_source() {
            return Err(InterchangeError::ThankYouSource {
                edge_id: edge.id.clone(),
                node_id: edge.source.clone(),
            });
        }
    }
    Ok(())
}

fn take_sequence<T: DeserializeOwned>(
    root: &mut Value,
    field: &'static str,
) -> Result<Vec<T>, InterchangeError> {
    match root.get_mut(field) {
        Some(value) if value.is_array() => serde_json::from_value(value.take())
            .map_err(|e| InterchangeError::InvalidFormat(format!("{}: {}", field, e))),
        _ => Err(InterchangeError::MissingSequence { field }),
    }
}
