use crate::config::{DuplicatePolicy, FunnelConfig};
use crate::error::{ConnectionError, InterchangeError, PersistenceError};
use crate::graph::{
    ApplyReport, EdgeChange, FunnelEdge, FunnelNode, GraphStore, NodeChange, NodeSize, Position,
    Reconnection, Snapshot, find_drop_target,
};
use crate::persistence::{self, SnapshotStore};
use crate::step::StepType;
use crate::validation::{self, ValidationIssue, ValidationStatus};
use std::path::{Path, PathBuf};
use uuid::Uuid;

mod example;
pub mod titles;

pub use example::example_funnel;

const CONNECT_FROM_THANK_YOU: &str = "Thank You steps can't have outgoing connections";
const DROP_FROM_THANK_YOU: &str = "Thank You can't connect to another step";

/// What happened when a dragged step was released.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropOutcome {
    /// A connection was created and the dragged step snapped back.
    Connected { edge_id: String },
    /// The step was dropped on itself; nothing changed.
    SameNode,
    /// The two steps were already connected in this direction; nothing changed.
    AlreadyConnected,
    /// The step did not land on another step, or no drag was in progress.
    NoTarget,
}

#[derive(Debug, Clone)]
struct DragStart {
    node_id: String,
    position: Position,
}

/// The single writer of a funnel graph.
///
/// Every operation that changes the graph runs to completion, then the
/// diagnostics are recomputed and the full snapshot is handed to the store.
pub struct FunnelEditor<S: SnapshotStore> {
    graph: GraphStore,
    store: S,
    config: FunnelConfig,
    issues: Vec<ValidationIssue>,
    drag: Option<DragStart>,
}

pub struct FunnelEditorBuilder<S: SnapshotStore> {
    store: S,
    config: FunnelConfig,
}

impl<S: SnapshotStore> FunnelEditorBuilder<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            config: FunnelConfig::default(),
        }
    }

    pub fn with_config(mut self, config: FunnelConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_node_size(mut self, size: NodeSize) -> Self {
        self.config.node_width = size.width;
        self.config.node_height = size.height;
        self
    }

    pub fn with_edge_type(mut self, edge_type: impl Into<String>) -> Self {
        self.config.edge_type = edge_type.into();
        self
    }

    pub fn with_duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.config.duplicate_connections = policy;
        self
    }

    /// Builds the editor, restoring the saved snapshot if there is a usable one.
    pub fn build(self) -> FunnelEditor<S> {
        let graph = match self.store.load() {
            Ok(Some(snapshot)) => GraphStore::from_snapshot(snapshot),
            Ok(None) => GraphStore::new(),
            Err(e) => {
                log::warn!("Ignoring unreadable funnel snapshot: {}", e);
                GraphStore::new()
            }
        };
        let issues = validation::validate(graph.nodes(), graph.edges());
        FunnelEditor {
            graph,
            store: self.store,
            config: self.config,
            issues,
            drag: None,
        }
    }
}

impl<S: SnapshotStore> FunnelEditor<S> {
    pub fn builder(store: S) -> FunnelEditorBuilder<S> {
        FunnelEditorBuilder::new(store)
    }

    /// Nodes with their display warnings freshly derived.
    pub fn nodes(&self) -> Vec<FunnelNode> {
        validation::annotate(self.graph.nodes(), self.graph.edges())
    }

    pub fn edges(&self) -> &[FunnelEdge] {
        self.graph.edges()
    }

    pub fn graph(&self) -> &GraphStore {
        &self.graph
    }

    pub fn issues(&self) -> &[ValidationIssue] {
        &self.issues
    }

    pub fn status(&self) -> ValidationStatus {
        ValidationStatus::from_issues(&self.issues)
    }

    pub fn config(&self) -> &FunnelConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn snapshot(&self) -> Snapshot {
        self.graph.snapshot()
    }

    fn commit(&mut self) {
        self.issues = validation::validate(self.graph.nodes(), self.graph.edges());
        if let Err(e) = self.store.save(&self.graph.snapshot()) {
            log::warn!("Failed to save funnel snapshot: {}", e);
        }
    }

    // =========================================================================
    // Incremental changes from the canvas
    // =========================================================================

    pub fn apply_node_changes(&mut self, changes: &[NodeChange]) -> ApplyReport {
        let report = self.graph.apply_node_changes(changes);
        if report.cascaded > 0 {
            log::debug!(
                "Removed {} connection(s) along with their steps",
                report.cascaded
            );
        }
        if report.changed() {
            self.commit();
        }
        report
    }

    pub fn apply_edge_changes(&mut self, changes: &[EdgeChange]) -> ApplyReport {
        let report = self.graph.apply_edge_changes(changes);
        if report.changed() {
            self.commit();
        }
        report
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Places a new step and returns its id.
    pub fn add_node(&mut self, step: StepType, position: Position) -> String {
        let id = format!("{}-{}", step, Uuid::new_v4().simple());
        let title = titles::default_title(self.graph.nodes(), step);
        log::debug!("Adding {} step '{}' as '{}'", step, title, id);
        self.graph
            .push_node(FunnelNode::new(id.clone(), step, position, title));
        self.commit();
        id
    }

    /// Connects two steps and returns the new connection's id.
    ///
    /// Duplicate pairs are only refused under [`DuplicatePolicy::Reject`].
    pub fn connect(&mut self, source: &str, target: &str) -> Result<String, ConnectionError> {
        self.check_endpoints(source, target, CONNECT_FROM_THANK_YOU)
            .and_then(|_| self.check_duplicate(source, target, None))
            .inspect_err(|e| log::warn!("Refused connection: {}", e))?;

        let edge_id = self.push_edge(source, target);
        self.commit();
        Ok(edge_id)
    }

    /// Connects `source` to `target` after `source` was dropped onto `target`,
    /// moving `source` back to where its drag began.
    pub fn connect_by_overlap(
        &mut self,
        source: &str,
        target: &str,
        revert_position: Position,
    ) -> Result<DropOutcome, ConnectionError> {
        if source == target {
            return Ok(DropOutcome::SameNode);
        }
        self.check_endpoints(source, target, DROP_FROM_THANK_YOU)
            .inspect_err(|e| log::warn!("Refused drop connection: {}", e))?;
        if self.graph.has_connection(source, target) {
            return Ok(DropOutcome::AlreadyConnected);
        }

        let edge_id = self.push_edge(source, target);
        if let Some(node) = self.graph.node_mut(source) {
            node.position = revert_position;
        }
        self.commit();
        Ok(DropOutcome::Connected { edge_id })
    }

    /// Points an existing connection at new endpoints, keeping its id.
    pub fn reconnect(&mut self, change: &Reconnection) -> Result<(), ConnectionError> {
        if self.graph.edge(&change.edge_id).is_none() {
            let err = ConnectionError::EdgeNotFound {
                edge_id: change.edge_id.clone(),
            };
            log::warn!("Refused reconnection: {}", err);
            return Err(err);
        }
        self.check_endpoints(&change.source, &change.target, CONNECT_FROM_THANK_YOU)
            .and_then(|_| {
                self.check_duplicate(&change.source, &change.target, Some(change.edge_id.as_str()))
            })
            .inspect_err(|e| log::warn!("Refused reconnection: {}", e))?;

        if let Some(edge) = self.graph.edge_mut(&change.edge_id) {
            edge.source = change.source.clone();
            edge.target = change.target.clone();
            edge.source_handle = change.source_handle.clone();
            edge.target_handle = change.target_handle.clone();
        }
        self.commit();
        Ok(())
    }

    pub fn clear(&mut self) {
        self.graph.clear();
        self.drag = None;
        log::info!("Cleared funnel");
        self.commit();
    }

    /// Replaces the current funnel with the built-in example, without asking.
    pub fn load_example(&mut self) {
        self.graph.replace(example_funnel());
        self.drag = None;
        log::info!("Loaded example order flow");
        self.commit();
    }

    // =========================================================================
    // Drag-to-connect
    // =========================================================================

    /// Remembers where a step was before the user started dragging it.
    pub fn begin_drag(&mut self, node_id: &str) -> bool {
        self.drag = self.graph.node(node_id).map(|node| DragStart {
            node_id: node.id.clone(),
            position: node.position,
        });
        self.drag.is_some()
    }

    /// Finishes a drag. If the step's centre landed on another step, the two
    /// are connected and the dragged step returns to its starting position.
    pub fn end_drag(&mut self, node_id: &str) -> Result<DropOutcome, ConnectionError> {
        let start = self.drag.take().filter(|start| start.node_id == node_id);
        let Some(dragged) = self.graph.node(node_id) else {
            return Ok(DropOutcome::NoTarget);
        };
        let target = find_drop_target(
            self.graph.nodes(),
            node_id,
            dragged.position,
            self.config.node_size(),
        )
        .map(|node| node.id.clone());

        match (target, start) {
            (Some(target), Some(start)) => self.connect_by_overlap(node_id, &target, start.position),
            _ => Ok(DropOutcome::NoTarget),
        }
    }

    // =========================================================================
    // Import / export
    // =========================================================================

    /// Replaces the funnel with the contents of a document. On any failure the
    /// current funnel is left untouched.
    pub fn import_json(&mut self, json: &str) -> Result<(), InterchangeError> {
        let snapshot = persistence::parse_document(json)
            .inspect_err(|e| log::warn!("Rejected funnel import: {}", e))?;
        log::info!(
            "Imported funnel with {} steps and {} connections",
            snapshot.nodes.len(),
            snapshot.edges.len()
        );
        self.graph.replace(snapshot);
        self.drag = None;
        self.commit();
        Ok(())
    }

    pub fn export_json(&self) -> Result<String, PersistenceError> {
        persistence::export_document(&self.graph.snapshot())
    }

    /// Writes `funnel.json` into `dir`.
    pub fn export_to_dir(&self, dir: impl AsRef<Path>) -> Result<PathBuf, PersistenceError> {
        let path = persistence::write_export(dir, &self.graph.snapshot())?;
        log::info!("Exported funnel to {:?}", path);
        Ok(path)
    }

    // =========================================================================
    // Rules
    // =========================================================================

    fn check_endpoints(
        &self,
        source: &str,
        target: &str,
        thank_you_message: &str,
    ) -> Result<(), ConnectionError> {
        let source_node =
            self.graph
                .node(source)
                .ok_or_else(|| ConnectionError::NodeNotFound {
                    node_id: source.to_string(),
                })?;
        if !self.graph.contains_node(target) {
            return Err(ConnectionError::NodeNotFound {
                node_id: target.to_string(),
            });
        }
        if !source_node.step().can_be_source() {
            return Err(ConnectionError::thank_you_source(source, thank_you_message));
        }
        if source == target {
            return Err(ConnectionError::SelfConnection {
                node_id: source.to_string(),
            });
        }
        Ok(())
    }

    fn check_duplicate(
        &self,
        source: &str,
        target: &str,
        ignore_edge: Option<&str>,
    ) -> Result<(), ConnectionError> {
        if self.config.duplicate_connections == DuplicatePolicy::Allow {
            return Ok(());
        }
        let exists = self
            .graph
            .edges()
            .iter()
            .any(|e| e.links(source, target) && Some(e.id.as_str()) != ignore_edge);
        if exists {
            Err(ConnectionError::DuplicateConnection {
                source_id: source.to_string(),
                target_id: target.to_string(),
            })
        } else {
            Ok(())
        }
    }

    fn push_edge(&mut self, source: &str, target: &str) -> String {
        let edge_id = format!("e-{}", Uuid::new_v4().simple());
        log::debug!("Connecting '{}' -> '{}' as '{}'", source, target, edge_id);
        self.graph.push_edge(FunnelEdge::new(
            edge_id.clone(),
            source,
            target,
            Some(self.config.edge_type.clone()),
        ));
        edge_id
    }
}
