use super::changes::{ApplyReport, EdgeChange, NodeChange};
use super::model::{FunnelEdge, FunnelNode, Snapshot};
use ahash::AHashSet;

/// Owns the current nodes and connections of a funnel.
///
/// The store only applies changes; the rules about which connections are legal
/// live in [`crate::editor::FunnelEditor`]. The one invariant enforced here is
/// that removing a node also removes every connection touching it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GraphStore {
    nodes: Vec<FunnelNode>,
    edges: Vec<FunnelEdge>,
}

impl GraphStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        Self {
            nodes: snapshot.nodes,
            edges: snapshot.edges,
        }
    }

    pub fn nodes(&self) -> &[FunnelNode] {
        &self.nodes
    }

    pub fn edges(&self) -> &[FunnelEdge] {
        &self.edges
    }

    pub fn node(&self, id: &str) -> Option<&FunnelNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn edge(&self, id: &str) -> Option<&FunnelEdge> {
        self.edges.iter().find(|e| e.id == id)
    }

    pub fn contains_node(&self, id: &str) -> bool {
        self.node(id).is_some()
    }

    pub fn has_connection(&self, source: &str, target: &str) -> bool {
        self.edges.iter().any(|e| e.links(source, target))
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::new(self.nodes.clone(), self.edges.clone())
    }

    /// Replaces both node and connection sets wholesale.
    pub fn replace(&mut self, snapshot: Snapshot) {
        self.nodes = snapshot.nodes;
        self.edges = snapshot.edges;
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.edges.clear();
    }

    pub(crate) fn push_node(&mut self, node: FunnelNode) {
        self.nodes.push(node);
    }

    pub(crate) fn push_edge(&mut self, edge: FunnelEdge) {
        self.edges.push(edge);
    }

    pub(crate) fn node_mut(&mut self, id: &str) -> Option<&mut FunnelNode> {
        self.nodes.iter_mut().find(|n| n.id == id)
    }

    pub(crate) fn edge_mut(&mut self, id: &str) -> Option<&mut FunnelEdge> {
        self.edges.iter_mut().find(|e| e.id == id)
    }

    /// Applies a batch of node changes.
    ///
    /// Each change is independent: a change naming a node that does not exist
    /// is skipped and the rest of the batch still applies. Connections that
    /// reference a removed node are dropped along with it.
    pub fn apply_node_changes(&mut self, changes: &[NodeChange]) -> ApplyReport {
        let mut report = ApplyReport::default();
        let mut removed: AHashSet<String> = AHashSet::new();

        for change in changes {
            let Some(index) = self.nodes.iter().position(|n| n.id == change.id()) else {
                log::debug!("Skipping change for unknown node '{}'", change.id());
                report.skipped += 1;
                continue;
            };

            match change {
                NodeChange::Position {
                    position, dragging, ..
                } => {
                    let node = &mut self.nodes[index];
                    if let Some(position) = position {
                        node.position = *position;
                    }
                    if let Some(dragging) = dragging {
                        node.dragging = *dragging;
                    }
                }
                NodeChange::Select { selected, .. } => {
                    self.nodes[index].selected = *selected;
                }
                NodeChange::Remove { id } => {
                    self.nodes.remove(index);
                    removed.insert(id.clone());
                }
            }
            report.applied += 1;
        }

        if !removed.is_empty() {
            let before = self.edges.len();
            self.edges
                .retain(|e| !removed.contains(&e.source) && !removed.contains(&e.target));
            report.cascaded = before - self.edges.len();
        }

        report
    }

    /// Applies a batch of connection changes with the same skip semantics as
    /// [`GraphStore::apply_node_changes`].
    pub fn apply_edge_changes(&mut self, changes: &[EdgeChange]) -> ApplyReport {
        let mut report = ApplyReport::default();

        for change in changes {
            let Some(index) = self.edges.iter().position(|e| e.id == change.id()) else {
                log::debug!("Skipping change for unknown connection '{}'", change.id());
                report.skipped += 1;
                continue;
            };

            match change {
                EdgeChange::Select { selected, .. } => self.edges[index].selected = *selected,
                EdgeChange::Remove { .. } => {
                    self.edges.remove(index);
                }
            }
            report.applied += 1;
        }

        report
    }
}
