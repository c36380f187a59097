use crate::step::StepType;
use serde::{Deserialize, Serialize};

/// Node type tag understood by the canvas renderer.
pub const FUNNEL_NODE_KIND: &str = "funnelNode";

fn funnel_node_kind() -> String {
    FUNNEL_NODE_KIND.to_string()
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// A point in canvas coordinate space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// The funnel-specific payload of a node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepData {
    #[serde(rename = "type")]
    pub step: StepType,
    pub title: String,
    pub button_label: String,
    #[serde(default, skip_serializing_if = "is_false")]
    pub has_warning: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning_message: Option<String>,
}

/// A step placed on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunnelNode {
    pub id: String,
    #[serde(rename = "type", default = "funnel_node_kind")]
    pub kind: String,
    pub position: Position,
    pub data: StepData,
    #[serde(default, skip_serializing_if = "is_false")]
    pub selected: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub dragging: bool,
}

impl FunnelNode {
    /// Creates a node carrying the step kind's default button label.
    pub fn new(
        id: impl Into<String>,
        step: StepType,
        position: Position,
        title: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            kind: funnel_node_kind(),
            position,
            data: StepData {
                step,
                title: title.into(),
                button_label: step.config().default_button_label.to_string(),
                has_warning: false,
                warning_message: None,
            },
            selected: false,
            dragging: false,
        }
    }

    pub fn step(&self) -> StepType {
        self.data.step
    }

    pub fn title(&self) -> &str {
        &self.data.title
    }
}

/// A directed connection: visitors proceed from `source` to `target`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunnelEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_handle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_handle: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub edge_type: Option<String>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub selected: bool,
}

impl FunnelEdge {
    pub fn new(
        id: impl Into<String>,
        source: impl Into<String>,
        target: impl Into<String>,
        edge_type: Option<String>,
    ) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            target: target.into(),
            source_handle: None,
            target_handle: None,
            edge_type,
            selected: false,
        }
    }

    pub fn links(&self, source: &str, target: &str) -> bool {
        self.source == source && self.target == target
    }
}

/// The full `{ nodes, edges }` state at one instant.
///
/// This is the shape used for the persisted snapshot and for export/import
/// documents alike.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub nodes: Vec<FunnelNode>,
    pub edges: Vec<FunnelEdge>,
}

impl Snapshot {
    pub fn new(nodes: Vec<FunnelNode>, edges: Vec<FunnelEdge>) -> Self {
        Self { nodes, edges }
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }
}
