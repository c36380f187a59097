//! Common test utilities for building funnels and editors.
use funnelgraph::prelude::*;

/// Creates an editor backed by an empty in-memory store.
#[allow(dead_code)]
pub fn memory_editor() -> FunnelEditor<MemorySnapshotStore> {
    FunnelEditor::builder(MemorySnapshotStore::new()).build()
}

/// Creates an editor whose store already holds `snapshot`.
#[allow(dead_code)]
pub fn editor_with(snapshot: &Snapshot) -> FunnelEditor<MemorySnapshotStore> {
    let document = serde_json::to_string(snapshot).expect("snapshot serializes");
    FunnelEditor::builder(MemorySnapshotStore::with_document(document)).build()
}

#[allow(dead_code)]
pub fn node(id: &str, step: StepType, x: f64, y: f64) -> FunnelNode {
    FunnelNode::new(id, step, Position::new(x, y), step.label())
}

#[allow(dead_code)]
pub fn edge(id: &str, source: &str, target: &str) -> FunnelEdge {
    FunnelEdge::new(id, source, target, Some("smoothstep".to_string()))
}

/// A sales page with two downstream steps and nothing connected yet.
///
/// Layout: `sales` at (0, 0), `order` at (0, 300), `thanks` at (0, 600).
#[allow(dead_code)]
pub fn create_unconnected_funnel() -> Snapshot {
    Snapshot::new(
        vec![
            node("sales", StepType::Sales, 0.0, 0.0),
            node("order", StepType::Order, 0.0, 300.0),
            node("thanks", StepType::ThankYou, 0.0, 600.0),
        ],
        vec![],
    )
}

/// The same three steps joined sales -> order -> thanks.
#[allow(dead_code)]
pub fn create_linear_funnel() -> Snapshot {
    let mut snapshot = create_unconnected_funnel();
    snapshot.edges = vec![
        edge("e-sales-order", "sales", "order"),
        edge("e-order-thanks", "order", "thanks"),
    ];
    snapshot
}

#[allow(dead_code)]
pub fn messages(issues: &[ValidationIssue]) -> Vec<String> {
    let mut messages: Vec<String> = issues.iter().map(|i| i.message.clone()).collect();
    messages.sort();
    messages
}

/// A hand-written document in the canvas export format, with extra fields.
#[allow(dead_code)]
pub const CANVAS_DOCUMENT_JSON: &str = r#"
{
  "nodes": [
    {
      "id": "sales-1",
      "type": "funnelNode",
      "position": { "x": 80, "y": 0 },
      "measured": { "width": 200, "height": 95 },
      "data": { "type": "sales", "title": "Sales Page", "buttonLabel": "Buy Now" }
    },
    {
      "id": "upsell-7",
      "type": "funnelNode",
      "position": { "x": 80, "y": 150.5 },
      "selected": true,
      "data": {
        "type": "upsell",
        "title": "Upsell 7",
        "buttonLabel": "Yes, add to order",
        "hasWarning": false
      }
    }
  ],
  "edges": [
    { "id": "e1", "source": "sales-1", "target": "upsell-7", "type": "smoothstep", "animated": true }
  ],
  "viewport": { "x": 0, "y": 0, "zoom": 1 }
}
"#;
