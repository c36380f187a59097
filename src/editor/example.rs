use crate::config::DEFAULT_EDGE_TYPE;
use crate::graph::{FunnelEdge, FunnelNode, Position, Snapshot};
use crate::step::StepType;

/// A linear sales -> checkout -> upsell -> thank-you funnel used as a
/// starting point on an empty canvas.
pub fn example_funnel() -> Snapshot {
    let steps = [
        ("sales-1", StepType::Sales, "Sales Page"),
        ("order-1", StepType::Order, "Checkout"),
        ("upsell-1", StepType::Upsell, "Upsell 1"),
        ("thankyou-1", StepType::ThankYou, "Thank You"),
    ];
    let nodes = steps
        .iter()
        .zip([0.0, 100.0, 200.0, 300.0])
        .map(|(&(id, step, title), y)| FunnelNode::new(id, step, Position::new(80.0, y), title))
        .collect();

    let edge = |id: &str, source: &str, target: &str| {
        FunnelEdge::new(id, source, target, Some(DEFAULT_EDGE_TYPE.to_string()))
    };
    let edges = vec![
        edge("e-sales-order", "sales-1", "order-1"),
        edge("e-order-upsell", "order-1", "upsell-1"),
        edge("e-upsell-thankyou", "upsell-1", "thankyou-1"),
    ];

    Snapshot::new(nodes, edges)
}
