//! Pure geometry behind "drop a step onto another step to connect them".
//!
//! Kept free of any gesture handling so the overlap rule can be exercised
//! directly with positions.

use super::model::{FunnelNode, Position};
use serde::{Deserialize, Serialize};

pub const DEFAULT_NODE_WIDTH: f64 = 200.0;
pub const DEFAULT_NODE_HEIGHT: f64 = 95.0;

/// The fixed rendered size of every step node.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NodeSize {
    pub width: f64,
    pub height: f64,
}

impl Default for NodeSize {
    fn default() -> Self {
        Self {
            width: DEFAULT_NODE_WIDTH,
            height: DEFAULT_NODE_HEIGHT,
        }
    }
}

impl NodeSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Centre of a node whose top-left corner sits at `origin`.
    pub fn center(&self, origin: Position) -> Position {
        Position::new(origin.x + self.width / 2.0, origin.y + self.height / 2.0)
    }

    /// Inclusive point-in-rectangle test against a node at `origin`.
    pub fn contains(&self, origin: Position, point: Position) -> bool {
        point.x >= origin.x
            && point.x <= origin.x + self.width
            && point.y >= origin.y
            && point.y <= origin.y + self.height
    }
}

/// Finds the first node (other than the dragged one) whose bounding box
/// contains the centre of the dragged node.
pub fn find_drop_target<'a>(
    nodes: &'a [FunnelNode],
    dragged_id: &str,
    dragged_position: Position,
    size: NodeSize,
) -> Option<&'a FunnelNode> {
    let center = size.center(dragged_position);
    nodes
        .iter()
        .find(|node| node.id != dragged_id && size.contains(node.position, center))
}
