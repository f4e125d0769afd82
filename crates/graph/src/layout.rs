use crate::config::LayoutConfig;
use crate::ego::Focus;
use crate::types::{GraphSnapshot, NodeKey};
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodePosition {
    pub key: NodeKey,
    #[serde(flatten)]
    pub point: Point,
}

/// Circular placement.
///
/// Entity focus puts the focal node at the center and the rest on the circle;
/// contact focus uses the whole circle. Angles follow snapshot node order.
pub fn circular_layout(
    snapshot: &GraphSnapshot,
    focus: &Focus,
    config: &LayoutConfig,
) -> Vec<NodePosition> {
    let center = Point {
        x: config.width / 2.0,
        y: config.height / 2.0,
    };
    let radius = config.radius();

    let focal = focus.focal_key();
    let ring: Vec<&NodeKey> = snapshot
        .nodes
        .iter()
        .map(|node| node.key())
        .filter(|key| Some(*key) != focal)
        .collect();

    let mut positions = Vec::with_capacity(snapshot.nodes.len());
    if let Some(focal) = focal.filter(|key| snapshot.contains_node(key)) {
        positions.push(NodePosition {
            key: focal.clone(),
            point: center,
        });
    }

    let total = ring.len() as f64;
    for (i, key) in ring.into_iter().enumerate() {
        let angle = i as f64 / total * TAU;
        positions.push(NodePosition {
            key: key.clone(),
            point: Point {
                x: center.x + radius * angle.cos(),
                y: center.y + radius * angle.sin(),
            },
        });
    }

    positions
}
