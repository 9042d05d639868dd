//! Golden-angle spiral layout.
//!
//! Node `i` sits at angle `i * golden_angle`, radius `sqrt(i + 1) * 0.5` and
//! height `i * 0.1`, which spreads any number of folders evenly around a
//! rising spiral without overlaps near the center.

use serde::Serialize;

use super::geometry::Vec3;
use crate::models::Folder;

/// The golden ratio as used for the spiral.
pub const GOLDEN_RATIO: f64 = 1.618_033_988_75;

/// Radial distance factor applied to `sqrt(index + 1)`.
pub const RADIUS_SCALE: f64 = 0.5;

/// Height gained per node.
pub const Z_STEP: f64 = 0.1;

/// Sphere radius of every node.
pub const NODE_RADIUS: f64 = 0.2;

/// `2π(1 − 1/φ)` radians, roughly 137.5°.
pub fn golden_angle() -> f64 {
    std::f64::consts::PI * 2.0 * (1.0 - 1.0 / GOLDEN_RATIO)
}

/// The parts of a folder the spiral needs.
#[derive(Debug, Clone, PartialEq)]
pub struct SpiralInput {
    pub id: i64,
    pub name: String,
    pub url: Option<String>,
}

impl From<&Folder> for SpiralInput {
    fn from(folder: &Folder) -> Self {
        Self {
            id: folder.id,
            name: folder.name.clone(),
            url: folder.url.clone(),
        }
    }
}

/// One placed node.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpiralNode {
    pub index: usize,
    pub folder_id: i64,
    pub name: String,
    pub position: Vec3,
    /// Destination opened when the node is picked.
    pub link: String,
}

/// A line between two consecutive nodes, by index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Segment {
    pub from: usize,
    pub to: usize,
}

/// The complete layout, as served by the JSON endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpiralLayout {
    pub nodes: Vec<SpiralNode>,
    pub segments: Vec<Segment>,
}

impl SpiralLayout {
    pub fn build(folders: &[SpiralInput]) -> Self {
        let nodes = layout(folders);
        let segments = segments(&nodes);
        Self { nodes, segments }
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Position of the node at `index`.
pub fn position(index: usize) -> Vec3 {
    let i = index as f64;
    let angle = i * golden_angle();
    let radius = (i + 1.0).sqrt() * RADIUS_SCALE;
    Vec3::new(angle.cos() * radius, angle.sin() * radius, i * Z_STEP)
}

/// Link opened for a folder: its own url, or a synthesized per-id link.
pub fn node_link(folder: &SpiralInput) -> String {
    match folder.url.as_deref() {
        Some(url) if !url.is_empty() => url.to_string(),
        _ => format!("https://example.com/folder/{}", folder.id),
    }
}

/// Place every folder in input order.
pub fn layout(folders: &[SpiralInput]) -> Vec<SpiralNode> {
    folders
        .iter()
        .enumerate()
        .map(|(index, folder)| SpiralNode {
            index,
            folder_id: folder.id,
            name: folder.name.clone(),
            position: position(index),
            link: node_link(folder),
        })
        .collect()
}

/// Segments joining each node to the next one.
pub fn segments(nodes: &[SpiralNode]) -> Vec<Segment> {
    nodes
        .windows(2)
        .map(|pair| Segment {
            from: pair[0].index,
            to: pair[1].index,
        })
        .collect()
}
