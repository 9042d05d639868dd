//! Ray picking against the spiral nodes.

use super::geometry::Ray;
use super::layout::SpiralNode;

/// A node hit by a pick ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    /// Index into the node list.
    pub index: usize,
    /// Distance from the ray origin.
    pub distance: f64,
}

/// The closest node intersected by `ray`, if any.
pub fn pick(ray: &Ray, nodes: &[SpiralNode], radius: f64) -> Option<Hit> {
    nodes
        .iter()
        .enumerate()
        .filter_map(|(index, node)| {
            ray.intersect_sphere(node.position, radius)
                .map(|distance| Hit { index, distance })
        })
        .min_by(|a, b| a.distance.total_cmp(&b.distance))
}
