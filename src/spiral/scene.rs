//! The renderable spiral scene.

use super::camera::{PerspectiveCamera, Viewport};
use super::layout::{SpiralInput, SpiralLayout, SpiralNode, NODE_RADIUS};
use super::picking::{pick, Hit};

/// Node colour (bright green).
pub const NODE_COLOR: &str = "#00ff00";

/// Line colour; drawn at half opacity.
pub const LINE_COLOR: &str = "#00ff00";
pub const LINE_OPACITY: f64 = 0.5;

/// Background behind the spiral.
pub const BACKGROUND_COLOR: &str = "#1e1e1e";

/// Spiral nodes plus the lines between them.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub layout: SpiralLayout,
    pub node_radius: f64,
}

impl Scene {
    pub fn build(folders: &[SpiralInput]) -> Self {
        Self {
            layout: SpiralLayout::build(folders),
            node_radius: NODE_RADIUS,
        }
    }

    pub fn nodes(&self) -> &[SpiralNode] {
        &self.layout.nodes
    }

    pub fn node(&self, index: usize) -> Option<&SpiralNode> {
        self.layout.nodes.get(index)
    }

    pub fn is_empty(&self) -> bool {
        self.layout.is_empty()
    }

    /// Closest node under an element-relative pixel position.
    pub fn pick_at(
        &self,
        camera: &PerspectiveCamera,
        viewport: &Viewport,
        x: f64,
        y: f64,
    ) -> Option<Hit> {
        let (ndc_x, ndc_y) = viewport.to_ndc(x, y);
        let ray = camera.ray_from_ndc(ndc_x, ndc_y);
        pick(&ray, self.nodes(), self.node_radius)
    }
}

/// Everything a surface needs to draw one frame.
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    pub scene: &'a Scene,
    pub camera: &'a PerspectiveCamera,
    pub viewport: Viewport,
    /// Frames drawn so far in this session, starting at 1.
    pub number: u64,
}
