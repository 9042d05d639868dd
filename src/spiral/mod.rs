//! Golden-angle spiral visualization of folders.
//!
//! - [`layout`] places folders on the spiral and derives their links
//! - [`camera`] and [`controls`] define the view and its damped orbit
//! - [`picking`] finds the closest node under a pointer ray
//! - [`session`] owns a running scene and its resources
//! - [`svg`] draws frames as clickable SVG

pub mod camera;
pub mod controls;
pub mod geometry;
pub mod layout;
pub mod picking;
pub mod scene;
pub mod session;
pub mod svg;

pub use camera::{PerspectiveCamera, Projection, Viewport, DEFAULT_VIEWPORT_WIDTH, VIEWPORT_HEIGHT};
pub use controls::{OrbitControls, DAMPING_FACTOR};
pub use geometry::{Ray, Vec3};
pub use layout::{
    golden_angle, layout, node_link, segments, Segment, SpiralInput, SpiralLayout, SpiralNode,
    GOLDEN_RATIO, NODE_RADIUS,
};
pub use picking::{pick, Hit};
pub use scene::{Frame, Scene};
pub use session::{
    EventOutcome, ListenerKind, ListenerRegistry, SceneEvent, SceneSession, SessionError,
};
pub use svg::{render_svg, SvgSurface};

use crate::models::Folder;

/// Folder records reduced to what the spiral needs, in display order.
pub fn inputs_from_folders(folders: &[Folder]) -> Vec<SpiralInput> {
    folders.iter().map(SpiralInput::from).collect()
}
