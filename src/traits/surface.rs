//! Render surface trait abstraction.
//!
//! A scene session draws into a surface it acquires on start and releases on
//! dispose. The HTTP layer uses an SVG surface; tests use a counting mock.

use crate::spiral::{Frame, Viewport};

/// Errors raised by a render surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceError {
    /// The surface is not attached to a session.
    Detached,
    /// The surface is already attached to another session.
    AlreadyAttached,
    /// Drawing failed.
    RenderFailed(String),
}

impl std::fmt::Display for SurfaceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SurfaceError::Detached => write!(f, "Render surface is not attached"),
            SurfaceError::AlreadyAttached => write!(f, "Render surface is already attached"),
            SurfaceError::RenderFailed(msg) => write!(f, "Render failed: {}", msg),
        }
    }
}

impl std::error::Error for SurfaceError {}

/// A drawing target owned by one scene session at a time.
pub trait RenderSurface: Send {
    /// Acquire the surface at the given size.
    fn attach(&mut self, viewport: Viewport) -> Result<(), SurfaceError>;

    /// The host area changed size.
    fn resize(&mut self, viewport: Viewport);

    /// Draw one frame.
    fn render(&mut self, frame: &Frame<'_>) -> Result<(), SurfaceError>;

    /// Release the surface. Must be safe to call when already detached.
    fn detach(&mut self);

    /// Whether the surface is currently attached.
    fn is_attached(&self) -> bool;
}
