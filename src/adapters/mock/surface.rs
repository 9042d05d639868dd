//! Counting render surface for lifecycle tests.

use std::sync::{Arc, Mutex};

use crate::spiral::{Frame, Viewport};
use crate::traits::{RenderSurface, SurfaceError};

#[derive(Debug, Default)]
struct SurfaceLog {
    attached: bool,
    attaches: usize,
    detaches: usize,
    renders: usize,
    viewport: Option<Viewport>,
    last_frame_nodes: usize,
}

/// Surface that only counts what happens to it.
///
/// Clones share the counters.
#[derive(Debug, Clone, Default)]
pub struct MockSurface {
    log: Arc<Mutex<SurfaceLog>>,
}

impl MockSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attach_count(&self) -> usize {
        self.log.lock().unwrap().attaches
    }

    pub fn detach_count(&self) -> usize {
        self.log.lock().unwrap().detaches
    }

    pub fn render_count(&self) -> usize {
        self.log.lock().unwrap().renders
    }

    pub fn last_viewport(&self) -> Option<Viewport> {
        self.log.lock().unwrap().viewport
    }

    /// Node count of the last rendered frame.
    pub fn last_frame_nodes(&self) -> usize {
        self.log.lock().unwrap().last_frame_nodes
    }
}

impl RenderSurface for MockSurface {
    fn attach(&mut self, viewport: Viewport) -> Result<(), SurfaceError> {
        let mut log = self.log.lock().unwrap();
        if log.attached {
            return Err(SurfaceError::AlreadyAttached);
        }
        log.attached = true;
        log.attaches += 1;
        log.viewport = Some(viewport);
        Ok(())
    }

    fn resize(&mut self, viewport: Viewport) {
        self.log.lock().unwrap().viewport = Some(viewport);
    }

    fn render(&mut self, frame: &Frame<'_>) -> Result<(), SurfaceError> {
        let mut log = self.log.lock().unwrap();
        if !log.attached {
            return Err(SurfaceError::Detached);
        }
        log.renders += 1;
        log.last_frame_nodes = frame.scene.nodes().len();
        Ok(())
    }

    fn detach(&mut self) {
        let mut log = self.log.lock().unwrap();
        if log.attached {
            log.attached = false;
            log.detaches += 1;
        }
    }

    fn is_attached(&self) -> bool {
        self.log.lock().unwrap().attached
    }
}
