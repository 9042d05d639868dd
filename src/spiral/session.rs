//! Scene session lifecycle.
//!
//! A session owns everything a running visualization acquires: the render
//! surface, the camera and controls, and its event listeners. `start` builds
//! the scene and acquires them; `dispose` releases all of them, is safe to
//! call more than once, and also runs on drop. Starting again with new
//! folders disposes the previous scene first, so two loops never run at once.

use std::fmt;

use thiserror::Error;
use tracing::debug;

use super::camera::{PerspectiveCamera, Viewport};
use super::controls::OrbitControls;
use super::layout::SpiralInput;
use super::scene::{Frame, Scene};
use crate::traits::{LinkOpener, OpenError, RenderSurface, SurfaceError};

/// Zoom step applied per wheel notch.
const WHEEL_ZOOM: f64 = 1.05;

/// Event kinds a session listens for while running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListenerKind {
    Click,
    Resize,
    Drag,
    Wheel,
}

/// Handle for a registered listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

impl fmt::Display for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "listener#{}", self.0)
    }
}

/// Listeners currently registered by a session.
///
/// Events are only delivered while a listener of their kind is registered,
/// so nothing reaches a disposed scene.
#[derive(Debug, Default)]
pub struct ListenerRegistry {
    next_id: u64,
    active: Vec<(ListenerId, ListenerKind)>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, kind: ListenerKind) -> ListenerId {
        self.next_id += 1;
        let id = ListenerId(self.next_id);
        self.active.push((id, kind));
        id
    }

    /// Remove one listener. Returns false if it was not registered.
    pub fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.active.len();
        self.active.retain(|(active, _)| *active != id);
        self.active.len() != before
    }

    pub fn is_listening(&self, kind: ListenerKind) -> bool {
        self.active.iter().any(|(_, active)| *active == kind)
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// Remove every listener and return how many there were.
    pub fn clear(&mut self) -> usize {
        let count = self.active.len();
        self.active.clear();
        count
    }
}

/// Input delivered to a running session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SceneEvent {
    /// Click at element-relative pixel coordinates.
    Click { x: f64, y: f64 },
    /// The host area is now `width` pixels wide.
    Resize { width: f64 },
    /// Pointer drag by a pixel delta.
    Drag { dx: f64, dy: f64 },
    /// Wheel scroll; positive zooms out.
    Wheel { delta_y: f64 },
}

impl SceneEvent {
    pub fn kind(&self) -> ListenerKind {
        match self {
            SceneEvent::Click { .. } => ListenerKind::Click,
            SceneEvent::Resize { .. } => ListenerKind::Resize,
            SceneEvent::Drag { .. } => ListenerKind::Drag,
            SceneEvent::Wheel { .. } => ListenerKind::Wheel,
        }
    }
}

/// What handling an event did.
#[derive(Debug, Clone, PartialEq)]
pub enum EventOutcome {
    /// No listener for the event (session not running).
    Ignored,
    /// A node was hit and its link opened.
    Opened { folder_id: i64, link: String },
    /// A click that hit nothing.
    Missed,
    /// The viewport changed.
    Resized(Viewport),
    /// The controls queued some motion.
    Moved,
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Surface(#[from] SurfaceError),
    #[error(transparent)]
    Open(#[from] OpenError),
    #[error("Scene session is not running")]
    Inactive,
}

struct ActiveScene {
    scene: Scene,
    camera: PerspectiveCamera,
    controls: OrbitControls,
    viewport: Viewport,
    frames: u64,
}

/// A running (or disposed) spiral visualization.
pub struct SceneSession<S: RenderSurface, O: LinkOpener> {
    surface: S,
    opener: O,
    listeners: ListenerRegistry,
    active: Option<ActiveScene>,
}

impl<S: RenderSurface, O: LinkOpener> SceneSession<S, O> {
    pub fn new(surface: S, opener: O) -> Self {
        Self {
            surface,
            opener,
            listeners: ListenerRegistry::new(),
            active: None,
        }
    }

    /// Build the scene for `folders` and acquire the surface and listeners.
    ///
    /// A running scene is disposed first.
    pub fn start(&mut self, folders: &[SpiralInput], width: f64) -> Result<(), SessionError> {
        if self.is_running() {
            self.dispose();
        }

        let viewport = Viewport::with_width(width);
        self.surface.attach(viewport)?;

        for kind in [
            ListenerKind::Click,
            ListenerKind::Resize,
            ListenerKind::Drag,
            ListenerKind::Wheel,
        ] {
            self.listeners.register(kind);
        }

        let scene = Scene::build(folders);
        debug!(
            nodes = scene.nodes().len(),
            width = viewport.width,
            "Scene session started"
        );

        self.active = Some(ActiveScene {
            scene,
            camera: PerspectiveCamera::new(viewport.aspect()),
            controls: OrbitControls::new(),
            viewport,
            frames: 0,
        });
        Ok(())
    }

    /// Dispose the current scene and start a new one.
    pub fn restart(&mut self, folders: &[SpiralInput], width: f64) -> Result<(), SessionError> {
        self.dispose();
        self.start(folders, width)
    }

    /// Release the surface and every listener. Safe to call repeatedly.
    pub fn dispose(&mut self) {
        let removed = self.listeners.clear();
        let was_running = self.active.take().is_some();
        if self.surface.is_attached() {
            self.surface.detach();
        }
        if was_running {
            debug!(listeners = removed, "Scene session disposed");
        }
    }

    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }

    /// Route an event to its handler if a listener for it is registered.
    pub fn dispatch(&mut self, event: SceneEvent) -> Result<EventOutcome, SessionError> {
        if !self.listeners.is_listening(event.kind()) {
            return Ok(EventOutcome::Ignored);
        }

        match event {
            SceneEvent::Click { x, y } => self.handle_click(x, y),
            SceneEvent::Resize { width } => self.handle_resize(width),
            SceneEvent::Drag { dx, dy } => self.drag(dx, dy),
            SceneEvent::Wheel { delta_y } => self.wheel(delta_y),
        }
    }

    /// Pick the closest node under the pointer and open its link.
    pub fn handle_click(&mut self, x: f64, y: f64) -> Result<EventOutcome, SessionError> {
        let active = self.active.as_ref().ok_or(SessionError::Inactive)?;
        let hit = active
            .scene
            .pick_at(&active.camera, &active.viewport, x, y)
            .and_then(|hit| active.scene.node(hit.index));

        match hit {
            Some(node) => {
                let link = node.link.clone();
                let folder_id = node.folder_id;
                self.opener.open(&link)?;
                debug!(folder_id, link = %link, "Opened spiral node");
                Ok(EventOutcome::Opened { folder_id, link })
            }
            None => Ok(EventOutcome::Missed),
        }
    }

    /// Resize the viewport to `width` at the fixed height.
    pub fn handle_resize(&mut self, width: f64) -> Result<EventOutcome, SessionError> {
        let active = self.active.as_mut().ok_or(SessionError::Inactive)?;
        let viewport = Viewport::with_width(width);
        active.viewport = viewport;
        active.camera.set_aspect(viewport.aspect());
        self.surface.resize(viewport);
        Ok(EventOutcome::Resized(viewport))
    }

    pub fn drag(&mut self, dx: f64, dy: f64) -> Result<EventOutcome, SessionError> {
        let active = self.active.as_mut().ok_or(SessionError::Inactive)?;
        active.controls.drag(dx, dy, active.viewport.height);
        Ok(EventOutcome::Moved)
    }

    pub fn wheel(&mut self, delta_y: f64) -> Result<EventOutcome, SessionError> {
        let active = self.active.as_mut().ok_or(SessionError::Inactive)?;
        if delta_y > 0.0 {
            active.controls.dolly(WHEEL_ZOOM);
        } else if delta_y < 0.0 {
            active.controls.dolly(1.0 / WHEEL_ZOOM);
        }
        Ok(EventOutcome::Moved)
    }

    /// Advance the controls one step and draw. Returns the frame number.
    pub fn frame(&mut self) -> Result<u64, SessionError> {
        let active = self.active.as_mut().ok_or(SessionError::Inactive)?;
        active.controls.update(&mut active.camera);
        active.frames += 1;

        let frame = Frame {
            scene: &active.scene,
            camera: &active.camera,
            viewport: active.viewport,
            number: active.frames,
        };
        self.surface.render(&frame)?;
        Ok(active.frames)
    }

    pub fn scene(&self) -> Option<&Scene> {
        self.active.as_ref().map(|active| &active.scene)
    }

    pub fn camera(&self) -> Option<&PerspectiveCamera> {
        self.active.as_ref().map(|active| &active.camera)
    }

    pub fn viewport(&self) -> Option<Viewport> {
        self.active.as_ref().map(|active| active.viewport)
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn opener(&self) -> &O {
        &self.opener
    }
}

impl<S: RenderSurface, O: LinkOpener> Drop for SceneSession<S, O> {
    fn drop(&mut self) {
        self.dispose();
    }
}
