//! Perspective camera and viewport mapping.

use super::geometry::{Ray, Vec3};

/// The visualization area is always this many pixels tall.
pub const VIEWPORT_HEIGHT: f64 = 600.0;

/// Width used when the host cannot report one.
pub const DEFAULT_VIEWPORT_WIDTH: f64 = 1136.0;

/// Pixel size of the visualization area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    /// A viewport of the given width at the fixed height. Non-positive or
    /// non-finite widths fall back to the default.
    pub fn with_width(width: f64) -> Self {
        let width = if width.is_finite() && width > 0.0 {
            width
        } else {
            DEFAULT_VIEWPORT_WIDTH
        };
        Self {
            width,
            height: VIEWPORT_HEIGHT,
        }
    }

    pub fn aspect(&self) -> f64 {
        self.width / self.height
    }

    /// Element-relative pixel coordinates to normalized device coordinates
    /// (both axes in [-1, 1], +Y up).
    pub fn to_ndc(&self, x: f64, y: f64) -> (f64, f64) {
        ((x / self.width) * 2.0 - 1.0, -(y / self.height) * 2.0 + 1.0)
    }

    /// Normalized device coordinates back to element pixels.
    pub fn from_ndc(&self, ndc_x: f64, ndc_y: f64) -> (f64, f64) {
        (
            (ndc_x + 1.0) / 2.0 * self.width,
            (1.0 - ndc_y) / 2.0 * self.height,
        )
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::with_width(DEFAULT_VIEWPORT_WIDTH)
    }
}

/// A point projected onto the screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub ndc_x: f64,
    pub ndc_y: f64,
    /// Distance along the viewing direction.
    pub depth: f64,
}

/// A pinhole camera looking at `target`.
#[derive(Debug, Clone, PartialEq)]
pub struct PerspectiveCamera {
    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    /// Vertical field of view in degrees.
    pub fov: f64,
    pub aspect: f64,
    pub near: f64,
    pub far: f64,
}

impl PerspectiveCamera {
    /// The initial camera: 75° field of view, 0.1..1000 clip range, placed at
    /// z = 10 and looking at the origin.
    pub fn new(aspect: f64) -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 10.0),
            target: Vec3::ZERO,
            up: Vec3::UP,
            fov: 75.0,
            aspect,
            near: 0.1,
            far: 1000.0,
        }
    }

    pub fn set_aspect(&mut self, aspect: f64) {
        if aspect.is_finite() && aspect > 0.0 {
            self.aspect = aspect;
        }
    }

    pub fn look_at(&mut self, target: Vec3) {
        self.target = target;
    }

    /// Forward, right and up unit vectors.
    pub fn basis(&self) -> (Vec3, Vec3, Vec3) {
        let forward = (self.target - self.position).normalize();
        let mut right = forward.cross(self.up).normalize();
        if right == Vec3::ZERO {
            // Looking straight along `up`; any perpendicular will do.
            right = forward.cross(Vec3::new(0.0, 0.0, -1.0)).normalize();
        }
        let up = right.cross(forward).normalize();
        (forward, right, up)
    }

    fn half_height(&self) -> f64 {
        (self.fov.to_radians() / 2.0).tan()
    }

    /// Ray from the camera through a point in normalized device coordinates.
    pub fn ray_from_ndc(&self, ndc_x: f64, ndc_y: f64) -> Ray {
        let (forward, right, up) = self.basis();
        let half_h = self.half_height();
        let half_w = half_h * self.aspect;
        let direction = forward + right * (ndc_x * half_w) + up * (ndc_y * half_h);
        Ray::new(self.position, direction)
    }

    /// Project a scene point. `None` when the point is outside the clip range.
    pub fn project(&self, point: Vec3) -> Option<Projection> {
        let (forward, right, up) = self.basis();
        let relative = point - self.position;
        let depth = relative.dot(forward);
        if depth < self.near || depth > self.far {
            return None;
        }

        let half_h = self.half_height();
        let half_w = half_h * self.aspect;
        Some(Projection {
            ndc_x: relative.dot(right) / (depth * half_w),
            ndc_y: relative.dot(up) / (depth * half_h),
            depth,
        })
    }

    /// Apparent radius in pixels of a sphere at `depth`.
    pub fn projected_radius(&self, radius: f64, depth: f64, viewport: &Viewport) -> f64 {
        if depth <= 0.0 {
            return 0.0;
        }
        radius / (depth * self.half_height()) * (viewport.height / 2.0)
    }
}
