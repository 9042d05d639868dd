//! Orbit controls with inertial damping.
//!
//! Drags accumulate a pending rotation; every [`OrbitControls::update`]
//! applies `damping_factor` of what is pending and keeps the rest, so the
//! camera eases to a stop after the pointer is released.

use std::f64::consts::PI;

use super::camera::PerspectiveCamera;
use super::geometry::Vec3;

/// Fraction of the pending motion applied per frame.
pub const DAMPING_FACTOR: f64 = 0.05;

/// Pending motion below this is considered settled.
const SETTLE_EPSILON: f64 = 1e-6;

/// Keeps the polar angle away from the poles.
const POLAR_EPSILON: f64 = 1e-6;

/// Camera offset from the target in spherical coordinates (Y up).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spherical {
    pub radius: f64,
    /// Polar angle from +Y.
    pub phi: f64,
    /// Azimuth around Y, measured from +Z toward +X.
    pub theta: f64,
}

impl Spherical {
    pub fn from_offset(offset: Vec3) -> Self {
        let radius = offset.length();
        if radius == 0.0 {
            return Self {
                radius: 0.0,
                phi: 0.0,
                theta: 0.0,
            };
        }
        Self {
            radius,
            phi: (offset.y / radius).clamp(-1.0, 1.0).acos(),
            theta: offset.x.atan2(offset.z),
        }
    }

    pub fn to_offset(self) -> Vec3 {
        let sin_phi = self.phi.sin();
        Vec3::new(
            self.radius * sin_phi * self.theta.sin(),
            self.radius * self.phi.cos(),
            self.radius * sin_phi * self.theta.cos(),
        )
    }
}

/// Orbit the camera around a target point.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitControls {
    pub target: Vec3,
    pub damping_factor: f64,
    pub rotate_speed: f64,
    pub min_distance: f64,
    pub max_distance: f64,
    pending_theta: f64,
    pending_phi: f64,
    pending_scale: f64,
}

impl Default for OrbitControls {
    fn default() -> Self {
        Self::new()
    }
}

impl OrbitControls {
    pub fn new() -> Self {
        Self {
            target: Vec3::ZERO,
            damping_factor: DAMPING_FACTOR,
            rotate_speed: 1.0,
            min_distance: 0.5,
            max_distance: 500.0,
            pending_theta: 0.0,
            pending_phi: 0.0,
            pending_scale: 1.0,
        }
    }

    /// Queue a rotation from a pointer drag of `(dx, dy)` pixels over a
    /// viewport `viewport_height` pixels tall.
    pub fn drag(&mut self, dx: f64, dy: f64, viewport_height: f64) {
        if viewport_height <= 0.0 {
            return;
        }
        let per_pixel = 2.0 * PI * self.rotate_speed / viewport_height;
        self.pending_theta -= dx * per_pixel;
        self.pending_phi -= dy * per_pixel;
    }

    /// Queue a zoom. Factors above 1 move the camera away.
    pub fn dolly(&mut self, factor: f64) {
        if factor.is_finite() && factor > 0.0 {
            self.pending_scale *= factor;
        }
    }

    /// True when no motion is pending.
    pub fn is_settled(&self) -> bool {
        self.pending_theta.abs() < SETTLE_EPSILON
            && self.pending_phi.abs() < SETTLE_EPSILON
            && (self.pending_scale - 1.0).abs() < SETTLE_EPSILON
    }

    /// Advance one frame. Returns true if the camera moved.
    pub fn update(&mut self, camera: &mut PerspectiveCamera) -> bool {
        let before = camera.position;
        let mut spherical = Spherical::from_offset(camera.position - self.target);

        spherical.theta += self.pending_theta * self.damping_factor;
        spherical.phi += self.pending_phi * self.damping_factor;
        spherical.phi = spherical.phi.clamp(POLAR_EPSILON, PI - POLAR_EPSILON);
        spherical.radius =
            (spherical.radius * self.pending_scale).clamp(self.min_distance, self.max_distance);

        camera.position = self.target + spherical.to_offset();
        camera.look_at(self.target);

        let keep = 1.0 - self.damping_factor;
        self.pending_theta *= keep;
        self.pending_phi *= keep;
        self.pending_scale = 1.0;

        if self.pending_theta.abs() < SETTLE_EPSILON {
            self.pending_theta = 0.0;
        }
        if self.pending_phi.abs() < SETTLE_EPSILON {
            self.pending_phi = 0.0;
        }

        camera.position.distance_to(before) > 1e-12
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_spherical_roundtrip_of_initial_camera() {
        let s = Spherical::from_offset(Vec3::new(0.0, 0.0, 10.0));
        assert!((s.radius - 10.0).abs() < EPS);
        assert!((s.phi - PI / 2.0).abs() < EPS);
        assert!(s.theta.abs() < EPS);

        let back = s.to_offset();
        assert!(back.distance_to(Vec3::new(0.0, 0.0, 10.0)) < EPS);
    }

    #[test]
    fn test_idle_update_does_not_move() {
        let mut camera = PerspectiveCamera::new(1.0);
        let mut controls = OrbitControls::new();
        assert!(controls.is_settled());
        assert!(!controls.update(&mut camera));
    }

    #[test]
    fn test_drag_eases_with_damping() {
        let mut camera = PerspectiveCamera::new(1.0);
        let mut controls = OrbitControls::new();
        controls.drag(100.0, 0.0, 600.0);

        let pending = -100.0 * 2.0 * PI / 600.0;
        assert!(controls.update(&mut camera));
        let s = Spherical::from_offset(camera.position);
        assert!((s.theta - pending * DAMPING_FACTOR).abs() < 1e-9);

        // The remaining motion keeps applying after the drag ends.
        assert!(!controls.is_settled());
        assert!(controls.update(&mut camera));
        let s = Spherical::from_offset(camera.position);
        let expected = pending * DAMPING_FACTOR * (1.0 + (1.0 - DAMPING_FACTOR));
        assert!((s.theta - expected).abs() < 1e-9);
    }

    #[test]
    fn test_motion_eventually_settles() {
        let mut camera = PerspectiveCamera::new(1.0);
        let mut controls = OrbitControls::new();
        controls.drag(50.0, 20.0, 600.0);
        for _ in 0..1000 {
            controls.update(&mut camera);
        }
        assert!(controls.is_settled());
        // Distance to target is preserved by rotation.
        assert!((camera.position.length() - 10.0).abs() < 1e-6);
    }

    #[test]
    fn test_dolly_changes_distance() {
        let mut camera = PerspectiveCamera::new(1.0);
        let mut controls = OrbitControls::new();
        controls.dolly(0.5);
        controls.update(&mut camera);
        assert!((camera.position.length() - 5.0).abs() < 1e-9);
        assert!(controls.is_settled());
    }

    #[test]
    fn test_polar_angle_is_clamped() {
        let mut camera = PerspectiveCamera::new(1.0);
        let mut controls = OrbitControls::new();
        controls.drag(0.0, 100_000.0, 600.0);
        controls.update(&mut camera);
        let s = Spherical::from_offset(camera.position);
        assert!(s.phi > 0.0 && s.phi < PI);
    }
}
