//! Arena bounds and the providers that compute them.
//!
//! The arena is the rectangle of the `z = 0` plane that is visible from the
//! current view. [`PerspectiveCamera`] derives it from a camera looking down
//! the `+z` axis; a plain [`Bounds`] value can stand in for a fixed arena.

use crate::config::CameraConfig;
use glam::{Vec2, Vec3};

/// Axis-aligned world-space rectangle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl Bounds {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Rectangle centered on the origin with the given half extents.
    pub fn centered(half_extents: Vec2) -> Self {
        Self {
            min: -half_extents,
            max: half_extents,
        }
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    /// Lowest and highest coordinate a circle of `radius` may occupy.
    ///
    /// For an arena narrower than the circle the returned interval is
    /// inverted; callers must tolerate that.
    #[inline]
    pub fn shrunk_by(&self, radius: f32) -> (Vec2, Vec2) {
        (self.min + Vec2::splat(radius), self.max - Vec2::splat(radius))
    }
}

/// Source of the arena rectangle, queried fresh every tick.
pub trait BoundsProvider {
    fn bounds(&self) -> Bounds;
}

impl BoundsProvider for Bounds {
    fn bounds(&self) -> Bounds {
        *self
    }
}

/// Perspective camera looking along `+z` at the simulation plane.
///
/// The camera sits at negative `z`; its distance to the plane is `-position.z`.
#[derive(Clone, Debug)]
pub struct PerspectiveCamera {
    position: Vec3,
    fov_y: f32,
    aspect: f32,
    min_distance: f32,
    max_distance: f32,
}

impl PerspectiveCamera {
    pub fn new(cfg: &CameraConfig, aspect: f32) -> Self {
        let mut camera = Self {
            position: Vec3::ZERO,
            fov_y: cfg.fov_y_degrees.to_radians(),
            aspect,
            min_distance: cfg.min_distance.min(cfg.max_distance),
            max_distance: cfg.max_distance.max(cfg.min_distance),
        };
        camera.set_distance(cfg.distance);
        camera
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn distance(&self) -> f32 {
        -self.position.z
    }

    pub fn distance_range(&self) -> std::ops::RangeInclusive<f32> {
        self.min_distance..=self.max_distance
    }

    /// Moves the camera along `z`, keeping it centered on the origin.
    ///
    /// The distance is clamped into the configured range.
    pub fn set_distance(&mut self, distance: f32) {
        let d = distance.clamp(self.min_distance, self.max_distance);
        self.position = Vec3::new(0.0, 0.0, -d);
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    /// Updates width / height, e.g. after a window resize.
    pub fn set_aspect(&mut self, aspect: f32) {
        if aspect.is_finite() && aspect > 0.0 {
            self.aspect = aspect;
        }
    }

    /// Projects a viewport coordinate (`[0, 1]` on both axes) onto the plane
    /// at the camera's current depth.
    pub fn viewport_to_plane(&self, viewport: Vec2) -> Vec2 {
        let half_h = self.distance() * (0.5 * self.fov_y).tan();
        let half = Vec2::new(half_h * self.aspect, half_h);
        let ndc = viewport * 2.0 - Vec2::ONE;
        self.position.truncate() + ndc * half
    }
}

impl BoundsProvider for PerspectiveCamera {
    fn bounds(&self) -> Bounds {
        Bounds {
            min: self.viewport_to_plane(Vec2::ZERO),
            max: self.viewport_to_plane(Vec2::ONE),
        }
    }
}
