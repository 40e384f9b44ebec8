#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

use crate::consts::{MAX_SCALE, MIN_SCALE};

/// A point in either screen or world space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean length when the point is read as a vector.
    #[must_use]
    pub fn length(self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Whether both components are exactly zero.
    #[must_use]
    pub fn is_zero(self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }
}

impl Add for Point {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self { x: self.x + rhs.x, y: self.y + rhs.y }
    }
}

impl Sub for Point {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self { x: self.x - rhs.x, y: self.y - rhs.y }
    }
}

/// Clamp a requested scale into `[MIN_SCALE, MAX_SCALE]`.
///
/// NaN has no meaningful position in the range and maps to `fallback`.
#[must_use]
pub fn clamp_scale(requested: f64, fallback: f64) -> f64 {
    if requested.is_nan() {
        return fallback.clamp(MIN_SCALE, MAX_SCALE);
    }
    requested.clamp(MIN_SCALE, MAX_SCALE)
}

/// Affine world-to-screen transform: `screen = world * scale + (x, y)`.
///
/// `x` / `y` are in screen pixels relative to the viewport's top-left corner.
/// `scale` stays inside `[MIN_SCALE, MAX_SCALE]` through every method here.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub x: f64,
    pub y: f64,
    pub scale: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self { x: 0.0, y: 0.0, scale: 1.0 }
    }
}

impl Camera {
    /// Build a camera, clamping `scale` into the allowed range.
    #[must_use]
    pub fn new(x: f64, y: f64, scale: f64) -> Self {
        Self { x, y, scale: clamp_scale(scale, 1.0) }
    }

    /// The same camera with its scale forced back into range.
    #[must_use]
    pub fn clamped(self) -> Self {
        Self::new(self.x, self.y, self.scale)
    }

    /// Convert a viewport-local screen point to world coordinates.
    #[must_use]
    pub fn screen_to_world(&self, screen: Point) -> Point {
        Point {
            x: (screen.x - self.x) / self.scale,
            y: (screen.y - self.y) / self.scale,
        }
    }

    /// Convert a world point to viewport-local screen coordinates.
    #[must_use]
    pub fn world_to_screen(&self, world: Point) -> Point {
        Point {
            x: self.x + world.x * self.scale,
            y: self.y + world.y * self.scale,
        }
    }

    /// Convert a screen-space displacement to a world-space displacement.
    #[must_use]
    pub fn screen_delta_to_world(&self, delta: Point) -> Point {
        Point { x: delta.x / self.scale, y: delta.y / self.scale }
    }

    /// Zoom to `requested` scale while keeping the world point under `screen` fixed.
    ///
    /// The world point is taken from the pre-zoom camera, then the offset is
    /// solved so that it maps back onto `screen` under the clamped new scale.
    pub fn zoom_at_point(&mut self, screen: Point, requested: f64) {
        let next_scale = clamp_scale(requested, self.scale);
        let anchor = self.screen_to_world(screen);
        self.x = screen.x - next_scale * anchor.x;
        self.y = screen.y - next_scale * anchor.y;
        self.scale = next_scale;
    }

    /// Shift the camera offset by a screen-space delta. Panning is unbounded.
    pub fn pan(&mut self, delta: Point) {
        self.x += delta.x;
        self.y += delta.y;
    }

    /// Return to the identity transform.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Whether every component is a finite number.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.scale.is_finite()
    }
}
