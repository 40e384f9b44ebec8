//! Viewport surface: the camera owner and the imperative handle hosts use.
//!
//! The surface holds exactly one authoritative [`Camera`] plus the viewport's
//! client-space bounding rectangle. Input handlers and hosts read and write
//! the camera through this type only, so there is never a second snapshot
//! to fall out of sync.
//!
//! Two layers are derived from it for rendering: a full-viewport pan layer
//! (background color, pan cursor) and a world layer transformed by
//! `translate(x, y) scale(s)` with origin at the top-left corner.

#[cfg(test)]
#[path = "viewport_test.rs"]
mod viewport_test;

use serde::{Deserialize, Serialize};

use crate::camera::{Camera, Point, clamp_scale};
use crate::config::{ConfigError, ViewportConfig};

/// The viewport's bounding rectangle in client (page) space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ViewportRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl ViewportRect {
    #[must_use]
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self { left, top, width, height }
    }

    /// A rect with no area (not yet laid out) cannot anchor gestures.
    #[must_use]
    pub fn is_measurable(&self) -> bool {
        self.width.is_finite()
            && self.height.is_finite()
            && self.left.is_finite()
            && self.top.is_finite()
            && self.width > 0.0
            && self.height > 0.0
    }

    /// Convert a client-space point to viewport-local screen space.
    #[must_use]
    pub fn to_local(&self, client: Point) -> Point {
        Point::new(client.x - self.left, client.y - self.top)
    }
}

/// Operations a host may invoke on a mounted viewport.
pub trait ViewportHandle {
    /// Bounding rectangle in client space, if one has been measured.
    fn viewport_rect(&self) -> Option<ViewportRect>;
    fn camera(&self) -> Camera;
    /// Replace the camera. The scale is clamped.
    fn set_camera(&mut self, camera: Camera);
    /// Replace the camera with a function of the previous one, atomically.
    fn update_camera<F>(&mut self, f: F)
    where
        F: FnOnce(Camera) -> Camera,
        Self: Sized;
    fn screen_to_world(&self, screen: Point) -> Point;
    fn world_to_screen(&self, world: Point) -> Point;
    /// Zoom to `scale` around a client-space point. Returns whether the camera changed.
    fn zoom_at_point(&mut self, client: Point, scale: f64) -> bool;
    fn reset_view(&mut self);
}

/// Owns the camera and the viewport rectangle.
#[derive(Debug, Clone)]
pub struct ViewportSurface {
    camera: Camera,
    rect: Option<ViewportRect>,
    config: ViewportConfig,
    mounted: bool,
}

impl Default for ViewportSurface {
    fn default() -> Self {
        Self::from_valid(ViewportConfig::default())
    }
}

impl ViewportSurface {
    /// Create an unmounted surface.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if `config` fails validation.
    pub fn new(config: ViewportConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_valid(config))
    }

    fn from_valid(config: ViewportConfig) -> Self {
        Self { camera: config.initial_camera.clamped(), rect: None, config, mounted: false }
    }

    #[must_use]
    pub fn config(&self) -> &ViewportConfig {
        &self.config
    }

    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Attach the surface to a laid-out viewport.
    pub fn mount(&mut self, rect: ViewportRect) {
        self.mounted = true;
        self.set_viewport_rect(Some(rect));
    }

    /// Detach the surface. The camera is kept; the rect is forgotten.
    pub fn unmount(&mut self) {
        self.mounted = false;
        self.rect = None;
    }

    /// Record a new bounding rectangle (after layout or resize).
    pub fn set_viewport_rect(&mut self, rect: Option<ViewportRect>) {
        tracing::debug!(?rect, "viewport rect updated");
        self.rect = rect;
    }

    /// The rect, only when it can anchor gestures.
    #[must_use]
    pub fn measurable_rect(&self) -> Option<ViewportRect> {
        self.rect.filter(ViewportRect::is_measurable)
    }

    /// Convert a client-space point to viewport-local screen space.
    #[must_use]
    pub fn client_to_local(&self, client: Point) -> Option<Point> {
        self.measurable_rect().map(|rect| rect.to_local(client))
    }

    /// Pan by a screen-space delta. A no-op without a measurable rect.
    pub fn pan_by(&mut self, delta: Point) -> bool {
        if self.measurable_rect().is_none() || !delta.x.is_finite() || !delta.y.is_finite() {
            return false;
        }
        self.camera.pan(delta);
        tracing::trace!(x = self.camera.x, y = self.camera.y, "camera panned");
        true
    }

    /// Zoom around a client point by a multiplicative factor of the current scale.
    pub fn zoom_by_factor(&mut self, client: Point, factor: f64) -> bool {
        let requested = self.camera.scale * factor;
        self.zoom_at_point(client, requested)
    }

    /// CSS transform for the world layer.
    #[must_use]
    pub fn world_transform(&self) -> String {
        format!("translate({}px, {}px) scale({})", self.camera.x, self.camera.y, self.camera.scale)
    }

    /// Zoom level for the HUD, in whole percent.
    #[must_use]
    pub fn zoom_percent(&self) -> i64 {
        // Scale is clamped to [0.25, 3.5], so the rounded percentage always fits.
        #[allow(clippy::cast_possible_truncation)]
        let pct = (self.camera.scale * 100.0).round() as i64;
        pct
    }
}

impl ViewportHandle for ViewportSurface {
    fn viewport_rect(&self) -> Option<ViewportRect> {
        self.rect
    }

    fn camera(&self) -> Camera {
        self.camera
    }

    fn set_camera(&mut self, camera: Camera) {
        if !camera.is_finite() {
            tracing::warn!(?camera, "ignoring non-finite camera");
            return;
        }
        self.camera = camera.clamped();
        tracing::debug!(camera = ?self.camera, "camera set");
    }

    fn update_camera<F>(&mut self, f: F)
    where
        F: FnOnce(Camera) -> Camera,
    {
        let next = f(self.camera);
        self.set_camera(next);
    }

    fn screen_to_world(&self, screen: Point) -> Point {
        self.camera.screen_to_world(screen)
    }

    fn world_to_screen(&self, world: Point) -> Point {
        self.camera.world_to_screen(world)
    }

    fn zoom_at_point(&mut self, client: Point, scale: f64) -> bool {
        let Some(local) = self.client_to_local(client) else {
            return false;
        };
        let before = self.camera;
        let next_scale = clamp_scale(scale, before.scale);
        if (next_scale - before.scale).abs() < f64::EPSILON {
            return false;
        }
        self.camera.zoom_at_point(local, next_scale);
        if !self.camera.is_finite() {
            self.camera = before;
            return false;
        }
        tracing::trace!(scale = self.camera.scale, "camera zoomed");
        self.camera != before
    }

    fn reset_view(&mut self) {
        self.camera.reset();
        tracing::debug!("camera reset");
    }
}
