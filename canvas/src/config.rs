//! Viewport configuration: gesture tuning, pan key, and initial camera.
//!
//! Every field has a default, so hosts only spell out what they change. The
//! scale bounds are deliberately absent: they are fixed constants in
//! [`crate::consts`] and no configuration can widen them.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};

use crate::camera::Camera;
use crate::consts::{DEFAULT_BACKGROUND, DEFAULT_PAN_KEY, TAP_THRESHOLD_PX, WHEEL_ZOOM_SENSITIVITY};

/// Error returned when a [`ViewportConfig`] cannot be used.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Wheel sensitivity must be a finite, positive number.
    #[error("wheel sensitivity must be finite and positive, got {0}")]
    InvalidSensitivity(f64),
    /// Tap threshold must be a finite, non-negative number of pixels.
    #[error("tap threshold must be finite and non-negative, got {0}")]
    InvalidTapThreshold(f64),
    /// The pan key code is empty.
    #[error("pan key must not be empty")]
    EmptyPanKey,
    /// The initial camera has a NaN or infinite component.
    #[error("initial camera must be finite, got {0:?}")]
    NonFiniteCamera(Camera),
    /// The configuration JSON could not be parsed.
    #[error("invalid viewport config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Tunables for one viewport instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    /// Zoom change per unit of vertical wheel delta.
    pub wheel_sensitivity: f64,
    /// Screen-pixel displacement separating a tap from a drag.
    pub tap_threshold_px: f64,
    /// Key code (as reported by the platform) that arms panning while held.
    pub pan_key: String,
    /// Whether objects receive drag bindings.
    pub draggable: bool,
    /// Backdrop color of the pan layer.
    pub background: String,
    /// Camera the viewport starts with.
    pub initial_camera: Camera,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            wheel_sensitivity: WHEEL_ZOOM_SENSITIVITY,
            tap_threshold_px: TAP_THRESHOLD_PX,
            pan_key: DEFAULT_PAN_KEY.to_owned(),
            draggable: true,
            background: DEFAULT_BACKGROUND.to_owned(),
            initial_camera: Camera::default(),
        }
    }
}

impl ViewportConfig {
    /// Parse and validate a config from JSON. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON, or any error
    /// [`ViewportConfig::validate`] reports.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every field is usable.
    ///
    /// # Errors
    ///
    /// Returns the first invalid field as a [`ConfigError`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.wheel_sensitivity.is_finite() || self.wheel_sensitivity <= 0.0 {
            return Err(ConfigError::InvalidSensitivity(self.wheel_sensitivity));
        }
        if !self.tap_threshold_px.is_finite() || self.tap_threshold_px < 0.0 {
            return Err(ConfigError::InvalidTapThreshold(self.tap_threshold_px));
        }
        if self.pan_key.trim().is_empty() {
            return Err(ConfigError::EmptyPanKey);
        }
        if !self.initial_camera.is_finite() {
            return Err(ConfigError::NonFiniteCamera(self.initial_camera));
        }
        Ok(())
    }
}
