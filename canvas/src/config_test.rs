#![allow(clippy::float_cmp)]

use super::*;

#[test]
fn default_config_is_valid() {
    let config = ViewportConfig::default();
    assert!(config.validate().is_ok());
    assert_eq!(config.wheel_sensitivity, 0.0015);
    assert_eq!(config.tap_threshold_px, 2.0);
    assert_eq!(config.pan_key, "Space");
    assert!(config.draggable);
    assert_eq!(config.background, "#f2f2f2");
    assert_eq!(config.initial_camera, Camera::default());
}

#[test]
fn from_json_fills_missing_fields_with_defaults() {
    let config = ViewportConfig::from_json(r#"{ "pan_key": "KeyH", "draggable": false }"#).expect("config");
    assert_eq!(config.pan_key, "KeyH");
    assert!(!config.draggable);
    assert_eq!(config.wheel_sensitivity, 0.0015);
}

#[test]
fn from_json_reads_initial_camera() {
    let config =
        ViewportConfig::from_json(r#"{ "initial_camera": { "x": 10.0, "y": -5.0, "scale": 2.0 } }"#).expect("config");
    assert_eq!(config.initial_camera, Camera { x: 10.0, y: -5.0, scale: 2.0 });
}

#[test]
fn from_json_rejects_malformed_input() {
    let err = ViewportConfig::from_json("{ not json").expect_err("should fail");
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn validate_rejects_non_positive_sensitivity() {
    let config = ViewportConfig { wheel_sensitivity: 0.0, ..Default::default() };
    assert!(matches!(config.validate(), Err(ConfigError::InvalidSensitivity(_))));
    let config = ViewportConfig { wheel_sensitivity: f64::NAN, ..Default::default() };
    assert!(matches!(config.validate(), Err(ConfigError::InvalidSensitivity(_))));
}

#[test]
fn validate_rejects_negative_tap_threshold() {
    let config = ViewportConfig { tap_threshold_px: -1.0, ..Default::default() };
    assert!(matches!(config.validate(), Err(ConfigError::InvalidTapThreshold(_))));
}

#[test]
fn validate_accepts_zero_tap_threshold() {
    let config = ViewportConfig { tap_threshold_px: 0.0, ..Default::default() };
    assert!(config.validate().is_ok());
}

#[test]
fn validate_rejects_blank_pan_key() {
    let config = ViewportConfig { pan_key: "  ".to_owned(), ..Default::default() };
    assert!(matches!(config.validate(), Err(ConfigError::EmptyPanKey)));
}

#[test]
fn validate_rejects_non_finite_camera() {
    let config = ViewportConfig {
        initial_camera: Camera { x: f64::INFINITY, y: 0.0, scale: 1.0 },
        ..Default::default()
    };
    assert!(matches!(config.validate(), Err(ConfigError::NonFiniteCamera(_))));
}

#[test]
fn error_messages_name_the_field() {
    assert_eq!(
        ConfigError::InvalidTapThreshold(-1.0).to_string(),
        "tap threshold must be finite and non-negative, got -1"
    );
    assert_eq!(ConfigError::EmptyPanKey.to_string(), "pan key must not be empty");
}
