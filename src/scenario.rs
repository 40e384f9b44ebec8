//! Scripted replay: drive an [`EngineCore`] with recorded input against a
//! [`BoardState`] host.

use std::path::{Path, PathBuf};

use canvas::board::{BoardState, dispatch};
use canvas::camera::Camera;
use canvas::config::{ConfigError, ViewportConfig};
use canvas::doc::{CanvasObject, ObjectId, ObjectStore};
use canvas::engine::{Action, EngineCore};
use canvas::input::InputEvent;
use canvas::viewport::ViewportRect;
use serde::{Deserialize, Serialize};

#[cfg(test)]
#[path = "scenario_test.rs"]
mod scenario_test;

#[derive(Debug, thiserror::Error)]
pub enum ReplayError {
    #[error("failed to read script {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid script JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid viewport configuration: {0}")]
    Config(#[from] ConfigError),
}

/// A recorded session: starting state plus the input to replay.
#[derive(Debug, Clone, Deserialize)]
pub struct Script {
    #[serde(default)]
    pub config: ViewportConfig,
    pub viewport: ViewportRect,
    #[serde(default)]
    pub camera: Option<Camera>,
    #[serde(default)]
    pub objects: Vec<CanvasObject>,
    #[serde(default)]
    pub events: Vec<InputEvent>,
}

impl Script {
    /// Parse a script from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`ReplayError::Json`] on malformed input.
    pub fn from_json(text: &str) -> Result<Self, ReplayError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Read and parse a script file.
    ///
    /// # Errors
    ///
    /// Returns [`ReplayError::Io`] if the file can't be read, or
    /// [`ReplayError::Json`] if it doesn't parse.
    pub fn load(path: &Path) -> Result<Self, ReplayError> {
        let text = std::fs::read_to_string(path).map_err(|source| ReplayError::Io { path: path.to_path_buf(), source })?;
        Self::from_json(&text)
    }
}

/// Command-line settings layered over the script's `config` block.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub wheel_sensitivity: Option<f64>,
    pub tap_threshold_px: Option<f64>,
    pub pan_key: Option<String>,
}

impl Overrides {
    pub fn apply(&self, config: &mut ViewportConfig) {
        if let Some(sensitivity) = self.wheel_sensitivity {
            config.wheel_sensitivity = sensitivity;
        }
        if let Some(threshold) = self.tap_threshold_px {
            config.tap_threshold_px = threshold;
        }
        if let Some(key) = &self.pan_key {
            config.pan_key.clone_from(key);
        }
    }
}

/// Final state after a replay.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub camera: Camera,
    pub objects: ObjectStore,
    pub selection: Vec<ObjectId>,
    pub background_taps: u64,
}

/// Run every scripted event through a freshly mounted engine.
///
/// # Errors
///
/// Returns [`ReplayError::Config`] if the merged configuration is invalid.
pub fn replay(script: Script, overrides: &Overrides) -> Result<Summary, ReplayError> {
    let Script { mut config, viewport, camera, objects, events } = script;
    overrides.apply(&mut config);
    if let Some(camera) = camera {
        config.initial_camera = camera;
    }

    let mut core = EngineCore::with_config(config)?;
    let mut board = BoardState::new(objects);
    core.mount(viewport, &board.objects);
    tracing::info!(objects = board.objects.len(), events = events.len(), "replay started");

    for (index, event) in events.iter().enumerate() {
        let actions = core.handle_event(&board.objects, event);
        for action in &actions {
            log_action(index, action);
        }
        dispatch(&mut board, actions);
    }
    for action in core.unmount(&board.objects) {
        log_action(events.len(), &action);
    }

    let summary = Summary {
        camera: core.camera(),
        selection: board.selected_ids(),
        background_taps: board.background_taps,
        objects: board.objects,
    };
    tracing::info!(
        x = summary.camera.x,
        y = summary.camera.y,
        scale = summary.camera.scale,
        taps = summary.background_taps,
        "replay finished"
    );
    Ok(summary)
}

fn log_action(index: usize, action: &Action) {
    match action {
        Action::RenderNeeded => tracing::trace!(index, "render"),
        Action::CameraChanged(camera) => {
            tracing::debug!(index, x = camera.x, y = camera.y, scale = camera.scale, "camera");
        }
        other => tracing::info!(index, action = ?other, "action"),
    }
}
