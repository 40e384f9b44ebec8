//! Shared numeric constants for the canvas crate.

// ── Camera ──────────────────────────────────────────────────────

/// Smallest camera scale any operation may produce.
pub const MIN_SCALE: f64 = 0.25;

/// Largest camera scale any operation may produce.
pub const MAX_SCALE: f64 = 3.5;

// ── Gestures ────────────────────────────────────────────────────

/// Zoom change per unit of vertical wheel delta.
pub const WHEEL_ZOOM_SENSITIVITY: f64 = 0.0015;

/// Pointer displacement in screen pixels below which a press is a tap.
pub const TAP_THRESHOLD_PX: f64 = 2.0;

/// Key code that arms background panning while held.
pub const DEFAULT_PAN_KEY: &str = "Space";

// ── Rendering ───────────────────────────────────────────────────

/// Backdrop color of the pan layer.
pub const DEFAULT_BACKGROUND: &str = "#f2f2f2";

/// Fill of an object card.
pub const NODE_FILL: &str = "#ffffff";

/// Border color of an unselected object card.
pub const NODE_BORDER: &str = "#d7d7d7";

/// Border color of a selected object card.
pub const NODE_BORDER_SELECTED: &str = "#4f46e5";

/// Border width of an unselected object card, in world units.
pub const NODE_BORDER_WIDTH: f64 = 1.0;

/// Border width of a selected object card, in world units.
pub const NODE_BORDER_WIDTH_SELECTED: f64 = 5.0;

/// Corner radius of an object card, in world units.
pub const NODE_CORNER_RADIUS: f64 = 10.0;

/// Label color inside an object card.
pub const NODE_LABEL_COLOR: &str = "#222";
