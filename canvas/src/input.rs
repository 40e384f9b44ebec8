//! Input model and the gesture adapter.
//!
//! Raw platform events arrive as [`InputEvent`]s carrying client-space
//! coordinates. [`GestureAdapter`] turns them into [`Command`]s: camera pans,
//! wheel zooms, object drag increments, selection changes and background taps.
//! The adapter holds only transient flags (whether the pan key is held, which
//! gesture is in flight); camera and object state live elsewhere.
//!
//! Background gestures follow one rule: a press that never travels
//! `tap_threshold_px` is a tap; one that does is a drag, and it pans only if
//! the pan key was held at pointer-down. Tap and pan never both fire.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use serde::{Deserialize, Serialize};

use crate::camera::Point;
use crate::config::ViewportConfig;
use crate::doc::ObjectId;

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Button {
    /// Left mouse button (or single-finger touch).
    #[default]
    Primary,
    /// Middle mouse button.
    Middle,
    /// Right mouse button.
    Secondary,
}

/// A keyboard key code as reported by the platform (e.g. `"Space"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Key(pub String);

impl Key {
    #[must_use]
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }
}

/// Wheel / trackpad scroll delta.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WheelDelta {
    /// Horizontal scroll amount in pixels.
    pub dx: f64,
    /// Vertical scroll amount in pixels (positive = down).
    pub dy: f64,
}

/// What the pointer landed on at pointer-down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "id", rename_all = "snake_case")]
pub enum PointerTarget {
    /// Empty canvas: the pan layer.
    Background,
    /// A rendered object.
    Object(ObjectId),
    /// A text field or other editable element overlaid on the canvas.
    Editable,
}

/// Mouse cursor the host should show over the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cursor {
    #[default]
    Default,
    /// Pan key held, ready to pan.
    Grab,
    /// Pan in progress.
    Grabbing,
    /// Over a draggable object.
    Move,
}

impl Cursor {
    /// CSS cursor keyword.
    #[must_use]
    pub fn as_css(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Grab => "grab",
            Self::Grabbing => "grabbing",
            Self::Move => "move",
        }
    }
}

/// A raw input event. Pointer and wheel positions are in client space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputEvent {
    PointerDown {
        client: Point,
        #[serde(default)]
        button: Button,
        target: PointerTarget,
    },
    PointerMove {
        client: Point,
    },
    PointerUp {
        client: Point,
    },
    /// The platform aborted the pointer stream (lost capture, touch cancel).
    PointerCancel,
    Wheel {
        client: Point,
        delta: WheelDelta,
    },
    KeyDown {
        key: Key,
        /// Whether focus is in an editable element.
        #[serde(default)]
        editable_target: bool,
    },
    KeyUp {
        key: Key,
    },
}

/// An intent derived from input, applied by the engine.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Shift the camera by a screen-space delta.
    Pan(Point),
    /// Zoom around a client-space point by a multiplicative factor.
    ZoomAt { client: Point, factor: f64 },
    /// Replace the selection with one object.
    SelectExclusive(ObjectId),
    /// Clear the selection after a background tap.
    BackgroundTap,
    /// A drag started on an object.
    BeginDrag(ObjectId),
    /// A screen-space drag increment on an object.
    DragBy { id: ObjectId, screen_delta: Point },
    /// The drag on an object finished.
    EndDrag(ObjectId),
    /// The host should suppress the platform default for this event.
    PreventDefault,
    /// The cursor over the canvas changed.
    SetCursor(Cursor),
}

/// The gesture currently being tracked between pointer-down and pointer-up.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum GestureState {
    /// No gesture in progress.
    #[default]
    Idle,
    /// Background press that has not yet crossed the tap threshold.
    BackgroundPress {
        /// Client-space position at pointer-down.
        origin: Point,
    },
    /// Background drag moving the camera.
    Panning {
        /// Client-space position of the previous pointer event.
        last: Point,
    },
    /// Background drag that may not pan; it ends without a tap.
    Inert,
    /// Dragging an object.
    DraggingObject {
        id: ObjectId,
        /// Client-space position of the previous pointer event.
        last: Point,
    },
}

/// Normalizes pointer, wheel and key events into [`Command`]s.
#[derive(Debug, Clone)]
pub struct GestureAdapter {
    pan_key: String,
    tap_threshold_px: f64,
    wheel_sensitivity: f64,
    pan_key_held: bool,
    state: GestureState,
}

impl Default for GestureAdapter {
    fn default() -> Self {
        Self::new(&ViewportConfig::default())
    }
}

impl GestureAdapter {
    #[must_use]
    pub fn new(config: &ViewportConfig) -> Self {
        Self {
            pan_key: config.pan_key.clone(),
            tap_threshold_px: config.tap_threshold_px,
            wheel_sensitivity: config.wheel_sensitivity,
            pan_key_held: false,
            state: GestureState::Idle,
        }
    }

    #[must_use]
    pub fn state(&self) -> GestureState {
        self.state
    }

    #[must_use]
    pub fn pan_key_held(&self) -> bool {
        self.pan_key_held
    }

    /// Whether a pointer gesture is in flight.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.state != GestureState::Idle
    }

    /// Cursor for the pan layer given the current flags.
    #[must_use]
    pub fn pan_cursor(&self) -> Cursor {
        match self.state {
            GestureState::Panning { .. } => Cursor::Grabbing,
            _ if self.pan_key_held => Cursor::Grab,
            _ => Cursor::Default,
        }
    }

    /// Route one raw event.
    pub fn handle(&mut self, event: &InputEvent) -> Vec<Command> {
        match event {
            InputEvent::PointerDown { client, button, target } => self.pointer_down(*client, *button, *target),
            InputEvent::PointerMove { client } => self.pointer_move(*client),
            InputEvent::PointerUp { client } => self.pointer_up(*client),
            InputEvent::PointerCancel => self.pointer_cancel(),
            InputEvent::Wheel { client, delta } => self.wheel(*client, *delta),
            InputEvent::KeyDown { key, editable_target } => self.key_down(key, *editable_target),
            InputEvent::KeyUp { key } => self.key_up(key),
        }
    }

    pub fn pointer_down(&mut self, client: Point, button: Button, target: PointerTarget) -> Vec<Command> {
        // A new press supersedes a gesture whose pointer-up never arrived.
        let mut out = if self.is_active() {
            tracing::debug!(state = ?self.state, "pointer-down ends in-flight gesture");
            self.pointer_cancel()
        } else {
            Vec::new()
        };
        match target {
            PointerTarget::Editable => {}
            PointerTarget::Object(id) => {
                out.push(Command::SelectExclusive(id));
                if button == Button::Primary {
                    self.state = GestureState::DraggingObject { id, last: client };
                    out.push(Command::BeginDrag(id));
                }
            }
            PointerTarget::Background => {
                if button == Button::Primary {
                    self.state = GestureState::BackgroundPress { origin: client };
                    tracing::debug!("background press");
                }
            }
        }
        out
    }

    pub fn pointer_move(&mut self, client: Point) -> Vec<Command> {
        match self.state {
            GestureState::BackgroundPress { origin } => {
                let displacement = client - origin;
                if displacement.length() < self.tap_threshold_px {
                    return Vec::new();
                }
                // Pan eligibility is read when the drag starts, not at pointer-down.
                if self.pan_key_held {
                    tracing::debug!("pan started");
                    self.state = GestureState::Panning { last: client };
                    vec![Command::SetCursor(Cursor::Grabbing), Command::Pan(displacement)]
                } else {
                    self.state = GestureState::Inert;
                    Vec::new()
                }
            }
            GestureState::Panning { last } => {
                self.state = GestureState::Panning { last: client };
                nonzero(client - last).map(Command::Pan).into_iter().collect()
            }
            GestureState::DraggingObject { id, last } => {
                self.state = GestureState::DraggingObject { id, last: client };
                nonzero(client - last)
                    .map(|screen_delta| Command::DragBy { id, screen_delta })
                    .into_iter()
                    .collect()
            }
            GestureState::Idle | GestureState::Inert => Vec::new(),
        }
    }

    pub fn pointer_up(&mut self, client: Point) -> Vec<Command> {
        let mut out = self.pointer_move(client);
        match std::mem::take(&mut self.state) {
            GestureState::BackgroundPress { .. } => {
                tracing::debug!("background tap");
                out.push(Command::BackgroundTap);
            }
            GestureState::Panning { .. } => {
                tracing::debug!("pan ended");
                out.push(Command::SetCursor(self.pan_cursor()));
            }
            GestureState::DraggingObject { id, .. } => out.push(Command::EndDrag(id)),
            GestureState::Idle | GestureState::Inert => {}
        }
        out
    }

    /// Abort the in-flight gesture. Increments already emitted stay committed.
    pub fn pointer_cancel(&mut self) -> Vec<Command> {
        match std::mem::take(&mut self.state) {
            GestureState::Panning { .. } => vec![Command::SetCursor(self.pan_cursor())],
            GestureState::DraggingObject { id, .. } => vec![Command::EndDrag(id)],
            GestureState::Idle | GestureState::Inert | GestureState::BackgroundPress { .. } => Vec::new(),
        }
    }

    /// Each wheel tick requests `scale * (1 - dy * sensitivity)` around the pointer.
    ///
    /// Whether the tick is consumed (and its default prevented) is up to the
    /// viewport applying the zoom.
    pub fn wheel(&mut self, client: Point, delta: WheelDelta) -> Vec<Command> {
        let factor = 1.0 - delta.dy * self.wheel_sensitivity;
        vec![Command::ZoomAt { client, factor }]
    }

    pub fn key_down(&mut self, key: &Key, editable_target: bool) -> Vec<Command> {
        if key.0 != self.pan_key || editable_target {
            return Vec::new();
        }
        let mut out = vec![Command::PreventDefault];
        if !self.pan_key_held {
            self.pan_key_held = true;
            out.push(Command::SetCursor(self.pan_cursor()));
        }
        out
    }

    /// Releasing the pan key always disarms panning, wherever focus is.
    pub fn key_up(&mut self, key: &Key) -> Vec<Command> {
        if key.0 != self.pan_key || !self.pan_key_held {
            return Vec::new();
        }
        self.pan_key_held = false;
        if let GestureState::Panning { .. } = self.state {
            tracing::debug!("pan cancelled by key release");
            self.state = GestureState::Inert;
        }
        vec![Command::SetCursor(self.pan_cursor())]
    }

    /// Drop all transient flags, ending any gesture without further commands.
    pub fn reset(&mut self) {
        self.pan_key_held = false;
        self.state = GestureState::Idle;
    }
}

fn nonzero(delta: Point) -> Option<Point> {
    (!delta.is_zero()).then_some(delta)
}
