//! Engine: routes input through the gesture adapter and applies the results.
//!
//! [`EngineCore`] is the whole interactive core without a browser attached:
//! it owns the [`ViewportSurface`] (camera), the [`GestureAdapter`] and the
//! [`DragController`]. Hosts feed it raw [`InputEvent`]s together with a
//! read-only view of their [`ObjectStore`] and receive [`Action`]s back,
//! in order, to apply to their own state. [`Engine`] wraps the core with a
//! canvas element for rendering.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::camera::{Camera, Point};
use crate::config::{ConfigError, ViewportConfig};
use crate::doc::{ObjectStore, ObjectsUpdate};
use crate::drag::DragController;
use crate::input::{Button, Command, Cursor, GestureAdapter, InputEvent, Key, PointerTarget, WheelDelta};
use crate::render::{self, Scene};
use crate::selection::{Selection, SelectionChange};
use crate::viewport::{ViewportHandle, ViewportRect, ViewportSurface};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// The selection should change through the matching entry point.
    SelectionChanged(SelectionChange),
    /// The object sequence should be updated.
    ObjectsChanged(ObjectsUpdate),
    /// A tap landed on empty canvas.
    BackgroundTapped,
    /// The camera moved; carries the new value.
    CameraChanged(Camera),
    /// The pan layer cursor changed.
    SetCursor(Cursor),
    /// The platform default for the current event must be suppressed.
    PreventDefault,
    /// Something visible changed; repaint before the next event.
    RenderNeeded,
}

/// Core engine state: everything that doesn't depend on the canvas element.
///
/// Separated from `Engine` so it can be tested without WASM/browser dependencies.
#[derive(Debug, Clone, Default)]
pub struct EngineCore {
    pub viewport: ViewportSurface,
    pub gestures: GestureAdapter,
    pub drag: DragController,
    cursor: Cursor,
}

impl EngineCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a core from a host-supplied configuration.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if `config` fails validation.
    pub fn with_config(config: ViewportConfig) -> Result<Self, ConfigError> {
        let gestures = GestureAdapter::new(&config);
        let drag = DragController::new(config.draggable);
        let viewport = ViewportSurface::new(config)?;
        Ok(Self { viewport, gestures, drag, cursor: Cursor::Default })
    }

    // --- Lifecycle ---

    /// Attach to a laid-out viewport and start accepting key events.
    pub fn mount(&mut self, rect: ViewportRect, objects: &ObjectStore) {
        self.viewport.mount(rect);
        self.drag.bind_all(objects);
    }

    /// Detach: release key tracking and bindings, and end any gesture in place.
    pub fn unmount(&mut self, objects: &ObjectStore) -> Vec<Action> {
        let commands = self.gestures.pointer_cancel();
        let mut actions = self.apply(objects, commands);
        self.gestures.reset();
        self.drag.unbind_all();
        self.viewport.unmount();
        if self.cursor != Cursor::Default {
            self.cursor = Cursor::Default;
            actions.push(Action::SetCursor(Cursor::Default));
        }
        actions
    }

    /// Record a new viewport rectangle after layout or resize.
    pub fn set_viewport_rect(&mut self, rect: ViewportRect) {
        self.viewport.set_viewport_rect(Some(rect));
    }

    /// Rebind drag handlers if the host's object set changed.
    pub fn sync_objects(&mut self, objects: &ObjectStore) -> bool {
        self.drag.sync(objects)
    }

    /// Enable or disable object dragging.
    pub fn set_draggable(&mut self, draggable: bool, objects: &ObjectStore) {
        self.drag.set_enabled(draggable, objects);
    }

    // --- Input events ---

    /// Route one raw event.
    pub fn handle_event(&mut self, objects: &ObjectStore, event: &InputEvent) -> Vec<Action> {
        match event {
            InputEvent::KeyDown { .. } | InputEvent::KeyUp { .. } if !self.viewport.is_mounted() => Vec::new(),
            InputEvent::PointerDown { target: PointerTarget::Object(id), .. } if !objects.contains(id) => {
                tracing::debug!(%id, "ignoring pointer-down on absent object");
                Vec::new()
            }
            _ => {
                self.sync_objects(objects);
                let commands = self.gestures.handle(event);
                self.apply(objects, commands)
            }
        }
    }

    pub fn on_pointer_down(
        &mut self,
        objects: &ObjectStore,
        client: Point,
        button: Button,
        target: PointerTarget,
    ) -> Vec<Action> {
        self.handle_event(objects, &InputEvent::PointerDown { client, button, target })
    }

    pub fn on_pointer_move(&mut self, objects: &ObjectStore, client: Point) -> Vec<Action> {
        self.handle_event(objects, &InputEvent::PointerMove { client })
    }

    pub fn on_pointer_up(&mut self, objects: &ObjectStore, client: Point) -> Vec<Action> {
        self.handle_event(objects, &InputEvent::PointerUp { client })
    }

    pub fn on_pointer_cancel(&mut self, objects: &ObjectStore) -> Vec<Action> {
        self.handle_event(objects, &InputEvent::PointerCancel)
    }

    pub fn on_wheel(&mut self, objects: &ObjectStore, client: Point, delta: WheelDelta) -> Vec<Action> {
        self.handle_event(objects, &InputEvent::Wheel { client, delta })
    }

    pub fn on_key_down(&mut self, objects: &ObjectStore, key: Key, editable_target: bool) -> Vec<Action> {
        self.handle_event(objects, &InputEvent::KeyDown { key, editable_target })
    }

    pub fn on_key_up(&mut self, objects: &ObjectStore, key: Key) -> Vec<Action> {
        self.handle_event(objects, &InputEvent::KeyUp { key })
    }

    // --- Queries ---

    /// The current camera state.
    #[must_use]
    pub fn camera(&self) -> Camera {
        self.viewport.camera()
    }

    /// The pan layer cursor last reported to the host.
    #[must_use]
    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Describe the current frame for rendering.
    #[must_use]
    pub fn scene(&self, objects: &ObjectStore, selection: &Selection) -> Scene {
        render::build_scene(&self.viewport, self.cursor, self.drag.is_enabled(), objects, selection)
    }

    // --- Command application ---

    fn apply(&mut self, objects: &ObjectStore, commands: Vec<Command>) -> Vec<Action> {
        let mut actions = Vec::new();
        let mut render = false;
        for command in commands {
            match command {
                Command::Pan(delta) => {
                    if self.viewport.pan_by(delta) {
                        actions.push(Action::CameraChanged(self.camera()));
                        render = true;
                    }
                }
                Command::ZoomAt { client, factor } => {
                    // Only a viewport that can anchor the zoom consumes the wheel.
                    if self.viewport.measurable_rect().is_none() {
                        continue;
                    }
                    actions.push(Action::PreventDefault);
                    if self.viewport.zoom_by_factor(client, factor) {
                        actions.push(Action::CameraChanged(self.camera()));
                        render = true;
                    }
                }
                Command::SelectExclusive(id) => {
                    if objects.contains(&id) {
                        actions.push(Action::SelectionChanged(SelectionChange::Exclusive(id)));
                        render = true;
                    } else {
                        tracing::debug!(%id, "ignoring pointer-down on absent object");
                    }
                }
                Command::BackgroundTap => {
                    actions.push(Action::BackgroundTapped);
                    actions.push(Action::SelectionChanged(SelectionChange::Clear));
                    render = true;
                }
                Command::BeginDrag(id) => {
                    self.drag.begin(&id);
                }
                Command::DragBy { id, screen_delta } => {
                    if self.viewport.measurable_rect().is_none() {
                        continue;
                    }
                    if let Some(update) = self.drag.drag_by(&id, screen_delta, self.camera().scale) {
                        actions.push(Action::ObjectsChanged(update));
                        render = true;
                    }
                }
                Command::EndDrag(id) => {
                    self.drag.end(&id);
                }
                Command::PreventDefault => actions.push(Action::PreventDefault),
                Command::SetCursor(cursor) => {
                    if cursor != self.cursor {
                        self.cursor = cursor;
                        actions.push(Action::SetCursor(cursor));
                        render = true;
                    }
                }
            }
        }
        if render {
            actions.push(Action::RenderNeeded);
        }
        actions
    }
}

/// The full canvas engine. Wraps `EngineCore` and owns the browser canvas element.
pub struct Engine {
    canvas: HtmlCanvasElement,
    dpr: f64,
    pub core: EngineCore,
}

impl Engine {
    /// Create a new engine bound to the given canvas element.
    #[must_use]
    pub fn new(canvas: HtmlCanvasElement) -> Self {
        Self { canvas, dpr: 1.0, core: EngineCore::new() }
    }

    /// Create an engine with a host configuration.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if `config` fails validation.
    pub fn with_config(canvas: HtmlCanvasElement, config: ViewportConfig) -> Result<Self, ConfigError> {
        Ok(Self { canvas, dpr: 1.0, core: EngineCore::with_config(config)? })
    }

    /// Attach to the laid-out canvas and start accepting key events.
    pub fn mount(&mut self, rect: ViewportRect, dpr: f64, objects: &ObjectStore) {
        self.resize_backing_store(rect, dpr);
        self.core.mount(rect, objects);
    }

    /// Detach from the page. See [`EngineCore::unmount`].
    pub fn unmount(&mut self, objects: &ObjectStore) -> Vec<Action> {
        self.core.unmount(objects)
    }

    /// Update the viewport rectangle (CSS pixels) and device pixel ratio,
    /// resizing the canvas backing store to match.
    pub fn set_viewport(&mut self, rect: ViewportRect, dpr: f64) {
        self.resize_backing_store(rect, dpr);
        self.core.set_viewport_rect(rect);
    }

    fn resize_backing_store(&mut self, rect: ViewportRect, dpr: f64) {
        let (width, height, dpr) = backing_store_size(rect, dpr);
        self.dpr = dpr;
        self.canvas.set_width(width);
        self.canvas.set_height(height);
    }

    pub fn handle_event(&mut self, objects: &ObjectStore, event: &InputEvent) -> Vec<Action> {
        self.core.handle_event(objects, event)
    }

    /// Draw the current state to the canvas.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the 2D context is unavailable or a draw call fails.
    pub fn render(&self, objects: &ObjectStore, selection: &Selection) -> Result<(), JsValue> {
        let Some(ctx) = self.canvas.get_context("2d")? else {
            return Err(JsValue::from_str("2d context unavailable"));
        };
        let ctx: CanvasRenderingContext2d = ctx.dyn_into().map_err(JsValue::from)?;
        let Some(rect) = self.core.viewport.measurable_rect() else {
            return Ok(());
        };
        let scene = self.core.scene(objects, selection);
        render::draw(&ctx, &scene, rect.width, rect.height, self.dpr)
    }

    #[must_use]
    pub fn camera(&self) -> Camera {
        self.core.camera()
    }
}

/// Device-pixel size of the canvas backing store for `rect`, plus the ratio
/// actually used. A non-finite or non-positive `dpr` falls back to 1.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn backing_store_size(rect: ViewportRect, dpr: f64) -> (u32, u32, f64) {
    let dpr = if dpr.is_finite() && dpr > 0.0 { dpr } else { 1.0 };
    let scaled = |css: f64| if css.is_finite() { (css.max(0.0) * dpr).round() as u32 } else { 0 };
    (scaled(rect.width), scaled(rect.height), dpr)
}
