//! Rendering: describes and draws the viewport's layers.
//!
//! [`build_scene`] turns the camera, object store and selection into a plain
//! [`Scene`]: the pan layer (backdrop and cursor), the world transform, the
//! zoom readout, and one [`NodeView`] per object in paint order. It touches no
//! platform API, so hosts that render through CSS can use it directly.
//!
//! [`draw`] paints a scene to a 2D canvas context. It is the only place that
//! touches [`web_sys::CanvasRenderingContext2d`] and it never mutates state.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use crate::camera::{Camera, Point};
use crate::consts::{
    NODE_BORDER, NODE_BORDER_SELECTED, NODE_BORDER_WIDTH, NODE_BORDER_WIDTH_SELECTED, NODE_CORNER_RADIUS, NODE_FILL,
    NODE_LABEL_COLOR,
};
use crate::doc::{ObjectId, ObjectStore, Rect};
use crate::input::Cursor;
use crate::selection::Selection;
use crate::viewport::{ViewportHandle, ViewportSurface};

/// One object as it should appear this frame.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeView {
    pub id: ObjectId,
    pub label: String,
    /// Placement in world space.
    pub rect: Rect,
    /// Placement in viewport-local screen space.
    pub screen_rect: Rect,
    pub selected: bool,
    pub cursor: Cursor,
}

/// Everything needed to paint one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub background: String,
    pub pan_cursor: Cursor,
    pub camera: Camera,
    /// CSS transform for the world layer (origin `0 0`).
    pub world_transform: String,
    pub zoom_percent: i64,
    /// Objects bottom first.
    pub nodes: Vec<NodeView>,
}

/// Describe the current frame.
#[must_use]
pub fn build_scene(
    viewport: &ViewportSurface,
    pan_cursor: Cursor,
    draggable: bool,
    objects: &ObjectStore,
    selection: &Selection,
) -> Scene {
    let camera = viewport.camera();
    let node_cursor = if draggable { Cursor::Move } else { Cursor::Default };
    let nodes = objects
        .iter()
        .map(|obj| {
            let origin = camera.world_to_screen(obj.rect.origin());
            NodeView {
                id: obj.id,
                label: obj.label(),
                rect: obj.rect,
                screen_rect: Rect::new(origin.x, origin.y, obj.rect.w * camera.scale, obj.rect.h * camera.scale),
                selected: selection.contains(&obj.id),
                cursor: node_cursor,
            }
        })
        .collect();

    Scene {
        background: viewport.config().background.clone(),
        pan_cursor,
        camera,
        world_transform: viewport.world_transform(),
        zoom_percent: viewport.zoom_percent(),
        nodes,
    }
}

/// Draw a scene. `viewport_w` / `viewport_h` are CSS pixels; `dpr` is the device pixel ratio.
///
/// # Errors
///
/// Returns `Err` if any `Canvas2D` call fails.
pub fn draw(
    ctx: &CanvasRenderingContext2d,
    scene: &Scene,
    viewport_w: f64,
    viewport_h: f64,
    dpr: f64,
) -> Result<(), JsValue> {
    // Layer 1: pan layer backdrop.
    ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0)?;
    ctx.set_fill_style_str(&scene.background);
    ctx.fill_rect(0.0, 0.0, viewport_w, viewport_h);

    // Layer 2: world.
    ctx.save();
    ctx.translate(scene.camera.x, scene.camera.y)?;
    ctx.scale(scene.camera.scale, scene.camera.scale)?;
    for node in &scene.nodes {
        draw_node(ctx, node)?;
    }
    ctx.restore();

    // Layer 3: zoom readout.
    draw_hud(ctx, scene.zoom_percent)
}

fn draw_node(ctx: &CanvasRenderingContext2d, node: &NodeView) -> Result<(), JsValue> {
    let r = node.rect;
    ctx.save();
    rounded_rect_path(ctx, r, NODE_CORNER_RADIUS)?;
    ctx.set_fill_style_str(NODE_FILL);
    ctx.fill();

    let (color, width) = if node.selected {
        (NODE_BORDER_SELECTED, NODE_BORDER_WIDTH_SELECTED)
    } else {
        (NODE_BORDER, NODE_BORDER_WIDTH)
    };
    ctx.set_stroke_style_str(color);
    ctx.set_line_width(width);
    ctx.stroke();

    // Clip the label to the card.
    ctx.clip();
    ctx.set_fill_style_str(NODE_LABEL_COLOR);
    ctx.set_text_align("center");
    ctx.set_text_baseline("middle");
    ctx.set_font("600 14px system-ui, sans-serif");
    let center = Point::new(r.x + r.w * 0.5, r.y + r.h * 0.5);
    ctx.fill_text(&node.label, center.x, center.y)?;
    ctx.restore();
    Ok(())
}

/// Trace a rounded rectangle; the radius shrinks to fit small cards.
fn rounded_rect_path(ctx: &CanvasRenderingContext2d, r: Rect, radius: f64) -> Result<(), JsValue> {
    let radius = radius.min(r.w * 0.5).min(r.h * 0.5).max(0.0);
    let (left, top, right, bottom) = (r.x, r.y, r.x + r.w, r.y + r.h);
    ctx.begin_path();
    ctx.move_to(left + radius, top);
    ctx.arc_to(right, top, right, bottom, radius)?;
    ctx.arc_to(right, bottom, left, bottom, radius)?;
    ctx.arc_to(left, bottom, left, top, radius)?;
    ctx.arc_to(left, top, right, top, radius)?;
    ctx.close_path();
    Ok(())
}

fn draw_hud(ctx: &CanvasRenderingContext2d, zoom_percent: i64) -> Result<(), JsValue> {
    ctx.save();
    ctx.set_fill_style_str("#fff");
    ctx.fill_rect(12.0, 12.0, 96.0, 28.0);
    ctx.set_stroke_style_str("#ddd");
    ctx.set_line_width(1.0);
    ctx.stroke_rect(12.0, 12.0, 96.0, 28.0);
    ctx.set_fill_style_str("#222");
    ctx.set_text_align("left");
    ctx.set_text_baseline("middle");
    ctx.set_font("13px system-ui, sans-serif");
    ctx.fill_text(&format!("Zoom: {zoom_percent}%"), 22.0, 26.0)?;
    ctx.restore();
    Ok(())
}
