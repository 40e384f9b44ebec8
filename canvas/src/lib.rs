//! Pannable, zoomable canvas core.
//!
//! The crate models an unbounded 2D workspace viewed through a camera. Raw
//! pointer, wheel and key input is classified by the gesture adapter and
//! turned into camera moves, exclusive selection changes and object drags.
//! The host owns the objects and the selection; the engine only reads them
//! and answers every event with a list of [`engine::Action`]s to apply.
//! Everything except [`engine::Engine`] and [`render::draw`] runs without a
//! browser, which is how the tests drive it.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`camera`] | Camera model, zoom clamping and coordinate conversions |
//! | [`config`] | Host configuration and validation |
//! | [`consts`] | Zoom limits, gesture thresholds and styling defaults |
//! | [`doc`] | Canvas objects, the ordered object store and update values |
//! | [`selection`] | Exclusive selection and its two entry points |
//! | [`input`] | Input events and the gesture state machine |
//! | [`viewport`] | Viewport surface and its imperative handle |
//! | [`drag`] | Per-object drag bindings and zoom-aware translation |
//! | [`board`] | Host callbacks and a plain in-memory host |
//! | [`engine`] | [`engine::EngineCore`] plus the canvas-backed [`engine::Engine`] |
//! | [`render`] | Scene description and 2D context drawing |

pub mod board;
pub mod camera;
pub mod config;
pub mod consts;
pub mod doc;
pub mod drag;
pub mod engine;
pub mod input;
pub mod render;
pub mod selection;
pub mod viewport;
