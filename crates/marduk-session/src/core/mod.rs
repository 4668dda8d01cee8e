//! Core engine-facing contracts.
//!
//! Defines what a session and its input pipeline expect from application
//! code: frame/resize callbacks and the two gesture consumers (overlay and
//! application controller).

mod app;

pub use app::{App, AppControl, DragTarget, InputController, NoOverlay};
