//! Input subsystem.
//!
//! Public API is platform-agnostic. Platform adapters report contacts one at
//! a time; [`TouchTracker`] folds them into the aggregated [`MotionEvent`]s
//! the gesture recognizers consume.

pub mod platform;
mod touch;
mod types;

pub use touch::{TouchPhase, TouchTracker};
pub use types::{InputEvent, KeyState, MotionAction, MotionEvent, PointerSample, TouchPointer};
