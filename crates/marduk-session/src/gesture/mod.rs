//! Gesture recognition and routing.
//!
//! Three recognizers (double tap, single-pointer drag, two-pointer pinch)
//! are fed every motion event. [`GestureDispatcher`] arbitrates their
//! output between an overlay and the application.

mod dispatch;
mod drag;
mod pinch;
mod state;
mod tap;

pub use dispatch::{DragOwner, GestureDispatcher, GestureFrame};
pub use drag::DragRecognizer;
pub use pinch::PinchRecognizer;
pub use state::{GestureConfig, GestureRecognizer, GestureState};
pub use tap::TapRecognizer;
