//! Frame timing for the session frame loop.
//!
//! One `FrameClock` per session; it only advances on frames that were
//! actually drawn.

mod frame_clock;

pub use frame_clock::{FrameClock, FrameTime};
