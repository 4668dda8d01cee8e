use std::time::Duration;

use crate::input::MotionEvent;

/// Output of a recognizer for one motion event.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum GestureState {
    /// Nothing to report for this event.
    #[default]
    Idle,
    /// A discrete gesture (double tap) was recognized.
    Action,
    Start,
    Move,
    End,
    /// The platform aborted the stream mid-gesture.
    Canceled,
}

impl GestureState {
    /// True for the two states that close a continuous gesture.
    #[inline]
    pub fn is_terminal(self) -> bool {
        matches!(self, GestureState::End | GestureState::Canceled)
    }
}

/// Tunables for the recognizers. Distances are logical pixels.
#[derive(Debug, Clone)]
pub struct GestureConfig {
    /// Max time between the first tap's release and the second press.
    pub double_tap_timeout: Duration,
    /// Max press duration that still counts as a tap.
    pub tap_timeout: Duration,
    /// Max distance between the two taps of a double tap.
    pub double_tap_slop: f32,
    /// Travel after which a press is no longer a tap.
    pub touch_slop: f32,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            double_tap_timeout: Duration::from_millis(300),
            tap_timeout: Duration::from_millis(180),
            double_tap_slop: 100.0,
            touch_slop: 8.0,
        }
    }
}

/// A state machine fed one motion event at a time.
pub trait GestureRecognizer {
    fn detect(&mut self, event: &MotionEvent) -> GestureState;

    /// Returns to idle, forgetting any tracked contacts.
    fn reset(&mut self);
}
