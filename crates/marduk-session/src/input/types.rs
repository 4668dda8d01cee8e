use std::time::Duration;

use crate::coords::Vec2;

/// Position of one contact in logical pixels (DPI-normalized, origin
/// top-left, +Y down).
pub type PointerSample = Vec2;

/// One finger (or emulated pointer) in a motion event.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TouchPointer {
    /// Platform contact id; stable for the lifetime of the contact.
    pub id: u64,
    pub pos: PointerSample,
}

impl TouchPointer {
    #[inline]
    pub fn new(id: u64, x: f32, y: f32) -> Self {
        Self {
            id,
            pos: Vec2::new(x, y),
        }
    }
}

/// What changed in a motion event.
///
/// Indexed variants refer to `MotionEvent::pointers`.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum MotionAction {
    /// First contact went down.
    Down,
    /// An additional contact went down.
    PointerDown(usize),
    /// One or more contacts moved.
    Move,
    /// A contact lifted while others remain.
    PointerUp(usize),
    /// The last contact lifted.
    Up,
    /// The platform aborted the gesture stream.
    Cancel,
}

/// Aggregated multi-touch event.
///
/// `pointers` lists every contact down at the time of the event, including
/// a contact that is lifting in this event.
#[derive(Debug, Clone, PartialEq)]
pub struct MotionEvent {
    pub action: MotionAction,
    pub pointers: Vec<TouchPointer>,
    /// Monotonic event time.
    pub time: Duration,
}

impl MotionEvent {
    pub fn new(action: MotionAction, pointers: Vec<TouchPointer>, time: Duration) -> Self {
        Self {
            action,
            pointers,
            time,
        }
    }

    #[inline]
    pub fn pointer_count(&self) -> usize {
        self.pointers.len()
    }

    /// Looks a contact up by id.
    pub fn find(&self, id: u64) -> Option<&TouchPointer> {
        self.pointers.iter().find(|p| p.id == id)
    }

    /// The contact the action refers to.
    pub fn action_pointer(&self) -> Option<&TouchPointer> {
        match self.action {
            MotionAction::Down | MotionAction::Up => self.pointers.first(),
            MotionAction::PointerDown(i) | MotionAction::PointerUp(i) => self.pointers.get(i),
            MotionAction::Move | MotionAction::Cancel => None,
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum KeyState {
    Pressed,
    Released,
}

/// Platform-agnostic input events fed to the gesture pipeline.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Touch (or touch-emulating pointer) motion.
    Motion(MotionEvent),

    /// Keyboard input. Not consumed by the gesture pipeline.
    Key {
        /// Stable platform code when available (e.g. scancode).
        code: u32,
        state: KeyState,
        repeat: bool,
    },
}

impl InputEvent {
    pub fn as_motion(&self) -> Option<&MotionEvent> {
        match self {
            InputEvent::Motion(m) => Some(m),
            _ => None,
        }
    }
}
