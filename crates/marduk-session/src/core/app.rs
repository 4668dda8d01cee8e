use crate::input::PointerSample;
use crate::time::FrameTime;

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Consumer of single-pointer drag gestures.
///
/// `begin_drag` and `drag_move` return whether the gesture was handled.
/// Coordinates are logical pixels, origin top-left.
pub trait DragTarget {
    fn begin_drag(&mut self, x: f32, y: f32) -> bool;

    fn drag_move(&mut self, x: f32, y: f32) -> bool;

    fn end_drag(&mut self);
}

/// Application-side gesture consumer (camera / view manipulation).
pub trait InputController: DragTarget {
    fn start_pinch(&mut self, a: PointerSample, b: PointerSample);

    fn pinch_move(&mut self, a: PointerSample, b: PointerSample);

    fn end_pinch(&mut self);

    /// Called when a double tap is recognized.
    fn double_tap(&mut self, at: PointerSample) {
        let _ = at;
    }
}

/// Application contract driven by a session.
///
/// `S` is the presentation surface type of the backend in use.
pub trait App<S>: InputController {
    /// Surface size changed. Called with physical pixels before the next
    /// `on_frame`.
    fn on_resize(&mut self, width: u32, height: u32);

    /// The surface the app renders into was replaced (`Some`) or released
    /// (`None`). Anything derived from the old surface must be dropped.
    fn reset_swap_chain(&mut self, surface: Option<&S>) {
        let _ = surface;
    }

    /// Renders and presents one frame.
    fn on_frame(&mut self, surface: &mut S, time: FrameTime) -> AppControl;
}

/// Overlay that never claims a gesture.
#[derive(Debug, Copy, Clone, Default)]
pub struct NoOverlay;

impl DragTarget for NoOverlay {
    fn begin_drag(&mut self, _x: f32, _y: f32) -> bool {
        false
    }

    fn drag_move(&mut self, _x: f32, _y: f32) -> bool {
        false
    }

    fn end_drag(&mut self) {}
}
