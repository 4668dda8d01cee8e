use winit::dpi::PhysicalPosition;
use winit::event::{ElementState, KeyEvent, Touch, TouchPhase as WinitTouchPhase};
use winit::keyboard::PhysicalKey;
use winit::window::Window;

use crate::coords::Vec2;
use crate::input::{InputEvent, KeyState, PointerSample, TouchPhase};

/// Contact id used when the primary mouse button emulates a finger.
///
/// Touch ids from winit are small counters; this one never collides.
pub const MOUSE_POINTER_ID: u64 = u64::MAX;

/// Splits a winit touch into contact id, phase and logical position.
pub fn translate_touch(window: &Window, touch: &Touch) -> (u64, TouchPhase, PointerSample) {
    let phase = match touch.phase {
        WinitTouchPhase::Started => TouchPhase::Started,
        WinitTouchPhase::Moved => TouchPhase::Moved,
        WinitTouchPhase::Ended => TouchPhase::Ended,
        WinitTouchPhase::Cancelled => TouchPhase::Cancelled,
    };
    (touch.id, phase, to_logical(window, touch.location))
}

/// Maps a mouse button transition onto a touch phase.
pub fn mouse_phase(state: ElementState) -> TouchPhase {
    match state {
        ElementState::Pressed => TouchPhase::Started,
        ElementState::Released => TouchPhase::Ended,
    }
}

pub fn translate_key(event: &KeyEvent) -> InputEvent {
    let state = match event.state {
        ElementState::Pressed => KeyState::Pressed,
        ElementState::Released => KeyState::Released,
    };

    let code = match event.physical_key {
        PhysicalKey::Code(code) => code as u32,
        // NativeKeyCode carries no stable numeric value in winit 0.30.
        PhysicalKey::Unidentified(_) => 0,
    };

    InputEvent::Key {
        code,
        state,
        repeat: event.repeat,
    }
}

pub fn to_logical(window: &Window, pos: PhysicalPosition<f64>) -> PointerSample {
    let logical = pos.to_logical::<f64>(window.scale_factor());
    Vec2::new(logical.x as f32, logical.y as f32)
}
