use super::{
    DragRecognizer, GestureConfig, GestureRecognizer, GestureState, PinchRecognizer,
    TapRecognizer,
};
use crate::core::{DragTarget, InputController};
use crate::input::{InputEvent, MotionEvent, PointerSample};

/// Recognizer output for one motion event, with the samples each state
/// refers to.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct GestureFrame {
    pub tap: GestureState,
    pub tap_at: Option<PointerSample>,
    pub drag: GestureState,
    pub drag_pointer: Option<PointerSample>,
    pub pinch: GestureState,
    pub pinch_pointers: Option<(PointerSample, PointerSample)>,
}

/// Which consumer claimed the drag in progress.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum DragOwner {
    /// The overlay accepted `begin_drag`; the application sees nothing of
    /// this gesture.
    Overlay,
    /// The overlay declined the start. Moves are still offered to the
    /// overlay first; the end goes to both.
    Application,
}

/// Runs the recognizers and routes their output.
///
/// Drag gestures go through the overlay first and reach the application
/// only when the overlay declines. Pinch gestures go straight to the
/// application. A double tap suppresses all drag/pinch output of the event
/// it was recognized in.
#[derive(Debug, Default)]
pub struct GestureDispatcher {
    tap: TapRecognizer,
    drag: DragRecognizer,
    pinch: PinchRecognizer,
    drag_owner: Option<DragOwner>,
    pinching: bool,
}

impl GestureDispatcher {
    pub fn new(config: GestureConfig) -> Self {
        Self {
            tap: TapRecognizer::new(config),
            ..Default::default()
        }
    }

    pub fn drag_owner(&self) -> Option<DragOwner> {
        self.drag_owner
    }

    pub fn is_pinching(&self) -> bool {
        self.pinching
    }

    /// Handles one platform input event. Returns true when the event was
    /// consumed (any motion event), false for everything else.
    pub fn handle_input(
        &mut self,
        event: &InputEvent,
        overlay: &mut dyn DragTarget,
        app: &mut dyn InputController,
    ) -> bool {
        let Some(motion) = event.as_motion() else {
            return false;
        };

        let frame = self.recognize(motion);
        self.deliver(&frame, overlay, app);
        true
    }

    /// Feeds all three recognizers.
    pub fn recognize(&mut self, event: &MotionEvent) -> GestureFrame {
        let tap = self.tap.detect(event);
        let drag = self.drag.detect(event);
        let pinch = self.pinch.detect(event);

        GestureFrame {
            tap,
            tap_at: self.tap.position(),
            drag,
            drag_pointer: self.drag.pointer(),
            pinch,
            pinch_pointers: self.pinch.pointers(),
        }
    }

    /// Routes one frame of recognizer output to the consumers.
    pub fn deliver(
        &mut self,
        frame: &GestureFrame,
        overlay: &mut dyn DragTarget,
        app: &mut dyn InputController,
    ) {
        if frame.tap == GestureState::Action {
            log::trace!("double tap at {:?}", frame.tap_at);
            if let Some(at) = frame.tap_at {
                app.double_tap(at);
            }
            return;
        }

        self.deliver_drag(frame, overlay, app);
        self.deliver_pinch(frame, app);
    }

    /// Ends whatever gesture is in flight and returns every recognizer to
    /// idle. Used when the input stream is interrupted (focus or window
    /// loss) so no consumer is left mid-gesture.
    pub fn cancel(&mut self, overlay: &mut dyn DragTarget, app: &mut dyn InputController) {
        self.finish_drag(overlay, app);
        if std::mem::take(&mut self.pinching) {
            app.end_pinch();
        }
        self.reset();
    }

    /// Returns every recognizer to idle without notifying anyone.
    pub fn reset(&mut self) {
        self.tap.reset();
        self.drag.reset();
        self.pinch.reset();
        self.drag_owner = None;
        self.pinching = false;
    }

    fn deliver_drag(
        &mut self,
        frame: &GestureFrame,
        overlay: &mut dyn DragTarget,
        app: &mut dyn InputController,
    ) {
        match frame.drag {
            GestureState::Start => {
                let Some(p) = frame.drag_pointer else { return };
                // A re-anchored drag closes the previous one first.
                self.finish_drag(overlay, app);

                let owner = if overlay.begin_drag(p.x, p.y) {
                    DragOwner::Overlay
                } else {
                    app.begin_drag(p.x, p.y);
                    DragOwner::Application
                };
                log::trace!("drag start at ({}, {}) owned by {:?}", p.x, p.y, owner);
                self.drag_owner = Some(owner);
            }

            GestureState::Move => {
                let Some(p) = frame.drag_pointer else { return };
                match self.drag_owner {
                    Some(DragOwner::Overlay) => {
                        overlay.drag_move(p.x, p.y);
                    }
                    Some(DragOwner::Application) => {
                        if !overlay.drag_move(p.x, p.y) {
                            app.drag_move(p.x, p.y);
                        }
                    }
                    // The start was swallowed by a double tap.
                    None => {}
                }
            }

            GestureState::End | GestureState::Canceled => self.finish_drag(overlay, app),

            GestureState::Idle | GestureState::Action => {}
        }
    }

    fn finish_drag(&mut self, overlay: &mut dyn DragTarget, app: &mut dyn InputController) {
        match self.drag_owner.take() {
            Some(DragOwner::Overlay) => overlay.end_drag(),
            Some(DragOwner::Application) => {
                overlay.end_drag();
                app.end_drag();
            }
            None => {}
        }
    }

    fn deliver_pinch(&mut self, frame: &GestureFrame, app: &mut dyn InputController) {
        match frame.pinch {
            GestureState::Start => {
                if let Some((a, b)) = frame.pinch_pointers {
                    if std::mem::replace(&mut self.pinching, true) {
                        app.end_pinch();
                    }
                    app.start_pinch(a, b);
                }
            }
            GestureState::Move => {
                if let (true, Some((a, b))) = (self.pinching, frame.pinch_pointers) {
                    app.pinch_move(a, b);
                }
            }
            GestureState::End | GestureState::Canceled => {
                if std::mem::take(&mut self.pinching) {
                    app.end_pinch();
                }
            }
            GestureState::Idle | GestureState::Action => {}
        }
    }
}
