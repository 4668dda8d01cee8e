use super::{GestureRecognizer, GestureState};
use crate::input::{MotionAction, MotionEvent, PointerSample};

/// Single-pointer drag tracker.
///
/// Reports `Start` on the first press, `Move` while exactly one contact is
/// down, `End` when the last contact lifts. While a second finger is down
/// the drag is dormant; when the extra fingers lift and one contact
/// remains, the drag re-anchors on it with a fresh `Start`.
#[derive(Debug, Default)]
pub struct DragRecognizer {
    /// Contact ids in press order.
    tracked: Vec<u64>,
    pointer: Option<PointerSample>,
    active: bool,
}

impl DragRecognizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Position of the dragging contact as of the last event.
    pub fn pointer(&self) -> Option<PointerSample> {
        self.pointer
    }

    fn sample(&mut self, event: &MotionEvent) {
        if let Some(p) = self.tracked.first().and_then(|id| event.find(*id)) {
            self.pointer = Some(p.pos);
        }
    }
}

impl GestureRecognizer for DragRecognizer {
    fn detect(&mut self, event: &MotionEvent) -> GestureState {
        match event.action {
            MotionAction::Down => {
                self.tracked.clear();
                let Some(p) = event.action_pointer() else {
                    return GestureState::Idle;
                };
                self.tracked.push(p.id);
                self.pointer = Some(p.pos);
                self.active = true;
                GestureState::Start
            }

            MotionAction::PointerDown(_) => {
                if let Some(p) = event.action_pointer() {
                    self.tracked.push(p.id);
                }
                GestureState::Idle
            }

            MotionAction::Move => {
                if self.active && event.pointer_count() == 1 {
                    self.sample(event);
                    GestureState::Move
                } else {
                    GestureState::Idle
                }
            }

            MotionAction::PointerUp(_) => {
                if let Some(p) = event.action_pointer() {
                    let id = p.id;
                    self.tracked.retain(|t| *t != id);
                }
                if self.active && self.tracked.len() == 1 {
                    self.sample(event);
                    GestureState::Start
                } else {
                    GestureState::Idle
                }
            }

            MotionAction::Up => {
                self.tracked.clear();
                if std::mem::take(&mut self.active) {
                    GestureState::End
                } else {
                    GestureState::Idle
                }
            }

            MotionAction::Cancel => {
                self.tracked.clear();
                if std::mem::take(&mut self.active) {
                    GestureState::Canceled
                } else {
                    GestureState::Idle
                }
            }
        }
    }

    fn reset(&mut self) {
        self.tracked.clear();
        self.pointer = None;
        self.active = false;
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::input::TouchPointer;

    fn ev(action: MotionAction, pointers: &[(u64, f32, f32)]) -> MotionEvent {
        MotionEvent::new(
            action,
            pointers.iter().map(|&(id, x, y)| TouchPointer::new(id, x, y)).collect(),
            Duration::ZERO,
        )
    }

    #[test]
    fn start_move_end() {
        let mut d = DragRecognizer::new();
        assert_eq!(d.detect(&ev(MotionAction::Down, &[(1, 10.0, 10.0)])), GestureState::Start);
        assert_eq!(d.pointer(), Some(PointerSample::new(10.0, 10.0)));

        assert_eq!(d.detect(&ev(MotionAction::Move, &[(1, 12.0, 11.0)])), GestureState::Move);
        assert_eq!(d.pointer(), Some(PointerSample::new(12.0, 11.0)));

        assert_eq!(d.detect(&ev(MotionAction::Up, &[(1, 12.0, 11.0)])), GestureState::End);
    }

    #[test]
    fn dormant_while_two_fingers_then_reanchors() {
        let mut d = DragRecognizer::new();
        d.detect(&ev(MotionAction::Down, &[(1, 0.0, 0.0)]));
        let two = [(1, 0.0, 0.0), (2, 50.0, 0.0)];
        assert_eq!(d.detect(&ev(MotionAction::PointerDown(1), &two)), GestureState::Idle);
        assert_eq!(d.detect(&ev(MotionAction::Move, &two)), GestureState::Idle);

        // First finger lifts; the drag continues on the second one.
        assert_eq!(d.detect(&ev(MotionAction::PointerUp(0), &two)), GestureState::Start);
        assert_eq!(d.pointer(), Some(PointerSample::new(50.0, 0.0)));
    }

    #[test]
    fn cancel_reports_canceled_once() {
        let mut d = DragRecognizer::new();
        d.detect(&ev(MotionAction::Down, &[(1, 0.0, 0.0)]));
        assert_eq!(d.detect(&ev(MotionAction::Cancel, &[(1, 0.0, 0.0)])), GestureState::Canceled);
        assert_eq!(d.detect(&ev(MotionAction::Cancel, &[])), GestureState::Idle);
    }

    #[test]
    fn move_without_press_is_idle() {
        let mut d = DragRecognizer::new();
        assert_eq!(d.detect(&ev(MotionAction::Move, &[(1, 5.0, 5.0)])), GestureState::Idle);
    }
}
