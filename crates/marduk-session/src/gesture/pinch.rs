use super::{GestureRecognizer, GestureState};
use crate::input::{MotionAction, MotionEvent, PointerSample};

/// Two-pointer pinch tracker.
///
/// `Start` when a second contact goes down, `Move` while two or more are
/// down, `End` when fewer than two remain. The pinch always follows the two
/// oldest contacts; when one of them lifts while others remain, the pinch
/// restarts on the new pair with a fresh `Start`.
#[derive(Debug, Default)]
pub struct PinchRecognizer {
    tracked: Vec<u64>,
    pointers: Option<(PointerSample, PointerSample)>,
    active: bool,
}

impl PinchRecognizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// The two pinching contacts as of the last event.
    pub fn pointers(&self) -> Option<(PointerSample, PointerSample)> {
        self.pointers
    }

    fn sample(&mut self, event: &MotionEvent) -> bool {
        let pair = match self.tracked.as_slice() {
            [a, b, ..] => event.find(*a).zip(event.find(*b)),
            _ => None,
        };
        match pair {
            Some((a, b)) => {
                self.pointers = Some((a.pos, b.pos));
                true
            }
            None => false,
        }
    }

    fn pair(&self) -> Option<(u64, u64)> {
        match self.tracked.as_slice() {
            [a, b, ..] => Some((*a, *b)),
            _ => None,
        }
    }

    fn finish(&mut self, state: GestureState) -> GestureState {
        if std::mem::take(&mut self.active) {
            state
        } else {
            GestureState::Idle
        }
    }
}

impl GestureRecognizer for PinchRecognizer {
    fn detect(&mut self, event: &MotionEvent) -> GestureState {
        match event.action {
            MotionAction::Down => {
                self.tracked.clear();
                self.active = false;
                if let Some(p) = event.action_pointer() {
                    self.tracked.push(p.id);
                }
                GestureState::Idle
            }

            MotionAction::PointerDown(_) => {
                if let Some(p) = event.action_pointer() {
                    self.tracked.push(p.id);
                }
                if !self.active && self.tracked.len() == 2 && self.sample(event) {
                    self.active = true;
                    GestureState::Start
                } else {
                    GestureState::Idle
                }
            }

            MotionAction::Move => {
                if self.active && self.sample(event) {
                    GestureState::Move
                } else {
                    GestureState::Idle
                }
            }

            MotionAction::PointerUp(_) => {
                let before = self.pair();
                if let Some(p) = event.action_pointer() {
                    let id = p.id;
                    self.tracked.retain(|t| *t != id);
                }
                if self.tracked.len() < 2 {
                    self.finish(GestureState::End)
                } else if self.active && self.pair() != before && self.sample(event) {
                    GestureState::Start
                } else {
                    GestureState::Idle
                }
            }

            MotionAction::Up => {
                self.tracked.clear();
                self.finish(GestureState::End)
            }

            MotionAction::Cancel => {
                self.tracked.clear();
                self.finish(GestureState::Canceled)
            }
        }
    }

    fn reset(&mut self) {
        self.tracked.clear();
        self.pointers = None;
        self.active = false;
    }
}
