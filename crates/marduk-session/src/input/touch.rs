use std::time::Duration;

use super::types::{MotionAction, MotionEvent, PointerSample, TouchPointer};

/// Phase of a single contact as reported by the platform.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum TouchPhase {
    Started,
    Moved,
    Ended,
    Cancelled,
}

/// Turns per-contact updates into aggregated [`MotionEvent`]s.
///
/// Windowing layers report each finger on its own; recognizers need the
/// whole set of contacts with every event, in the order they went down.
#[derive(Debug, Default)]
pub struct TouchTracker {
    active: Vec<TouchPointer>,
}

impl TouchTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of contacts currently down.
    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    pub fn is_tracking(&self, id: u64) -> bool {
        self.active.iter().any(|p| p.id == id)
    }

    /// Drops all contacts without emitting anything.
    pub fn reset(&mut self) {
        self.active.clear();
    }

    /// Applies one contact update. Returns `None` for updates that carry no
    /// new information (unknown contact, motion without movement).
    pub fn update(
        &mut self,
        id: u64,
        phase: TouchPhase,
        pos: PointerSample,
        time: Duration,
    ) -> Option<MotionEvent> {
        match phase {
            TouchPhase::Started => {
                if self.is_tracking(id) {
                    return self.update(id, TouchPhase::Moved, pos, time);
                }

                self.active.push(TouchPointer { id, pos });
                let action = match self.active.len() {
                    1 => MotionAction::Down,
                    n => MotionAction::PointerDown(n - 1),
                };
                Some(MotionEvent::new(action, self.active.clone(), time))
            }

            TouchPhase::Moved => {
                let pointer = self.active.iter_mut().find(|p| p.id == id)?;
                if pointer.pos == pos {
                    return None;
                }
                pointer.pos = pos;
                Some(MotionEvent::new(MotionAction::Move, self.active.clone(), time))
            }

            TouchPhase::Ended => {
                let index = self.active.iter().position(|p| p.id == id)?;
                self.active[index].pos = pos;

                // The lifting contact is still part of this event.
                let pointers = self.active.clone();
                self.active.remove(index);

                let action = if self.active.is_empty() {
                    MotionAction::Up
                } else {
                    MotionAction::PointerUp(index)
                };
                Some(MotionEvent::new(action, pointers, time))
            }

            TouchPhase::Cancelled => {
                if !self.is_tracking(id) {
                    return None;
                }
                // One cancelled contact aborts the whole stream.
                let pointers = std::mem::take(&mut self.active);
                Some(MotionEvent::new(MotionAction::Cancel, pointers, time))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Vec2;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    // ── single contact ────────────────────────────────────────────────────

    #[test]
    fn single_contact_down_move_up() {
        let mut t = TouchTracker::new();

        let down = t.update(1, TouchPhase::Started, Vec2::new(1.0, 2.0), ms(0)).unwrap();
        assert_eq!(down.action, MotionAction::Down);
        assert_eq!(down.pointer_count(), 1);

        let mv = t.update(1, TouchPhase::Moved, Vec2::new(3.0, 4.0), ms(16)).unwrap();
        assert_eq!(mv.action, MotionAction::Move);
        assert_eq!(mv.pointers[0].pos, Vec2::new(3.0, 4.0));

        let up = t.update(1, TouchPhase::Ended, Vec2::new(3.0, 4.0), ms(32)).unwrap();
        assert_eq!(up.action, MotionAction::Up);
        assert_eq!(up.pointer_count(), 1);
        assert_eq!(t.active_count(), 0);
    }

    #[test]
    fn stationary_move_is_dropped() {
        let mut t = TouchTracker::new();
        t.update(1, TouchPhase::Started, Vec2::new(5.0, 5.0), ms(0));
        assert!(t.update(1, TouchPhase::Moved, Vec2::new(5.0, 5.0), ms(8)).is_none());
    }

    #[test]
    fn unknown_contact_is_ignored() {
        let mut t = TouchTracker::new();
        assert!(t.update(9, TouchPhase::Moved, Vec2::new(0.0, 0.0), ms(0)).is_none());
        assert!(t.update(9, TouchPhase::Ended, Vec2::new(0.0, 0.0), ms(0)).is_none());
        assert!(t.update(9, TouchPhase::Cancelled, Vec2::new(0.0, 0.0), ms(0)).is_none());
    }

    // ── multi contact ─────────────────────────────────────────────────────

    #[test]
    fn second_contact_is_pointer_down_with_index() {
        let mut t = TouchTracker::new();
        t.update(1, TouchPhase::Started, Vec2::new(0.0, 0.0), ms(0));
        let ev = t.update(7, TouchPhase::Started, Vec2::new(10.0, 0.0), ms(5)).unwrap();
        assert_eq!(ev.action, MotionAction::PointerDown(1));
        assert_eq!(ev.action_pointer().map(|p| p.id), Some(7));
    }

    #[test]
    fn first_contact_lifting_keeps_the_other() {
        let mut t = TouchTracker::new();
        t.update(1, TouchPhase::Started, Vec2::new(0.0, 0.0), ms(0));
        t.update(2, TouchPhase::Started, Vec2::new(10.0, 0.0), ms(5));

        let ev = t.update(1, TouchPhase::Ended, Vec2::new(0.0, 0.0), ms(10)).unwrap();
        assert_eq!(ev.action, MotionAction::PointerUp(0));
        assert_eq!(ev.pointer_count(), 2);
        assert!(t.is_tracking(2));
        assert!(!t.is_tracking(1));
    }

    #[test]
    fn cancel_aborts_every_contact() {
        let mut t = TouchTracker::new();
        t.update(1, TouchPhase::Started, Vec2::new(0.0, 0.0), ms(0));
        t.update(2, TouchPhase::Started, Vec2::new(10.0, 0.0), ms(5));
        let ev = t.update(2, TouchPhase::Cancelled, Vec2::new(10.0, 0.0), ms(6)).unwrap();
        assert_eq!(ev.action, MotionAction::Cancel);
        assert_eq!(ev.pointer_count(), 2);
        assert_eq!(t.active_count(), 0);
    }
}
