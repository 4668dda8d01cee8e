use std::time::Duration;

use super::{GestureConfig, GestureRecognizer, GestureState};
use crate::input::{MotionAction, MotionEvent, PointerSample};

/// Double-tap detector.
///
/// A tap is a press released within `tap_timeout` that did not travel
/// further than `touch_slop`. The second press of a double tap reports
/// [`GestureState::Action`] on its down event, when it lands within
/// `double_tap_slop` of the first tap and within `double_tap_timeout` of
/// its release. Any second finger breaks the pattern.
#[derive(Debug, Default)]
pub struct TapRecognizer {
    config: GestureConfig,
    /// Time and position of the current press, while it can still be a tap.
    press: Option<(Duration, PointerSample)>,
    /// Release time and position of the last completed tap.
    last_tap: Option<(Duration, PointerSample)>,
    recognized_at: Option<PointerSample>,
}

impl TapRecognizer {
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    /// Where the last double tap landed.
    pub fn position(&self) -> Option<PointerSample> {
        self.recognized_at
    }
}

impl GestureRecognizer for TapRecognizer {
    fn detect(&mut self, event: &MotionEvent) -> GestureState {
        self.recognized_at = None;

        match event.action {
            MotionAction::Down => {
                let Some(pos) = event.action_pointer().map(|p| p.pos) else {
                    return GestureState::Idle;
                };

                if let Some((tap_time, tap_pos)) = self.last_tap.take() {
                    let slop = self.config.double_tap_slop;
                    let in_time =
                        event.time.saturating_sub(tap_time) <= self.config.double_tap_timeout;
                    if in_time && tap_pos.distance_squared(pos) < slop * slop {
                        self.press = None;
                        self.recognized_at = Some(pos);
                        return GestureState::Action;
                    }
                }

                self.press = Some((event.time, pos));
            }

            MotionAction::Move => {
                if let Some((_, start)) = self.press {
                    let slop = self.config.touch_slop;
                    let travelled = event
                        .pointers
                        .first()
                        .is_some_and(|p| start.distance_squared(p.pos) > slop * slop);
                    if travelled {
                        self.press = None;
                    }
                }
            }

            MotionAction::Up => {
                if let Some((down_time, pos)) = self.press.take() {
                    if event.time.saturating_sub(down_time) <= self.config.tap_timeout {
                        self.last_tap = Some((event.time, pos));
                    }
                }
            }

            MotionAction::PointerDown(_) | MotionAction::Cancel => {
                self.press = None;
                self.last_tap = None;
            }

            MotionAction::PointerUp(_) => {}
        }

        GestureState::Idle
    }

    fn reset(&mut self) {
        self.press = None;
        self.last_tap = None;
        self.recognized_at = None;
    }
}
