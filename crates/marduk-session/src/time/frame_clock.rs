use std::time::{Duration, Instant};

/// Timing of one drawn frame.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Seconds since the previous drawn frame, clamped.
    pub dt: f32,

    /// Time the session has spent running, excluding suspended periods.
    pub elapsed: Duration,

    /// Index of the drawn frame, starting at 0.
    pub frame_index: u64,
}

/// Produces [`FrameTime`] for drawn frames only.
///
/// Time spent paused must not show up as a giant `dt` on the first frame
/// after a resume, so the session calls [`FrameClock::resume`] whenever a
/// surface comes back.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Option<Instant>,
    elapsed: Duration,
    frame_index: u64,
    dt_max: Duration,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::with_max_dt(Duration::from_millis(250))
    }

    pub fn with_max_dt(dt_max: Duration) -> Self {
        Self {
            last: None,
            elapsed: Duration::ZERO,
            frame_index: 0,
            dt_max,
        }
    }

    /// Forgets the previous tick so the next frame reports a zero delta.
    pub fn resume(&mut self) {
        self.last = None;
    }

    pub fn tick(&mut self) -> FrameTime {
        self.tick_at(Instant::now())
    }

    pub(crate) fn tick_at(&mut self, now: Instant) -> FrameTime {
        let dt = self
            .last
            .map(|last| now.saturating_duration_since(last).min(self.dt_max))
            .unwrap_or(Duration::ZERO);

        self.last = Some(now);
        self.elapsed += dt;

        let ft = FrameTime {
            dt: dt.as_secs_f32(),
            elapsed: self.elapsed,
            frame_index: self.frame_index,
        };
        self.frame_index = self.frame_index.wrapping_add(1);
        ft
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_tick_has_zero_delta() {
        let mut clock = FrameClock::new();
        let ft = clock.tick_at(Instant::now());
        assert_eq!(ft.dt, 0.0);
        assert_eq!(ft.frame_index, 0);
    }

    #[test]
    fn delta_is_clamped() {
        let mut clock = FrameClock::with_max_dt(Duration::from_millis(100));
        let t0 = Instant::now();
        clock.tick_at(t0);
        let ft = clock.tick_at(t0 + Duration::from_secs(5));
        assert!((ft.dt - 0.1).abs() < 1e-6);
        assert_eq!(ft.elapsed, Duration::from_millis(100));
    }

    #[test]
    fn resume_hides_suspended_time() {
        let mut clock = FrameClock::new();
        let t0 = Instant::now();
        clock.tick_at(t0);
        clock.tick_at(t0 + Duration::from_millis(16));
        clock.resume();
        let ft = clock.tick_at(t0 + Duration::from_secs(60));
        assert_eq!(ft.dt, 0.0);
        assert_eq!(ft.elapsed, Duration::from_millis(16));
        assert_eq!(ft.frame_index, 2);
    }
}
