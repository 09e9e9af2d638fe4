use std::time::Instant;

/// Upper bound on one frame step after a stall (window drag, breakpoint)
pub const MAX_FRAME_TIME: f32 = 0.1;

/// Measures elapsed time between frames and keeps a smoothed frame rate
pub struct FrameClock {
    last: Instant,
    fps: f32,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    pub fn starting_at(start: Instant) -> Self {
        Self {
            last: start,
            fps: 0.0,
        }
    }

    pub fn tick(&mut self) -> f32 {
        self.advance(Instant::now())
    }

    /// Seconds since the previous call, capped at `MAX_FRAME_TIME`
    pub fn advance(&mut self, now: Instant) -> f32 {
        let elapsed = now.saturating_duration_since(self.last).as_secs_f32();
        self.last = now;

        if elapsed > 0.0 {
            let instant_fps = 1.0 / elapsed;
            self.fps = if self.fps == 0.0 {
                instant_fps
            } else {
                self.fps * 0.9 + instant_fps * 0.1
            };
        }
        elapsed.min(MAX_FRAME_TIME)
    }

    pub fn fps(&self) -> f32 {
        self.fps
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::time::Duration;

    #[test]
    fn advance_reports_elapsed_seconds() {
        let start = Instant::now();
        let mut clock = FrameClock::starting_at(start);
        let dt = clock.advance(start + Duration::from_millis(16));
        assert_relative_eq!(dt, 0.016, epsilon = 1e-6);
        assert_relative_eq!(clock.fps(), 62.5, epsilon = 1e-3);
    }

    #[test]
    fn long_stalls_are_capped() {
        let start = Instant::now();
        let mut clock = FrameClock::starting_at(start);
        assert_eq!(clock.advance(start + Duration::from_secs(3)), MAX_FRAME_TIME);
    }

    #[test]
    fn fps_is_smoothed() {
        let start = Instant::now();
        let mut clock = FrameClock::starting_at(start);
        clock.advance(start + Duration::from_millis(10));
        clock.advance(start + Duration::from_millis(30));
        // 100 fps first, then a 50 fps frame blended in at 10%
        assert_relative_eq!(clock.fps(), 95.0, epsilon = 1e-2);
    }
}
