use web_time::{Duration, Instant};

/// Frame clock: time since the previous frame plus a smoothed FPS
/// estimate.
#[derive(Debug, Clone)]
pub struct FrameTiming {
    /// Timestamp of the previous tick, if any
    last_frame: Option<Instant>,
    /// Smoothed FPS using exponential moving average
    smoothed_fps: f32,
    /// Smoothing factor (lower = smoother, 0.0-1.0)
    smoothing: f32,
}

impl Default for FrameTiming {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameTiming {
    /// Create a clock that has not seen a frame yet.
    #[must_use]
    pub fn new() -> Self {
        Self {
            last_frame: None,
            smoothed_fps: 60.0, // Start with reasonable default
            smoothing: 0.05,
        }
    }

    /// Mark a frame at `now` and return the time since the previous one
    /// (zero on the first frame).
    pub fn tick(&mut self, now: Instant) -> Duration {
        let elapsed = self
            .last_frame
            .map_or(Duration::ZERO, |last| now.saturating_duration_since(last));
        self.last_frame = Some(now);

        let frame_time = elapsed.as_secs_f32();
        if frame_time > 0.0 {
            let instant_fps = 1.0 / frame_time;
            // Exponential moving average for smooth display
            self.smoothed_fps = self.smoothed_fps * (1.0 - self.smoothing)
                + instant_fps * self.smoothing;
        }
        elapsed
    }

    /// Get the current FPS (smoothed)
    #[must_use]
    pub fn fps(&self) -> f32 {
        self.smoothed_fps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_tick_has_zero_delta() {
        let mut timing = FrameTiming::new();
        assert_eq!(timing.tick(Instant::now()), Duration::ZERO);
        assert_eq!(timing.fps(), 60.0);
    }

    #[test]
    fn clock_going_backwards_yields_zero_delta() {
        let mut timing = FrameTiming::new();
        let start = Instant::now();
        let _ = timing.tick(start + Duration::from_millis(50));
        assert_eq!(timing.tick(start), Duration::ZERO);
        assert_eq!(timing.fps(), 60.0);
    }

    #[test]
    fn fps_moves_toward_frame_rate() {
        let mut timing = FrameTiming::new();
        let start = Instant::now();
        let _ = timing.tick(start);
        let dt = timing.tick(start + Duration::from_millis(10));
        assert_eq!(dt, Duration::from_millis(10));
        assert!(timing.fps() > 60.0);
    }
}
