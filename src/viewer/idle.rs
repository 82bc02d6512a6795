use web_time::{Duration, Instant};

use crate::options::ViewerOptions;

/// Turntable rotation that starts after a period without user input.
#[derive(Debug, Clone)]
pub struct IdleRotation {
    enabled: bool,
    /// Radians per second.
    speed: f32,
    delay: Duration,
    last_interaction: Option<Instant>,
}

impl IdleRotation {
    /// Create from viewer options. Rotation may start immediately until the
    /// first interaction is recorded.
    ///
    /// An idle delay too large for a [`Duration`] means rotation never
    /// resumes once the user has interacted.
    #[must_use]
    pub fn new(options: &ViewerOptions) -> Self {
        let secs = options.idle_delay_secs.max(0.0);
        let delay = Duration::try_from_secs_f32(secs).unwrap_or_else(|_| {
            log::warn!("idle delay {secs} s out of range, rotation stays off");
            Duration::MAX
        });
        Self {
            enabled: options.auto_rotate,
            speed: options.auto_rotate_speed,
            delay,
            last_interaction: None,
        }
    }

    /// Turn idle rotation on or off.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Whether idle rotation is switched on.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Record user input at `now`, postponing rotation by the idle delay.
    pub fn touch(&mut self, now: Instant) {
        self.last_interaction = Some(now);
    }

    /// Azimuth step for a frame of length `dt` at `now`, or `None` while the
    /// user is active (or a gesture is held) or rotation is off.
    #[must_use]
    pub fn step(
        &self,
        now: Instant,
        dt: Duration,
        gesture_active: bool,
    ) -> Option<f32> {
        if !self.enabled || gesture_active {
            return None;
        }
        let idle = self.last_interaction.map_or(true, |last| {
            now.saturating_duration_since(last) >= self.delay
        });
        idle.then(|| self.speed * dt.as_secs_f32())
    }
}
