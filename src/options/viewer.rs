use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use web_time::Duration;

use crate::camera::OrbitPose;
use crate::error::OrbitError;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Viewer", inline)]
#[serde(default)]
/// Multi-viewer coordination parameters.
pub struct ViewerOptions {
    /// Mirror the master viewer onto every other viewer each frame.
    #[schemars(title = "Synchronize Viewers")]
    pub sync_viewers: bool,
    /// Spin the master viewer while nobody is interacting.
    #[schemars(title = "Auto Rotate")]
    pub auto_rotate: bool,
    /// Idle rotation speed in radians per second.
    #[schemars(
        title = "Rotate Speed",
        range(min = 0.0, max = 2.0),
        extend("step" = 0.01)
    )]
    pub auto_rotate_speed: f32,
    /// Seconds without input before idle rotation kicks in.
    #[schemars(
        title = "Idle Delay",
        range(min = 0.0, max = 60.0),
        extend("step" = 0.5)
    )]
    pub idle_delay_secs: f32,
    /// Pose every new viewer starts from.
    #[schemars(skip)]
    pub initial_pose: OrbitPose,
}

impl Default for ViewerOptions {
    fn default() -> Self {
        Self {
            sync_viewers: true,
            auto_rotate: true,
            auto_rotate_speed: 0.15,
            idle_delay_secs: 4.0,
            initial_pose: OrbitPose::default(),
        }
    }
}

impl ViewerOptions {
    /// Reject timing values that cannot drive idle rotation.
    pub fn validate(&self) -> Result<(), OrbitError> {
        if !self.auto_rotate_speed.is_finite() {
            return Err(OrbitError::OptionsParse(format!(
                "viewer.auto_rotate_speed must be finite, got {}",
                self.auto_rotate_speed
            )));
        }
        let delay = self.idle_delay_secs;
        if delay < 0.0 || Duration::try_from_secs_f32(delay).is_err() {
            return Err(OrbitError::OptionsParse(format!(
                "viewer.idle_delay_secs must be a non-negative duration, \
                 got {delay}"
            )));
        }
        Ok(())
    }
}
