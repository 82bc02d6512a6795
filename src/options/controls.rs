use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Controls", inline)]
#[serde(default)]
/// Orbit-control bounds and sensitivities.
pub struct OrbitSettings {
    /// Lowest elevation in degrees.
    #[schemars(title = "Min Angle", extend("step" = 1.0))]
    pub min_angle: f32,
    /// Highest elevation in degrees.
    #[schemars(
        title = "Max Angle",
        range(min = 0.0, max = 90.0),
        extend("step" = 1.0)
    )]
    pub max_angle: f32,
    /// Closest allowed camera distance.
    #[schemars(
        title = "Min Zoom",
        range(min = 0.01, max = 10.0),
        extend("step" = 0.01)
    )]
    pub min_zoom: f32,
    /// Farthest allowed camera distance.
    #[schemars(
        title = "Max Zoom",
        range(min = 1.0, max = 200.0),
        extend("step" = 1.0)
    )]
    pub max_zoom: f32,
    /// Rotation sensitivity multiplier.
    #[schemars(
        title = "Orbit Speed",
        range(min = 0.1, max = 5.0),
        extend("step" = 0.05)
    )]
    pub orbit_speed: f32,
    /// Pan sensitivity multiplier.
    #[schemars(
        title = "Pan Speed",
        range(min = 0.1, max = 5.0),
        extend("step" = 0.05)
    )]
    pub pan_speed: f32,
    /// Zoom sensitivity multiplier.
    #[schemars(
        title = "Zoom Speed",
        range(min = 0.1, max = 5.0),
        extend("step" = 0.05)
    )]
    pub zoom_speed: f32,
    /// Per-frame easing factor in `0..=1` (1 = no smoothing).
    #[schemars(
        title = "Damping",
        range(min = 0.01, max = 1.0),
        extend("step" = 0.01)
    )]
    pub damping: f32,
    /// Largest distance of the look-at point from the origin, if bounded.
    #[schemars(skip)]
    pub max_pan_distance: Option<f32>,
}

impl Default for OrbitSettings {
    fn default() -> Self {
        Self {
            min_angle: -90.0,
            max_angle: 90.0,
            min_zoom: 0.1,
            max_zoom: 30.0,
            orbit_speed: 1.0,
            pan_speed: 1.0,
            zoom_speed: 1.0,
            damping: 0.12,
            max_pan_distance: None,
        }
    }
}

impl OrbitSettings {
    /// Clamp an elevation (radians) to the configured angle bounds.
    #[must_use]
    pub fn clamp_beta(&self, beta: f32) -> f32 {
        beta.max(self.min_angle.to_radians())
            .min(self.max_angle.to_radians())
    }

    /// Clamp a distance to the configured zoom bounds.
    #[must_use]
    pub fn clamp_radius(&self, radius: f32) -> f32 {
        radius.max(self.min_zoom).min(self.max_zoom)
    }

    /// Sensitivity scale in `0.1..=1.0` growing with `radius`'s position
    /// between the zoom bounds, so gestures feel the same near and far.
    #[must_use]
    pub fn zoom_norm(&self, radius: f32) -> f32 {
        0.1 + (0.9 * (radius - self.min_zoom)) / (self.max_zoom - self.min_zoom)
    }
}
