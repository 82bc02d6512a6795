//! Spherical orbit state and its conversion to a camera pose.
//!
//! Sign conventions: azimuth `alpha` turns the eye around +Y, elevation
//! `beta` moves it toward -Y, and
//! at `alpha = beta = 0` the eye sits on -Z looking down +Z.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use super::core::CameraPose;

/// Initial spherical pose handed to a new controller.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbitPose {
    /// Azimuth in radians.
    pub alpha: f32,
    /// Elevation in radians.
    pub beta: f32,
    /// Distance from the look-at point.
    pub radius: f32,
    /// Look-at point.
    pub target: Vec3,
}

impl Default for OrbitPose {
    fn default() -> Self {
        Self {
            alpha: 0.5,
            beta: 0.5,
            radius: 5.0,
            target: Vec3::ZERO,
        }
    }
}

/// The eight synchronized fields of a controller: current and desired
/// spherical coordinates plus current and desired look-at point.
///
/// Obtained from `OrbitController::state` and applied with
/// `OrbitController::set_state` to mirror one viewer onto another.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrbitSnapshot {
    /// Current (eased) azimuth.
    pub alpha: f32,
    /// Current (eased) elevation.
    pub beta: f32,
    /// Current (eased) distance.
    pub radius: f32,
    /// Current (eased) look-at point.
    pub target: Vec3,
    /// Azimuth being eased toward.
    pub desired_alpha: f32,
    /// Elevation being eased toward.
    pub desired_beta: f32,
    /// Distance being eased toward.
    pub desired_radius: f32,
    /// Look-at point being eased toward.
    pub desired_target: Vec3,
}

impl From<OrbitPose> for OrbitSnapshot {
    fn from(pose: OrbitPose) -> Self {
        Self {
            alpha: pose.alpha,
            beta: pose.beta,
            radius: pose.radius,
            target: pose.target,
            desired_alpha: pose.alpha,
            desired_beta: pose.beta,
            desired_radius: pose.radius,
            desired_target: pose.target,
        }
    }
}

impl OrbitSnapshot {
    /// Whether every eased spherical value is within `threshold` of its
    /// desired value. The look-at point is not considered.
    #[must_use]
    pub fn converged(&self, threshold: f32) -> bool {
        (self.alpha - self.desired_alpha).abs() < threshold
            && (self.beta - self.desired_beta).abs() < threshold
            && (self.radius - self.desired_radius).abs() < threshold
    }

    /// Jump the eased spherical values onto their desired values.
    pub fn snap_spherical(&mut self) {
        self.alpha = self.desired_alpha;
        self.beta = self.desired_beta;
        self.radius = self.desired_radius;
    }

    /// Camera pose for the current (eased) values.
    #[must_use]
    pub fn camera_pose(&self) -> CameraPose {
        let position =
            orbit_position(self.target, self.alpha, self.beta, self.radius);
        CameraPose {
            position,
            rotation: look_rotation(position, self.target),
        }
    }
}

/// Linear interpolation from `a` to `b`; exact at both ends.
#[must_use]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    (1.0 - t) * a + t * b
}

/// Eye position orbiting `target` at the given spherical coordinates.
#[must_use]
pub fn orbit_position(
    target: Vec3,
    alpha: f32,
    beta: f32,
    radius: f32,
) -> Vec3 {
    let (sin_a, cos_a) = alpha.sin_cos();
    let (sin_b, cos_b) = beta.sin_cos();
    target
        + Vec3::new(
            radius * sin_a * cos_b,
            -radius * sin_b,
            -radius * cos_a * cos_b,
        )
}

/// Inverse of [`orbit_position`]: the look-at point `radius` in front of an
/// eye at `position` whose view is described by `alpha`/`beta`.
#[must_use]
pub fn orbit_target(
    position: Vec3,
    alpha: f32,
    beta: f32,
    radius: f32,
) -> Vec3 {
    let (sin_a, cos_a) = alpha.sin_cos();
    let (sin_b, cos_b) = beta.sin_cos();
    position
        + Vec3::new(
            -radius * sin_a * cos_b,
            radius * sin_b,
            radius * cos_a * cos_b,
        )
}

/// Zero-roll rotation looking from `eye` toward `target`.
#[must_use]
pub fn look_rotation(eye: Vec3, target: Vec3) -> Quat {
    let dir = (target - eye).normalize_or_zero();
    let pitch = (-dir.y).clamp(-1.0, 1.0).asin();
    let yaw = dir.x.atan2(dir.z);
    CameraPose::rotation_from_euler(Vec3::new(pitch, yaw, 0.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_angles_put_eye_behind_target() {
        let eye = orbit_position(Vec3::new(1.0, 2.0, 3.0), 0.0, 0.0, 4.0);
        assert!(eye.abs_diff_eq(Vec3::new(1.0, 2.0, -1.0), 1e-6));
        let rotation = look_rotation(eye, Vec3::new(1.0, 2.0, 3.0));
        assert!(rotation.abs_diff_eq(Quat::IDENTITY, 1e-6));
    }

    #[test]
    fn positive_beta_lowers_eye() {
        let eye = orbit_position(Vec3::ZERO, 0.0, 0.4, 2.0);
        assert!(eye.y < 0.0);
    }

    #[test]
    fn orbit_target_inverts_orbit_position() {
        let target = Vec3::new(-0.5, 0.25, 2.0);
        let eye = orbit_position(target, 1.1, -0.3, 6.0);
        assert!(orbit_target(eye, 1.1, -0.3, 6.0).abs_diff_eq(target, 1e-5));
    }

    #[test]
    fn look_rotation_recovers_angles() {
        let eye = orbit_position(Vec3::ZERO, 0.7, 0.2, 3.0);
        let euler = CameraPose {
            position: eye,
            rotation: look_rotation(eye, Vec3::ZERO),
        }
        .euler();
        assert!((-euler.y - 0.7).abs() < 1e-5);
        assert!((-euler.x - 0.2).abs() < 1e-5);
    }

    #[test]
    fn lerp_endpoints() {
        assert_eq!(lerp(2.0, 5.0, 0.0), 2.0);
        assert_eq!(lerp(2.0, 5.0, 1.0), 5.0);
    }
}
