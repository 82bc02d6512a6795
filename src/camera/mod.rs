//! Camera system for orbiting splat models.
//!
//! Provides an observable camera, a damped orbit controller with pan, zoom
//! and smooth transitions, and the snapshot type used to mirror one
//! controller onto another.

/// Damped orbit/pan/zoom controller driven by input surface events.
pub mod controller;
/// Observable camera pose shared between controller and renderer.
pub mod core;
/// Spherical orbit state and pose math.
pub mod state;
/// Completion handles for smooth pose transitions.
pub mod transition;

pub use controller::OrbitController;
pub use core::{CameraPose, CameraSubscription, SharedCamera};
pub use state::{OrbitPose, OrbitSnapshot};
pub use transition::TransitionHandle;
