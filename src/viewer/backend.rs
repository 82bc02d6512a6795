//! Narrow interfaces to the rendering collaborator.
//!
//! The crate never draws or parses splats itself. A host supplies a scene
//! container, a renderer and a model loader through these traits.

use futures::future::LocalBoxFuture;
use glam::Quat;

use crate::camera::CameraPose;
use crate::error::OrbitError;

/// Scene container a loaded model is placed into.
pub trait SplatScene {
    /// Handle to a loaded model.
    type Model;

    /// Add `model` to the scene with the given orientation fix applied.
    fn insert(&mut self, model: Self::Model, rotation: Quat);

    /// Remove and return the model currently in the scene, if any.
    fn clear(&mut self) -> Option<Self::Model>;
}

/// Draws a scene through a camera pose onto the viewer's surface.
pub trait SplatRenderer<S: SplatScene> {
    /// Render one frame.
    fn render(&mut self, scene: &S, camera: CameraPose);
}

/// Asynchronously resolves model handles from source paths.
pub trait ModelLoader {
    /// Handle produced on success.
    type Model;

    /// Fetch and parse the model at `path`.
    ///
    /// Failures are reported as [`OrbitError::ModelLoad`]; the caller
    /// decides whether they matter.
    fn load<'a>(
        &'a self,
        path: &'a str,
    ) -> LocalBoxFuture<'a, Result<Self::Model, OrbitError>>;
}
