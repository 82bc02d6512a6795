//! Multi-viewer coordination.
//!
//! A [`ViewerRegistry`] owns every viewer on a page, keyed by ID. Each frame
//! it spins the master viewer when idle, mirrors the master's orbit state
//! onto the other viewers, then updates and renders all of them in
//! registration order.
//!
//! ```ignore
//! let mut viewers = ViewerRegistry::new(options);
//! viewers.add_viewer("main-viewer-1", surface, scene, renderer);
//! viewers.load_gallery(&loader, GalleryGroup::Comparison, "stone_1").await;
//!
//! // every animation frame
//! viewers.frame(Instant::now());
//! ```

/// Scene, renderer and model-loader seams implemented by the host.
pub mod backend;
/// Model path resolution for gallery viewer groups.
pub mod gallery;
/// Turntable rotation after a period without input.
pub mod idle;

use std::f32::consts::PI;

use futures::future::join_all;
use glam::Quat;
use rustc_hash::FxHashMap;
use web_time::Instant;

pub use backend::{ModelLoader, SplatRenderer, SplatScene};
pub use gallery::{GalleryGroup, ModelRequest};
pub use idle::IdleRotation;

use crate::camera::{OrbitController, SharedCamera};
use crate::error::OrbitError;
use crate::input::{Dispatch, InputEvent, InputSurface};
use crate::options::Options;
use crate::util::frame_timing::FrameTiming;

/// Orientation applied to every loaded model. Splat files are stored
/// upside down relative to the viewer's Y-up frame.
#[must_use]
pub fn model_orientation() -> Quat {
    Quat::from_rotation_x(PI)
}

/// One viewer: controller, camera, input surface and render backend.
pub struct Viewer<S: SplatScene, R> {
    controls: OrbitController,
    surface: InputSurface,
    scene: S,
    renderer: R,
    model_path: Option<String>,
}

impl<S: SplatScene, R> Viewer<S, R> {
    /// The viewer's orbit controller.
    #[must_use]
    pub fn controls(&self) -> &OrbitController {
        &self.controls
    }

    /// The viewer's camera.
    #[must_use]
    pub fn camera(&self) -> &SharedCamera {
        self.controls.camera()
    }

    /// The surface the controller listens on.
    #[must_use]
    pub fn surface(&self) -> &InputSurface {
        &self.surface
    }

    /// The viewer's scene.
    #[must_use]
    pub fn scene(&self) -> &S {
        &self.scene
    }

    /// The viewer's renderer.
    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Source path of the model currently shown, if any.
    #[must_use]
    pub fn model_path(&self) -> Option<&str> {
        self.model_path.as_deref()
    }
}

/// Owns the viewers on a page and drives them frame by frame.
pub struct ViewerRegistry<S: SplatScene, R: SplatRenderer<S>> {
    options: Options,
    viewers: FxHashMap<String, Viewer<S, R>>,
    /// Registration order, used for deterministic update and render order.
    order: Vec<String>,
    master: Option<String>,
    idle: IdleRotation,
    timing: FrameTiming,
}

impl<S: SplatScene, R: SplatRenderer<S>> ViewerRegistry<S, R> {
    /// Create an empty registry.
    #[must_use]
    pub fn new(options: Options) -> Self {
        let idle = IdleRotation::new(&options.viewer);
        Self {
            options,
            viewers: FxHashMap::default(),
            order: Vec::new(),
            master: None,
            idle,
            timing: FrameTiming::new(),
        }
    }

    /// Register a viewer under `id`, bound to `surface`.
    ///
    /// The controller starts at the configured initial pose with the
    /// configured control settings. The first viewer added becomes the
    /// master. Re-using an ID replaces (and disposes) the previous viewer.
    pub fn add_viewer(
        &mut self,
        id: impl Into<String>,
        surface: InputSurface,
        scene: S,
        renderer: R,
    ) -> &Viewer<S, R> {
        let id = id.into();
        let controls = OrbitController::with_settings(
            SharedCamera::default(),
            &surface,
            self.options.viewer.initial_pose,
            self.options.controls,
        );
        let viewer = Viewer {
            controls,
            surface,
            scene,
            renderer,
            model_path: None,
        };

        if self.viewers.insert(id.clone(), viewer).is_some() {
            log::warn!("viewer {id} replaced");
        } else {
            self.order.push(id.clone());
            log::info!("viewer {id} added");
        }
        if self.master.is_none() {
            self.master = Some(id.clone());
        }
        &self.viewers[&id]
    }

    /// Remove a viewer, detaching its controller. If it was the master, the
    /// earliest remaining viewer takes over.
    pub fn remove_viewer(&mut self, id: &str) -> Option<Viewer<S, R>> {
        let viewer = self.viewers.remove(id)?;
        self.order.retain(|v| v != id);
        if self.master.as_deref() == Some(id) {
            self.master = self.order.first().cloned();
        }
        log::info!("viewer {id} removed");
        Some(viewer)
    }

    /// Make `id` the viewer whose state is mirrored onto the others.
    pub fn set_master(&mut self, id: &str) -> Result<(), OrbitError> {
        if !self.viewers.contains_key(id) {
            return Err(OrbitError::UnknownViewer(id.to_owned()));
        }
        self.master = Some(id.to_owned());
        log::debug!("master viewer is now {id}");
        Ok(())
    }

    /// ID of the master viewer.
    #[must_use]
    pub fn master(&self) -> Option<&str> {
        self.master.as_deref()
    }

    /// Look up a viewer.
    #[must_use]
    pub fn viewer(&self, id: &str) -> Option<&Viewer<S, R>> {
        self.viewers.get(id)
    }

    /// Viewer IDs in registration order.
    #[must_use]
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Number of registered viewers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.viewers.len()
    }

    /// Whether no viewer is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.viewers.is_empty()
    }

    /// Active options.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Turn master-to-slave mirroring on or off.
    pub fn set_sync(&mut self, sync: bool) {
        self.options.viewer.sync_viewers = sync;
    }

    /// Turn idle rotation on or off.
    pub fn set_auto_rotate(&mut self, enabled: bool) {
        self.options.viewer.auto_rotate = enabled;
        self.idle.set_enabled(enabled);
    }

    /// Smoothed frame rate.
    #[must_use]
    pub fn fps(&self) -> f32 {
        self.timing.fps()
    }

    /// Deliver an input event to viewer `id`'s surface at time `now`.
    ///
    /// User interactions postpone idle rotation.
    pub fn dispatch(
        &mut self,
        id: &str,
        event: &InputEvent,
        now: Instant,
    ) -> Result<Dispatch, OrbitError> {
        let viewer = self
            .viewers
            .get(id)
            .ok_or_else(|| OrbitError::UnknownViewer(id.to_owned()))?;
        if event.is_interaction() {
            self.idle.touch(now);
        }
        Ok(viewer.surface.dispatch(event))
    }

    /// Run one animation frame at time `now`.
    pub fn frame(&mut self, now: Instant) {
        let dt = self.timing.tick(now);

        let master = self.master.as_deref().and_then(|id| self.viewers.get(id));
        if let Some(master) = master {
            let gesture = master.controls.is_dragging();
            if let Some(step) = self.idle.step(now, dt, gesture) {
                master.controls.rotate_camera_angle(step, 0.0);
            }

            if self.options.viewer.sync_viewers {
                let snapshot = master.controls.state();
                for (id, viewer) in &self.viewers {
                    if Some(id.as_str()) != self.master.as_deref() {
                        viewer.controls.set_state(&snapshot);
                    }
                }
            }
        }

        for id in &self.order {
            if let Some(viewer) = self.viewers.get_mut(id) {
                viewer.controls.update();
                let pose = viewer.controls.camera().pose();
                viewer.renderer.render(&viewer.scene, pose);
            }
        }
    }

    /// Load `path` into viewer `id`, replacing its current model on success.
    ///
    /// A failed load is logged and leaves the current model in place; the
    /// error is returned for callers that want to report it.
    pub async fn load_model<L>(
        &mut self,
        loader: &L,
        id: &str,
        path: &str,
    ) -> Result<(), OrbitError>
    where
        L: ModelLoader<Model = S::Model>,
    {
        if !self.viewers.contains_key(id) {
            return Err(OrbitError::UnknownViewer(id.to_owned()));
        }
        match loader.load(path).await {
            Ok(model) => {
                let _ = self.install(id, path, model);
                Ok(())
            }
            Err(e) => {
                log::error!("viewer {id}: {e}");
                Err(e)
            }
        }
    }

    /// Load `model` into every viewer of `group` concurrently. Returns the
    /// number of viewers whose model was replaced; failures are logged.
    pub async fn load_gallery<L>(
        &mut self,
        loader: &L,
        group: GalleryGroup,
        model: &str,
    ) -> usize
    where
        L: ModelLoader<Model = S::Model>,
    {
        let requests =
            gallery::model_requests(&self.options.gallery, group, model);
        let loads = requests.iter().map(|r| loader.load(&r.path));
        let results = join_all(loads).await;

        let mut loaded = 0;
        for (request, result) in requests.iter().zip(results) {
            match result {
                Ok(handle) => {
                    if self.install(&request.viewer, &request.path, handle) {
                        loaded += 1;
                    }
                }
                Err(e) => log::error!("viewer {}: {e}", request.viewer),
            }
        }
        loaded
    }

    fn install(&mut self, id: &str, path: &str, model: S::Model) -> bool {
        let Some(viewer) = self.viewers.get_mut(id) else {
            log::warn!("model {path} loaded for unregistered viewer {id}");
            return false;
        };
        drop(viewer.scene.clear());
        viewer.scene.insert(model, model_orientation());
        viewer.model_path = Some(path.to_owned());
        log::info!("viewer {id}: loaded {path}");
        true
    }
}
