use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use glam::Vec3;

use super::core::{CameraPose, CameraSubscription, SharedCamera};
use super::state::{lerp, orbit_target, OrbitPose, OrbitSnapshot};
use super::transition::{
    PendingTransition, TransitionHandle, CONVERGENCE_THRESHOLD,
    TRANSITION_DAMPING,
};
use crate::input::{
    EventKind, EventResponse, InputEvent, InputSurface, ListenerGuard,
    MouseButton, TouchPoint,
};
use crate::options::OrbitSettings;

/// Radians of orbit per pixel of drag at `orbit_speed = 1`.
const ORBIT_RATE: f32 = 0.003;
/// Mouse pan per pixel, before zoom scaling.
const MOUSE_PAN_RATE: f32 = 0.01;
/// Two-finger pan per pixel, before zoom scaling.
const TOUCH_PAN_RATE: f32 = 0.025;
/// Wheel zoom per scroll pixel, before zoom scaling.
const WHEEL_ZOOM_RATE: f32 = 0.025;
/// Pinch zoom per pixel of finger spread, before zoom scaling.
const PINCH_ZOOM_RATE: f32 = 0.1;

/// Events the controller listens for for its whole lifetime. Pointer-up is
/// only attached while a mouse drag is in progress.
const SURFACE_EVENTS: [EventKind; 10] = [
    EventKind::DragEnter,
    EventKind::DragOver,
    EventKind::DragLeave,
    EventKind::ContextMenu,
    EventKind::PointerDown,
    EventKind::PointerMove,
    EventKind::Wheel,
    EventKind::TouchStart,
    EventKind::TouchEnd,
    EventKind::TouchMove,
];

/// Mutable state behind a controller. Only the controller's own methods and
/// the listeners it registered ever touch it.
struct OrbitState {
    settings: OrbitSettings,
    orbit: OrbitSnapshot,
    dragging: bool,
    panning: bool,
    last_x: f32,
    last_y: f32,
    last_dist: f32,
    transition: Option<PendingTransition>,
    pointer_up: Option<ListenerGuard>,
    camera: SharedCamera,
    surface: InputSurface,
}

impl OrbitState {
    fn clamp_beta(&self, beta: f32) -> f32 {
        self.settings.clamp_beta(beta)
    }

    fn clamp_radius(&self, radius: f32) -> f32 {
        self.settings.clamp_radius(radius)
    }

    fn zoom_norm(&self) -> f32 {
        self.settings.zoom_norm(self.orbit.desired_radius)
    }

    fn begin_gesture(&mut self, panning: bool, x: f32, y: f32) {
        self.dragging = true;
        self.panning = panning;
        self.last_x = x;
        self.last_y = y;
    }

    fn end_gesture(&mut self) {
        self.dragging = false;
        self.panning = false;
    }

    fn orbit_by(&mut self, dx: f32, dy: f32) {
        let rate = self.settings.orbit_speed * ORBIT_RATE;
        self.orbit.desired_alpha -= dx * rate;
        self.orbit.desired_beta =
            self.clamp_beta(self.orbit.desired_beta + dy * rate);
    }

    /// Move the desired look-at point in the camera's view plane.
    fn pan_by(&mut self, dx: f32, dy: f32, rate: f32, zoom_norm: f32) {
        let scale = self.settings.pan_speed * rate * zoom_norm;
        let pose = self.camera.pose();
        self.orbit.desired_target +=
            pose.right() * (-dx * scale) + pose.up() * (-dy * scale);

        if let Some(max) = self.settings.max_pan_distance {
            self.orbit.desired_target =
                self.orbit.desired_target.clamp_length_max(max);
        }
    }

    fn zoom_by(&mut self, amount: f32) {
        self.orbit.desired_radius =
            self.clamp_radius(self.orbit.desired_radius + amount);
    }

    fn pointer_move(&mut self, x: f32, y: f32) {
        if !self.dragging {
            return;
        }
        let dx = x - self.last_x;
        let dy = y - self.last_y;

        if self.panning {
            let zoom_norm = self.zoom_norm();
            self.pan_by(dx, dy, MOUSE_PAN_RATE, zoom_norm);
        } else {
            self.orbit_by(dx, dy);
        }

        self.last_x = x;
        self.last_y = y;
    }

    fn wheel(&mut self, delta_y: f32) {
        let zoom_norm = self.zoom_norm();
        self.zoom_by(
            delta_y * self.settings.zoom_speed * WHEEL_ZOOM_RATE * zoom_norm,
        );
    }

    fn touch_start(&mut self, touches: &[TouchPoint]) {
        match touches {
            [only] => {
                self.begin_gesture(false, only.x, only.y);
                self.last_dist = 0.0;
            }
            [first, second] => {
                let (x, y) = first.midpoint(*second);
                self.begin_gesture(true, x, y);
                self.last_dist = first.distance(*second);
            }
            _ => log::trace!(
                "{}: ignoring touch start with {} points",
                self.surface.label(),
                touches.len()
            ),
        }
    }

    fn touch_move(&mut self, touches: &[TouchPoint]) {
        if !self.dragging {
            return;
        }

        if self.panning {
            let [first, second, ..] = touches else {
                log::trace!(
                    "{}: two-finger gesture moved with {} points",
                    self.surface.label(),
                    touches.len()
                );
                return;
            };
            let zoom_norm = self.zoom_norm();

            let dist = first.distance(*second);
            self.zoom_by(
                (self.last_dist - dist)
                    * self.settings.zoom_speed
                    * PINCH_ZOOM_RATE
                    * zoom_norm,
            );
            self.last_dist = dist;

            let (x, y) = first.midpoint(*second);
            let (dx, dy) = (x - self.last_x, y - self.last_y);
            self.pan_by(dx, dy, TOUCH_PAN_RATE, zoom_norm);
            self.last_x = x;
            self.last_y = y;
        } else {
            let Some(touch) = touches.first() else {
                return;
            };
            self.orbit_by(touch.x - self.last_x, touch.y - self.last_y);
            self.last_x = touch.x;
            self.last_y = touch.y;
        }
    }

    /// Re-derive the desired pose from a camera moved by someone else.
    fn follow_camera(&mut self, pose: CameraPose) {
        let euler = pose.euler();
        self.orbit.desired_alpha = -euler.y;
        self.orbit.desired_beta = self.clamp_beta(-euler.x);
        self.orbit.desired_target = orbit_target(
            pose.position,
            self.orbit.desired_alpha,
            self.orbit.desired_beta,
            self.orbit.desired_radius,
        );
    }

    /// Ease toward the desired pose and return the resulting camera pose.
    fn step(&mut self) -> CameraPose {
        let damping = self.settings.damping;
        let factor = if self.transition.is_some() {
            TRANSITION_DAMPING
        } else {
            damping
        };

        let o = &mut self.orbit;
        o.alpha = lerp(o.alpha, o.desired_alpha, factor);
        o.beta = lerp(o.beta, o.desired_beta, factor);
        o.radius = lerp(o.radius, o.desired_radius, factor);
        o.target = o.target.lerp(o.desired_target, damping);

        if self.transition.is_some() && o.converged(CONVERGENCE_THRESHOLD) {
            o.snap_spherical();
            if let Some(transition) = self.transition.take() {
                transition.complete();
            }
        }

        self.orbit.camera_pose()
    }

    /// Route one surface event. Every event the controller listens for is
    /// consumed, including the drag and context-menu ones it only
    /// suppresses.
    fn handle(this: &Rc<RefCell<Self>>, event: &InputEvent) -> EventResponse {
        let Ok(mut state) = this.try_borrow_mut() else {
            log::trace!("orbit state busy, dropping {:?}", event.kind());
            return EventResponse::Ignored;
        };

        match event {
            InputEvent::PointerDown { button, x, y } => {
                state.begin_gesture(*button == MouseButton::Right, *x, *y);
                let guard = listen(this, &state.surface, EventKind::PointerUp);
                let previous = state.pointer_up.replace(guard);
                drop(state);
                drop(previous);
            }
            InputEvent::PointerUp { .. } => {
                state.end_gesture();
                let guard = state.pointer_up.take();
                drop(state);
                drop(guard);
            }
            InputEvent::PointerMove { x, y } => state.pointer_move(*x, *y),
            InputEvent::Wheel { delta_y } => state.wheel(*delta_y),
            InputEvent::TouchStart { touches } => state.touch_start(touches),
            InputEvent::TouchMove { touches } => state.touch_move(touches),
            InputEvent::TouchEnd { .. } => state.end_gesture(),
            InputEvent::DragEnter
            | InputEvent::DragOver
            | InputEvent::DragLeave
            | InputEvent::ContextMenu => {}
        }
        EventResponse::Consumed
    }
}

fn listen(
    state: &Rc<RefCell<OrbitState>>,
    surface: &InputSurface,
    kind: EventKind,
) -> ListenerGuard {
    let weak: Weak<RefCell<OrbitState>> = Rc::downgrade(state);
    surface.listen(kind, move |event| {
        weak.upgrade().map_or(EventResponse::Ignored, |state| {
            OrbitState::handle(&state, event)
        })
    })
}

/// Damped orbit/pan/zoom control of one camera from one input surface.
///
/// Input listeners only move the *desired* pose; [`update`](Self::update),
/// called once per rendered frame, eases the current pose toward it and
/// writes the camera.
///
/// ```ignore
/// let camera = SharedCamera::default();
/// let surface = InputSurface::new("main-viewer-1");
/// let controls =
///     OrbitController::new(camera.clone(), &surface, OrbitPose::default());
///
/// // every frame
/// controls.update();
/// renderer.render(&scene, camera.pose());
/// ```
pub struct OrbitController {
    state: Rc<RefCell<OrbitState>>,
    camera: SharedCamera,
    /// Set while `update` writes the camera so the pose-change observer
    /// does not treat the controller's own write as external.
    updating_camera: Rc<Cell<bool>>,
    listeners: Vec<ListenerGuard>,
    camera_subscription: Option<CameraSubscription>,
}

impl OrbitController {
    /// Bind a controller to `camera` and `surface`, starting at `initial`.
    ///
    /// Runs one [`update`](Self::update) so the camera immediately shows the
    /// initial pose.
    pub fn new(
        camera: SharedCamera,
        surface: &InputSurface,
        initial: OrbitPose,
    ) -> Self {
        Self::with_settings(camera, surface, initial, OrbitSettings::default())
    }

    /// Like [`new`](Self::new) with explicit settings.
    pub fn with_settings(
        camera: SharedCamera,
        surface: &InputSurface,
        initial: OrbitPose,
        settings: OrbitSettings,
    ) -> Self {
        let state = Rc::new(RefCell::new(OrbitState {
            settings,
            orbit: OrbitSnapshot::from(initial),
            dragging: false,
            panning: false,
            last_x: 0.0,
            last_y: 0.0,
            last_dist: 0.0,
            transition: None,
            pointer_up: None,
            camera: camera.clone(),
            surface: surface.clone(),
        }));

        let listeners = SURFACE_EVENTS
            .iter()
            .map(|&kind| listen(&state, surface, kind))
            .collect();

        let updating_camera = Rc::new(Cell::new(false));
        let guard = Rc::clone(&updating_camera);
        let weak = Rc::downgrade(&state);
        let camera_subscription = camera.subscribe(move |pose| {
            if guard.get() {
                return;
            }
            if let Some(state) = weak.upgrade() {
                if let Ok(mut state) = state.try_borrow_mut() {
                    state.follow_camera(pose);
                }
            }
        });

        log::debug!("orbit controls attached to {}", surface.label());

        let controller = Self {
            state,
            camera,
            updating_camera,
            listeners,
            camera_subscription: Some(camera_subscription),
        };
        controller.update();
        controller
    }

    /// Advance one frame: ease toward the desired pose, settle a pending
    /// transition if it converged, and write the camera.
    ///
    /// Does nothing after [`dispose`](Self::dispose).
    pub fn update(&self) {
        if self.is_disposed() {
            return;
        }
        let pose = self.state.borrow_mut().step();

        self.updating_camera.set(true);
        self.camera.set_pose(pose);
        self.updating_camera.set(false);
    }

    /// Snapshot of the eight synchronized fields.
    #[must_use]
    pub fn state(&self) -> OrbitSnapshot {
        self.state.borrow().orbit
    }

    /// Overwrite the synchronized fields, clamped to this controller's
    /// bounds. Gesture flags, pending transition and settings are untouched.
    pub fn set_state(&self, snapshot: &OrbitSnapshot) {
        let mut state = self.state.borrow_mut();
        let mut orbit = *snapshot;
        orbit.beta = state.clamp_beta(orbit.beta);
        orbit.desired_beta = state.clamp_beta(orbit.desired_beta);
        orbit.radius = state.clamp_radius(orbit.radius);
        orbit.desired_radius = state.clamp_radius(orbit.desired_radius);
        state.orbit = orbit;
    }

    /// Aim at `point` from the camera's current position.
    ///
    /// Only the desired pose changes; the next updates ease toward it.
    pub fn set_camera_target(&self, point: Vec3) {
        let mut state = self.state.borrow_mut();
        let d = point - state.camera.position();
        state.orbit.desired_radius = state.clamp_radius(d.length());
        state.orbit.desired_beta = state.clamp_beta(d.y.atan2(d.x.hypot(d.z)));
        state.orbit.desired_alpha = -d.x.atan2(d.z);
        state.orbit.desired_target = point;
    }

    /// Nudge the desired azimuth and elevation (idle auto-rotation).
    pub fn rotate_camera_angle(&self, delta_alpha: f32, delta_beta: f32) {
        let mut state = self.state.borrow_mut();
        state.orbit.desired_alpha += delta_alpha;
        state.orbit.desired_beta =
            state.clamp_beta(state.orbit.desired_beta + delta_beta);
    }

    /// Set the desired spherical pose.
    ///
    /// With `smooth = false` the regular damping applies and `None` is
    /// returned. With `smooth = true` spherical easing switches to the
    /// transition rate and the returned handle resolves once the pose has
    /// converged and snapped. A later smooth call replaces the pending
    /// transition; the replaced handle never resolves.
    pub fn set_pose(
        &self,
        alpha: f32,
        beta: f32,
        radius: f32,
        smooth: bool,
    ) -> Option<TransitionHandle> {
        let mut state = self.state.borrow_mut();
        state.orbit.desired_alpha = alpha;
        state.orbit.desired_beta = state.clamp_beta(beta);
        state.orbit.desired_radius = state.clamp_radius(radius);

        if !smooth {
            return None;
        }

        let (pending, handle) = PendingTransition::channel();
        if let Some(previous) = state.transition.replace(pending) {
            log::debug!(
                "{}: superseding unfinished camera transition",
                state.surface.label()
            );
            drop(previous);
        }
        Some(handle)
    }

    /// Current settings.
    #[must_use]
    pub fn settings(&self) -> OrbitSettings {
        self.state.borrow().settings
    }

    /// Replace the settings. Takes effect on the next event or update;
    /// the current pose is not re-clamped.
    pub fn set_settings(&self, settings: OrbitSettings) {
        self.state.borrow_mut().settings = settings;
    }

    /// Edit the settings in place.
    pub fn update_settings(&self, edit: impl FnOnce(&mut OrbitSettings)) {
        edit(&mut self.state.borrow_mut().settings);
    }

    /// The controlled camera.
    #[must_use]
    pub fn camera(&self) -> &SharedCamera {
        &self.camera
    }

    /// Whether a mouse or touch gesture is in progress.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.state.borrow().dragging
    }

    /// Whether the gesture in progress pans rather than orbits.
    #[must_use]
    pub fn is_panning(&self) -> bool {
        self.state.borrow().panning
    }

    /// Whether a smooth transition is waiting to converge.
    #[must_use]
    pub fn has_pending_transition(&self) -> bool {
        self.state.borrow().transition.is_some()
    }

    /// Whether [`dispose`](Self::dispose) has run.
    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.camera_subscription.is_none()
    }

    /// Detach every listener and the camera subscription. Idempotent.
    pub fn dispose(&mut self) {
        if self.is_disposed() {
            return;
        }
        self.listeners.clear();
        self.camera_subscription = None;
        let pointer_up = self.state.borrow_mut().pointer_up.take();
        drop(pointer_up);
        log::debug!(
            "orbit controls detached from {}",
            self.state.borrow().surface.label()
        );
    }
}

impl Drop for OrbitController {
    fn drop(&mut self) {
        self.dispose();
    }
}

#[cfg(test)]
mod tests {
    use futures::FutureExt;

    use super::*;

    fn rig(
        initial: OrbitPose,
    ) -> (OrbitController, InputSurface, SharedCamera) {
        let camera = SharedCamera::default();
        let surface = InputSurface::new("test-canvas");
        let controls = OrbitController::new(camera.clone(), &surface, initial);
        (controls, surface, camera)
    }

    fn origin_pose() -> OrbitPose {
        OrbitPose {
            alpha: 0.0,
            beta: 0.0,
            radius: 5.0,
            target: Vec3::ZERO,
        }
    }

    fn touches(points: &[(f32, f32)]) -> Vec<TouchPoint> {
        points.iter().map(|&(x, y)| TouchPoint::new(x, y)).collect()
    }

    fn drag(
        surface: &InputSurface,
        button: MouseButton,
        from: (f32, f32),
        to: (f32, f32),
    ) {
        let _ = surface.dispatch(&InputEvent::PointerDown {
            button,
            x: from.0,
            y: from.1,
        });
        let _ = surface.dispatch(&InputEvent::PointerMove { x: to.0, y: to.1 });
        let _ = surface.dispatch(&InputEvent::PointerUp { button });
    }

    #[test]
    fn radius_settles_after_fifty_frames() {
        let (controls, _surface, _camera) = rig(origin_pose());
        assert!(controls.set_pose(0.5, 0.3, 2.0, false).is_none());
        for _ in 0..50 {
            controls.update();
        }
        assert!((controls.state().radius - 2.0).abs() < 0.01);
    }

    #[test]
    fn immediate_pose_converges_monotonically() {
        let (controls, _surface, _camera) = rig(origin_pose());
        let _ = controls.set_pose(1.0, 0.2, 3.0, false);
        let _ = controls.set_pose(-0.4, 0.6, 8.0, false);

        let state = controls.state();
        assert_eq!(state.desired_alpha, -0.4);
        assert_eq!(state.desired_beta, 0.6);
        assert_eq!(state.desired_radius, 8.0);

        let mut last_gap = f32::INFINITY;
        for _ in 0..40 {
            controls.update();
            let s = controls.state();
            let gap = (s.alpha - s.desired_alpha).abs()
                + (s.beta - s.desired_beta).abs()
                + (s.radius - s.desired_radius).abs();
            assert!(gap <= last_gap);
            last_gap = gap;
        }
    }

    #[test]
    fn orbit_drag_respects_angle_bounds() {
        let (controls, surface, _camera) = rig(origin_pose());
        let max = controls.settings().max_angle.to_radians();
        let min = controls.settings().min_angle.to_radians();

        drag(&surface, MouseButton::Left, (0.0, 0.0), (0.0, 1.0e6));
        assert_eq!(controls.state().desired_beta, max);

        drag(&surface, MouseButton::Left, (0.0, 0.0), (0.0, -1.0e6));
        assert_eq!(controls.state().desired_beta, min);

        for _ in 0..200 {
            controls.update();
            let beta = controls.state().beta;
            assert!(beta >= min && beta <= max);
        }
    }

    #[test]
    fn orbit_drag_turns_azimuth_against_dx() {
        let (controls, surface, _camera) = rig(origin_pose());
        drag(&surface, MouseButton::Left, (10.0, 10.0), (110.0, 10.0));
        assert!((controls.state().desired_alpha + 0.3).abs() < 1e-6);
    }

    #[test]
    fn wheel_respects_zoom_bounds() {
        let (controls, surface, _camera) = rig(origin_pose());
        let settings = controls.settings();

        let _ = surface.dispatch(&InputEvent::Wheel { delta_y: 1.0e7 });
        assert_eq!(controls.state().desired_radius, settings.max_zoom);

        let _ = surface.dispatch(&InputEvent::Wheel { delta_y: -1.0e7 });
        assert_eq!(controls.state().desired_radius, settings.min_zoom);

        for _ in 0..200 {
            controls.update();
            let radius = controls.state().radius;
            assert!(radius >= settings.min_zoom && radius <= settings.max_zoom);
        }
    }

    #[test]
    fn pan_is_bounded_by_max_pan_distance() {
        let (controls, surface, _camera) = rig(origin_pose());
        controls.update_settings(|s| s.max_pan_distance = Some(2.0));

        drag(&surface, MouseButton::Right, (0.0, 0.0), (5000.0, -3000.0));
        assert!(controls.state().desired_target.length() <= 2.0 + 1e-4);
        assert!(controls.state().desired_target.length() > 1.9);

        let _ = surface.dispatch(&InputEvent::TouchStart {
            touches: touches(&[(0.0, 0.0), (10.0, 0.0)]),
        });
        let _ = surface.dispatch(&InputEvent::TouchMove {
            touches: touches(&[(900.0, 900.0), (910.0, 900.0)]),
        });
        assert!(controls.state().desired_target.length() <= 2.0 + 1e-4);
    }

    #[test]
    fn right_drag_pans_along_camera_right() {
        let (controls, surface, _camera) = rig(origin_pose());
        drag(&surface, MouseButton::Right, (0.0, 0.0), (-100.0, 0.0));
        let target = controls.state().desired_target;
        // Identity camera rotation at alpha = beta = 0: right is +X.
        assert!(target.x > 0.0);
        assert!(target.y.abs() < 1e-6 && target.z.abs() < 1e-6);
    }

    #[test]
    fn smooth_transition_resolves_and_snaps() {
        let (controls, _surface, _camera) = rig(origin_pose());
        let mut handle = controls
            .set_pose(0.8, -0.2, 9.0, true)
            .expect("smooth pose returns a handle");
        assert!(controls.has_pending_transition());

        let mut frames = 0;
        while (&mut handle).now_or_never().is_none() {
            controls.update();
            frames += 1;
            assert!(frames < 1000, "transition never converged");
        }

        let state = controls.state();
        assert_eq!(state.alpha, 0.8);
        assert_eq!(state.beta, -0.2);
        assert_eq!(state.radius, 9.0);
        assert!(!controls.has_pending_transition());
    }

    #[test]
    fn superseded_transition_never_resolves() {
        let (controls, _surface, _camera) = rig(origin_pose());
        let mut first = controls.set_pose(1.0, 0.1, 4.0, true).unwrap();
        let mut second = controls.set_pose(-1.0, 0.3, 6.0, true).unwrap();

        let mut frames = 0;
        while (&mut second).now_or_never().is_none() {
            controls.update();
            frames += 1;
            assert!(frames < 1000);
        }
        for _ in 0..100 {
            controls.update();
        }
        assert!((&mut first).now_or_never().is_none());
        assert!(first.is_abandoned());
    }

    #[test]
    fn state_round_trip_reproduces_updates() {
        let (a, surface_a, camera_a) = rig(OrbitPose::default());
        drag(&surface_a, MouseButton::Left, (0.0, 0.0), (40.0, -25.0));
        let _ = surface_a.dispatch(&InputEvent::Wheel { delta_y: 120.0 });
        a.update();

        let (b, _surface_b, camera_b) = rig(origin_pose());
        b.set_state(&a.state());
        assert_eq!(a.state(), b.state());

        for _ in 0..10 {
            a.update();
            b.update();
            assert_eq!(a.state(), b.state());
            assert_eq!(camera_a.pose(), camera_b.pose());
        }
    }

    #[test]
    fn own_camera_writes_are_not_treated_as_external() {
        let (controls, _surface, _camera) = rig(origin_pose());
        let _ = controls.set_pose(1.0, 0.2, 3.0, false);
        controls.update();
        let state = controls.state();
        assert_eq!(state.desired_alpha, 1.0);
        assert_eq!(state.desired_beta, 0.2);
        assert_eq!(state.desired_target, Vec3::ZERO);
    }

    #[test]
    fn external_camera_move_rederives_desired_pose() {
        let (controls, _surface, camera) = rig(origin_pose());
        let target = Vec3::new(1.0, 0.0, -2.0);
        let reference = OrbitSnapshot::from(OrbitPose {
            alpha: 0.4,
            beta: 0.2,
            radius: 5.0,
            target,
        });

        camera.set_pose(reference.camera_pose());

        let state = controls.state();
        assert!((state.desired_alpha - 0.4).abs() < 1e-4);
        assert!((state.desired_beta - 0.2).abs() < 1e-4);
        assert!(state.desired_target.abs_diff_eq(target, 1e-4));
    }

    #[test]
    fn set_camera_target_aims_from_current_position() {
        let (controls, _surface, camera) = rig(origin_pose());
        let eye = camera.position();
        let point = eye + Vec3::new(3.0, 0.0, 4.0);

        controls.set_camera_target(point);
        let state = controls.state();
        assert!((state.desired_radius - 5.0).abs() < 1e-5);
        assert!(state.desired_beta.abs() < 1e-6);
        assert!((state.desired_alpha + 3f32.atan2(4.0)).abs() < 1e-6);
        assert_eq!(state.desired_target, point);
    }

    #[test]
    fn rotate_camera_angle_nudges_both_axes() {
        let (controls, _surface, _camera) = rig(origin_pose());
        controls.rotate_camera_angle(0.01, 0.02);
        let state = controls.state();
        assert!((state.desired_alpha - 0.01).abs() < 1e-7);
        assert!((state.desired_beta - 0.02).abs() < 1e-7);
    }

    #[test]
    fn pointer_up_listener_is_scoped_to_drag() {
        let (controls, surface, _camera) = rig(origin_pose());
        assert_eq!(surface.listener_count_for(EventKind::PointerUp), 0);

        let _ = surface.dispatch(&InputEvent::PointerDown {
            button: MouseButton::Right,
            x: 0.0,
            y: 0.0,
        });
        assert!(controls.is_dragging());
        assert!(controls.is_panning());
        assert_eq!(surface.listener_count_for(EventKind::PointerUp), 1);

        let outcome = surface.dispatch(&InputEvent::PointerUp {
            button: MouseButton::Right,
        });
        assert!(outcome.default_prevented);
        assert!(!controls.is_dragging());
        assert_eq!(surface.listener_count_for(EventKind::PointerUp), 0);
    }

    #[test]
    fn pinch_apart_zooms_in() {
        let (controls, surface, _camera) = rig(origin_pose());
        let _ = surface.dispatch(&InputEvent::TouchStart {
            touches: touches(&[(100.0, 100.0), (120.0, 100.0)]),
        });
        assert!(controls.is_panning());
        let _ = surface.dispatch(&InputEvent::TouchMove {
            touches: touches(&[(90.0, 100.0), (130.0, 100.0)]),
        });
        assert!(controls.state().desired_radius < 5.0);

        let _ = surface.dispatch(&InputEvent::TouchEnd { touches: vec![] });
        assert!(!controls.is_dragging());
    }

    #[test]
    fn pinch_respects_zoom_bounds() {
        let (controls, surface, _camera) = rig(origin_pose());
        let settings = controls.settings();

        let _ = surface.dispatch(&InputEvent::TouchStart {
            touches: touches(&[(0.0, 0.0), (10.0, 0.0)]),
        });
        let _ = surface.dispatch(&InputEvent::TouchMove {
            touches: touches(&[(-1.0e6, 0.0), (1.0e6, 0.0)]),
        });
        assert_eq!(controls.state().desired_radius, settings.min_zoom);

        let _ = surface.dispatch(&InputEvent::TouchMove {
            touches: touches(&[(0.0, 0.0), (10.0, 0.0)]),
        });
        assert_eq!(controls.state().desired_radius, settings.max_zoom);

        for _ in 0..200 {
            controls.update();
            let radius = controls.state().radius;
            assert!(radius >= settings.min_zoom && radius <= settings.max_zoom);
        }
    }

    #[test]
    fn one_finger_orbit_respects_angle_bounds() {
        let (controls, surface, _camera) = rig(origin_pose());
        let max = controls.settings().max_angle.to_radians();
        let min = controls.settings().min_angle.to_radians();

        let _ = surface.dispatch(&InputEvent::TouchStart {
            touches: touches(&[(0.0, 0.0)]),
        });
        let _ = surface.dispatch(&InputEvent::TouchMove {
            touches: touches(&[(0.0, 1.0e6)]),
        });
        assert_eq!(controls.state().desired_beta, max);

        let _ = surface.dispatch(&InputEvent::TouchMove {
            touches: touches(&[(0.0, -1.0e6)]),
        });
        assert_eq!(controls.state().desired_beta, min);

        for _ in 0..200 {
            controls.update();
            let beta = controls.state().beta;
            assert!(beta >= min && beta <= max);
        }
    }

    #[test]
    fn malformed_touch_gestures_are_ignored() {
        let (controls, surface, _camera) = rig(origin_pose());
        let before = controls.state();

        let _ = surface.dispatch(&InputEvent::TouchStart {
            touches: touches(&[(0.0, 0.0), (10.0, 0.0)]),
        });
        let _ = surface.dispatch(&InputEvent::TouchMove {
            touches: vec![TouchPoint::new(50.0, 50.0)],
        });
        let _ = surface.dispatch(&InputEvent::TouchMove { touches: vec![] });
        let _ = surface.dispatch(&InputEvent::TouchStart { touches: vec![] });

        assert_eq!(controls.state(), before);
    }

    #[test]
    fn every_listened_event_is_consumed() {
        let (_controls, surface, _camera) = rig(origin_pose());
        for event in [
            InputEvent::DragEnter,
            InputEvent::DragOver,
            InputEvent::DragLeave,
            InputEvent::ContextMenu,
            InputEvent::PointerMove { x: 1.0, y: 1.0 },
        ] {
            let outcome = surface.dispatch(&event);
            assert_eq!(outcome.listeners, 1);
            assert!(outcome.default_prevented && outcome.propagation_stopped);
        }
    }

    #[test]
    fn dispose_detaches_everything_once() {
        let (mut controls, surface, camera) = rig(origin_pose());
        assert_eq!(surface.listener_count(), SURFACE_EVENTS.len());
        assert_eq!(camera.subscriber_count(), 1);

        let _ = surface.dispatch(&InputEvent::PointerDown {
            button: MouseButton::Left,
            x: 0.0,
            y: 0.0,
        });
        controls.dispose();
        controls.dispose();

        assert!(controls.is_disposed());
        assert_eq!(surface.listener_count(), 0);
        assert_eq!(camera.subscriber_count(), 0);

        let before = controls.state();
        let _ = surface.dispatch(&InputEvent::Wheel { delta_y: 500.0 });
        controls.update();
        assert_eq!(controls.state(), before);
    }

    #[test]
    fn dropping_controller_detaches_listeners() {
        let (controls, surface, camera) = rig(origin_pose());
        drop(controls);
        assert_eq!(surface.listener_count(), 0);
        assert_eq!(camera.subscriber_count(), 0);
    }
}
