use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use glam::{EulerRot, Quat, Vec3};

/// Camera transform as seen by the renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    /// Eye position in world space.
    pub position: Vec3,
    /// Orientation (yaw-pitch-roll applied in YXZ order).
    pub rotation: Quat,
}

impl Default for CameraPose {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
        }
    }
}

impl CameraPose {
    /// Orientation as `(pitch, yaw, roll)` in radians, the inverse of
    /// [`CameraPose::rotation_from_euler`].
    #[must_use]
    pub fn euler(&self) -> Vec3 {
        let (yaw, pitch, roll) = self.rotation.to_euler(EulerRot::YXZ);
        Vec3::new(pitch, yaw, roll)
    }

    /// Build a rotation from `(pitch, yaw, roll)`.
    #[must_use]
    pub fn rotation_from_euler(euler: Vec3) -> Quat {
        Quat::from_euler(EulerRot::YXZ, euler.y, euler.x, euler.z)
    }

    /// Camera-space right axis in world coordinates.
    #[must_use]
    pub fn right(&self) -> Vec3 {
        self.rotation * Vec3::X
    }

    /// Camera-space up axis in world coordinates.
    #[must_use]
    pub fn up(&self) -> Vec3 {
        self.rotation * Vec3::Y
    }
}

type Observer = Rc<dyn Fn(CameraPose)>;

#[derive(Default)]
struct Observers {
    next_id: u64,
    entries: Vec<(u64, Observer)>,
}

struct CameraInner {
    pose: Cell<CameraPose>,
    observers: RefCell<Observers>,
}

/// Shared, observable camera.
///
/// Clones refer to the same camera. Every [`SharedCamera::set_pose`] notifies
/// all subscribers synchronously with the new pose, whoever wrote it.
#[derive(Clone)]
pub struct SharedCamera {
    inner: Rc<CameraInner>,
}

impl Default for SharedCamera {
    fn default() -> Self {
        Self::new(CameraPose::default())
    }
}

impl SharedCamera {
    /// Create a camera at `pose`.
    #[must_use]
    pub fn new(pose: CameraPose) -> Self {
        Self {
            inner: Rc::new(CameraInner {
                pose: Cell::new(pose),
                observers: RefCell::default(),
            }),
        }
    }

    /// Current pose.
    #[must_use]
    pub fn pose(&self) -> CameraPose {
        self.inner.pose.get()
    }

    /// Current eye position.
    #[must_use]
    pub fn position(&self) -> Vec3 {
        self.inner.pose.get().position
    }

    /// Current orientation.
    #[must_use]
    pub fn rotation(&self) -> Quat {
        self.inner.pose.get().rotation
    }

    /// Replace the pose and notify subscribers.
    pub fn set_pose(&self, pose: CameraPose) {
        self.inner.pose.set(pose);
        let observers: Vec<Observer> = self
            .inner
            .observers
            .borrow()
            .entries
            .iter()
            .map(|(_, o)| Rc::clone(o))
            .collect();
        for observer in observers {
            observer(pose);
        }
    }

    /// Subscribe to pose changes for as long as the returned handle lives.
    #[must_use = "dropping the subscription immediately unsubscribes"]
    pub fn subscribe(
        &self,
        observer: impl Fn(CameraPose) + 'static,
    ) -> CameraSubscription {
        let mut observers = self.inner.observers.borrow_mut();
        let id = observers.next_id;
        observers.next_id += 1;
        observers.entries.push((id, Rc::new(observer)));
        CameraSubscription {
            id,
            camera: Rc::downgrade(&self.inner),
        }
    }

    /// Number of live subscriptions.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.inner.observers.borrow().entries.len()
    }
}

impl fmt::Debug for SharedCamera {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedCamera")
            .field("pose", &self.pose())
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

/// Scoped pose-change subscription; unsubscribes on drop.
pub struct CameraSubscription {
    id: u64,
    camera: Weak<CameraInner>,
}

impl fmt::Debug for CameraSubscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CameraSubscription")
            .field("id", &self.id)
            .finish()
    }
}

impl Drop for CameraSubscription {
    fn drop(&mut self) {
        let Some(camera) = self.camera.upgrade() else {
            return;
        };
        let removed = {
            let mut observers = camera.observers.borrow_mut();
            observers
                .entries
                .iter()
                .position(|(id, _)| *id == self.id)
                .map(|index| observers.entries.remove(index))
        };
        drop(removed);
    }
}
