//! Listener registry standing in for a canvas element.
//!
//! An [`InputSurface`] is a cheap, clonable handle. Controllers register
//! per-[`EventKind`] callbacks through [`InputSurface::listen`] and keep the
//! returned [`ListenerGuard`]s; dropping a guard unregisters its callback, so
//! releasing a controller's guards is all disposal needs to do.
//!
//! Callbacks run after the registry borrow is released, which lets a
//! callback register or drop listeners (a pointer-down handler arming its
//! pointer-up listener, for instance).

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use super::event::{EventKind, InputEvent};

/// What a listener did with an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResponse {
    /// The listener looked at the event and left it alone.
    Ignored,
    /// The listener handled the event; default action is prevented and
    /// propagation stopped.
    Consumed,
}

/// Aggregate outcome of [`InputSurface::dispatch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Dispatch {
    /// Number of listeners the event was delivered to.
    pub listeners: usize,
    /// Whether any listener asked to suppress the native default action.
    pub default_prevented: bool,
    /// Whether any listener asked to stop propagation to parent elements.
    pub propagation_stopped: bool,
}

type Callback = Rc<dyn Fn(&InputEvent) -> EventResponse>;

struct Entry {
    id: u64,
    kind: EventKind,
    callback: Callback,
}

#[derive(Default)]
struct Registry {
    next_id: u64,
    entries: Vec<Entry>,
}

impl Registry {
    fn remove(&mut self, id: u64) -> Option<Entry> {
        let index = self.entries.iter().position(|e| e.id == id)?;
        Some(self.entries.remove(index))
    }
}

/// Event target that controllers attach listeners to.
#[derive(Clone)]
pub struct InputSurface {
    label: Rc<str>,
    registry: Rc<RefCell<Registry>>,
}

impl InputSurface {
    /// Create an empty surface. `label` only shows up in logs.
    pub fn new(label: impl Into<Rc<str>>) -> Self {
        Self {
            label: label.into(),
            registry: Rc::default(),
        }
    }

    /// Label given at construction (usually the canvas ID).
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Register `callback` for events of `kind`.
    ///
    /// The listener stays attached for as long as the returned guard lives.
    #[must_use = "dropping the guard immediately unregisters the listener"]
    pub fn listen(
        &self,
        kind: EventKind,
        callback: impl Fn(&InputEvent) -> EventResponse + 'static,
    ) -> ListenerGuard {
        let mut registry = self.registry.borrow_mut();
        let id = registry.next_id;
        registry.next_id += 1;
        registry.entries.push(Entry {
            id,
            kind,
            callback: Rc::new(callback),
        });
        ListenerGuard {
            id,
            kind,
            registry: Rc::downgrade(&self.registry),
        }
    }

    /// Deliver `event` to every listener registered for its kind, in
    /// registration order.
    pub fn dispatch(&self, event: &InputEvent) -> Dispatch {
        let kind = event.kind();
        let callbacks: Vec<Callback> = self
            .registry
            .borrow()
            .entries
            .iter()
            .filter(|e| e.kind == kind)
            .map(|e| Rc::clone(&e.callback))
            .collect();

        let mut outcome = Dispatch::default();
        for callback in callbacks {
            outcome.listeners += 1;
            if callback(event) == EventResponse::Consumed {
                outcome.default_prevented = true;
                outcome.propagation_stopped = true;
            }
        }
        outcome
    }

    /// Total number of attached listeners.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.registry.borrow().entries.len()
    }

    /// Number of attached listeners for one event kind.
    #[must_use]
    pub fn listener_count_for(&self, kind: EventKind) -> usize {
        self.registry
            .borrow()
            .entries
            .iter()
            .filter(|e| e.kind == kind)
            .count()
    }
}

impl fmt::Debug for InputSurface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InputSurface")
            .field("label", &self.label)
            .field("listeners", &self.listener_count())
            .finish()
    }
}

/// Scoped registration returned by [`InputSurface::listen`].
///
/// Unregisters its listener on drop. Outliving the surface is harmless.
pub struct ListenerGuard {
    id: u64,
    kind: EventKind,
    registry: Weak<RefCell<Registry>>,
}

impl ListenerGuard {
    /// Event kind this guard's listener is attached to.
    #[must_use]
    pub fn kind(&self) -> EventKind {
        self.kind
    }
}

impl fmt::Debug for ListenerGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerGuard")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .finish()
    }
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        let Some(registry) = self.registry.upgrade() else {
            return;
        };
        // Drop the entry outside the borrow: its callback may own guards
        // of its own.
        let removed = registry.borrow_mut().remove(self.id);
        drop(removed);
    }
}
