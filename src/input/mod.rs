//! Input handling: platform-agnostic event types and the listener registry
//! that stands in for a canvas element.

/// Platform-agnostic input events.
pub mod event;
/// Listener registry with scoped registrations.
pub mod surface;

pub use event::{EventKind, InputEvent, MouseButton, TouchPoint};
pub use surface::{Dispatch, EventResponse, InputSurface, ListenerGuard};
