//! Browser glue: DOM event conversion and console logging.
//!
//! Hosts forward canvas events through these helpers into an
//! [`InputSurface`](crate::input::InputSurface) and then apply the returned
//! [`Dispatch`] to the native event.

use web_sys::{Event, MouseEvent, TouchEvent, TouchList, WheelEvent};

use crate::input::{Dispatch, InputEvent, MouseButton, TouchPoint};

/// Route `log` output to the browser console and install the panic hook.
pub fn init_logging(level: log::Level) {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(level).is_err() {
        log::warn!("console logger already installed");
    }
}

#[allow(clippy::cast_precision_loss)]
fn client_point(x: i32, y: i32) -> (f32, f32) {
    (x as f32, y as f32)
}

/// Convert a mouse (or pointer/drag) event by its DOM type name.
///
/// Returns `None` for types the orbit controls do not consume.
#[must_use]
pub fn from_mouse_event(event: &MouseEvent) -> Option<InputEvent> {
    let (x, y) = client_point(event.client_x(), event.client_y());
    let button = MouseButton::from_dom_code(event.button());
    let converted = match event.type_().as_str() {
        "mousedown" | "pointerdown" => InputEvent::PointerDown { button, x, y },
        "mousemove" | "pointermove" => InputEvent::PointerMove { x, y },
        "mouseup" | "pointerup" => InputEvent::PointerUp { button },
        "contextmenu" => InputEvent::ContextMenu,
        "dragenter" => InputEvent::DragEnter,
        "dragover" => InputEvent::DragOver,
        "dragleave" => InputEvent::DragLeave,
        other => {
            log::trace!("ignoring mouse event {other}");
            return None;
        }
    };
    Some(converted)
}

impl From<&WheelEvent> for InputEvent {
    #[allow(clippy::cast_possible_truncation)]
    fn from(event: &WheelEvent) -> Self {
        Self::Wheel {
            delta_y: event.delta_y() as f32,
        }
    }
}

/// Fingers currently on the surface.
#[must_use]
pub fn touch_points(list: &TouchList) -> Vec<TouchPoint> {
    (0..list.length())
        .filter_map(|i| list.get(i))
        .map(|touch| {
            let (x, y) = client_point(touch.client_x(), touch.client_y());
            TouchPoint::new(x, y)
        })
        .collect()
}

/// Convert a touch event by its DOM type name. `touchcancel` is treated
/// as `touchend`.
#[must_use]
pub fn from_touch_event(event: &TouchEvent) -> Option<InputEvent> {
    let touches = touch_points(&event.touches());
    let converted = match event.type_().as_str() {
        "touchstart" => InputEvent::TouchStart { touches },
        "touchmove" => InputEvent::TouchMove { touches },
        "touchend" | "touchcancel" => InputEvent::TouchEnd { touches },
        other => {
            log::trace!("ignoring touch event {other}");
            return None;
        }
    };
    Some(converted)
}

/// Apply a dispatch outcome to the native event.
pub fn apply_dispatch(event: &Event, outcome: Dispatch) {
    if outcome.default_prevented {
        event.prevent_default();
    }
    if outcome.propagation_stopped {
        event.stop_propagation();
    }
}
