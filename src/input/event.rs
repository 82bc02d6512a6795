/// Platform-agnostic input events.
///
/// Hosts translate native browser or window events into these and hand them
/// to an [`InputSurface`](super::InputSurface), which fans them out to the
/// registered listeners.
///
/// # Example
///
/// ```ignore
/// let event = InputEvent::PointerMove { x: 100.0, y: 200.0 };
/// let outcome = surface.dispatch(&event);
/// if outcome.default_prevented {
///     native_event.prevent_default();
/// }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Mouse button pressed at a client position.
    PointerDown {
        /// Which button went down.
        button: MouseButton,
        /// Horizontal client position in pixels.
        x: f32,
        /// Vertical client position in pixels.
        y: f32,
    },
    /// Cursor moved to a client position.
    PointerMove {
        /// Horizontal client position in pixels.
        x: f32,
        /// Vertical client position in pixels.
        y: f32,
    },
    /// Mouse button released anywhere in the window.
    PointerUp {
        /// Which button went up.
        button: MouseButton,
    },
    /// Scroll wheel (positive = away from the model).
    Wheel {
        /// Vertical scroll amount in pixels.
        delta_y: f32,
    },
    /// A touch gesture started or gained a finger.
    TouchStart {
        /// All touch points currently on the surface.
        touches: Vec<TouchPoint>,
    },
    /// Touch points moved.
    TouchMove {
        /// All touch points currently on the surface.
        touches: Vec<TouchPoint>,
    },
    /// A touch gesture ended or lost a finger.
    TouchEnd {
        /// Touch points still on the surface.
        touches: Vec<TouchPoint>,
    },
    /// Drag-and-drop entered the surface.
    DragEnter,
    /// Drag-and-drop hovering over the surface.
    DragOver,
    /// Drag-and-drop left the surface.
    DragLeave,
    /// Context menu request (usually a right click).
    ContextMenu,
}

impl InputEvent {
    /// Listener key this event is delivered to.
    #[must_use]
    pub fn kind(&self) -> EventKind {
        match self {
            Self::PointerDown { .. } => EventKind::PointerDown,
            Self::PointerMove { .. } => EventKind::PointerMove,
            Self::PointerUp { .. } => EventKind::PointerUp,
            Self::Wheel { .. } => EventKind::Wheel,
            Self::TouchStart { .. } => EventKind::TouchStart,
            Self::TouchMove { .. } => EventKind::TouchMove,
            Self::TouchEnd { .. } => EventKind::TouchEnd,
            Self::DragEnter => EventKind::DragEnter,
            Self::DragOver => EventKind::DragOver,
            Self::DragLeave => EventKind::DragLeave,
            Self::ContextMenu => EventKind::ContextMenu,
        }
    }

    /// Whether this event comes from direct user interaction with the
    /// camera (used for idle detection).
    #[must_use]
    pub fn is_interaction(&self) -> bool {
        !matches!(
            self,
            Self::DragEnter
                | Self::DragOver
                | Self::DragLeave
                | Self::ContextMenu
        )
    }
}

/// Discriminant of [`InputEvent`], used as the listener registration key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// [`InputEvent::PointerDown`]
    PointerDown,
    /// [`InputEvent::PointerMove`]
    PointerMove,
    /// [`InputEvent::PointerUp`]
    PointerUp,
    /// [`InputEvent::Wheel`]
    Wheel,
    /// [`InputEvent::TouchStart`]
    TouchStart,
    /// [`InputEvent::TouchMove`]
    TouchMove,
    /// [`InputEvent::TouchEnd`]
    TouchEnd,
    /// [`InputEvent::DragEnter`]
    DragEnter,
    /// [`InputEvent::DragOver`]
    DragOver,
    /// [`InputEvent::DragLeave`]
    DragLeave,
    /// [`InputEvent::ContextMenu`]
    ContextMenu,
}

/// Platform-agnostic mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Primary (left) mouse button.
    Left,
    /// Middle mouse button (wheel click).
    Middle,
    /// Secondary (right) mouse button.
    Right,
}

impl MouseButton {
    /// Map a DOM `MouseEvent.button` code. Unknown codes (back/forward)
    /// count as primary.
    #[must_use]
    pub fn from_dom_code(code: i16) -> Self {
        match code {
            1 => Self::Middle,
            2 => Self::Right,
            _ => Self::Left,
        }
    }
}

/// One finger on a touch surface, in client pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchPoint {
    /// Horizontal client position.
    pub x: f32,
    /// Vertical client position.
    pub y: f32,
}

impl TouchPoint {
    /// Create a touch point.
    #[must_use]
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Midpoint between two touches.
    #[must_use]
    pub fn midpoint(self, other: Self) -> (f32, f32) {
        ((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }

    /// Euclidean distance between two touches.
    #[must_use]
    pub fn distance(self, other: Self) -> f32 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}
