use derive_new::new;
use web_time::Instant;

/// Opaque handle of an element owned by the host (a plot area, a drag
/// handle, or an overlay created through [`crate::Platform`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementId(pub u64);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
    pub meta: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MouseButton {
    #[default]
    Primary,
    Middle,
    Secondary,
}

impl MouseButton {
    /// Button number as reported by DOM mouse events.
    pub fn index(self) -> i16 {
        match self {
            MouseButton::Primary => 0,
            MouseButton::Middle => 1,
            MouseButton::Secondary => 2,
        }
    }
}

/// A mouse event as delivered to the target element or to the overlay.
#[derive(Debug, Clone, PartialEq, new)]
pub struct PointerEvent {
    pub client_x: f64,
    pub client_y: f64,
    pub target: ElementId,
    pub time: Instant,
    #[new(value = "client_x")]
    pub screen_x: f64,
    #[new(value = "client_y")]
    pub screen_y: f64,
    #[new(default)]
    pub button: MouseButton,
    #[new(default)]
    pub modifiers: Modifiers,
    #[new(value = "1")]
    pub detail: i32,
    #[new(value = "true")]
    pub bubbles: bool,
    #[new(value = "true")]
    pub cancelable: bool,
    #[new(default)]
    pub related_target: Option<ElementId>,
}

impl PointerEvent {
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn with_button(mut self, button: MouseButton) -> Self {
        self.button = button;
        self
    }

    pub fn with_screen_pos(mut self, screen_x: f64, screen_y: f64) -> Self {
        self.screen_x = screen_x;
        self.screen_y = screen_y;
        self
    }
}

/// A touch event, reduced to the first changed touch point.
#[derive(Debug, Clone, PartialEq, new)]
pub struct TouchEvent {
    pub page_x: f64,
    pub page_y: f64,
    /// Number of touch points currently on the surface.
    pub touches: usize,
    pub target: ElementId,
    pub time: Instant,
}

/// The event handed to the prepare and done callbacks.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    Pointer(PointerEvent),
    Touch(TouchEvent),
}

impl InputEvent {
    pub fn modifiers(&self) -> Modifiers {
        match self {
            InputEvent::Pointer(e) => e.modifiers,
            InputEvent::Touch(_) => Modifiers::default(),
        }
    }
}

/// What the host should do with the native event after a handler ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResponse {
    /// Let the platform apply its default handling.
    PassThrough,
    /// Prevent default handling and stop propagation.
    Paused,
}

impl EventResponse {
    pub fn is_paused(self) -> bool {
        self == EventResponse::Paused
    }
}
