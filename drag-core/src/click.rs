//! Replaying a click on the element a gesture started on.
//!
//! While a gesture is active the overlay receives the mouse-up, so the native
//! click never reaches the original target. When the gesture turns out to be
//! a click we build one ourselves from the terminating event.

use log::debug;

use crate::event::{ElementId, Modifiers, PointerEvent};
use crate::platform::Platform;

/// How a synthetic click gets constructed by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickStrategy {
    /// Event constructor taking an init dictionary (preferred).
    Constructor,
    /// Create a generic mouse event and initialize it field by field.
    InitMouseEvent,
}

/// All attributes of the original event that get replayed.
#[derive(Debug, Clone, PartialEq)]
pub struct MouseEventInit {
    pub bubbles: bool,
    pub cancelable: bool,
    pub detail: i32,
    pub screen_x: f64,
    pub screen_y: f64,
    pub client_x: f64,
    pub client_y: f64,
    pub modifiers: Modifiers,
    pub button: i16,
    pub related_target: Option<ElementId>,
}

impl From<&PointerEvent> for MouseEventInit {
    fn from(e: &PointerEvent) -> Self {
        Self {
            bubbles: e.bubbles,
            cancelable: e.cancelable,
            detail: e.detail,
            screen_x: e.screen_x,
            screen_y: e.screen_y,
            client_x: e.client_x,
            client_y: e.client_y,
            modifiers: e.modifiers,
            button: e.button.index(),
            related_target: e.related_target,
        }
    }
}

/// A click event ready to be dispatched.
#[derive(Debug, Clone, PartialEq)]
pub struct SyntheticClick {
    pub strategy: ClickStrategy,
    pub init: MouseEventInit,
}

/// Build a click replaying `event`, falling back to the legacy strategy if
/// the constructor is unsupported.
pub fn synthesize_click<P: Platform>(
    platform: &mut P,
    event: &PointerEvent,
) -> Result<SyntheticClick, String> {
    let init = MouseEventInit::from(event);
    match platform.construct_click(ClickStrategy::Constructor, &init) {
        Ok(click) => Ok(click),
        Err(err) => {
            debug!("click constructor unavailable ({err}), using initMouseEvent");
            platform.construct_click(ClickStrategy::InitMouseEvent, &init)
        }
    }
}

/// Synthesize a click and dispatch it on `target`.
pub fn replay_click<P: Platform>(
    platform: &mut P,
    target: ElementId,
    event: &PointerEvent,
) -> Result<(), String> {
    let click = synthesize_click(platform, event)?;
    platform.dispatch_click(target, click)
}

#[cfg(test)]
mod tests {
    use web_time::Instant;

    use super::*;
    use crate::testing::{init, FakePlatform};

    fn event() -> PointerEvent {
        PointerEvent::new(12.0, 34.0, ElementId(1), Instant::now())
            .with_screen_pos(112.0, 134.0)
            .with_modifiers(Modifiers {
                shift: true,
                ..Default::default()
            })
    }

    #[test]
    fn test_constructor_is_preferred() {
        init();
        let mut platform = FakePlatform::new();
        let click = synthesize_click(&mut platform, &event()).unwrap();
        assert_eq!(click.strategy, ClickStrategy::Constructor);
        assert_eq!(click.init.client_x, 12.0);
        assert_eq!(click.init.screen_y, 134.0);
        assert!(click.init.modifiers.shift);
    }

    #[test]
    fn test_fallback_to_init_mouse_event() {
        init();
        let mut platform = FakePlatform::new();
        platform.supports_constructor = false;
        let click = synthesize_click(&mut platform, &event()).unwrap();
        assert_eq!(click.strategy, ClickStrategy::InitMouseEvent);
        assert_eq!(click.init.client_y, 34.0);
    }

    #[test]
    fn test_both_strategies_failing_is_an_error() {
        init();
        let mut platform = FakePlatform::new();
        platform.supports_constructor = false;
        platform.supports_init_mouse_event = false;
        assert!(replay_click(&mut platform, ElementId(1), &event()).is_err());
        assert!(platform.clicks.is_empty());
    }
}
