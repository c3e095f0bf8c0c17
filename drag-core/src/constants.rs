use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Two mouse-downs closer together than this form a click train.
pub const DBLCLICK_DELAY: Duration = Duration::from_millis(300);

/// Pixels the pointer has to travel on an axis before that axis counts as
/// dragged.
pub const MIN_DRAG: f64 = 8.0;

/// Touch displacement must exceed these (strictly) to count as a drag.
pub const TOUCH_MIN_DRAG_X: f64 = 100.0;
pub const TOUCH_MIN_DRAG_Y: f64 = 10.0;

/// Lifetime of the double tap timer token.
pub const DOUBLE_TAP_WINDOW: Duration = Duration::from_millis(200);

pub const OVERLAY_CLASS: &str = "dragcover";
pub const OVERLAY_Z_INDEX: u32 = 999_999_999;

/// Timing and distance thresholds used by a [`crate::DragElement`].
///
/// `Default` gives the constants of this module; hosts can override single
/// values from their configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    pub dblclick_delay: Duration,
    pub min_drag: f64,
    pub touch_min_drag_x: f64,
    pub touch_min_drag_y: f64,
    pub double_tap_window: Duration,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            dblclick_delay: DBLCLICK_DELAY,
            min_drag: MIN_DRAG,
            touch_min_drag_x: TOUCH_MIN_DRAG_X,
            touch_min_drag_y: TOUCH_MIN_DRAG_Y,
            double_tap_window: DOUBLE_TAP_WINDOW,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thresholds_survive_json() {
        let thresholds = Thresholds {
            min_drag: 3.0,
            ..Default::default()
        };
        let json = serde_json::to_string(&thresholds).unwrap();
        let back: Thresholds = serde_json::from_str(&json).unwrap();
        assert_eq!(back, thresholds);
        assert_eq!(back.dblclick_delay, DBLCLICK_DELAY);
    }
}
