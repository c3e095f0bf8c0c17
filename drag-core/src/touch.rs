//! The touch path of the drag controller.
//!
//! Simpler than the pointer path: a single touch point is tracked, a short
//! lived timer token tells a double tap from two separate taps, and the drag
//! threshold is anisotropic (wide horizontally, narrow vertically). Taps are
//! never replayed as clicks.

use log::{debug, trace};
use web_time::Instant;

use crate::controller::DragElement;
use crate::event::{ElementId, EventResponse, InputEvent, TouchEvent};
use crate::host::{finish_drag, HostState};
use crate::platform::{OverlaySpec, Platform};

#[derive(Debug, Default)]
pub(crate) struct TouchTracker {
    start: Option<(f64, f64)>,
    last: Option<(f64, f64)>,
    overlay: Option<ElementId>,
    /// Expiry of the double tap token armed by the previous tap.
    tap_timer: Option<Instant>,
    double_touch: bool,
}

impl TouchTracker {
    pub(crate) fn overlay(&self) -> Option<ElementId> {
        self.overlay
    }

    fn is_active(&self) -> bool {
        self.start.is_some() || self.last.is_some()
    }
}

impl DragElement {
    pub fn on_touch_start<P: Platform>(
        &mut self,
        host: &mut HostState,
        platform: &mut P,
        event: &TouchEvent,
    ) -> EventResponse {
        if self.touch.start.is_some() {
            return EventResponse::PassThrough;
        }

        match self.touch.tap_timer {
            Some(expiry) if event.time < expiry => {
                self.touch.tap_timer = None;
                self.touch.double_touch = true;
            }
            _ => {
                self.touch.tap_timer = Some(event.time + self.options.thresholds.double_tap_window);
            }
        }

        let (start_x, start_y) = (event.page_x, event.page_y);
        self.touch.start = Some((start_x, start_y));
        host.dragged = false;
        host.dragging = true;

        let cursor = platform.computed_cursor(self.options.element);
        self.touch.overlay = Some(platform.create_overlay(&OverlaySpec::new(cursor)));
        trace!("touch start at ({start_x}, {start_y})");

        if let Some(prep_fn) = self.options.prep_fn.as_mut() {
            prep_fn(&InputEvent::Touch(event.clone()), start_x, start_y);
        }

        EventResponse::Paused
    }

    pub fn on_touch_move<P: Platform>(
        &mut self,
        host: &mut HostState,
        platform: &mut P,
        event: &TouchEvent,
    ) -> EventResponse {
        if event.touches > 1 {
            return EventResponse::PassThrough;
        }
        let Some((start_x, start_y)) = self.touch.start else {
            return EventResponse::PassThrough;
        };
        self.touch.last = Some((event.page_x, event.page_y));

        let dx = event.page_x - start_x;
        let dy = event.page_y - start_y;
        let thresholds = &self.options.thresholds;
        if dx.abs() > thresholds.touch_min_drag_x || dy.abs() > thresholds.touch_min_drag_y {
            host.dragged = true;
            platform.unhover();
            if let Some(move_fn) = self.options.move_fn.as_mut() {
                move_fn(dx, dy, host.dragged);
            }
        }
        EventResponse::PassThrough
    }

    pub fn on_touch_end<P: Platform>(
        &mut self,
        host: &mut HostState,
        platform: &mut P,
        event: &TouchEvent,
    ) -> EventResponse {
        if !self.touch.is_active() {
            return EventResponse::PassThrough;
        }

        // Only a double tap resolves to a click; everything else is reported
        // as a drag.
        if self.touch.double_touch {
            self.num_clicks = 2;
            host.dragged = false;
        } else {
            self.num_clicks = 1;
            host.dragged = true;
        }
        self.touch.double_touch = false;

        self.touch.start = None;
        self.touch.last = None;
        if let Some(overlay) = self.touch.overlay.take() {
            platform.remove_element(overlay);
        }

        if !host.dragging {
            host.dragged = false;
            return EventResponse::PassThrough;
        }
        host.dragging = false;

        debug!(
            "touch gesture done on {:?}: dragged={}, clicks={}",
            self.options.element, host.dragged, self.num_clicks
        );
        if let Some(done_fn) = self.options.done_fn.as_mut() {
            done_fn(
                host.dragged,
                self.num_clicks,
                &InputEvent::Touch(event.clone()),
            );
        }
        finish_drag(host, platform);
        EventResponse::PassThrough
    }
}
