//! The pointer path of the drag controller.
//!
//! # Gesture lifecycle
//!
//! mouse-down on the target starts a session and puts an overlay over the
//! whole viewport. The overlay receives every following move and the final
//! mouse-up (or mouse-out of the window), so a gesture always ends even if
//! the pointer leaves the target. Moves shorter than the minimum drag
//! distance are reported as zero offsets; a gesture that never exceeded it is
//! a click and gets a synthetic click replayed on the original target.

use log::{debug, trace, warn};

use crate::click::replay_click;
use crate::event::{ElementId, EventResponse, InputEvent, PointerEvent};
use crate::host::{finish_drag, HostState};
use crate::options::DragOptions;
use crate::platform::{OverlaySpec, Platform, PointerEvents};
use crate::touch::TouchTracker;

#[derive(Debug, Clone)]
struct PointerSession {
    start_x: f64,
    start_y: f64,
    initial_target: ElementId,
    overlay: ElementId,
}

/// Click and drag controller for a single target element.
#[derive(Debug)]
pub struct DragElement {
    pub(crate) options: DragOptions,
    /// Clicks registered in the current click train.
    pub(crate) num_clicks: u32,
    /// Whether hovering the target runs the `set_cursor` callback.
    cursor_enabled: bool,
    session: Option<PointerSession>,
    pub(crate) touch: TouchTracker,
}

impl DragElement {
    pub fn init<P: Platform>(options: DragOptions, platform: &mut P) -> Self {
        debug!("initializing drag element {:?}", options.element);
        platform.set_pointer_events(options.element, PointerEvents::All);
        Self {
            cursor_enabled: options.set_cursor.is_some(),
            options,
            num_clicks: 1,
            session: None,
            touch: TouchTracker::default(),
        }
    }

    /// Whether a pointer gesture is in progress.
    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    pub fn overlay(&self) -> Option<ElementId> {
        self.session
            .as_ref()
            .map(|s| s.overlay)
            .or(self.touch.overlay())
    }

    pub fn on_pointer_down<P: Platform>(
        &mut self,
        host: &mut HostState,
        platform: &mut P,
        event: &PointerEvent,
    ) -> EventResponse {
        if let Some(stale) = self.session.take() {
            warn!(
                "mouse-down on {:?} while a gesture is active, restarting it",
                self.options.element
            );
            platform.remove_element(stale.overlay);
        }

        self.cursor_enabled = false;

        host.dragged = false;
        host.dragging = true;

        let delay = self.options.thresholds.dblclick_delay;
        let in_click_train = host
            .mouse_down_time
            .is_some_and(|t| event.time.saturating_duration_since(t) < delay);
        if in_click_train {
            self.num_clicks += 1;
        } else {
            self.num_clicks = 1;
            host.mouse_down_time = Some(event.time);
        }
        trace!(
            "gesture start at ({}, {}), click {}",
            event.client_x,
            event.client_y,
            self.num_clicks
        );

        let (start_x, start_y) = (event.client_x, event.client_y);
        if let Some(prep_fn) = self.options.prep_fn.as_mut() {
            prep_fn(&InputEvent::Pointer(event.clone()), start_x, start_y);
        }

        let cursor = platform.computed_cursor(self.options.element);
        let overlay = platform.create_overlay(&OverlaySpec::new(cursor));

        self.session = Some(PointerSession {
            start_x,
            start_y,
            initial_target: event.target,
            overlay,
        });

        EventResponse::Paused
    }

    /// Handle a mouse move. During a gesture this reports the drag offset,
    /// otherwise it is a hover over the target.
    pub fn on_pointer_move<P: Platform>(
        &mut self,
        host: &mut HostState,
        platform: &mut P,
        event: &PointerEvent,
    ) -> EventResponse {
        let Some(session) = self.session.as_ref() else {
            self.on_hover(event);
            return EventResponse::PassThrough;
        };

        let min_drag = self.options.effective_min_drag();
        let mut dx = event.client_x - session.start_x;
        let mut dy = event.client_y - session.start_y;
        if dx.abs() < min_drag {
            dx = 0.0;
        }
        if dy.abs() < min_drag {
            dy = 0.0;
        }
        if dx != 0.0 || dy != 0.0 {
            host.dragged = true;
            platform.unhover();
        }

        if let Some(move_fn) = self.options.move_fn.as_mut() {
            move_fn(dx, dy, host.dragged);
        }

        EventResponse::Paused
    }

    pub fn on_hover(&mut self, event: &PointerEvent) {
        if !self.cursor_enabled || self.session.is_some() {
            return;
        }
        if let Some(set_cursor) = self.options.set_cursor.as_mut() {
            set_cursor(event);
        }
    }

    pub fn on_pointer_up<P: Platform>(
        &mut self,
        host: &mut HostState,
        platform: &mut P,
        event: &PointerEvent,
    ) -> Result<EventResponse, String> {
        self.on_done(host, platform, event)
    }

    /// The pointer left the window. No more events arrive after this, so the
    /// gesture ends here exactly as on mouse-up.
    pub fn on_pointer_out<P: Platform>(
        &mut self,
        host: &mut HostState,
        platform: &mut P,
        event: &PointerEvent,
    ) -> Result<EventResponse, String> {
        self.on_done(host, platform, event)
    }

    fn on_done<P: Platform>(
        &mut self,
        host: &mut HostState,
        platform: &mut P,
        event: &PointerEvent,
    ) -> Result<EventResponse, String> {
        self.cursor_enabled = self.options.set_cursor.is_some();

        let session = self.session.take();
        if let Some(session) = session.as_ref() {
            platform.remove_element(session.overlay);
        }

        let Some(session) = session.filter(|_| host.dragging) else {
            host.dragged = false;
            return Ok(EventResponse::PassThrough);
        };
        host.dragging = false;

        // A slow second click does not count as a double click.
        let delay = self.options.thresholds.dblclick_delay;
        let too_slow = host
            .mouse_down_time
            .map_or(true, |t| event.time.saturating_duration_since(t) > delay);
        if too_slow {
            self.num_clicks = (self.num_clicks - 1).max(1);
        }

        let dragged = host.dragged;
        debug!(
            "gesture done on {:?}: dragged={}, clicks={}",
            self.options.element, dragged, self.num_clicks
        );
        if let Some(done_fn) = self.options.done_fn.as_mut() {
            done_fn(dragged, self.num_clicks, &InputEvent::Pointer(event.clone()));
        }

        let replayed = if dragged {
            Ok(())
        } else {
            replay_click(platform, session.initial_target, event)
        };

        finish_drag(host, platform);
        host.dragged = false;

        replayed.map(|_| EventResponse::Paused)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use web_time::Instant;

    use super::*;
    use crate::click::ClickStrategy;
    use crate::platform::Cursor;
    use crate::testing::{init, FakePlatform, Recorder};

    const TARGET: ElementId = ElementId(7);

    fn at(t0: Instant, ms: u64, x: f64, y: f64) -> PointerEvent {
        PointerEvent::new(x, y, TARGET, t0 + Duration::from_millis(ms))
    }

    fn setup() -> (DragElement, HostState, FakePlatform, Recorder) {
        init();
        let recorder = Recorder::default();
        let mut platform = FakePlatform::new();
        let options = recorder.attach(DragOptions::new(TARGET));
        let drag = DragElement::init(options, &mut platform);
        (drag, HostState::new(), platform, recorder)
    }

    #[test]
    fn test_init_enables_pointer_events() {
        let (_, _, platform, _) = setup();
        assert_eq!(platform.pointer_events, vec![(TARGET, PointerEvents::All)]);
    }

    #[test]
    fn test_small_moves_stay_a_click() {
        let (mut drag, mut host, mut platform, rec) = setup();
        let t0 = Instant::now();

        let res = drag.on_pointer_down(&mut host, &mut platform, &at(t0, 0, 10.0, 10.0));
        assert!(res.is_paused());
        assert_eq!(rec.prepared(), vec![(10.0, 10.0)]);
        assert!(host.dragging);
        assert_eq!(platform.live_overlays(), 1);

        drag.on_pointer_move(&mut host, &mut platform, &at(t0, 10, 13.0, 5.0));
        drag.on_pointer_move(&mut host, &mut platform, &at(t0, 20, 17.0, 17.0));
        assert!(!host.dragged);
        assert_eq!(rec.moves(), vec![(0.0, 0.0, false), (0.0, 0.0, false)]);
        assert_eq!(platform.unhovers, 0);

        drag.on_pointer_up(&mut host, &mut platform, &at(t0, 50, 17.0, 17.0))
            .unwrap();
        assert_eq!(rec.done(), vec![(false, 1)]);
        assert_eq!(platform.live_overlays(), 0);
        assert_eq!(platform.clicks.len(), 1);
        let (target, click) = &platform.clicks[0];
        assert_eq!(*target, TARGET);
        assert_eq!(click.strategy, ClickStrategy::Constructor);
        assert_eq!(click.init.client_x, 17.0);
        assert!(!host.dragging);
        assert!(!host.dragged);
    }

    #[test]
    fn test_drag_past_threshold() {
        let (mut drag, mut host, mut platform, rec) = setup();
        let t0 = Instant::now();

        drag.on_pointer_down(&mut host, &mut platform, &at(t0, 0, 100.0, 100.0));
        drag.on_pointer_move(&mut host, &mut platform, &at(t0, 10, 104.0, 100.0));
        assert!(!host.dragged);
        drag.on_pointer_move(&mut host, &mut platform, &at(t0, 20, 120.0, 103.0));
        assert!(host.dragged);
        assert_eq!(platform.unhovers, 1);
        drag.on_pointer_move(&mut host, &mut platform, &at(t0, 30, 90.0, 130.0));

        assert_eq!(
            rec.moves(),
            vec![(0.0, 0.0, false), (20.0, 0.0, true), (-10.0, 30.0, true)]
        );

        drag.on_pointer_up(&mut host, &mut platform, &at(t0, 400, 90.0, 130.0))
            .unwrap();
        assert_eq!(rec.done(), vec![(true, 1)]);
        assert!(platform.clicks.is_empty());
        assert!(!host.dragged);
    }

    #[test]
    fn test_min_drag_override() {
        init();
        let rec = Recorder::default();
        let mut platform = FakePlatform::new();
        let mut drag = DragElement::init(rec.attach(DragOptions::new(TARGET)).min_drag(2.0), &mut platform);
        let mut host = HostState::new();
        let t0 = Instant::now();

        drag.on_pointer_down(&mut host, &mut platform, &at(t0, 0, 0.0, 0.0));
        drag.on_pointer_move(&mut host, &mut platform, &at(t0, 5, 3.0, 1.0));
        assert_eq!(rec.moves(), vec![(3.0, 0.0, true)]);
    }

    #[test]
    fn test_click_train_counts() {
        let (mut drag, mut host, mut platform, rec) = setup();
        let t0 = Instant::now();

        for (down, up) in [(0, 40), (80, 120), (160, 200)] {
            drag.on_pointer_down(&mut host, &mut platform, &at(t0, down, 5.0, 5.0));
            drag.on_pointer_up(&mut host, &mut platform, &at(t0, up, 5.0, 5.0))
                .unwrap();
        }
        assert_eq!(rec.done(), vec![(false, 1), (false, 2), (false, 3)]);

        // Outside the window, a new train starts.
        drag.on_pointer_down(&mut host, &mut platform, &at(t0, 1000, 5.0, 5.0));
        drag.on_pointer_up(&mut host, &mut platform, &at(t0, 1010, 5.0, 5.0))
            .unwrap();
        assert_eq!(rec.done()[3], (false, 1));
    }

    #[test]
    fn test_slow_release_demotes_click_count() {
        let (mut drag, mut host, mut platform, rec) = setup();
        let t0 = Instant::now();

        drag.on_pointer_down(&mut host, &mut platform, &at(t0, 0, 5.0, 5.0));
        drag.on_pointer_up(&mut host, &mut platform, &at(t0, 50, 5.0, 5.0))
            .unwrap();
        drag.on_pointer_down(&mut host, &mut platform, &at(t0, 100, 5.0, 5.0));
        // Released after the double click delay: counts as a single click.
        drag.on_pointer_up(&mut host, &mut platform, &at(t0, 900, 5.0, 5.0))
            .unwrap();
        assert_eq!(rec.done(), vec![(false, 1), (false, 1)]);

        // A single slow click never goes below one.
        drag.on_pointer_down(&mut host, &mut platform, &at(t0, 2000, 5.0, 5.0));
        drag.on_pointer_up(&mut host, &mut platform, &at(t0, 3000, 5.0, 5.0))
            .unwrap();
        assert_eq!(rec.done()[2], (false, 1));
    }

    #[test]
    fn test_end_without_begin_is_a_noop() {
        let (mut drag, mut host, mut platform, rec) = setup();
        host.dragged = true;
        let res = drag
            .on_pointer_up(&mut host, &mut platform, &at(Instant::now(), 0, 1.0, 1.0))
            .unwrap();
        assert_eq!(res, EventResponse::PassThrough);
        assert!(!host.dragged);
        assert!(rec.done().is_empty());
        assert!(platform.clicks.is_empty());
    }

    #[test]
    fn test_pointer_out_removes_overlay() {
        let (mut drag, mut host, mut platform, rec) = setup();
        let t0 = Instant::now();

        drag.on_pointer_down(&mut host, &mut platform, &at(t0, 0, 0.0, 0.0));
        drag.on_pointer_move(&mut host, &mut platform, &at(t0, 10, 50.0, 0.0));
        assert!(drag.overlay().is_some());
        drag.on_pointer_out(&mut host, &mut platform, &at(t0, 20, -5.0, 0.0))
            .unwrap();

        assert_eq!(platform.live_overlays(), 0);
        assert!(drag.overlay().is_none());
        assert_eq!(rec.done(), vec![(true, 1)]);
    }

    #[test]
    fn test_overlay_uses_target_cursor() {
        let (mut drag, mut host, mut platform, _) = setup();
        platform.cursors.insert(TARGET, Cursor::Move);
        drag.on_pointer_down(&mut host, &mut platform, &at(Instant::now(), 0, 0.0, 0.0));

        let spec = platform.overlays.values().next().unwrap();
        assert_eq!(spec.cursor, Cursor::Move);
        assert_eq!(spec.class_name, "dragcover");
    }

    #[test]
    fn test_hover_cursor_only_outside_gestures() {
        let (mut drag, mut host, mut platform, rec) = setup();
        let t0 = Instant::now();

        let res = drag.on_pointer_move(&mut host, &mut platform, &at(t0, 0, 1.0, 1.0));
        assert_eq!(res, EventResponse::PassThrough);
        assert_eq!(rec.hovers(), 1);

        drag.on_pointer_down(&mut host, &mut platform, &at(t0, 10, 1.0, 1.0));
        drag.on_hover(&at(t0, 20, 2.0, 2.0));
        assert_eq!(rec.hovers(), 1);

        drag.on_pointer_up(&mut host, &mut platform, &at(t0, 30, 2.0, 2.0))
            .unwrap();
        drag.on_hover(&at(t0, 40, 3.0, 3.0));
        assert_eq!(rec.hovers(), 2);
    }

    #[test]
    fn test_pending_replot_runs_after_gesture() {
        let (mut drag, mut host, mut platform, _) = setup();
        let t0 = Instant::now();

        drag.on_pointer_down(&mut host, &mut platform, &at(t0, 0, 0.0, 0.0));
        host.request_replot(&mut platform);
        assert_eq!(platform.replots, 0);
        drag.on_pointer_up(&mut host, &mut platform, &at(t0, 10, 0.0, 0.0))
            .unwrap();
        assert_eq!(platform.replots, 1);
    }

    #[test]
    fn test_restart_while_active_drops_stale_overlay() {
        let (mut drag, mut host, mut platform, rec) = setup();
        let t0 = Instant::now();

        drag.on_pointer_down(&mut host, &mut platform, &at(t0, 0, 0.0, 0.0));
        drag.on_pointer_down(&mut host, &mut platform, &at(t0, 500, 0.0, 0.0));
        assert_eq!(platform.live_overlays(), 1);
        assert_eq!(rec.prepared().len(), 2);
    }

    #[test]
    fn test_failed_click_still_finishes_gesture() {
        let (mut drag, mut host, mut platform, rec) = setup();
        platform.supports_constructor = false;
        platform.supports_init_mouse_event = false;
        let t0 = Instant::now();

        drag.on_pointer_down(&mut host, &mut platform, &at(t0, 0, 0.0, 0.0));
        let res = drag.on_pointer_up(&mut host, &mut platform, &at(t0, 10, 0.0, 0.0));
        assert!(res.is_err());
        assert_eq!(rec.done(), vec![(false, 1)]);
        assert!(!host.dragging);
        assert_eq!(platform.live_overlays(), 0);
    }
}
