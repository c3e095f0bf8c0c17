//! `drag_core::Platform` on top of egui.
//!
//! egui is immediate mode, so nothing here touches the UI directly. Requests
//! are recorded and the plotter applies them while drawing the next frame:
//! the overlay becomes a foreground `egui::Area` covering the screen, clicks
//! become app events.

use std::collections::HashMap;

use drag_core::{
    click::{ClickStrategy, MouseEventInit, SyntheticClick},
    Cursor, ElementId, OverlaySpec, Platform, PointerEvents,
};

/// The plot area, the only drag target of this app.
pub const PLOT_ELEMENT: ElementId = ElementId(1);

#[derive(Debug, Default)]
pub struct EguiPlatform {
    next_id: u64,
    overlay: Option<(ElementId, OverlaySpec)>,
    cursors: HashMap<ElementId, Cursor>,
    pointer_events: HashMap<ElementId, PointerEvents>,
    clicks: Vec<(ElementId, SyntheticClick)>,
    unhover_requested: bool,
    replot_requested: bool,
}

impl EguiPlatform {
    pub fn new() -> Self {
        Self {
            next_id: PLOT_ELEMENT.0,
            ..Default::default()
        }
    }

    pub fn overlay(&self) -> Option<&OverlaySpec> {
        self.overlay.as_ref().map(|(_, spec)| spec)
    }

    pub fn set_cursor(&mut self, element: ElementId, cursor: Cursor) {
        self.cursors.insert(element, cursor);
    }

    pub fn accepts_pointer(&self, element: ElementId) -> bool {
        self.pointer_events.get(&element) == Some(&PointerEvents::All)
    }

    pub fn take_clicks(&mut self) -> Vec<(ElementId, SyntheticClick)> {
        std::mem::take(&mut self.clicks)
    }

    pub fn take_unhover(&mut self) -> bool {
        std::mem::take(&mut self.unhover_requested)
    }

    pub fn take_replot(&mut self) -> bool {
        std::mem::take(&mut self.replot_requested)
    }
}

impl Platform for EguiPlatform {
    fn set_pointer_events(&mut self, element: ElementId, mode: PointerEvents) {
        self.pointer_events.insert(element, mode);
    }

    fn computed_cursor(&self, element: ElementId) -> Cursor {
        self.cursors.get(&element).copied().unwrap_or_default()
    }

    fn create_overlay(&mut self, spec: &OverlaySpec) -> ElementId {
        self.next_id += 1;
        let id = ElementId(self.next_id);
        if let Some((stale, _)) = self.overlay.replace((id, spec.clone())) {
            log::warn!("replacing overlay {:?} that was never removed", stale);
        }
        id
    }

    fn remove_element(&mut self, element: ElementId) {
        if self.overlay.as_ref().is_some_and(|(id, _)| *id == element) {
            self.overlay = None;
        }
        self.cursors.remove(&element);
    }

    fn construct_click(
        &mut self,
        strategy: ClickStrategy,
        init: &MouseEventInit,
    ) -> Result<SyntheticClick, String> {
        match strategy {
            ClickStrategy::Constructor => Ok(SyntheticClick {
                strategy,
                init: init.clone(),
            }),
            ClickStrategy::InitMouseEvent => Err("egui has no legacy mouse events".into()),
        }
    }

    fn dispatch_click(&mut self, target: ElementId, click: SyntheticClick) -> Result<(), String> {
        if !self.accepts_pointer(target) {
            return Err(format!("element {:?} does not take pointer events", target));
        }
        self.clicks.push((target, click));
        Ok(())
    }

    fn unhover(&mut self) {
        self.unhover_requested = true;
    }

    fn replot(&mut self) {
        self.replot_requested = true;
    }
}

pub fn cursor_icon(cursor: Cursor) -> egui::CursorIcon {
    match cursor {
        Cursor::Default => egui::CursorIcon::Default,
        Cursor::Pointer => egui::CursorIcon::PointingHand,
        Cursor::Crosshair => egui::CursorIcon::Crosshair,
        Cursor::Move => egui::CursorIcon::Move,
        Cursor::EwResize => egui::CursorIcon::ResizeHorizontal,
        Cursor::NsResize => egui::CursorIcon::ResizeVertical,
        Cursor::NwseResize => egui::CursorIcon::ResizeNwSe,
        Cursor::NeswResize => egui::CursorIcon::ResizeNeSw,
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use drag_core::{DragElement, DragOptions, HostState, PointerEvent};
    use web_time::Instant;

    use super::*;

    #[test]
    fn test_click_is_recorded_for_plot() {
        let mut platform = EguiPlatform::new();
        let mut host = HostState::new();
        platform.set_cursor(PLOT_ELEMENT, Cursor::Move);
        let mut drag = DragElement::init(DragOptions::new(PLOT_ELEMENT), &mut platform);
        assert!(platform.accepts_pointer(PLOT_ELEMENT));

        let t0 = Instant::now();
        let down = PointerEvent::new(10.0, 20.0, PLOT_ELEMENT, t0);
        drag.on_pointer_down(&mut host, &mut platform, &down);
        assert_eq!(platform.overlay().map(|o| o.cursor), Some(Cursor::Move));

        let up = PointerEvent::new(11.0, 21.0, PLOT_ELEMENT, t0 + Duration::from_millis(40));
        drag.on_pointer_up(&mut host, &mut platform, &up).unwrap();

        assert!(platform.overlay().is_none());
        let clicks = platform.take_clicks();
        assert_eq!(clicks.len(), 1);
        assert_eq!(clicks[0].1.strategy, ClickStrategy::Constructor);
        assert_eq!(clicks[0].1.init.client_x, 11.0);
        assert!(platform.take_clicks().is_empty());
    }

    #[test]
    fn test_click_on_unregistered_element_fails() {
        let mut platform = EguiPlatform::new();
        let click = SyntheticClick {
            strategy: ClickStrategy::Constructor,
            init: MouseEventInit::from(&PointerEvent::new(0.0, 0.0, ElementId(9), Instant::now())),
        };
        assert!(platform.dispatch_click(ElementId(9), click).is_err());
    }

    #[test]
    fn test_flags_are_taken_once() {
        let mut platform = EguiPlatform::new();
        platform.unhover();
        platform.replot();
        assert!(platform.take_unhover());
        assert!(!platform.take_unhover());
        assert!(platform.take_replot());
        assert!(!platform.take_replot());
    }
}
