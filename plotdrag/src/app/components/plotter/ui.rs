use drag_core::{
    EventResponse, Modifiers, MouseButton, Platform, PointerEvent, TouchEvent,
};
use egui_plot::{Line, PlotBounds, Points};
use web_time::Instant;

use super::logic::effective_zoom_box;
use crate::app::events::{send_event, PlotClicked};
use crate::app::platform::{cursor_icon, PLOT_ELEMENT};

const ZOOM_BOX_COLOR: egui::Color32 = egui::Color32::from_rgb(0x44, 0x88, 0xcc);

impl super::Plotter {
    pub fn render(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        let response = egui_plot::Plot::new("Carpet")
            // All dragging goes through the drag controllers.
            .allow_drag(false)
            .allow_zoom(false)
            .allow_scroll(false)
            .allow_boxed_zoom(false)
            .allow_double_click_reset(false)
            .show_x(self.show_hover)
            .show_y(self.show_hover)
            .show(ui, |plot_ui| {
                if let Some([xmin, xmax, ymin, ymax]) = self.request_plot_bounds.take() {
                    plot_ui.set_plot_bounds(PlotBounds::from_min_max([xmin, ymin], [xmax, ymax]));
                }
                for line in self.grid.iter() {
                    plot_ui.line(
                        Line::new(line.points.clone())
                            .color(line.color)
                            .width(self.grid_linewidth),
                    );
                }
                if let Some(marker) = self.marker {
                    plot_ui.points(
                        Points::new(vec![marker])
                            .radius(4.0)
                            .color(egui::Color32::RED),
                    );
                }
                self.current_plot_bounds = {
                    let [xmin, ymin] = plot_ui.plot_bounds().min();
                    let [xmax, ymax] = plot_ui.plot_bounds().max();
                    [xmin, xmax, ymin, ymax]
                };
            });
        self.frame = *response.transform.frame();

        let paused = self.handle_input(ctx);
        self.apply_platform_requests(ctx);

        if let Some(zoom_box) = self.zoom_box {
            let rect = effective_zoom_box(self.frame, zoom_box);
            ui.painter().rect(
                rect,
                0.0,
                ZOOM_BOX_COLOR.gamma_multiply(0.2),
                egui::Stroke::new(1.0, ZOOM_BOX_COLOR),
            );
        }

        match self.platform.overlay() {
            Some(spec) => {
                // The overlay covers the whole screen and takes the pointer
                // away from every other widget until the gesture ends.
                let screen = ctx.screen_rect();
                let cursor = cursor_icon(spec.cursor);
                egui::Area::new(egui::Id::new("drag_overlay"))
                    .order(egui::Order::Foreground)
                    .fixed_pos(screen.min)
                    .show(ctx, |ui| {
                        ui.allocate_response(screen.size(), egui::Sense::click_and_drag())
                            .on_hover_cursor(cursor);
                    });
                ctx.set_cursor_icon(cursor);
            }
            None => {
                let cursor = cursor_icon(self.platform.computed_cursor(PLOT_ELEMENT));
                response.response.on_hover_cursor(cursor);
            }
        }

        if paused || self.zoom_box.is_some() {
            ctx.request_repaint();
        }
    }

    /// Feed this frame's input to the controller of the current mode. Returns
    /// whether any handler paused the native event.
    fn handle_input(&mut self, ctx: &egui::Context) -> bool {
        let events = ctx.input(|i| i.events.clone());
        let now = Instant::now();
        let frame = self.frame;
        // egui reports touches as pointer events too.
        let has_touch = events
            .iter()
            .any(|event| matches!(event, egui::Event::Touch { .. }));
        let mut paused = false;

        for event in events {
            let response = match event {
                egui::Event::Touch { id, phase, pos, .. } => {
                    self.handle_touch(id.0, phase, pos, frame, now)
                }
                _ if has_touch || !self.active_touches.is_empty() => continue,
                egui::Event::PointerButton {
                    pos,
                    button,
                    pressed,
                    modifiers,
                } => {
                    let Some(button) = mouse_button(button) else {
                        continue;
                    };
                    let event = pointer_event(pos, now, modifiers).with_button(button);
                    match (pressed, self.pointer_target()) {
                        (true, None) if frame.contains(pos) => self
                            .with_controller(|drag, host, platform| {
                                drag.on_pointer_down(host, platform, &event)
                            }),
                        (false, Some(overlay)) => {
                            let event = PointerEvent { target: overlay, ..event };
                            self.with_controller(|drag, host, platform| {
                                drag.on_pointer_up(host, platform, &event)
                            })
                            .unwrap_or_else(|err| {
                                log::error!("pointer up: {}", err);
                                EventResponse::Paused
                            })
                        }
                        _ => continue,
                    }
                }
                egui::Event::PointerMoved(pos) => {
                    let modifiers = ctx.input(|i| i.modifiers);
                    let event = pointer_event(pos, now, modifiers);
                    match self.pointer_target() {
                        Some(overlay) => {
                            let event = PointerEvent { target: overlay, ..event };
                            self.with_controller(|drag, host, platform| {
                                drag.on_pointer_move(host, platform, &event)
                            })
                        }
                        None if frame.contains(pos) => {
                            self.with_controller(|drag, _, _| drag.on_hover(&event));
                            EventResponse::PassThrough
                        }
                        None => continue,
                    }
                }
                egui::Event::PointerGone => {
                    let Some(overlay) = self.pointer_target() else {
                        continue;
                    };
                    let pos = ctx.input(|i| i.pointer.latest_pos()).unwrap_or_default();
                    let modifiers = ctx.input(|i| i.modifiers);
                    let event = PointerEvent {
                        target: overlay,
                        ..pointer_event(pos, now, modifiers)
                    };
                    self.with_controller(|drag, host, platform| {
                        drag.on_pointer_out(host, platform, &event)
                    })
                    .unwrap_or_else(|err| {
                        log::error!("pointer out: {}", err);
                        EventResponse::Paused
                    })
                }
                _ => continue,
            };
            paused |= response.is_paused();
        }
        paused
    }

    fn handle_touch(
        &mut self,
        id: u64,
        phase: egui::TouchPhase,
        pos: egui::Pos2,
        frame: egui::Rect,
        now: Instant,
    ) -> EventResponse {
        match phase {
            egui::TouchPhase::Start => {
                if self.active_touches.is_empty() && !frame.contains(pos) {
                    return EventResponse::PassThrough;
                }
                self.active_touches.insert(id);
                let event = self.touch_event(pos, now);
                self.with_controller(|drag, host, platform| {
                    drag.on_touch_start(host, platform, &event)
                })
            }
            egui::TouchPhase::Move => {
                if !self.active_touches.contains(&id) {
                    return EventResponse::PassThrough;
                }
                let event = self.touch_event(pos, now);
                self.with_controller(|drag, host, platform| {
                    drag.on_touch_move(host, platform, &event)
                })
            }
            egui::TouchPhase::End | egui::TouchPhase::Cancel => {
                if !self.active_touches.remove(&id) {
                    return EventResponse::PassThrough;
                }
                let event = self.touch_event(pos, now);
                self.with_controller(|drag, host, platform| {
                    drag.on_touch_end(host, platform, &event)
                })
            }
        }
    }

    fn touch_event(&self, pos: egui::Pos2, now: Instant) -> TouchEvent {
        TouchEvent::new(
            pos.x as f64,
            pos.y as f64,
            self.active_touches.len(),
            PLOT_ELEMENT,
            now,
        )
    }

    /// The overlay of a running pointer gesture, which then receives all
    /// pointer events.
    fn pointer_target(&mut self) -> Option<drag_core::ElementId> {
        self.with_controller(|drag, _, _| drag.is_active().then(|| drag.overlay()).flatten())
    }

    /// Act on what the drag controllers asked the platform for.
    fn apply_platform_requests(&mut self, ctx: &egui::Context) {
        for (target, click) in self.platform.take_clicks() {
            let init = click.init;
            send_event(
                &self.tx,
                PlotClicked::new(target, init.client_x, init.client_y, init.modifiers),
            );
        }
        if self.platform.take_unhover() {
            self.show_hover = false;
        }
        if self.platform.overlay().is_none() && !self.host.dragging {
            self.show_hover = true;
        }
        if self.platform.take_replot() {
            ctx.request_repaint();
        }
    }
}

fn pointer_event(pos: egui::Pos2, now: Instant, modifiers: egui::Modifiers) -> PointerEvent {
    PointerEvent::new(pos.x as f64, pos.y as f64, PLOT_ELEMENT, now).with_modifiers(Modifiers {
        ctrl: modifiers.ctrl,
        alt: modifiers.alt,
        shift: modifiers.shift,
        meta: modifiers.mac_cmd,
    })
}

fn mouse_button(button: egui::PointerButton) -> Option<MouseButton> {
    match button {
        egui::PointerButton::Primary => Some(MouseButton::Primary),
        egui::PointerButton::Middle => Some(MouseButton::Middle),
        egui::PointerButton::Secondary => Some(MouseButton::Secondary),
        egui::PointerButton::Extra1 | egui::PointerButton::Extra2 => None,
    }
}
