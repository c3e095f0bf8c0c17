mod logic;
mod ui;

use std::collections::HashSet;

use carpet_defaults::CarpetTrace;
use drag_core::{Cursor, DragElement, DragOptions, HostState, InputEvent};
use serde::{Deserialize, Serialize};

use crate::app::config::Config;
use crate::app::events::{
    send_event, EventSender, GestureDone, GestureStarted, MoveZoomBox, PanPlot, SetCursor,
};
use crate::app::platform::{EguiPlatform, PLOT_ELEMENT};

pub struct Plotter {
    mode: DragMode,
    trace: Option<CarpetTrace>,
    grid: Vec<logic::GridLine>,
    grid_linewidth: f32,
    current_plot_bounds: [f64; 4],
    request_plot_bounds: Option<[f64; 4]>,
    /// Screen rectangle of the plot area in the last frame.
    frame: egui::Rect,
    gesture: Option<GestureStart>,
    /// Zoom box in screen coordinates, as dragged.
    zoom_box: Option<egui::Rect>,
    marker: Option<[f64; 2]>,
    show_hover: bool,
    host: HostState,
    platform: EguiPlatform,
    pan: DragElement,
    zoom: DragElement,
    active_touches: HashSet<u64>,
    tx: EventSender,
}

/// Plot state captured when a gesture starts. Offsets reported during the
/// gesture are relative to this.
#[derive(Debug, Clone, Copy, PartialEq)]
struct GestureStart {
    pos: egui::Pos2,
    bounds: [f64; 4],
    frame: egui::Rect,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DragMode {
    Pan,
    Zoom,
}

impl DragMode {
    pub fn next(&self) -> Self {
        match self {
            DragMode::Pan => DragMode::Zoom,
            DragMode::Zoom => DragMode::Pan,
        }
    }

    pub fn cursor(&self) -> Cursor {
        match self {
            DragMode::Pan => Cursor::Move,
            DragMode::Zoom => Cursor::Crosshair,
        }
    }
}

impl Plotter {
    pub fn new(config: &Config, tx: EventSender) -> Self {
        let mut platform = EguiPlatform::new();
        let pan = DragElement::init(
            drag_options(DragMode::Pan, config, tx.clone()),
            &mut platform,
        );
        let zoom = DragElement::init(
            drag_options(DragMode::Zoom, config, tx.clone()),
            &mut platform,
        );
        platform.set_cursor(PLOT_ELEMENT, DragMode::Pan.cursor());

        Self {
            mode: DragMode::Pan,
            trace: None,
            grid: Vec::new(),
            grid_linewidth: config.grid_linewidth,
            current_plot_bounds: [0.0, 1.0, 0.0, 1.0],
            request_plot_bounds: None,
            frame: egui::Rect::NOTHING,
            gesture: None,
            zoom_box: None,
            marker: None,
            show_hover: true,
            host: HostState::new(),
            platform,
            pan,
            zoom,
            active_touches: HashSet::new(),
            tx,
        }
    }

    pub fn mode(&self) -> DragMode {
        self.mode
    }

    /// Switch the drag mode. Ignored while a gesture is running, the other
    /// controller would never see its end.
    pub fn set_mode(&mut self, mode: DragMode) {
        if mode == self.mode {
            return;
        }
        if self.pan.overlay().is_some() || self.zoom.overlay().is_some() {
            log::warn!("not switching to {:?} during a gesture", mode);
            return;
        }
        log::debug!("drag mode {:?}", mode);
        self.mode = mode;
        self.platform.set_cursor(PLOT_ELEMENT, mode.cursor());
    }

    /// Run `f` with the controller of the current mode.
    fn with_controller<R>(
        &mut self,
        f: impl FnOnce(&mut DragElement, &mut HostState, &mut EguiPlatform) -> R,
    ) -> R {
        let Self {
            mode,
            pan,
            zoom,
            host,
            platform,
            ..
        } = self;
        let drag = match mode {
            DragMode::Pan => pan,
            DragMode::Zoom => zoom,
        };
        f(drag, host, platform)
    }
}

/// Wire the drag callbacks of one mode to app events.
fn drag_options(mode: DragMode, config: &Config, tx: EventSender) -> DragOptions {
    let prep_tx = tx.clone();
    let done_tx = tx.clone();
    let cursor_tx = tx.clone();

    let options = DragOptions::new(PLOT_ELEMENT)
        .thresholds(config.thresholds)
        .prep_fn(move |_, x, y| send_event(&prep_tx, GestureStarted::new(x, y)))
        .done_fn(move |dragged, num_clicks, event: &InputEvent| {
            send_event(
                &done_tx,
                GestureDone::new(dragged, num_clicks, event.modifiers()),
            )
        })
        .set_cursor(move |event| {
            // Shift-click clears the marker.
            let cursor = if event.modifiers.shift {
                Cursor::Pointer
            } else {
                mode.cursor()
            };
            send_event(&cursor_tx, SetCursor::new(PLOT_ELEMENT, cursor))
        });

    match mode {
        DragMode::Pan => options.move_fn(move |dx, dy, _| send_event(&tx, PanPlot::new(dx, dy))),
        DragMode::Zoom => options.move_fn(move |dx, dy, dragged| {
            if dragged {
                send_event(&tx, MoveZoomBox::new(dx, dy))
            }
        }),
    }
}
