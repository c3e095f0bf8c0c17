use std::{path::PathBuf, sync::mpsc::Sender, thread::JoinHandle};

use derive_new::new;
use drag_core::{Cursor, ElementId, Modifiers};

use super::EguiApp;

/// Whether an event is done or has to be applied again next frame.
#[derive(Debug, PartialEq, Eq)]
pub enum EventState {
    Finished,
    Busy,
}

pub trait AppEvent {
    type App;
    fn apply(&mut self, app: &mut Self::App) -> Result<EventState, String>;
}

pub type DynEvent = Box<dyn AppEvent<App = EguiApp> + Send>;

/// Drag callbacks run deep inside the plotter, they hand their events to
/// the app through this channel.
pub type EventSender = Sender<DynEvent>;

pub fn send_event(tx: &EventSender, event: impl AppEvent<App = EguiApp> + Send + 'static) {
    if tx.send(Box::new(event)).is_err() {
        log::warn!("trying to send event on closed channel");
    }
}

// ---------------------------------------------------------------------------
//
//
// EventQueue
//
//
// ---------------------------------------------------------------------------

/// The EventQueue stores events that are processed each iteration
/// of the application GUI event loop.
pub struct EventQueue<App> {
    /// Stores events for later processing.
    queue: Vec<Box<dyn AppEvent<App = App> + Send>>,
    /// Temporarily stores events that have not yet finished running.
    tmp_backlog: Vec<Box<dyn AppEvent<App = App> + Send>>,
}

impl<App> EventQueue<App> {
    pub fn new() -> Self {
        Self {
            queue: Vec::new(),
            tmp_backlog: Vec::new(),
        }
    }

    pub fn queue_event(&mut self, event: Box<dyn AppEvent<App = App> + Send>) {
        self.queue.push(event);
    }

    pub fn discard_events(&mut self) {
        self.queue.clear();
        self.tmp_backlog.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

impl EguiApp {
    pub fn run_events(&mut self) {
        // Drag events depend on each other, so they run in the order they
        // were queued.
        let queue = std::mem::take(&mut self.event_queue.queue);
        for mut event in queue {
            match event.apply(self) {
                Ok(EventState::Finished) => {
                    self.request_redraw();
                }
                Ok(EventState::Busy) => {
                    // Add busy event to the backlog.
                    self.event_queue.tmp_backlog.push(event);
                }
                Err(err) => {
                    log::error!("event failed: {:?}", err)
                }
            }
        }

        // Events queued while applying come after the backlog.
        let mut backlog = std::mem::take(&mut self.event_queue.tmp_backlog);
        backlog.append(&mut self.event_queue.queue);
        self.event_queue.queue = backlog;
    }
}

// ---------------------------------------------------------------------------
//
//
// Events
//
//
// ---------------------------------------------------------------------------

/// Mouse-down / touch-start on the plot.
#[derive(new)]
pub struct GestureStarted {
    x: f64,
    y: f64,
}

#[derive(new)]
pub struct PanPlot {
    dx: f64,
    dy: f64,
}

#[derive(new)]
pub struct MoveZoomBox {
    dx: f64,
    dy: f64,
}

#[derive(new)]
pub struct GestureDone {
    dragged: bool,
    num_clicks: u32,
    modifiers: Modifiers,
}

/// A click replayed on the plot after a gesture that did not drag.
#[derive(new)]
pub struct PlotClicked {
    target: ElementId,
    x: f64,
    y: f64,
    modifiers: Modifiers,
}

#[derive(new)]
pub struct SetCursor {
    element: ElementId,
    cursor: Cursor,
}

pub struct ResetView;

/// Waits for the file dialog, then loads the chosen carpet trace.
#[derive(new)]
pub struct LoadTraceRequested {
    thread_handle: Option<JoinHandle<Option<PathBuf>>>,
}

// ---------------------------------------------------------------------------
//
//
// apply()
//
//
// ---------------------------------------------------------------------------

impl AppEvent for GestureStarted {
    type App = EguiApp;

    fn apply(&mut self, app: &mut Self::App) -> Result<EventState, String> {
        app.plotter.start_gesture(self.x, self.y);
        Ok(EventState::Finished)
    }
}

impl AppEvent for PanPlot {
    type App = EguiApp;

    fn apply(&mut self, app: &mut Self::App) -> Result<EventState, String> {
        app.plotter.pan(self.dx, self.dy)?;
        Ok(EventState::Finished)
    }
}

impl AppEvent for MoveZoomBox {
    type App = EguiApp;

    fn apply(&mut self, app: &mut Self::App) -> Result<EventState, String> {
        app.plotter.move_zoom_box(self.dx, self.dy)?;
        Ok(EventState::Finished)
    }
}

impl AppEvent for GestureDone {
    type App = EguiApp;

    fn apply(&mut self, app: &mut Self::App) -> Result<EventState, String> {
        log::debug!(
            "gesture done: dragged={}, clicks={}, modifiers={:?}",
            self.dragged,
            self.num_clicks,
            self.modifiers
        );
        if self.num_clicks >= 2 && !self.dragged {
            app.plotter.reset_view();
        } else {
            app.plotter.finish_gesture(self.dragged)?;
        }
        Ok(EventState::Finished)
    }
}

impl AppEvent for PlotClicked {
    type App = EguiApp;

    fn apply(&mut self, app: &mut Self::App) -> Result<EventState, String> {
        log::debug!("click on {:?} at ({}, {})", self.target, self.x, self.y);
        // Shift-click clears the marker.
        if self.modifiers.shift {
            app.plotter.clear_marker();
        } else {
            app.plotter.place_marker(self.x, self.y)?;
        }
        Ok(EventState::Finished)
    }
}

impl AppEvent for SetCursor {
    type App = EguiApp;

    fn apply(&mut self, app: &mut Self::App) -> Result<EventState, String> {
        app.plotter.set_cursor(self.element, self.cursor);
        Ok(EventState::Finished)
    }
}

impl AppEvent for ResetView {
    type App = EguiApp;

    fn apply(&mut self, app: &mut Self::App) -> Result<EventState, String> {
        app.plotter.reset_view();
        Ok(EventState::Finished)
    }
}

impl AppEvent for LoadTraceRequested {
    type App = EguiApp;

    fn apply(&mut self, app: &mut Self::App) -> Result<EventState, String> {
        let Some(handle) = self.thread_handle.take() else {
            return Err("no file dialog to wait for".into());
        };
        if !handle.is_finished() {
            self.thread_handle = Some(handle);
            return Ok(EventState::Busy);
        }
        match handle.join() {
            Ok(Some(path)) => {
                app.plotter.load_trace_file(&path)?;
                app.trace_path = Some(path);
                Ok(EventState::Finished)
            }
            Ok(None) => {
                log::debug!("no trace file selected");
                Ok(EventState::Finished)
            }
            Err(err) => Err(format!("file dialog thread failed: {:?}", err)),
        }
    }
}
