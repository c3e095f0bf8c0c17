mod components;
pub mod config;
mod events;
mod platform;
pub mod storage;

use std::{
    path::PathBuf,
    sync::mpsc::{channel, Receiver},
    time::Duration,
};

use self::components::{DragMode, Plotter};
use config::Config;
use events::{DynEvent, EventQueue, LoadTraceRequested, ResetView};
use storage::{load_json, save_json};

/// Shown until a trace file is loaded.
const DEMO_TRACE: &str = r##"{
    "a": [4, 4.5, 5, 6],
    "b": [1, 2, 3],
    "aaxis": {"title": "a", "gridcolor": "#5f8dd3"},
    "baxis": {"title": "b", "gridcolor": "#d35f5f"}
}"##;

pub struct EguiApp {
    plotter: Plotter,
    /// File the current trace was loaded from.
    trace_path: Option<PathBuf>,
    event_rx: Receiver<DynEvent>,
    event_queue: EventQueue<Self>,
    shortcuts_modal_open: bool,
    request_redraw: Option<()>,
}

impl EguiApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: Config) -> Self {
        Self::with_config(config)
    }

    fn with_config(config: Config) -> Self {
        let (tx, event_rx) = channel();
        let mut app = Self {
            plotter: Plotter::new(&config, tx),
            trace_path: None,
            event_rx,
            event_queue: EventQueue::<Self>::new(),
            shortcuts_modal_open: false,
            request_redraw: None,
        };
        app.load_initial_trace(config.trace_path);
        app
    }

    fn load_initial_trace(&mut self, path: Option<PathBuf>) {
        if let Some(path) = path {
            match self.plotter.load_trace_file(&path) {
                Ok(()) => {
                    self.trace_path = Some(path);
                    return;
                }
                Err(err) => log::error!("could not load trace {:?}: {}", path, err),
            }
        }
        if let Err(err) = self.plotter.load_trace(DEMO_TRACE) {
            log::error!("could not load demo trace: {}", err);
        }
    }

    fn reset_state(&mut self) {
        self.event_queue.discard_events();
        self.trace_path = None;
        self.load_initial_trace(None);
    }

    /// Move events sent by the drag callbacks into the queue.
    fn receive_events(&mut self) {
        while let Ok(event) = self.event_rx.try_recv() {
            self.event_queue.queue_event(event);
        }
    }

    fn update_state(&mut self) {
        self.receive_events();
        self.run_events();
    }

    pub fn request_redraw(&mut self) {
        self.request_redraw = Some(());
    }

    fn open_trace_dialog(&mut self) {
        log::debug!("open dialog to select trace file");
        let handle = std::thread::spawn(|| {
            rfd::FileDialog::new()
                .add_filter("carpet trace", &["json"])
                .pick_file()
        });
        let event = LoadTraceRequested::new(Some(handle));
        self.event_queue.queue_event(Box::new(event));
    }
}

impl eframe::App for EguiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.request_redraw.take().is_some() {
            ctx.request_repaint();
        }

        self.update_state();

        let mut should_quit = false;

        // Handle keyboard input.
        ctx.input(|i| {
            // Help window.
            if i.key_pressed(egui::Key::F1) {
                self.shortcuts_modal_open = !self.shortcuts_modal_open;
            }
            // Cycle drag mode.
            if i.key_pressed(egui::Key::F4) {
                self.plotter.set_mode(self.plotter.mode().next());
            }
            // Quick save app state.
            if i.key_pressed(egui::Key::F6) {
                if let Err(error) = save_json(self, None) {
                    log::error!("{}", error)
                };
            }
            // Quick load app state.
            if i.key_pressed(egui::Key::F5) {
                if let Err(error) = load_json(self, None) {
                    log::error!("{}", error)
                };
            }
            if i.key_pressed(egui::Key::F10) {
                should_quit = true;
            }
            if i.key_pressed(egui::Key::Home) {
                self.event_queue.queue_event(Box::new(ResetView));
            }
            if i.key_pressed(egui::Key::O) && i.modifiers.ctrl {
                self.open_trace_dialog();
            }
        });

        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            self.render_shortcut_modal(ctx);
            self.menu(ui, ctx);
        });

        egui::TopBottomPanel::bottom("status_panel").show(ctx, |ui| {
            self.status(ui);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.plotter.render(ui, ctx);
        });

        // Drag callbacks fired while rendering, their events run next frame.
        self.receive_events();
        if !self.event_queue.is_empty() {
            ctx.request_repaint_after(Duration::from_millis(16));
        }

        if should_quit {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
    }
}

impl EguiApp {
    fn menu(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        egui::menu::bar(ui, |ui| {
            ui.menu_button("File", |ui| {
                if ui.button("Open Trace").clicked() {
                    self.open_trace_dialog();
                }
                if ui.button("Quick Save").clicked() {
                    if let Err(error) = save_json(self, None) {
                        log::error!("{}", error)
                    };
                }
                if ui.button("Quick Load").clicked() {
                    if let Err(error) = load_json(self, None) {
                        log::error!("{}", error)
                    };
                }
                if ui.button("Reset Session").clicked() {
                    self.reset_state();
                };
                if ui.button("Quit").clicked() {
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                }
            });

            let mut mode = self.plotter.mode();
            let mode_button_label = format!(
                "Mode ({})",
                match mode {
                    DragMode::Pan => "P",
                    DragMode::Zoom => "Z",
                },
            );
            ui.menu_button(mode_button_label, |ui| {
                ui.selectable_value(&mut mode, DragMode::Pan, "Pan");
                ui.selectable_value(&mut mode, DragMode::Zoom, "Zoom");
            });
            self.plotter.set_mode(mode);

            if ui.button("Reset View").clicked() {
                self.event_queue.queue_event(Box::new(ResetView));
            }

            ui.toggle_value(&mut self.shortcuts_modal_open, "Help (F1)");

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                egui::widgets::global_theme_preference_buttons(ui);
            });
        });
    }

    fn status(&self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let source = match &self.trace_path {
                Some(path) => path.display().to_string(),
                None => "demo trace".to_owned(),
            };
            ui.label(source);
            if let Some(trace) = self.plotter.trace() {
                ui.separator();
                ui.label(format!(
                    "a: {} / b: {}",
                    trace.aaxis.axis_type, trace.baxis.axis_type
                ));
            }
            if let Some([x, y]) = self.plotter.marker() {
                ui.separator();
                ui.label(format!("marker: ({x:.3}, {y:.3})"));
            }
        });
    }

    fn render_shortcut_modal(&mut self, ctx: &egui::Context) {
        if self.shortcuts_modal_open
            && egui::Modal::new("shortcut_modal".into())
                .show(ctx, |ui| {
                    ui.heading("Keyboard Shortcuts");
                    ui.separator();
                    ui.label("CTRL + O = Open Trace File");
                    ui.separator();
                    ui.label("F1 = Show Keyboard Shortcuts");
                    ui.separator();
                    ui.label("F4 = Cycle Drag Mode");
                    ui.separator();
                    ui.label("F6 = Save App State");
                    ui.separator();
                    ui.label("F5 = Load App State");
                    ui.separator();
                    ui.label("F10 = Quit App");
                    ui.separator();
                    ui.label("Home / Double Click = Reset View");
                    ui.separator();
                    ui.label("Click = Place Marker, Shift + Click = Clear Marker");
                    ui.separator();
                })
                .should_close()
        {
            self.shortcuts_modal_open = false;
        };
    }
}
