//! Saving and restoring the session (trace file, drag mode, view) as JSON.

use std::path::{Path, PathBuf};

use drag_core::string_error::ErrorStringExt;
use serde::{Deserialize, Serialize};
use serde_json::{from_reader, to_writer};

use super::components::DragMode;
use crate::EguiApp;

const STORAGE_FILE: &str = "./.plotdrag_storage.json";

#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct Storage {
    trace_path: Option<PathBuf>,
    mode: DragMode,
    plot_bounds: Option<[f64; 4]>,
}

impl Storage {
    pub fn save_json(&self, input_path: Option<&Path>) -> Result<(), String> {
        let output_path = input_path.unwrap_or(Path::new(STORAGE_FILE));
        let file =
            std::fs::File::create(output_path).err_to_string("could not open storage file")?;
        to_writer(file, &self).err_to_string("could not save app state to json")?;
        log::debug!("saved app state to file {:?}", output_path.canonicalize());
        Ok(())
    }

    pub fn load_json(input_path: Option<&Path>) -> Result<Self, String> {
        let input_path = input_path.unwrap_or(Path::new(STORAGE_FILE));
        let file = std::fs::File::open(input_path).err_to_string("could not open storage file")?;
        from_reader(file).err_to_string("could not load app state from storage file")
    }
}

pub fn save_json(app: &EguiApp, path: Option<&Path>) -> Result<(), String> {
    let storage = Storage {
        trace_path: app.trace_path.clone(),
        mode: app.plotter.mode(),
        plot_bounds: Some(app.plotter.get_current_plot_bounds()),
    };
    storage.save_json(path)
}

pub fn load_json(app: &mut EguiApp, path: Option<&Path>) -> Result<(), String> {
    let Storage {
        trace_path,
        mode,
        plot_bounds,
    } = Storage::load_json(path)?;

    // Loading a trace resets the view, so bounds come last.
    app.load_initial_trace(trace_path);
    app.plotter.set_mode(mode);
    if let Some(bounds) = plot_bounds {
        app.plotter.apply_bounds(bounds);
    }
    app.request_redraw();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_file() {
        let path = std::env::temp_dir().join("plotdrag_storage_test.json");
        let storage = Storage {
            trace_path: Some(PathBuf::from("/tmp/carpet.json")),
            mode: DragMode::Zoom,
            plot_bounds: Some([0.0, 2.0, -1.0, 1.0]),
        };
        storage.save_json(Some(&path)).unwrap();
        assert_eq!(Storage::load_json(Some(&path)).unwrap(), storage);
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_missing_storage_file() {
        let path = std::env::temp_dir().join("plotdrag_storage_missing.json");
        assert!(Storage::load_json(Some(&path)).is_err());
    }
}
