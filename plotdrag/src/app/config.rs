use drag_core::{string_error::ErrorStringExt, Thresholds};
use std::{io::Read, path::PathBuf, str::FromStr, time::Duration};

#[derive(Debug, Clone)]
pub struct Config {
    /// Carpet trace (JSON) loaded on startup.
    pub trace_path: Option<PathBuf>,
    pub thresholds: Thresholds,
    pub grid_linewidth: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            trace_path: None,
            thresholds: Thresholds::default(),
            grid_linewidth: 1.0,
        }
    }
}

impl Config {
    pub fn from_config_file() -> Result<Self, String> {
        #[allow(deprecated)]
        let Some(home) = std::env::home_dir() else {
            return Err("could not determine home directory to load config file".into());
        };
        let config_raw = {
            let path = home.join(PathBuf::from(".plotdrag"));
            let mut file = std::fs::File::open(path).err_to_string("could not open config file")?;
            let mut buf = String::new();
            file.read_to_string(&mut buf)
                .err_to_string("could not load config file")?;
            buf
        };
        Ok(Self::parse(&config_raw))
    }

    /// Parse `key=value` lines. Unknown keys are skipped, values that do not
    /// parse keep their default.
    pub fn parse(config_raw: &str) -> Self {
        let mut config = Self::default();
        for line in config_raw.lines() {
            // Lines starting with "#" are considered comments.
            if line.starts_with("#") {
                continue;
            }
            let mut iter = line.splitn(2, "=");
            let key = iter.next().map(str::trim);
            let val = iter.next().map(str::trim);
            match (key, val) {
                (Some("trace_path"), Some(path_str)) => match PathBuf::from_str(path_str) {
                    Ok(path) => config.trace_path = Some(path),
                    Err(_) => log::warn!("could not parse 'trace_path' as file name"),
                },
                (Some("dblclick_delay_ms"), Some(ms)) => {
                    if let Some(delay) = parse_millis(ms, "dblclick_delay_ms") {
                        config.thresholds.dblclick_delay = delay;
                    }
                }
                (Some("double_tap_ms"), Some(ms)) => {
                    if let Some(window) = parse_millis(ms, "double_tap_ms") {
                        config.thresholds.double_tap_window = window;
                    }
                }
                (Some("min_drag"), Some(px)) => {
                    if let Some(px) = parse_pixels(px, "min_drag") {
                        config.thresholds.min_drag = px;
                    }
                }
                (Some("touch_min_drag_x"), Some(px)) => {
                    if let Some(px) = parse_pixels(px, "touch_min_drag_x") {
                        config.thresholds.touch_min_drag_x = px;
                    }
                }
                (Some("touch_min_drag_y"), Some(px)) => {
                    if let Some(px) = parse_pixels(px, "touch_min_drag_y") {
                        config.thresholds.touch_min_drag_y = px;
                    }
                }
                (Some("grid_linewidth"), Some(width)) => {
                    if let Ok(width) = width.parse::<f32>() {
                        config.grid_linewidth = width;
                    } else {
                        log::warn!("could not parse 'grid_linewidth' as number")
                    }
                }
                _ => continue,
            }
        }
        config
    }
}

fn parse_millis(value: &str, key: &str) -> Option<Duration> {
    match value.parse::<u64>() {
        Ok(ms) => Some(Duration::from_millis(ms)),
        Err(_) => {
            log::warn!("could not parse '{key}' as milliseconds");
            None
        }
    }
}

fn parse_pixels(value: &str, key: &str) -> Option<f64> {
    match value.parse::<f64>() {
        Ok(px) if px.is_finite() && px >= 0.0 => Some(px),
        _ => {
            log::warn!("could not parse '{key}' as pixel distance");
            None
        }
    }
}
