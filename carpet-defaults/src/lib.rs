#![warn(clippy::all, rust_2018_idioms)]

//! Default values for carpet traces.
//!
//! User input arrives as loosely typed JSON. [`supply_defaults`] validates
//! every attribute against the schema in [`attributes`], fills in defaults
//! and returns the full trace, which can then be read as a typed
//! [`CarpetTrace`].

pub mod ab;
pub mod attributes;
pub mod axis;
pub mod coerce;
pub mod colors;

use drag_core::string_error::ErrorStringExt;
use serde::Deserialize;
use serde_json::Value;

pub use ab::{handle_ab_defaults, FullLayout};
pub use coerce::{coerce, Coercer, Container};

/// Coerce the trace level attributes of a carpet, then its coordinates and
/// axes. `trace_in` may be updated with resolved axis types.
pub fn supply_defaults(
    trace_in: &mut Container,
    full_layout: &FullLayout,
) -> Result<Container, String> {
    let attributes = attributes::carpet_attributes();
    let mut trace_out = Container::new();
    {
        let mut c = Coercer::new(trace_in, &mut trace_out, &attributes);
        c.coerce("color")?;
        c.coerce("font")?;
        c.coerce("calendar")?;
    }
    handle_ab_defaults(trace_in, &mut trace_out, full_layout)?;
    log::debug!("supplied carpet defaults: {} attributes", trace_out.len());
    Ok(trace_out)
}

/// Parse a JSON document holding a single carpet trace and supply its
/// defaults.
pub fn carpet_from_json(input: &str, full_layout: &FullLayout) -> Result<CarpetTrace, String> {
    let value: Value = serde_json::from_str(input).err_to_string("could not parse carpet trace")?;
    let Value::Object(mut trace_in) = value else {
        return Err("carpet trace must be a JSON object".into());
    };
    let trace_out = supply_defaults(&mut trace_in, full_layout)?;
    CarpetTrace::from_container(trace_out)
}

/// Typed view of a trace after [`supply_defaults`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CarpetTrace {
    /// Numbers (also as strings), or category labels placed at their index.
    #[serde(default)]
    pub a: Option<Vec<Value>>,
    #[serde(default)]
    pub a0: Option<f64>,
    #[serde(default)]
    pub da: Option<f64>,
    #[serde(default)]
    pub b: Option<Vec<Value>>,
    #[serde(default)]
    pub b0: Option<f64>,
    #[serde(default)]
    pub db: Option<f64>,
    pub color: String,
    pub aaxis: CarpetAxis,
    pub baxis: CarpetAxis,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CarpetAxis {
    #[serde(rename = "type")]
    pub axis_type: String,
    pub color: String,
    pub title: String,
    pub showgrid: bool,
    #[serde(default)]
    pub gridcolor: Option<String>,
    #[serde(default)]
    pub gridwidth: Option<f64>,
    pub smoothing: f64,
}

impl CarpetTrace {
    pub fn from_container(container: Container) -> Result<Self, String> {
        serde_json::from_value(Value::Object(container)).err_to_string("invalid carpet trace")
    }

    /// Coordinates along a, either given explicitly or generated from `a0`
    /// and `da`.
    pub fn a_values(&self, count: usize) -> Vec<f64> {
        coordinates(self.a.as_deref(), self.a0, self.da, count)
    }

    pub fn b_values(&self, count: usize) -> Vec<f64> {
        coordinates(self.b.as_deref(), self.b0, self.db, count)
    }
}

fn coordinates(
    explicit: Option<&[Value]>,
    start: Option<f64>,
    step: Option<f64>,
    count: usize,
) -> Vec<f64> {
    if let Some(values) = explicit {
        return values
            .iter()
            .enumerate()
            .map(|(i, v)| coerce::to_number(v).unwrap_or(i as f64))
            .collect();
    }
    let (start, step) = (start.unwrap_or(0.0), step.unwrap_or(1.0));
    (0..count).map(|i| start + step * i as f64).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    #[test]
    fn test_carpet_from_json() {
        init();
        let trace = carpet_from_json(
            r#"{"a": [4, 4.5, 5], "b0": 1, "db": 2, "aaxis": {"smoothing": 0}}"#,
            &FullLayout::default(),
        )
        .unwrap();

        assert_eq!(trace.a_values(10), vec![4.0, 4.5, 5.0]);
        assert_eq!(trace.b_values(3), vec![1.0, 3.0, 5.0]);
        assert_eq!(trace.aaxis.axis_type, "linear");
        assert_eq!(trace.aaxis.smoothing, 0.0);
        assert_eq!(trace.baxis.axis_type, "-");
        assert_eq!(trace.color, "#444");
        assert!(trace.aaxis.showgrid);
    }

    #[test]
    fn test_invalid_json() {
        init();
        assert!(carpet_from_json("[1, 2]", &FullLayout::default()).is_err());
        assert!(carpet_from_json("{", &FullLayout::default()).is_err());
    }

    #[test]
    fn test_category_coordinates() {
        init();
        let trace = carpet_from_json(r#"{"b": ["x", "y", "z"]}"#, &FullLayout::default()).unwrap();
        assert_eq!(trace.baxis.axis_type, "category");
        assert_eq!(trace.b_values(0), vec![0.0, 1.0, 2.0]);
    }

    #[test]
    fn test_numeric_string_coordinates() {
        init();
        let trace = carpet_from_json(
            r#"{"a": ["10", "20", "30"], "b0": "5", "db": "2"}"#,
            &FullLayout::default(),
        )
        .unwrap();
        assert_eq!(trace.aaxis.axis_type, "linear");
        assert_eq!(trace.a_values(0), vec![10.0, 20.0, 30.0]);
        assert_eq!(trace.b_values(2), vec![5.0, 7.0]);
    }

    #[test]
    fn test_named_axis_colors() {
        init();
        let trace = carpet_from_json(
            r#"{"aaxis": {"gridcolor": "navy", "color": "lightgray"}}"#,
            &FullLayout::default(),
        )
        .unwrap();
        assert_eq!(trace.aaxis.gridcolor.as_deref(), Some("navy"));
        assert_eq!(trace.aaxis.color, "lightgray");
    }

    #[test]
    fn test_trace_font_reaches_axes() {
        init();
        let mut trace_in = serde_json::json!({"font": {"family": "mono", "size": 9}})
            .as_object()
            .cloned()
            .unwrap();
        let out = supply_defaults(&mut trace_in, &FullLayout::default()).unwrap();
        assert_eq!(out["aaxis"]["tickfont"]["family"], "mono");
        assert_eq!(out["baxis"]["tickfont"]["size"], 9);
    }
}
