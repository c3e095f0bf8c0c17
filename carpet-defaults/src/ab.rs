use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::attributes::carpet_attributes;
use crate::axis::{handle_axis_defaults, AxisDefaultsOptions};
use crate::coerce::{Coercer, Container};

const AXES: [&str; 2] = ["aaxis", "baxis"];

/// The parts of the full layout the carpet axes depend on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FullLayout {
    /// Decimal and thousands separators.
    pub separators: String,
}

impl Default for FullLayout {
    fn default() -> Self {
        Self {
            separators: ".,".into(),
        }
    }
}

/// Coerce the a/b coordinates and both carpet axes of a trace.
///
/// Without an explicit `a` array the coordinates are described by `a0` and
/// `da` instead, likewise for `b`. `trace_out` is expected to carry the
/// already coerced trace `font` and `calendar`.
pub fn handle_ab_defaults(
    trace_in: &mut Container,
    trace_out: &mut Container,
    full_layout: &FullLayout,
) -> Result<(), String> {
    let attributes = carpet_attributes();
    {
        let mut c = Coercer::new(trace_in, trace_out, &attributes);
        if c.coerce("a")?.is_null() {
            c.coerce("da")?;
            c.coerce("a0")?;
        }
        if c.coerce("b")?.is_null() {
            c.coerce("db")?;
            c.coerce("b0")?;
        }
    }
    mimic_axis_defaults(trace_in, trace_out, full_layout)
}

fn mimic_axis_defaults(
    trace_in: &mut Container,
    trace_out: &mut Container,
    full_layout: &FullLayout,
) -> Result<(), String> {
    for ax_name in AXES {
        let letter = ax_name.chars().next().unwrap_or('a');
        let had_axis = trace_in.get(ax_name).is_some_and(Value::is_object);
        let mut ax_in = trace_in
            .get(ax_name)
            .and_then(Value::as_object)
            .cloned()
            .unwrap_or_default();

        let mut ax_out = Container::new();
        ax_out.insert("_separators".into(), json!(full_layout.separators));

        let data = trace_in.get(&letter.to_string()).cloned();
        let options = AxisDefaultsOptions {
            id: format!("{letter}axis"),
            letter,
            font: trace_out.get("font").cloned().unwrap_or(Value::Null),
            name: ax_name,
            data: data.as_ref(),
            calendar: trace_out.get("calendar").cloned().unwrap_or(Value::Null),
        };
        handle_axis_defaults(&mut ax_in, &mut ax_out, &options)?;

        ax_out
            .entry("_categories")
            .or_insert_with(|| Value::Array(Vec::new()));
        trace_out.insert(ax_name.into(), Value::Object(ax_out));

        // Keep the resolved type on the input, so it is not guessed again.
        if had_axis {
            trace_in.insert(ax_name.into(), Value::Object(ax_in));
        } else if let Some(axis_type) = ax_in.get("type").filter(|t| t.as_str() != Some("-")) {
            trace_in.insert(ax_name.into(), json!({ "type": axis_type }));
        }
    }
    Ok(())
}
