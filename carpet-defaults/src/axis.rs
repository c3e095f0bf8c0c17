use chrono::NaiveDate;
use serde_json::{json, Value};

use crate::attributes::axis_attributes;
use crate::coerce::{to_number, Coercer, Container};

/// Values the parent trace hands down to one of its axes.
#[derive(Debug, Clone)]
pub struct AxisDefaultsOptions<'a> {
    pub id: String,
    pub letter: char,
    pub font: Value,
    pub name: &'a str,
    /// Raw input data along this axis, used to guess the axis type.
    pub data: Option<&'a Value>,
    pub calendar: Value,
}

/// Fill `ax_out` with the defaults of a carpet axis.
///
/// An axis type of `"-"` gets resolved from the data and the result is
/// written back to `ax_in`, so later passes do not have to guess again.
pub fn handle_axis_defaults(
    ax_in: &mut Container,
    ax_out: &mut Container,
    options: &AxisDefaultsOptions<'_>,
) -> Result<(), String> {
    let attributes = axis_attributes();

    let axis_type = {
        let mut c = Coercer::new(ax_in, ax_out, &attributes);
        c.coerce("type")?
    };
    if axis_type == json!("-") {
        if let Some(auto) = options.data.and_then(autotype) {
            log::debug!("{}: guessed axis type '{}'", options.name, auto);
            ax_in.insert("type".into(), json!(auto));
            ax_out.insert("type".into(), json!(auto));
        }
    }
    let is_date = ax_out.get("type") == Some(&json!("date"));

    let mut c = Coercer::new(ax_in, ax_out, &attributes);
    c.coerce("color")?;
    c.coerce("title")?;
    if c.coerce("showgrid")? == json!(true) {
        c.coerce("gridcolor")?;
        c.coerce("gridwidth")?;
    }
    if c.coerce("showticklabels")? != json!("none") {
        c.coerce_with("tickfont", options.font.clone())?;
        c.coerce("tickprefix")?;
        c.coerce("ticksuffix")?;
    }
    c.coerce("nticks")?;
    c.coerce("smoothing")?;
    if is_date {
        c.coerce_with("calendar", options.calendar.clone())?;
    }

    let out = c.container_out();
    out.insert("_id".into(), json!(options.id));
    out.insert("_letter".into(), json!(options.letter.to_string()));
    out.insert("_name".into(), json!(options.name));
    Ok(())
}

/// Guess the axis type of some data: all numbers gives `linear`, all dates
/// gives `date`, anything else `category`. `None` if there is nothing to
/// look at.
pub fn autotype(data: &Value) -> Option<&'static str> {
    let values: Vec<&Value> = data.as_array()?.iter().filter(|v| !v.is_null()).collect();
    if values.is_empty() {
        return None;
    }
    if values.iter().all(|v| is_numeric(v)) {
        Some("linear")
    } else if values.iter().all(|v| v.as_str().is_some_and(is_date_like)) {
        Some("date")
    } else {
        Some("category")
    }
}

fn is_numeric(v: &Value) -> bool {
    to_number(v).is_some()
}

/// Accepts `YYYY`, `YYYY-MM`, `YYYY-MM-DD` naming a day that exists,
/// optionally followed by a time.
fn is_date_like(s: &str) -> bool {
    let date = s.trim().split([' ', 'T']).next().unwrap_or_default();
    let parts: Vec<&str> = date.split('-').collect();
    if parts.len() > 3 || parts[0].len() != 4 {
        return false;
    }
    let numbers: Option<Vec<u32>> = parts
        .iter()
        .map(|p| {
            (!p.is_empty() && p.chars().all(|c| c.is_ascii_digit()))
                .then(|| p.parse().ok())
                .flatten()
        })
        .collect();
    let Some(numbers) = numbers else {
        return false;
    };
    let year = numbers[0] as i32;
    let month = numbers.get(1).copied().unwrap_or(1);
    let day = numbers.get(2).copied().unwrap_or(1);
    NaiveDate::from_ymd_opt(year, month, day).is_some()
}
