use serde_json::{json, Map, Value};

use crate::attributes::{Attributes, ValType};
use crate::colors::named_color;

pub type Container = Map<String, Value>;

/// Read `attr` from `container_in`, validate it against the schema and write
/// the accepted value to `container_out`.
///
/// Invalid or missing values fall back to `dflt`, or to the schema default if
/// `dflt` is `None`. The accepted value is returned; `Value::Null` means the
/// attribute has no value at all (nothing is written in that case).
pub fn coerce(
    container_in: &Container,
    container_out: &mut Container,
    attributes: &Attributes,
    attr: &str,
    dflt: Option<Value>,
) -> Result<Value, String> {
    let Some(attribute) = attributes.get(attr) else {
        return Err(format!("unknown attribute '{attr}'"));
    };
    let dflt = dflt.unwrap_or_else(|| attribute.dflt.clone());

    let value = match container_in.get(attr) {
        Some(v) => validate(&attribute.val_type, v, &dflt).unwrap_or_else(|| {
            log::debug!("invalid value {v} for '{attr}', using default");
            dflt
        }),
        None => dflt,
    };

    if !value.is_null() {
        container_out.insert(attr.to_string(), value.clone());
    }
    Ok(value)
}

/// Coerces attributes of one container pair against one schema.
pub struct Coercer<'a> {
    container_in: &'a Container,
    container_out: &'a mut Container,
    attributes: &'a Attributes,
}

impl<'a> Coercer<'a> {
    pub fn new(
        container_in: &'a Container,
        container_out: &'a mut Container,
        attributes: &'a Attributes,
    ) -> Self {
        Self {
            container_in,
            container_out,
            attributes,
        }
    }

    pub fn coerce(&mut self, attr: &str) -> Result<Value, String> {
        coerce(
            self.container_in,
            self.container_out,
            self.attributes,
            attr,
            None,
        )
    }

    pub fn coerce_with(&mut self, attr: &str, dflt: Value) -> Result<Value, String> {
        coerce(
            self.container_in,
            self.container_out,
            self.attributes,
            attr,
            Some(dflt),
        )
    }

    pub fn container_out(&mut self) -> &mut Container {
        self.container_out
    }
}

fn validate(val_type: &ValType, v: &Value, dflt: &Value) -> Option<Value> {
    match val_type {
        ValType::DataArray => v.is_array().then(|| v.clone()),
        ValType::Number { min, max } => {
            let x = to_number(v)?;
            let in_range = min.map_or(true, |min| x >= min) && max.map_or(true, |max| x <= max);
            // Numeric strings are stored as numbers.
            in_range.then(|| if v.is_number() { v.clone() } else { json!(x) })
        }
        ValType::Integer { min } => {
            let x = match v {
                Value::String(s) => s.trim().parse::<i64>().ok()?,
                _ => v.as_i64()?,
            };
            min.map_or(true, |min| x >= min).then(|| json!(x))
        }
        ValType::Boolean => v.is_boolean().then(|| v.clone()),
        ValType::Enumerated(values) => {
            let s = v.as_str()?;
            values.contains(&s).then(|| v.clone())
        }
        ValType::Color => {
            let s = v.as_str()?;
            is_color(s).then(|| v.clone())
        }
        ValType::String => match v {
            Value::String(_) => Some(v.clone()),
            Value::Number(n) => Some(Value::String(n.to_string())),
            _ => None,
        },
        ValType::Font => v.as_object().map(|font| coerce_font(font, dflt)),
    }
}

/// A finite number, given either as JSON number or as string.
pub fn to_number(v: &Value) -> Option<f64> {
    let x = match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    x.filter(|x| x.is_finite())
}

/// Validate each font field on its own, falling back to the default font.
fn coerce_font(font: &Container, dflt: &Value) -> Value {
    let mut out = Container::new();
    let field = |key: &str| dflt.get(key).cloned().unwrap_or(Value::Null);

    let family = font
        .get("family")
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
        .map(|s| Value::String(s.to_string()))
        .unwrap_or_else(|| field("family"));
    let size = font
        .get("size")
        .filter(|v| v.as_f64().is_some_and(|x| x >= 1.0))
        .cloned()
        .unwrap_or_else(|| field("size"));
    let color = font
        .get("color")
        .and_then(Value::as_str)
        .filter(|s| is_color(s))
        .map(|s| Value::String(s.to_string()))
        .unwrap_or_else(|| field("color"));

    out.insert("family".into(), family);
    out.insert("size".into(), size);
    out.insert("color".into(), color);
    Value::Object(out)
}

pub fn is_color(s: &str) -> bool {
    let s = s.trim().to_ascii_lowercase();
    if let Some(hex) = s.strip_prefix('#') {
        return matches!(hex.len(), 3 | 4 | 6 | 8) && hex.chars().all(|c| c.is_ascii_hexdigit());
    }
    let functional = ["rgb(", "rgba(", "hsl(", "hsla("]
        .iter()
        .any(|prefix| s.starts_with(prefix));
    if functional {
        return s.ends_with(')');
    }
    named_color(&s).is_some()
}
