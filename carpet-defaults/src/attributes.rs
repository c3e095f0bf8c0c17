//! Declarative attribute schema of the carpet trace.

use std::collections::BTreeMap;

use serde_json::{json, Value};

pub const CALENDARS: &[&str] = &[
    "gregorian",
    "chinese",
    "coptic",
    "discworld",
    "ethiopian",
    "hebrew",
    "islamic",
    "julian",
    "mayan",
    "nanakshahi",
    "nepali",
    "persian",
    "jalali",
    "taiwan",
    "thai",
    "ummalqura",
];

pub const AXIS_TYPES: &[&str] = &["-", "linear", "date", "category"];

/// Accepted values of an attribute.
#[derive(Debug, Clone, PartialEq)]
pub enum ValType {
    /// Any array.
    DataArray,
    Number { min: Option<f64>, max: Option<f64> },
    Integer { min: Option<i64> },
    Boolean,
    Enumerated(&'static [&'static str]),
    Color,
    /// Strings, numbers are converted to strings.
    String,
    /// An object with `family`, `size` and `color`.
    Font,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    pub val_type: ValType,
    pub dflt: Value,
}

impl Attribute {
    fn new(val_type: ValType, dflt: Value) -> Self {
        Self { val_type, dflt }
    }
}

pub type Attributes = BTreeMap<&'static str, Attribute>;

pub fn default_font() -> Value {
    json!({
        "family": "\"Open Sans\", verdana, arial, sans-serif",
        "size": 12,
        "color": "#444",
    })
}

/// Trace level attributes of a carpet.
pub fn carpet_attributes() -> Attributes {
    use ValType as V;
    let number = V::Number {
        min: None,
        max: None,
    };
    Attributes::from([
        ("a", Attribute::new(V::DataArray, Value::Null)),
        ("a0", Attribute::new(number.clone(), json!(0))),
        ("da", Attribute::new(number.clone(), json!(1))),
        ("b", Attribute::new(V::DataArray, Value::Null)),
        ("b0", Attribute::new(number.clone(), json!(0))),
        ("db", Attribute::new(number, json!(1))),
        ("color", Attribute::new(V::Color, json!("#444"))),
        ("font", Attribute::new(V::Font, default_font())),
        ("calendar", Attribute::new(V::Enumerated(CALENDARS), json!("gregorian"))),
    ])
}

/// Attributes of `aaxis` and `baxis`.
pub fn axis_attributes() -> Attributes {
    use ValType as V;
    Attributes::from([
        ("type", Attribute::new(V::Enumerated(AXIS_TYPES), json!("-"))),
        ("color", Attribute::new(V::Color, json!("#444"))),
        ("title", Attribute::new(V::String, json!(""))),
        ("showgrid", Attribute::new(V::Boolean, json!(true))),
        ("gridcolor", Attribute::new(V::Color, json!("#eee"))),
        (
            "gridwidth",
            Attribute::new(
                V::Number {
                    min: Some(0.0),
                    max: None,
                },
                json!(1),
            ),
        ),
        (
            "showticklabels",
            Attribute::new(
                V::Enumerated(&["start", "end", "both", "none"]),
                json!("start"),
            ),
        ),
        ("tickfont", Attribute::new(V::Font, default_font())),
        ("tickprefix", Attribute::new(V::String, json!(""))),
        ("ticksuffix", Attribute::new(V::String, json!(""))),
        (
            "nticks",
            Attribute::new(V::Integer { min: Some(0) }, json!(0)),
        ),
        (
            "smoothing",
            Attribute::new(
                V::Number {
                    min: Some(0.0),
                    max: Some(1.3),
                },
                json!(1),
            ),
        ),
        ("calendar", Attribute::new(V::Enumerated(CALENDARS), json!("gregorian"))),
    ])
}
