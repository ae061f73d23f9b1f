//! Pipe entry and request/response types shared by the endpoint and its clients

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Pipe material
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Material {
    /// Stainless steel
    #[serde(rename = "SS")]
    Ss,
    /// Mild steel
    #[serde(rename = "MS")]
    Ms,
}

impl Material {
    pub const ALL: [Material; 2] = [Material::Ss, Material::Ms];

    /// Code used in spec keys
    pub fn code(&self) -> &'static str {
        match self {
            Material::Ss => "SS",
            Material::Ms => "MS",
        }
    }

    /// Human readable label for selectors
    pub fn label(&self) -> &'static str {
        match self {
            Material::Ss => "Stainless Steel (SS)",
            Material::Ms => "Mild Steel (MS)",
        }
    }
}

/// Wall thickness
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Thickness {
    #[serde(rename = "1mm")]
    Mm1,
    #[serde(rename = "1.2mm")]
    Mm12,
}

impl Thickness {
    pub const ALL: [Thickness; 2] = [Thickness::Mm1, Thickness::Mm12];

    pub fn code(&self) -> &'static str {
        match self {
            Thickness::Mm1 => "1mm",
            Thickness::Mm12 => "1.2mm",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Thickness::Mm1 => "1 mm",
            Thickness::Mm12 => "1.2 mm",
        }
    }
}

/// Cross-section shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Shape {
    Round,
    Square,
}

impl Shape {
    pub const ALL: [Shape; 2] = [Shape::Round, Shape::Square];

    pub fn code(&self) -> &'static str {
        match self {
            Shape::Round => "Round",
            Shape::Square => "Square",
        }
    }

    pub fn label(&self) -> &'static str {
        self.code()
    }
}

macro_rules! impl_code_parse {
    ($ty:ty, $what:literal) => {
        impl FromStr for $ty {
            type Err = crate::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.trim();
                <$ty>::ALL
                    .into_iter()
                    .find(|v| v.code().eq_ignore_ascii_case(s))
                    .ok_or_else(|| crate::Error::InvalidInput(format!("unknown {}: {}", $what, s)))
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.code())
            }
        }
    };
}

impl_code_parse!(Material, "material");
impl_code_parse!(Thickness, "thickness");
impl_code_parse!(Shape, "shape");

/// Length in meters as submitted by a client.
///
/// Accepts JSON numbers and numeric strings. Strings are coerced the way a
/// browser form value is: surrounding whitespace is ignored, an empty string
/// is zero and anything unparsable is NaN. A missing length is NaN and an
/// explicit `null` is zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Length(pub f64);

impl Length {
    pub fn meters(&self) -> f64 {
        self.0
    }

    /// Coerce free-form text into a length
    pub fn parse(text: &str) -> Self {
        Length(coerce_number(text))
    }
}

impl Default for Length {
    fn default() -> Self {
        Length(f64::NAN)
    }
}

impl From<f64> for Length {
    fn from(value: f64) -> Self {
        Length(value)
    }
}

fn coerce_number(text: &str) -> f64 {
    let s = text.trim();
    if s.is_empty() {
        return 0.0;
    }
    match s {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }
    let lower = s.to_ascii_lowercase();
    if lower.contains("inf") || lower.contains("nan") {
        return f64::NAN;
    }
    if let Some(hex) = lower.strip_prefix("0x") {
        return u64::from_str_radix(hex, 16)
            .map(|v| v as f64)
            .unwrap_or(f64::NAN);
    }
    s.parse::<f64>().unwrap_or(f64::NAN)
}

impl Serialize for Length {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        // JSON has no NaN/Infinity; send them as strings so they survive coercion
        if self.0.is_finite() {
            serializer.serialize_f64(self.0)
        } else if self.0.is_nan() {
            serializer.serialize_str("NaN")
        } else if self.0 > 0.0 {
            serializer.serialize_str("Infinity")
        } else {
            serializer.serialize_str("-Infinity")
        }
    }
}

impl<'de> Deserialize<'de> for Length {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        let meters = match value {
            Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
            Value::String(s) => coerce_number(&s),
            Value::Null => 0.0,
            Value::Bool(b) => {
                if b {
                    1.0
                } else {
                    0.0
                }
            }
            Value::Array(_) | Value::Object(_) => f64::NAN,
        };
        Ok(Length(meters))
    }
}

/// One row of user-submitted pipe specification and length.
///
/// Selector fields are kept as the raw submitted strings; the endpoint never
/// validates them and an unexpected value simply fails lookup. Non-string
/// selectors are kept as their text form rather than rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipeEntry {
    #[serde(default, deserialize_with = "selector_text")]
    pub material: String,
    #[serde(default, deserialize_with = "selector_text")]
    pub thickness: String,
    #[serde(default, deserialize_with = "selector_text")]
    pub shape: String,
    /// Size code, e.g. "1-inch" or "1x1-inch"
    #[serde(default, deserialize_with = "selector_text")]
    pub pipe_type: String,
    #[serde(default)]
    pub length: Length,
}

impl PipeEntry {
    pub fn new(
        material: Material,
        thickness: Thickness,
        shape: Shape,
        pipe_type: impl Into<String>,
        length_m: f64,
    ) -> Self {
        Self {
            material: material.code().to_string(),
            thickness: thickness.code().to_string(),
            shape: shape.code().to_string(),
            pipe_type: pipe_type.into(),
            length: Length(length_m),
        }
    }

    /// True when all four selector fields are non-empty
    pub fn has_selectors(&self) -> bool {
        !self.material.is_empty()
            && !self.thickness.is_empty()
            && !self.shape.is_empty()
            && !self.pipe_type.is_empty()
    }
}

fn selector_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(value_text(&Value::deserialize(deserializer)?))
}

/// String form of a JSON value as it would appear when joined into a key
fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                other => value_text(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
        other => other.to_string(),
    }
}

/// Request body of `POST /calculate-weight`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CalculationRequest {
    #[serde(rename = "pipesData", default, skip_serializing_if = "Option::is_none")]
    pub pipes_data: Option<Vec<PipeEntry>>,
}

impl CalculationRequest {
    pub fn new(entries: Vec<PipeEntry>) -> Self {
        Self {
            pipes_data: Some(entries),
        }
    }
}

/// Response body of `POST /calculate-weight`; totals are pre-formatted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationResponse {
    pub total_weight: String,
    pub total_price: String,
}

impl CalculationResponse {
    pub fn zero() -> Self {
        Self {
            total_weight: "0".to_string(),
            total_price: "0".to_string(),
        }
    }
}

/// Error body returned by the endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_wire_names() {
        let entry = PipeEntry::new(Material::Ss, Thickness::Mm12, Shape::Round, "1-inch", 2.0);
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["material"], "SS");
        assert_eq!(json["thickness"], "1.2mm");
        assert_eq!(json["shape"], "Round");
        assert_eq!(json["pipeType"], "1-inch");
        assert_eq!(json["length"], 2.0);
    }

    #[test]
    fn test_length_from_string() {
        let entry: PipeEntry = serde_json::from_str(
            r#"{"material":"SS","thickness":"1mm","shape":"Round","pipeType":"1-inch","length":" 10 "}"#,
        )
        .unwrap();
        assert_eq!(entry.length.meters(), 10.0);
    }

    #[test]
    fn test_length_coercion_edge_cases() {
        assert_eq!(Length::parse("").meters(), 0.0);
        assert_eq!(Length::parse("1e2").meters(), 100.0);
        assert_eq!(Length::parse("0x10").meters(), 16.0);
        assert_eq!(Length::parse("-3.5").meters(), -3.5);
        assert!(Length::parse("abc").meters().is_nan());
        assert!(Length::parse("inf").meters().is_nan());
        assert_eq!(Length::parse("Infinity").meters(), f64::INFINITY);
    }

    #[test]
    fn test_missing_length_is_nan_null_is_zero() {
        let missing: PipeEntry = serde_json::from_str(r#"{"material":"SS"}"#).unwrap();
        assert!(missing.length.meters().is_nan());
        assert_eq!(missing.shape, "");

        let null: PipeEntry = serde_json::from_str(r#"{"length":null}"#).unwrap();
        assert_eq!(null.length.meters(), 0.0);
    }

    #[test]
    fn test_non_finite_length_survives_serialization() {
        let json = serde_json::to_string(&Length(f64::NAN)).unwrap();
        assert_eq!(json, "\"NaN\"");
        let back: Length = serde_json::from_str(&json).unwrap();
        assert!(back.meters().is_nan());

        let json = serde_json::to_string(&Length(f64::NEG_INFINITY)).unwrap();
        let back: Length = serde_json::from_str(&json).unwrap();
        assert_eq!(back.meters(), f64::NEG_INFINITY);
    }

    #[test]
    fn test_request_missing_pipes_data() {
        let req: CalculationRequest = serde_json::from_str("{}").unwrap();
        assert!(req.pipes_data.is_none());
        let req: CalculationRequest = serde_json::from_str(r#"{"pipesData":null}"#).unwrap();
        assert!(req.pipes_data.is_none());
    }

    #[test]
    fn test_non_string_selectors_kept_as_text() {
        let entry: PipeEntry = serde_json::from_str(
            r#"{"material":5,"thickness":null,"shape":true,"pipeType":["1","inch"],"length":1}"#,
        )
        .unwrap();
        assert_eq!(entry.material, "5");
        assert_eq!(entry.thickness, "null");
        assert_eq!(entry.shape, "true");
        assert_eq!(entry.pipe_type, "1,inch");
    }

    #[test]
    fn test_selector_parsing() {
        assert_eq!("ss".parse::<Material>().unwrap(), Material::Ss);
        assert_eq!("1.2mm".parse::<Thickness>().unwrap(), Thickness::Mm12);
        assert_eq!(" Square ".parse::<Shape>().unwrap(), Shape::Square);
        assert!("Hex".parse::<Shape>().is_err());
    }
}
