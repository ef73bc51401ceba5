use std::fmt;

use serde::{Deserialize, Serialize};

/// Default path of the update service
pub const UPDATE_VITAL_PATH: &str = "/update_vital";

/// Content type sent with every update request
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// A JSON string or number that is shown to the user verbatim
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Number(serde_json::Number),
    Text(String),
}

impl Scalar {
    /// Number from slider text, if it parses as a finite number.
    /// Integers stay integers so `"5"` encodes as `5`, not `5.0`.
    pub fn parse_number(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if let Ok(int) = raw.parse::<i64>() {
            return Some(Self::Number(int.into()));
        }
        raw.parse::<f64>()
            .ok()
            .and_then(serde_json::Number::from_f64)
            .map(Self::Number)
    }

    /// Extract a displayable scalar from an arbitrary JSON value
    pub fn from_value(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::Number(n) => Some(Self::Number(n.clone())),
            serde_json::Value::String(s) => Some(Self::Text(s.clone())),
            _ => None,
        }
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

/// Largest magnitude below which every integral f64 is exact
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_992.0;

impl fmt::Display for Scalar {
    /// Numbers print the way a browser prints them: `2.0` shows as `2`
    #[allow(clippy::cast_possible_truncation, clippy::float_cmp)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => match n.as_f64() {
                Some(x) if n.is_f64() && x.fract() == 0.0 && x.abs() < MAX_SAFE_INTEGER => {
                    write!(f, "{}", x as i64)
                }
                _ => write!(f, "{n}"),
            },
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// Request body: one slider reading
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VitalUpdate {
    pub vital: String,
    pub value: Scalar,
}

impl VitalUpdate {
    pub fn new(vital: impl Into<String>, value: Scalar) -> Self {
        Self {
            vital: vital.into(),
            value,
        }
    }

    /// Serialize to the JSON request body
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_text_value_body() {
        let update = VitalUpdate::new("heart_rate", Scalar::from("72"));
        let body: serde_json::Value = serde_json::from_str(&update.to_json().unwrap()).unwrap();
        assert_eq!(body, json!({"vital": "heart_rate", "value": "72"}));
    }

    #[test]
    fn test_numeric_value_body() {
        let update = VitalUpdate::new("V", Scalar::parse_number("5").unwrap());
        assert_eq!(update.to_json().unwrap(), r#"{"vital":"V","value":5}"#);
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(Scalar::parse_number(" 36.6 ").unwrap().to_string(), "36.6");
        assert_eq!(Scalar::parse_number("-3").unwrap().to_string(), "-3");
        assert!(Scalar::parse_number("high").is_none());
        assert!(Scalar::parse_number("NaN").is_none());
        assert!(Scalar::parse_number("").is_none());
    }

    #[test]
    fn test_integral_float_display() {
        assert_eq!(Scalar::from_value(&json!(2.0)).unwrap().to_string(), "2");
        assert_eq!(Scalar::from_value(&json!(-0.0)).unwrap().to_string(), "0");
        assert_eq!(Scalar::from_value(&json!(2.5)).unwrap().to_string(), "2.5");
        assert_eq!(Scalar::from_value(&json!(u64::MAX)).unwrap().to_string(), "18446744073709551615");
    }

    #[test]
    fn test_scalar_from_value() {
        assert_eq!(Scalar::from_value(&json!("+2")), Some(Scalar::from("+2")));
        assert_eq!(Scalar::from_value(&json!(4)).unwrap().to_string(), "4");
        assert!(Scalar::from_value(&json!(null)).is_none());
        assert!(Scalar::from_value(&json!({"change": 1})).is_none());
    }
}
