//! Lenient numeric decoding for upstream payloads.
//!
//! Third-party APIs occasionally send numbers as strings. These helpers accept
//! a JSON number or a numeric string and reject everything else, `null`
//! included.

use serde::de::{self, Deserializer};
use serde::Deserialize;

#[derive(Deserialize)]
#[serde(untagged)]
enum RawNumber {
    Unsigned(u64),
    Float(f64),
    Text(String),
}

/// Decodes a non-negative integer counter.
///
/// Whole-number floats are accepted and fractional parts are truncated.
pub fn count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    match RawNumber::deserialize(deserializer)? {
        RawNumber::Unsigned(n) => Ok(n),
        RawNumber::Float(f) if f.is_finite() && f >= 0.0 && f <= u64::MAX as f64 => {
            Ok(f.trunc() as u64)
        }
        RawNumber::Float(f) => Err(de::Error::custom(format!(
            "expected a non-negative integer, got {f}"
        ))),
        RawNumber::Text(s) => s.trim().parse::<u64>().map_err(|_| {
            de::Error::custom(format!("expected a non-negative integer, got {s:?}"))
        }),
    }
}

/// Decodes a finite floating-point value.
pub fn float<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = match RawNumber::deserialize(deserializer)? {
        RawNumber::Unsigned(n) => n as f64,
        RawNumber::Float(f) => f,
        RawNumber::Text(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| de::Error::custom(format!("expected a number, got {s:?}")))?,
    };
    if value.is_finite() {
        Ok(value)
    } else {
        Err(de::Error::custom("expected a finite number"))
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Counter {
        #[serde(default, deserialize_with = "super::count")]
        value: u64,
    }

    #[derive(Debug, Deserialize)]
    struct Reading {
        #[serde(deserialize_with = "super::float")]
        value: f64,
    }

    fn counter(v: serde_json::Value) -> Result<u64, serde_json::Error> {
        serde_json::from_value::<Counter>(v).map(|c| c.value)
    }

    fn reading(v: serde_json::Value) -> Result<f64, serde_json::Error> {
        serde_json::from_value::<Reading>(v).map(|r| r.value)
    }

    #[test]
    fn test_count_accepts_integers_and_numeric_strings() {
        assert_eq!(counter(json!({"value": 12})).unwrap(), 12);
        assert_eq!(counter(json!({"value": "12"})).unwrap(), 12);
        assert_eq!(counter(json!({"value": " 7 "})).unwrap(), 7);
        assert_eq!(counter(json!({"value": 3.9})).unwrap(), 3);
    }

    #[test]
    fn test_count_defaults_when_missing() {
        assert_eq!(counter(json!({})).unwrap(), 0);
    }

    #[test]
    fn test_count_rejects_garbage() {
        assert!(counter(json!({"value": null})).is_err());
        assert!(counter(json!({"value": -1})).is_err());
        assert!(counter(json!({"value": "many"})).is_err());
        assert!(counter(json!({"value": [1]})).is_err());
    }

    #[test]
    fn test_float_accepts_numbers_and_strings() {
        assert_eq!(reading(json!({"value": 11.5})).unwrap(), 11.5);
        assert_eq!(reading(json!({"value": -4})).unwrap(), -4.0);
        assert_eq!(reading(json!({"value": 20})).unwrap(), 20.0);
        assert_eq!(reading(json!({"value": "15.25"})).unwrap(), 15.25);
    }

    #[test]
    fn test_float_rejects_non_numbers() {
        assert!(reading(json!({"value": "warm"})).is_err());
        assert!(reading(json!({"value": null})).is_err());
        assert!(reading(json!({"value": "NaN"})).is_err());
        assert!(reading(json!({})).is_err());
    }
}
