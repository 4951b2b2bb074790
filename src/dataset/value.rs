//! Typed cell values.

use std::fmt;

use serde::{Serialize, Serializer};

/// Cell markers treated as missing, in addition to the empty string.
const NA_MARKERS: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Returns true if a raw cell should be treated as missing.
pub fn is_missing(raw: &str) -> bool {
    raw.is_empty() || NA_MARKERS.contains(&raw)
}

/// A single cell of the table.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i64),
    Float(f64),
    Text(String),
}

impl Value {
    /// The zero used to fill missing cells.
    pub const ZERO: Value = Value::Int(0);

    /// Parse a raw cell as an integer.
    pub fn parse_int(raw: &str) -> Option<i64> {
        raw.trim().parse::<i64>().ok()
    }

    /// Parse a raw cell as a finite float.
    pub fn parse_float(raw: &str) -> Option<f64> {
        raw.trim().parse::<f64>().ok().filter(|f| f.is_finite())
    }

    /// Numeric view of the cell. Text has no numeric value.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            Value::Text(_) => None,
        }
    }

    /// Integer view of the cell; floats qualify only when integral.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            Value::Float(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => Some(*f as i64),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(i) => write!(f, "{}", i),
            // Same formatting as the JSON output ("2.0", not "2")
            Value::Float(x) => match serde_json::Number::from_f64(*x) {
                Some(n) => write!(f, "{}", n),
                None => write!(f, "{}", x),
            },
            Value::Text(s) => f.write_str(s),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Int(i) => serializer.serialize_i64(*i),
            Value::Float(f) => serializer.serialize_f64(*f),
            Value::Text(s) => serializer.serialize_str(s),
        }
    }
}

/// Running numeric sum that stays integral until a float is added.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Total {
    Int(i64),
    Float(f64),
}

impl Default for Total {
    fn default() -> Self {
        Total::Int(0)
    }
}

impl Total {
    /// Add a cell. Text cells contribute nothing.
    pub fn add(self, value: &Value) -> Self {
        match (self, value) {
            (Total::Int(a), Value::Int(b)) => Total::Int(a.saturating_add(*b)),
            (Total::Int(a), Value::Float(b)) => Total::Float(a as f64 + b),
            (Total::Float(a), Value::Int(b)) => Total::Float(a + *b as f64),
            (Total::Float(a), Value::Float(b)) => Total::Float(a + b),
            (total, Value::Text(_)) => total,
        }
    }

    pub fn as_f64(self) -> f64 {
        match self {
            Total::Int(i) => i as f64,
            Total::Float(f) => f,
        }
    }

    /// Integer view, truncating float sums.
    pub fn truncate(self) -> i64 {
        match self {
            Total::Int(i) => i,
            Total::Float(f) => f as i64,
        }
    }
}

impl Serialize for Total {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Total::Int(i) => serializer.serialize_i64(*i),
            Total::Float(f) => serializer.serialize_f64(*f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_markers() {
        assert!(is_missing(""));
        assert!(is_missing("NaN"));
        assert!(is_missing("N/A"));
        assert!(!is_missing(" "));
        assert!(!is_missing("0"));
    }

    #[test]
    fn test_parse_float_rejects_non_finite() {
        assert_eq!(Value::parse_float("1.5"), Some(1.5));
        assert_eq!(Value::parse_float("inf"), None);
        assert_eq!(Value::parse_int(" 42 "), Some(42));
    }

    #[test]
    fn test_integral_float_as_year() {
        assert_eq!(Value::Float(2020.0).as_i64(), Some(2020));
        assert_eq!(Value::Float(2020.5).as_i64(), None);
        assert_eq!(Value::Text("2020".into()).as_i64(), None);
    }

    #[test]
    fn test_total_widens_on_float() {
        let total = Total::default()
            .add(&Value::Int(3))
            .add(&Value::Text("x".into()));
        assert_eq!(total, Total::Int(3));
        assert_eq!(total.add(&Value::Float(0.5)), Total::Float(3.5));
        assert_eq!(Total::Float(7.9).truncate(), 7);
    }

    #[test]
    fn test_display_matches_json() {
        assert_eq!(Value::Int(0).to_string(), "0");
        assert_eq!(Value::Float(2.0).to_string(), "2.0");
        assert_eq!(Value::Text("Mysuru".into()).to_string(), "Mysuru");
    }
}
