//! Typed parameter values and dtype coercion.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Coercion target type of a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dtype {
    Int,
    Float,
    Str,
}

impl fmt::Display for Dtype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dtype::Int => write!(f, "int"),
            Dtype::Float => write!(f, "float"),
            Dtype::Str => write!(f, "str"),
        }
    }
}

/// A validated, typed parameter value.
///
/// Serializes untagged, so a parameter set round-trips as plain JSON
/// (`5`, `5.0`, `"stable"`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Int(i64),
    Float(f64),
    Str(String),
}

impl ParamValue {
    pub fn dtype(&self) -> Dtype {
        match self {
            ParamValue::Int(_) => Dtype::Int,
            ParamValue::Float(_) => Dtype::Float,
            ParamValue::Str(_) => Dtype::Str,
        }
    }

    /// Coerce a raw JSON value to `dtype`.
    ///
    /// A no-op when the runtime type already matches. Otherwise converts:
    /// string→number parse, int→float widening, float→int only when the
    /// fractional part is zero, number→string formatting. Returns `None`
    /// when the value is not expressible as `dtype`.
    pub fn coerce(raw: &Value, dtype: Dtype) -> Option<ParamValue> {
        match dtype {
            Dtype::Int => match raw {
                Value::Number(n) => {
                    if let Some(i) = n.as_i64() {
                        Some(ParamValue::Int(i))
                    } else {
                        let f = n.as_f64()?;
                        (f.fract() == 0.0 && f >= i64::MIN as f64 && f <= i64::MAX as f64)
                            .then(|| ParamValue::Int(f as i64))
                    }
                }
                Value::String(s) => s.trim().parse::<i64>().ok().map(ParamValue::Int),
                _ => None,
            },
            Dtype::Float => match raw {
                Value::Number(n) => n.as_f64().map(ParamValue::Float),
                Value::String(s) => s.trim().parse::<f64>().ok().map(ParamValue::Float),
                _ => None,
            },
            Dtype::Str => match raw {
                Value::String(s) => Some(ParamValue::Str(s.clone())),
                Value::Number(n) => Some(ParamValue::Str(n.to_string())),
                _ => None,
            },
        }
    }

    /// Total order for values of the same dtype. Used to keep choice lists
    /// sorted; comparing across dtypes never happens after coercion.
    pub(crate) fn cmp_same_dtype(&self, other: &ParamValue) -> Ordering {
        match (self, other) {
            (ParamValue::Int(a), ParamValue::Int(b)) => a.cmp(b),
            (ParamValue::Float(a), ParamValue::Float(b)) => a.total_cmp(b),
            (ParamValue::Str(a), ParamValue::Str(b)) => a.cmp(b),
            _ => Ordering::Equal,
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Int(i) => write!(f, "{}", i),
            ParamValue::Float(x) => write!(f, "{}", x),
            ParamValue::Str(s) => write!(f, "{}", s),
        }
    }
}

impl From<&ParamValue> for Value {
    fn from(value: &ParamValue) -> Self {
        match value {
            ParamValue::Int(i) => Value::from(*i),
            ParamValue::Float(x) => {
                serde_json::Number::from_f64(*x).map_or(Value::Null, Value::Number)
            }
            ParamValue::Str(s) => Value::from(s.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn string_parses_to_float() {
        assert_eq!(
            ParamValue::coerce(&json!("3.5"), Dtype::Float),
            Some(ParamValue::Float(3.5))
        );
    }

    #[test]
    fn string_parses_to_int() {
        assert_eq!(
            ParamValue::coerce(&json!("15"), Dtype::Int),
            Some(ParamValue::Int(15))
        );
    }

    #[test]
    fn fractional_float_is_not_an_int() {
        assert_eq!(ParamValue::coerce(&json!(3.5), Dtype::Int), None);
        assert_eq!(
            ParamValue::coerce(&json!(3.0), Dtype::Int),
            Some(ParamValue::Int(3))
        );
    }

    #[test]
    fn int_widens_to_float() {
        assert_eq!(
            ParamValue::coerce(&json!(3), Dtype::Float),
            Some(ParamValue::Float(3.0))
        );
    }

    #[test]
    fn number_formats_as_str() {
        assert_eq!(
            ParamValue::coerce(&json!(7), Dtype::Str),
            Some(ParamValue::Str("7".into()))
        );
    }

    #[test]
    fn bool_coerces_to_nothing() {
        assert_eq!(ParamValue::coerce(&json!(true), Dtype::Int), None);
        assert_eq!(ParamValue::coerce(&json!(true), Dtype::Str), None);
    }

    #[test]
    fn untagged_serialization() {
        assert_eq!(
            serde_json::to_string(&ParamValue::Float(5.0)).unwrap(),
            "5.0"
        );
        assert_eq!(serde_json::to_string(&ParamValue::Int(5)).unwrap(), "5");
    }
}
