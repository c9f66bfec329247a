//! Parameter spec model: intervals and choices.
//!
//! Specs self-validate at construction. A spec object that deserializes
//! successfully is guaranteed to carry a coherent dtype, ordered bounds or a
//! non-empty sorted choice list, and a default that satisfies its own
//! constraint, so validation never has to re-check the schema itself.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use crate::error::SpecError;
use crate::value::{Dtype, ParamValue};

/// One typed, constrained input a simulation accepts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawParameterSpec", into = "RawParameterSpec")]
pub enum ParameterSpec {
    Interval(IntervalSpec),
    Choice(ChoiceSpec),
}

impl ParameterSpec {
    pub fn name(&self) -> &str {
        match self {
            ParameterSpec::Interval(s) => &s.name,
            ParameterSpec::Choice(s) => &s.name,
        }
    }

    pub fn dtype(&self) -> Dtype {
        match self {
            ParameterSpec::Interval(s) => s.dtype,
            ParameterSpec::Choice(s) => s.dtype,
        }
    }

    pub fn default(&self) -> &ParamValue {
        match self {
            ParameterSpec::Interval(s) => &s.default,
            ParameterSpec::Choice(s) => &s.default,
        }
    }

    /// Constraint predicate for an already-coerced value.
    pub fn is_valid(&self, value: &ParamValue) -> bool {
        if value.dtype() != self.dtype() {
            return false;
        }
        match self {
            ParameterSpec::Interval(s) => s.contains(value),
            ParameterSpec::Choice(s) => s.choices.contains(value),
        }
    }
}

impl fmt::Display for ParameterSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParameterSpec::Interval(s) => {
                write!(f, "{}: interval [{},{}] {}", s.name, s.min, s.max, s.dtype)
            }
            ParameterSpec::Choice(s) => {
                write!(f, "{}: choice [", s.name)?;
                for (i, choice) in s.choices.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", choice)?;
                }
                write!(f, "] {}", s.dtype)
            }
        }
    }
}

/// Numeric range constraint, bounds inclusive.
#[derive(Debug, Clone, PartialEq)]
pub struct IntervalSpec {
    pub name: String,
    pub dtype: Dtype,
    pub min: ParamValue,
    pub max: ParamValue,
    pub default: ParamValue,
}

impl IntervalSpec {
    fn contains(&self, value: &ParamValue) -> bool {
        match (value, &self.min, &self.max) {
            (ParamValue::Int(v), ParamValue::Int(lo), ParamValue::Int(hi)) => {
                lo <= v && v <= hi
            }
            (ParamValue::Float(v), ParamValue::Float(lo), ParamValue::Float(hi)) => {
                *lo <= *v && *v <= *hi
            }
            _ => false,
        }
    }

    fn midpoint(min: &ParamValue, max: &ParamValue) -> ParamValue {
        match (min, max) {
            (ParamValue::Int(lo), ParamValue::Int(hi)) => {
                ParamValue::Int(((*lo as i128 + *hi as i128) / 2) as i64)
            }
            (ParamValue::Float(lo), ParamValue::Float(hi)) => {
                ParamValue::Float((lo + hi) / 2.0)
            }
            // Bounds are coerced to the same numeric dtype before this runs.
            _ => min.clone(),
        }
    }
}

/// Enumerated constraint; choices are kept sorted.
#[derive(Debug, Clone, PartialEq)]
pub struct ChoiceSpec {
    pub name: String,
    pub dtype: Dtype,
    pub choices: Vec<ParamValue>,
    pub default: ParamValue,
}

/// Wire form of a parameter spec, as stored in simulation definitions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum RawParameterSpec {
    Interval {
        name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        dtype: Option<Dtype>,
        min: Value,
        max: Value,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        default: Option<Value>,
    },
    Choice {
        name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        dtype: Option<Dtype>,
        choices: Vec<Value>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        default: Option<Value>,
    },
}

fn coerce_field(name: &str, raw: &Value, dtype: Dtype) -> Result<ParamValue, SpecError> {
    ParamValue::coerce(raw, dtype).ok_or_else(|| SpecError::Uncoercible {
        name: name.to_string(),
        value: raw.to_string(),
        dtype,
    })
}

impl TryFrom<RawParameterSpec> for ParameterSpec {
    type Error = SpecError;

    fn try_from(raw: RawParameterSpec) -> Result<Self, Self::Error> {
        match raw {
            RawParameterSpec::Interval {
                name,
                dtype,
                min,
                max,
                default,
            } => {
                let dtype = dtype.unwrap_or(Dtype::Float);
                if dtype == Dtype::Str {
                    return Err(SpecError::NonNumericInterval(name));
                }
                let min = coerce_field(&name, &min, dtype)?;
                let max = coerce_field(&name, &max, dtype)?;
                if min.cmp_same_dtype(&max) == std::cmp::Ordering::Greater {
                    return Err(SpecError::InvalidInterval(name));
                }
                let default = match default {
                    Some(raw) => coerce_field(&name, &raw, dtype)?,
                    None => IntervalSpec::midpoint(&min, &max),
                };
                let spec = IntervalSpec {
                    name,
                    dtype,
                    min,
                    max,
                    default,
                };
                let spec = ParameterSpec::Interval(spec);
                if !spec.is_valid(spec.default()) {
                    return Err(SpecError::InvalidDefault {
                        name: spec.name().to_string(),
                        value: spec.default().to_string(),
                        constraint: spec.to_string(),
                    });
                }
                Ok(spec)
            }
            RawParameterSpec::Choice {
                name,
                dtype,
                choices,
                default,
            } => {
                let dtype = dtype.unwrap_or(Dtype::Str);
                if choices.is_empty() {
                    return Err(SpecError::EmptyChoices(name));
                }
                let choices: Vec<ParamValue> = choices
                    .iter()
                    .map(|c| coerce_field(&name, c, dtype))
                    .collect::<Result<_, _>>()?;
                // Default is the first choice as written, before sorting.
                let default = match default {
                    Some(raw) => coerce_field(&name, &raw, dtype)?,
                    None => choices[0].clone(),
                };
                let mut choices = choices;
                choices.sort_by(|a, b| a.cmp_same_dtype(b));
                let spec = ParameterSpec::Choice(ChoiceSpec {
                    name,
                    dtype,
                    choices,
                    default,
                });
                if !spec.is_valid(spec.default()) {
                    return Err(SpecError::InvalidDefault {
                        name: spec.name().to_string(),
                        value: spec.default().to_string(),
                        constraint: spec.to_string(),
                    });
                }
                Ok(spec)
            }
        }
    }
}

impl From<ParameterSpec> for RawParameterSpec {
    fn from(spec: ParameterSpec) -> Self {
        match spec {
            ParameterSpec::Interval(s) => RawParameterSpec::Interval {
                name: s.name,
                dtype: Some(s.dtype),
                min: Value::from(&s.min),
                max: Value::from(&s.max),
                default: Some(Value::from(&s.default)),
            },
            ParameterSpec::Choice(s) => RawParameterSpec::Choice {
                name: s.name,
                dtype: Some(s.dtype),
                choices: s.choices.iter().map(Value::from).collect(),
                default: Some(Value::from(&s.default)),
            },
        }
    }
}
