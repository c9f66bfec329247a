//! Validation of raw caller input against an ordered spec list.

use std::collections::{BTreeMap, BTreeSet};

use serde_json::Value;

use crate::error::ValidationError;
use crate::spec::ParameterSpec;
use crate::value::ParamValue;

/// Raw caller-supplied parameters, as decoded from a request body.
pub type RawParams = serde_json::Map<String, Value>;

/// Fully-typed, validated, defaulted parameter mapping.
pub type ParameterSet = BTreeMap<String, ParamValue>;

/// Validate and coerce `raw` against `specs`.
///
/// Single pass in spec list order: coerce the supplied value (or take the
/// spec's pre-validated default), then test it against the spec's
/// constraint. The input map is never mutated; on any failure no partial
/// result is returned.
pub fn validate(raw: &RawParams, specs: &[ParameterSpec]) -> Result<ParameterSet, ValidationError> {
    let declared: BTreeSet<&str> = specs.iter().map(|s| s.name()).collect();
    let mut unknown: Vec<String> = raw
        .keys()
        .filter(|k| !declared.contains(k.as_str()))
        .cloned()
        .collect();
    if !unknown.is_empty() {
        unknown.sort();
        return Err(ValidationError::UnknownParameters(unknown));
    }

    let mut params = ParameterSet::new();
    for spec in specs {
        let value = match raw.get(spec.name()) {
            Some(supplied) => {
                let coerced = ParamValue::coerce(supplied, spec.dtype()).ok_or_else(|| {
                    ValidationError::TypeMismatch {
                        name: spec.name().to_string(),
                        value: supplied.to_string(),
                        dtype: spec.dtype(),
                    }
                })?;
                if !spec.is_valid(&coerced) {
                    return Err(ValidationError::ConstraintViolation {
                        name: spec.name().to_string(),
                        value: coerced.to_string(),
                        constraint: spec.to_string(),
                    });
                }
                coerced
            }
            // Defaults are validated when the spec is constructed.
            None => spec.default().clone(),
        };
        params.insert(spec.name().to_string(), value);
    }
    Ok(params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Dtype;
    use serde_json::json;

    fn specs(raw: serde_json::Value) -> Vec<ParameterSpec> {
        serde_json::from_value(raw).unwrap()
    }

    fn raw(value: serde_json::Value) -> RawParams {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected an object"),
        }
    }

    #[test]
    fn empty_input_fills_midpoint_default() {
        let specs = specs(json!([
            {"type": "interval", "name": "x", "dtype": "float", "min": 0, "max": 10}
        ]));
        let params = validate(&raw(json!({})), &specs).unwrap();
        assert_eq!(params["x"], ParamValue::Float(5.0));
    }

    #[test]
    fn choice_accepts_member_rejects_stranger() {
        let specs = specs(json!([
            {"type": "choice", "name": "c", "dtype": "str", "choices": ["a", "b", "c"]}
        ]));

        let params = validate(&raw(json!({"c": "b"})), &specs).unwrap();
        assert_eq!(params["c"], ParamValue::Str("b".into()));

        let err = validate(&raw(json!({"c": "z"})), &specs).unwrap_err();
        assert_eq!(
            err,
            ValidationError::ConstraintViolation {
                name: "c".into(),
                value: "z".into(),
                constraint: "c: choice [a, b, c] str".into(),
            }
        );
    }

    #[test]
    fn coerced_value_still_checked_against_interval() {
        let specs = specs(json!([
            {"type": "interval", "name": "x", "dtype": "int", "min": 0, "max": 10}
        ]));
        let err = validate(&raw(json!({"x": "15"})), &specs).unwrap_err();
        assert_eq!(
            err,
            ValidationError::ConstraintViolation {
                name: "x".into(),
                value: "15".into(),
                constraint: "x: interval [0,10] int".into(),
            }
        );
    }

    #[test]
    fn uncoercible_value_is_a_type_mismatch() {
        let specs = specs(json!([
            {"type": "interval", "name": "x", "dtype": "int", "min": 0, "max": 10}
        ]));
        let err = validate(&raw(json!({"x": "many"})), &specs).unwrap_err();
        assert_eq!(
            err,
            ValidationError::TypeMismatch {
                name: "x".into(),
                value: "\"many\"".into(),
                dtype: Dtype::Int,
            }
        );
    }

    #[test]
    fn unknown_parameters_all_reported_sorted() {
        let specs = specs(json!([
            {"type": "choice", "name": "c", "choices": ["a"]}
        ]));
        let err = validate(&raw(json!({"zeta": 1, "alpha": 2, "c": "a"})), &specs).unwrap_err();
        assert_eq!(
            err,
            ValidationError::UnknownParameters(vec!["alpha".into(), "zeta".into()])
        );
    }

    #[test]
    fn validation_is_idempotent() {
        let specs = specs(json!([
            {"type": "interval", "name": "x", "dtype": "float", "min": 0, "max": 1},
            {"type": "choice", "name": "c", "choices": ["a", "b"]}
        ]));
        let input = raw(json!({"x": "0.25"}));
        let first = validate(&input, &specs).unwrap();
        let second = validate(&input, &specs).unwrap();
        assert_eq!(first, second);
        // The caller's map is untouched.
        assert_eq!(input.len(), 1);
    }

    #[test]
    fn no_partial_result_on_failure() {
        let specs = specs(json!([
            {"type": "interval", "name": "a", "dtype": "int", "min": 0, "max": 1},
            {"type": "interval", "name": "b", "dtype": "int", "min": 0, "max": 1}
        ]));
        assert!(validate(&raw(json!({"a": 0, "b": 7})), &specs).is_err());
    }

    #[test]
    fn supplied_exact_type_passes_through() {
        let specs = specs(json!([
            {"type": "choice", "name": "n", "dtype": "int", "choices": [1, 2, 3]}
        ]));
        let params = validate(&raw(json!({"n": 2})), &specs).unwrap();
        assert_eq!(params["n"], ParamValue::Int(2));
    }
}
