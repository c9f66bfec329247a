//! Error types for parameter schema construction and input validation.

use thiserror::Error;

use crate::value::Dtype;

/// A parameter spec that cannot be constructed. Broken specs live in the
/// stored simulation definition, so the catalog surfaces these as a server
/// configuration error, never as a caller error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SpecError {
    #[error("at least one choice is required for parameter '{0}'")]
    EmptyChoices(String),

    #[error("interval minimum must not exceed maximum for parameter '{0}'")]
    InvalidInterval(String),

    #[error("an interval parameter must have a numeric dtype, got str for '{0}'")]
    NonNumericInterval(String),

    #[error("default value {value} for parameter '{name}' does not satisfy {constraint}")]
    InvalidDefault {
        name: String,
        value: String,
        constraint: String,
    },

    #[error("value {value} in the spec of parameter '{name}' cannot be coerced to {dtype}")]
    Uncoercible {
        name: String,
        value: String,
        dtype: Dtype,
    },
}

/// Rejection of caller-supplied input. Always the caller's fault; the
/// surrounding service layer maps these to a 400-class response.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// Caller supplied names absent from the schema. Lists every offending
    /// key, sorted, not just the first.
    #[error("parameters [{}] not specified by the simulation", .0.join(", "))]
    UnknownParameters(Vec<String>),

    #[error("value {value} for parameter '{name}' does not comply with dtype {dtype}")]
    TypeMismatch {
        name: String,
        value: String,
        dtype: Dtype,
    },

    #[error("value {value} for parameter '{name}' does not comply with {constraint}")]
    ConstraintViolation {
        name: String,
        value: String,
        constraint: String,
    },
}
