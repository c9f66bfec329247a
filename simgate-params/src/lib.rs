//! # Simgate Parameter Validation
//!
//! Typed parameter schemas for simulation templates and validation of
//! caller-supplied input against them.
//!
//! A simulation definition declares an ordered list of [`ParameterSpec`]s
//! (intervals and choices). [`validate`] coerces a raw key/value mapping to
//! the declared types, fills in defaults, checks every constraint, and either
//! returns a fully-populated [`ParameterSet`] or a precise rejection reason.
//!
//! Everything in this crate is a pure function over immutable inputs; the
//! caller's map is never mutated and no state survives a call.

#![warn(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

mod error;
mod spec;
mod validate;
mod value;

pub use error::SpecError;
pub use error::ValidationError;
pub use spec::ChoiceSpec;
pub use spec::IntervalSpec;
pub use spec::ParameterSpec;
pub use validate::validate;
pub use validate::ParameterSet;
pub use validate::RawParams;
pub use value::Dtype;
pub use value::ParamValue;
