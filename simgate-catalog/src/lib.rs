//! # Simgate Simulation Catalog
//!
//! A directory of named, versioned simulation templates.
//!
//! Each simulation is one JSON or YAML file mapping version labels to either
//! a full definition (command, arguments, parameter schema) or an alias
//! pointing at another label. [`SimulationStore`] loads and lists these
//! files; [`SimulationSpec::resolve`] follows alias chains to a concrete
//! definition, turning cycles and dangling aliases into reported
//! configuration errors instead of silent loops.
//!
//! Loads are independent per-request reads of immutable files, safe to issue
//! concurrently. The only write anywhere is the optional minified cache,
//! which is best-effort and never authoritative.

#![warn(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

mod error;
mod spec;
mod store;

pub use error::CatalogError;
pub use spec::Definition;
pub use spec::ResolvedSimulation;
pub use spec::SimulationSpec;
pub use spec::VersionEntry;
pub use store::SimulationStore;
