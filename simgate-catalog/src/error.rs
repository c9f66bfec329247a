//! Catalog error taxonomy, with status codes for the surrounding router.

use thiserror::Error;

/// Errors from loading and resolving simulation specifications.
///
/// Caller-input errors (malformed name, unknown simulation or version) are
/// 400/404-class; broken stored configuration (unparsable file, alias cycle,
/// dangling alias) is the operator's fault and maps to 500.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("simulation name '{0}' is malformed")]
    MalformedName(String),

    #[error("simulation '{0}' not found")]
    SimulationNotFound(String),

    #[error("version '{version}' of simulation '{name}' not found")]
    VersionNotFound { name: String, version: String },

    #[error(
        "simulation '{name}' is not well configured on the server; \
         contact the server administrator ({reason})"
    )]
    MalformedConfig { name: String, reason: String },

    #[error(
        "simulation '{name}' has a circular version alias through '{label}'; \
         contact the server administrator"
    )]
    CircularAlias { name: String, label: String },

    #[error(
        "simulation '{name}' is not fully configured on the server: \
         alias points at missing version '{label}'"
    )]
    DanglingAlias { name: String, label: String },

    #[error("catalog I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CatalogError {
    /// HTTP-like status class for the external route layer.
    pub fn status(&self) -> u16 {
        match self {
            CatalogError::MalformedName(_) => 400,
            CatalogError::SimulationNotFound(_) | CatalogError::VersionNotFound { .. } => 404,
            CatalogError::MalformedConfig { .. }
            | CatalogError::CircularAlias { .. }
            | CatalogError::DanglingAlias { .. }
            | CatalogError::Io(_) => 500,
        }
    }
}
