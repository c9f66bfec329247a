//! Gateway error type, preserving status classes across layers.

use thiserror::Error;

use simgate_catalog::CatalogError;
use simgate_config::ConfigError;
use simgate_params::ValidationError;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("parameter validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl GatewayError {
    /// HTTP-like status class for the external route layer.
    pub fn status(&self) -> u16 {
        match self {
            GatewayError::Catalog(err) => err.status(),
            GatewayError::Validation(_) => 400,
            GatewayError::Config(_) => 500,
        }
    }
}
