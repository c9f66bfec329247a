//! # Simgate Configuration System
//!
//! Hierarchical service configuration for the simulation gateway.
//!
//! ## Features
//! - **Single source of truth** for catalog, submission, and telemetry
//!   settings across all gateway components
//! - **Layered loading**: defaults, YAML files, environment overrides
//! - **Validation** of every loaded value before the gateway starts

#![warn(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

mod catalog;
mod error;
mod submission;
mod telemetry;
mod validation;

pub use catalog::CatalogConfig;
pub use error::ConfigError;
pub use submission::SubmissionConfig;
pub use telemetry::TelemetryConfig;

/// Top-level configuration container for the gateway.
#[derive(Debug, Serialize, Deserialize, Validate, Default, Clone)]
pub struct GatewayConfig {
    /// Simulation catalog location and cache behavior.
    #[validate(nested)]
    pub catalog: CatalogConfig,

    /// Job submission collaborator settings.
    #[validate(nested)]
    pub submission: SubmissionConfig,

    /// Logging configuration.
    #[validate(nested)]
    pub telemetry: TelemetryConfig,
}

impl GatewayConfig {
    /// Load configuration from default files and environment.
    ///
    /// Hierarchy:
    /// 1. Default values
    /// 2. `config/simgate.yaml` - base settings. If missing, defaults are used.
    /// 3. `config/<environment>.yaml` - environment-specific overrides,
    ///    selected by `SIMGATE_ENV`.
    /// 4. `SIMGATE_*` environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(GatewayConfig::default()));

        if Path::new("config/simgate.yaml").exists() {
            figment = figment.merge(Yaml::file("config/simgate.yaml"));
        }

        let env = std::env::var("SIMGATE_ENV").unwrap_or_else(|_| "production".into());
        let env_file = format!("config/{}.yaml", env);
        if Path::new(&env_file).exists() {
            figment = figment.merge(Yaml::file(env_file));
        }

        figment
            .merge(Env::prefixed("SIMGATE_").split("__"))
            .extract()
            .map_err(ConfigError::from)
            .and_then(|config: Self| {
                config.validate()?;
                Ok(config)
            })
    }

    /// Load configuration from one specific file, with env overrides.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound(PathBuf::from(path)));
        }

        Figment::from(Serialized::defaults(GatewayConfig::default()))
            .merge(Yaml::file(path))
            .merge(Env::prefixed("SIMGATE_").split("__"))
            .extract()
            .map_err(ConfigError::from)
            .and_then(|config: Self| {
                config.validate()?;
                Ok(config)
            })
    }
}
