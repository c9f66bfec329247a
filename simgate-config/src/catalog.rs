//! Simulation catalog configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use validator::{self, Validate};

use crate::validation;

/// Where simulation spec files live and how they are served.
#[derive(Debug, Serialize, Deserialize, Validate, Clone)]
pub struct CatalogConfig {
    /// Directory containing `<name>.json` / `<name>.yaml` simulation specs.
    #[serde(default = "default_path")]
    pub path: PathBuf,

    /// Write `<name>.min.json` caches next to loaded specs.
    #[serde(default = "default_true")]
    pub cache_minified: bool,

    /// Version label used when a request names none.
    #[validate(custom(function = validation::validate_version_label))]
    #[serde(default = "default_version")]
    pub default_version: String,
}

fn default_path() -> PathBuf {
    PathBuf::from("simulations")
}

fn default_true() -> bool {
    true
}

fn default_version() -> String {
    "latest".into()
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
            cache_minified: default_true(),
            default_version: default_version(),
        }
    }
}
