//! Job submission collaborator configuration.
//!
//! The gateway itself never schedules jobs; these settings are handed to the
//! external submission layer together with each prepared job.

use serde::{Deserialize, Serialize};
use validator::{self, Validate};

use crate::validation;

#[derive(Debug, Serialize, Deserialize, Validate, Clone)]
pub struct SubmissionConfig {
    /// Compute host jobs are submitted to when the request names none.
    #[validate(custom(function = validation::validate_host))]
    #[serde(default = "default_host")]
    pub default_host: String,

    /// Upper bound on jobs the submission layer may start per request.
    #[validate(range(min = 1, max = 1024))]
    #[serde(default = "default_max_jobs")]
    pub max_jobs: u32,
}

fn default_host() -> String {
    "localhost".into()
}

fn default_max_jobs() -> u32 {
    1
}

impl Default for SubmissionConfig {
    fn default() -> Self {
        Self {
            default_host: default_host(),
            max_jobs: default_max_jobs(),
        }
    }
}
