//! Custom validation functions for configuration.

use validator::ValidationError;

/// Validate a version label: no path separators, no whitespace.
pub fn validate_version_label(label: &str) -> Result<(), ValidationError> {
    let re = regex::Regex::new("^[A-Za-z0-9._-]+$")
        .map_err(|_| ValidationError::new("invalid_regex"))?;

    if re.is_match(label) {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_version_label"))
    }
}

/// Validate a submission host name.
pub fn validate_host(host: &str) -> Result<(), ValidationError> {
    let re = regex::Regex::new("^[A-Za-z0-9._-]+$")
        .map_err(|_| ValidationError::new("invalid_regex"))?;

    if !host.is_empty() && re.is_match(host) {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_host"))
    }
}

/// Validate a tracing level name.
pub fn validate_log_level(level: &str) -> Result<(), ValidationError> {
    let valid = ["trace", "debug", "info", "warn", "error"]
        .contains(&level.to_lowercase().as_str());
    if valid {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_log_level"))
    }
}
