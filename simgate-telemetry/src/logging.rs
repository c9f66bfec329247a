//! Structured logging with tracing.
//!
//! One `init` call at process start; components then emit events through the
//! plain `tracing` macros with fields (`simulation`, `version`, ...), so the
//! route layer can correlate a request end to end.

use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Clone)]
pub struct EventLogger;

impl EventLogger {
    /// Initialize the global subscriber; `RUST_LOG` wins over `info`.
    pub fn init() {
        Self::init_with_level("info")
    }

    /// Initialize with a configured base level (from `TelemetryConfig`);
    /// `RUST_LOG` still takes precedence when set.
    pub fn init_with_level(level: &str) {
        fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| EnvFilter::new(level.to_string())),
            )
            .with_target(false)
            .with_span_events(FmtSpan::CLOSE)
            .init()
    }
}

#[cfg(test)]
mod tests {
    use tracing_test::traced_test;

    #[traced_test]
    #[test]
    fn events_carry_fields() {
        tracing::info!(simulation = "test", "simulation loaded");
        assert!(logs_contain("simulation loaded"));
    }
}
