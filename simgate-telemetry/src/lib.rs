//! # Simgate Telemetry
//!
//! Structured logging and request metrics for the gateway.

pub mod logging;
pub mod metrics;

pub use logging::EventLogger;
pub use metrics::MetricsRecorder;
