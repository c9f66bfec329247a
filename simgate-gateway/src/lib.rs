//! # Simgate Gateway
//!
//! End-to-end request flow over the catalog and validator crates: load a
//! simulation spec, resolve the requested version to a concrete definition,
//! validate the caller's parameters against it, and hand a [`PreparedJob`]
//! to the external submission collaborator.
//!
//! The gateway holds no mutable state; every call is an independent read of
//! immutable configuration, so one instance can serve concurrent requests
//! without coordination.

#![warn(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::time::Instant;

use tracing::{info, instrument};

use simgate_catalog::{ResolvedSimulation, SimulationSpec, SimulationStore};
use simgate_config::GatewayConfig;
use simgate_params::{validate, RawParams};
use simgate_telemetry::MetricsRecorder;

mod error;
mod job;

pub use error::GatewayError;
pub use job::PreparedJob;

pub struct Gateway {
    config: GatewayConfig,
    store: SimulationStore,
    metrics: MetricsRecorder,
}

impl Gateway {
    pub fn new(config: GatewayConfig) -> Self {
        Self::with_metrics(config, MetricsRecorder::new())
    }

    /// Share a metrics registry with the surrounding service layer.
    pub fn with_metrics(config: GatewayConfig, metrics: MetricsRecorder) -> Self {
        let store = SimulationStore::new(&config.catalog.path)
            .with_cache(config.catalog.cache_minified);
        Self {
            config,
            store,
            metrics,
        }
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    pub fn metrics(&self) -> &MetricsRecorder {
        &self.metrics
    }

    /// Names of all simulations in the catalog.
    pub fn list_simulations(&self) -> Result<Vec<String>, GatewayError> {
        Ok(self.store.list()?)
    }

    /// Full version map of one simulation, for "get simulation" queries.
    pub fn simulation(&self, name: &str) -> Result<SimulationSpec, GatewayError> {
        let spec = self.store.load(name)?;
        self.metrics.catalog_loads.inc();
        Ok(spec)
    }

    /// Resolve `name`/`version` to a concrete, annotated definition. A
    /// missing version falls back to the configured default label.
    pub fn resolved(
        &self,
        name: &str,
        version: Option<&str>,
    ) -> Result<ResolvedSimulation, GatewayError> {
        let spec = self.simulation(name)?;
        let requested = version.or(Some(self.config.catalog.default_version.as_str()));
        Ok(spec.resolve(requested)?)
    }

    /// The submission path: resolve, then validate the caller's raw
    /// parameters against the resolved definition's schema.
    #[instrument(skip(self, raw), fields(simulation = name))]
    pub fn prepare_submission(
        &self,
        name: &str,
        version: Option<&str>,
        raw: &RawParams,
    ) -> Result<PreparedJob, GatewayError> {
        let resolved = self.resolved(name, version)?;

        let started = Instant::now();
        let input = validate(raw, &resolved.definition.parameters).inspect_err(|_| {
            self.metrics.validation_failures.inc();
        })?;
        self.metrics
            .validation_latency
            .observe(started.elapsed().as_nanos() as f64);

        info!(
            simulation = %resolved.name,
            version = %resolved.version,
            parameters = input.len(),
            "prepared job submission"
        );
        Ok(PreparedJob {
            simulation: resolved.name,
            version: resolved.version,
            command: resolved.definition.command,
            arguments: resolved.definition.arguments,
            parallelism: resolved.definition.parallelism,
            input,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use simgate_config::GatewayConfig;
    use simgate_params::ParamValue;
    use std::fs;
    use tempfile::TempDir;

    fn gateway(dir: &TempDir) -> Gateway {
        let mut config = GatewayConfig::default();
        config.catalog.path = dir.path().to_path_buf();
        Gateway::new(config)
    }

    fn seed_catalog(dir: &TempDir) {
        fs::write(
            dir.path().join("test.json"),
            r#"{
                "latest": "stable",
                "stable": "1.0",
                "1.0": {
                    "command": "echo",
                    "arguments": ["-n"],
                    "parallelism": 2,
                    "parameters": [
                        {"name": "arg", "type": "choice", "dtype": "str", "choices": ["hi", "bye"]},
                        {"name": "n", "type": "interval", "dtype": "int", "min": 1, "max": 9}
                    ]
                }
            }"#,
        )
        .unwrap();
    }

    fn raw(value: serde_json::Value) -> RawParams {
        match value {
            serde_json::Value::Object(map) => map,
            _ => panic!("expected an object"),
        }
    }

    #[test]
    fn end_to_end_submission() {
        let dir = TempDir::new().unwrap();
        seed_catalog(&dir);

        let job = gateway(&dir)
            .prepare_submission("test", Some("latest"), &raw(serde_json::json!({"arg": "hi"})))
            .unwrap();

        assert_eq!(job.simulation, "test");
        assert_eq!(job.version, "1.0");
        assert_eq!(job.command, "echo");
        assert_eq!(job.arguments, vec!["-n"]);
        assert_eq!(job.parallelism, Some(2));
        assert_eq!(job.input["arg"], ParamValue::Str("hi".into()));
        // Defaulted from the interval midpoint.
        assert_eq!(job.input["n"], ParamValue::Int(5));
    }

    #[test]
    fn absent_version_uses_configured_default() {
        let dir = TempDir::new().unwrap();
        seed_catalog(&dir);

        let resolved = gateway(&dir).resolved("test", None).unwrap();
        assert_eq!(resolved.version, "1.0");
    }

    #[test]
    fn validation_failure_keeps_status_400() {
        let dir = TempDir::new().unwrap();
        seed_catalog(&dir);
        let gateway = gateway(&dir);

        let err = gateway
            .prepare_submission("test", None, &raw(serde_json::json!({"arg": "shrug"})))
            .unwrap_err();
        assert_eq!(err.status(), 400);
        assert_eq!(gateway.metrics().validation_failures.get() as u64, 1);
    }

    #[test]
    fn unknown_simulation_is_404() {
        let dir = TempDir::new().unwrap();
        let err = gateway(&dir)
            .prepare_submission("ghost", None, &RawParams::new())
            .unwrap_err();
        assert_eq!(err.status(), 404);
    }

    #[test]
    fn config_errors_are_500() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("loop.json"), r#"{"latest": "a", "a": "latest"}"#).unwrap();

        let err = gateway(&dir).resolved("loop", None).unwrap_err();
        assert_eq!(err.status(), 500);
    }

    #[test]
    fn listing_sees_seeded_catalog() {
        let dir = TempDir::new().unwrap();
        seed_catalog(&dir);

        assert_eq!(gateway(&dir).list_simulations().unwrap(), vec!["test"]);
    }

    #[test]
    fn prepared_job_serializes_flat() {
        let dir = TempDir::new().unwrap();
        seed_catalog(&dir);

        let job = gateway(&dir)
            .prepare_submission("test", None, &raw(serde_json::json!({"n": "3"})))
            .unwrap();
        let json = serde_json::to_value(&job).unwrap();
        assert_eq!(json["input"]["n"], serde_json::json!(3));
        assert_eq!(json["input"]["arg"], serde_json::json!("hi"));
    }
}
