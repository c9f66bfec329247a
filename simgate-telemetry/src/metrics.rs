//! Prometheus request metrics.

use prometheus::{Counter, Histogram, HistogramOpts, Registry};

/// Counters and histograms for the gateway's request path.
#[derive(Debug, Clone)]
pub struct MetricsRecorder {
    pub registry: Registry,
    pub catalog_loads: Counter,
    pub validation_failures: Counter,
    pub validation_latency: Histogram,
}

impl Default for MetricsRecorder {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricsRecorder {
    pub fn new() -> Self {
        let registry = Registry::new();
        let catalog_loads =
            Counter::new("simgate_catalog_loads_total", "Simulation specs loaded").unwrap();
        let validation_failures = Counter::new(
            "simgate_validation_failures_total",
            "Parameter sets rejected",
        )
        .unwrap();

        let validation_latency = Histogram::with_opts(
            HistogramOpts::new(
                "simgate_validation_latency_ns",
                "Parameter validation time",
            )
            .buckets(vec![1_000.0, 10_000.0, 100_000.0, 1_000_000.0]),
        )
        .unwrap();

        registry.register(Box::new(catalog_loads.clone())).unwrap();
        registry
            .register(Box::new(validation_failures.clone()))
            .unwrap();
        registry
            .register(Box::new(validation_latency.clone()))
            .unwrap();

        Self {
            registry,
            catalog_loads,
            validation_failures,
            validation_latency,
        }
    }

    /// Encode the current registry contents in Prometheus text format.
    pub fn gather_metrics(&self) -> Result<String, prometheus::Error> {
        use prometheus::Encoder;
        let encoder = prometheus::TextEncoder::new();
        let mut buffer = Vec::<u8>::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        Ok(String::from_utf8(buffer).unwrap_or_default())
    }
}
