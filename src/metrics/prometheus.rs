use super::Metrics;
use ::prometheus::{HistogramOpts, HistogramVec, Registry};
use http::{Method, StatusCode};
use std::time::Duration;

/// Records request latency in the `snorlax_requests_latency` histogram,
/// labelled by method, status code and path.
///
/// Every distinct path becomes its own label value, so clients calling
/// paths with embedded identifiers should expect a large number of series.
#[derive(Clone)]
pub struct PrometheusMetrics {
    latency: HistogramVec,
    registry: Registry,
}

impl PrometheusMetrics {
    /// Registers the histogram in a registry private to this sink.
    pub fn new() -> Result<Self, ::prometheus::Error> {
        Self::with_registry(Registry::new())
    }

    pub fn with_registry(registry: Registry) -> Result<Self, ::prometheus::Error> {
        let latency = HistogramVec::new(
            HistogramOpts::new("latency", "Request latency in seconds")
                .namespace("snorlax")
                .subsystem("requests"),
            &["method", "code", "path"],
        )?;
        registry.register(Box::new(latency.clone()))?;
        Ok(PrometheusMetrics { latency, registry })
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }
}

impl Metrics for PrometheusMetrics {
    fn observe_latency(&self, method: &Method, status: StatusCode, path: &str, elapsed: Duration) {
        self.latency
            .with_label_values(&[method.as_str(), status.as_str(), path])
            .observe(elapsed.as_secs_f64());
    }
}
