use http::{Method, StatusCode};
use std::time::Duration;

#[cfg(feature = "prometheus")]
mod prometheus;

#[cfg(feature = "prometheus")]
pub use self::prometheus::PrometheusMetrics;

/// Sink for request latency observations.
///
/// The client only ever writes to it, once per successfully sent request.
pub trait Metrics: Send + Sync {
    fn observe_latency(&self, method: &Method, status: StatusCode, path: &str, elapsed: Duration);
}
