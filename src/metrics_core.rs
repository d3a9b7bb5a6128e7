//! Core metrics traits.
//!
//! Provides the `MetricsRecorder` trait and `NoopMetrics` so that the HTTP
//! layer can accept `Arc<dyn MetricsRecorder>` and tests can inject a
//! recorder without touching Prometheus.

use std::sync::Arc;

use crate::errors::Result;

/// Trait for recording HTTP request metrics.
///
/// All methods are no-op by default, allowing partial implementation.
/// Implementations must be thread-safe (Send + Sync) and must not lose
/// updates when called concurrently for the same key.
#[allow(unused_variables)]
pub trait MetricsRecorder: Send + Sync {
    /// Increment the request counter for `(method, route, status)`.
    fn record_request(&self, method: &str, route: &str, status: u16) {}

    /// Observe a request latency for `(method, route)`.
    fn record_latency(&self, method: &str, route: &str, seconds: f64) {}

    /// Render every series in the Prometheus text exposition format.
    fn render(&self) -> Result<String> {
        Ok(String::new())
    }
}

/// Noop metrics implementation for testing.
///
/// All methods do nothing; `render` yields an empty exposition.
pub struct NoopMetrics;

impl MetricsRecorder for NoopMetrics {}

impl NoopMetrics {
    pub fn new() -> Self {
        Self
    }

    pub fn arc() -> Arc<dyn MetricsRecorder> {
        Arc::new(Self::new())
    }
}

impl Default for NoopMetrics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noop_metrics_renders_empty() {
        let noop = NoopMetrics::arc();
        noop.record_request("GET", "/health", 200);
        noop.record_latency("GET", "/health", 0.01);
        assert_eq!(noop.render().unwrap(), "");
    }
}
