//! Prometheus-backed request metrics registry
//!
//! Holds its own `prometheus::Registry` instead of the default global one,
//! so every instance (one per process, one per test) is isolated.

use prometheus::{Encoder, HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry, TextEncoder};
use tracing::debug;

use crate::config::MetricsConfig;
use crate::errors::{Result, ServiceError};
use crate::metrics_core::MetricsRecorder;

/// Counter name, before namespacing.
pub const HTTP_REQUESTS_TOTAL: &str = "http_requests_total";
/// Histogram name, before namespacing.
pub const HTTP_REQUEST_DURATION_SECONDS: &str = "http_request_duration_seconds";

/// Request metrics container
pub struct PrometheusMetrics {
    registry: Registry,

    /// Total HTTP requests by method, endpoint (route template) and status
    pub http_requests_total: IntCounterVec,

    /// HTTP request latency by method and endpoint
    pub http_request_duration_seconds: HistogramVec,
}

impl PrometheusMetrics {
    /// Build a registry from config. Buckets are fixed from here on.
    pub fn new(config: &MetricsConfig) -> Result<Self> {
        // prometheus only checks buckets when the first child is created, and panics there.
        validate_buckets(&config.latency_buckets)?;

        let registry = Registry::new();

        let http_requests_total = IntCounterVec::new(
            Opts::new(HTTP_REQUESTS_TOTAL, "Total HTTP Requests")
                .namespace(config.namespace.clone()),
            &["method", "endpoint", "status"],
        )?;

        let http_request_duration_seconds = HistogramVec::new(
            HistogramOpts::new(HTTP_REQUEST_DURATION_SECONDS, "HTTP Request Latency")
                .namespace(config.namespace.clone())
                .buckets(config.latency_buckets.clone()),
            &["method", "endpoint"],
        )?;

        registry.register(Box::new(http_requests_total.clone()))?;
        registry.register(Box::new(http_request_duration_seconds.clone()))?;

        debug!(
            "Metrics registry created with {} latency buckets",
            config.latency_buckets.len()
        );

        Ok(Self {
            registry,
            http_requests_total,
            http_request_duration_seconds,
        })
    }

    /// Export metrics in Prometheus text format
    pub fn export(&self) -> Result<String> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| {
            ServiceError::metrics(format!("metrics output is not valid UTF-8: {}", e))
        })
    }
}

/// Histogram bounds must be non-empty, finite and strictly increasing.
pub fn validate_buckets(buckets: &[f64]) -> Result<()> {
    if buckets.is_empty() {
        return Err(ServiceError::metrics("latency buckets must not be empty"));
    }
    if buckets.iter().any(|b| !b.is_finite()) {
        return Err(ServiceError::metrics("latency buckets must be finite"));
    }
    if buckets.windows(2).any(|w| w[0] >= w[1]) {
        return Err(ServiceError::metrics(
            "latency buckets must be in strictly increasing order",
        ));
    }
    Ok(())
}

impl MetricsRecorder for PrometheusMetrics {
    fn record_request(&self, method: &str, route: &str, status: u16) {
        let status = status.to_string();
        self.http_requests_total
            .with_label_values(&[method, route, status.as_str()])
            .inc();
    }

    fn record_latency(&self, method: &str, route: &str, seconds: f64) {
        // Instant-based durations are never negative; clamp anything else.
        let seconds = if seconds.is_finite() {
            seconds.max(0.0)
        } else {
            0.0
        };
        self.http_request_duration_seconds
            .with_label_values(&[method, route])
            .observe(seconds);
    }

    fn render(&self) -> Result<String> {
        self.export()
    }
}
