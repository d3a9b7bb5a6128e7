//! Prometheus metrics module
//!
//! Provides the request metrics registry and its text export.

mod registry;

pub use registry::{
    HTTP_REQUEST_DURATION_SECONDS, HTTP_REQUESTS_TOTAL, PrometheusMetrics, validate_buckets,
};
