//! Prometheus metrics endpoint
//!
//! Exposes request metrics in Prometheus text format at `/metrics`.

use actix_web::{HttpResponse, Responder, web};
use std::sync::Arc;
use tracing::{error, trace};

use crate::metrics_core::MetricsRecorder;

/// Prometheus text exposition media type.
pub const EXPOSITION_CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";

/// Metrics service handler
pub struct MetricsService;

impl MetricsService {
    /// Handle metrics export request
    pub async fn metrics(metrics: web::Data<Arc<dyn MetricsRecorder>>) -> impl Responder {
        trace!("Received metrics scrape");

        match metrics.render() {
            Ok(output) => HttpResponse::Ok()
                .content_type(EXPOSITION_CONTENT_TYPE)
                .body(output),
            Err(e) => {
                error!("Failed to render metrics: {}", e);
                HttpResponse::InternalServerError()
                    .content_type("text/plain")
                    .body("failed to render metrics")
            }
        }
    }
}

/// Metrics 路由配置
pub fn metrics_routes() -> actix_web::Resource {
    web::resource("/metrics").route(web::get().to(MetricsService::metrics))
}
