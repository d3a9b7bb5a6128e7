use actix_web::{HttpResponse, Responder, web};
use tracing::trace;

/// Health Service
///
/// Liveness only: no dependency checks, no state, always `200 OK`.
pub struct HealthService;

impl HealthService {
    pub async fn health_check() -> impl Responder {
        trace!("Received health check request");

        HttpResponse::Ok()
            .append_header(("Content-Type", "text/plain"))
            .body("OK")
    }
}

/// Health 路由配置
pub fn health_routes() -> actix_web::Resource {
    web::resource("/health")
        .route(web::get().to(HealthService::health_check))
        .route(web::head().to(HealthService::health_check))
}
