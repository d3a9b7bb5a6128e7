pub mod health;
pub mod helpers;
pub mod metrics;
pub mod resources;
pub mod types;

pub use health::{HealthService, health_routes};
pub use metrics::{EXPOSITION_CONTENT_TYPE, MetricsService, metrics_routes};
pub use resources::{product_routes, user_routes};

use actix_web::web;

/// Register every route served by the application.
///
/// Shared state (`Arc<dyn MetricsRecorder>` and the resource stores) is
/// expected as app data; see `runtime::modes::server`.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(health_routes())
        .service(metrics_routes())
        .service(user_routes())
        .service(product_routes());
}
