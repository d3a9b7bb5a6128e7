//! Shared application state

use actix_web::web;
use std::sync::Arc;

use crate::metrics_core::MetricsRecorder;
use crate::services::{Product, ResourceStore, User};

use super::services::configure_routes;

/// Everything the handlers share across workers.
///
/// Cloning is cheap: every field is reference counted, so all workers see
/// the same registry and stores.
#[derive(Clone)]
pub struct AppState {
    pub metrics: Arc<dyn MetricsRecorder>,
    pub users: web::Data<ResourceStore<User>>,
    pub products: web::Data<ResourceStore<Product>>,
}

impl AppState {
    pub fn new(metrics: Arc<dyn MetricsRecorder>) -> Self {
        Self {
            metrics,
            users: web::Data::new(ResourceStore::new()),
            products: web::Data::new(ResourceStore::new()),
        }
    }

    /// Register app data and routes. The timing middleware is wrapped
    /// separately at the `App` level so it sees every request.
    pub fn configure(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(web::Data::new(self.metrics.clone()))
            .app_data(self.users.clone())
            .app_data(self.products.clone());
        configure_routes(cfg);
    }
}
