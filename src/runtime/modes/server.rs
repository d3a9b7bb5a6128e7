//! Server mode
//!
//! This module contains the HTTP server startup logic.
//! It configures and starts the HTTP server with all necessary routes.

use actix_web::{App, HttpServer};
use anyhow::Result;
use tracing::warn;

use crate::api::middleware::TimingMiddleware;
use crate::config::StaticConfig;
use crate::runtime::lifetime;

/// Upper bound on actix worker threads.
pub const MAX_WORKERS: usize = 32;

/// Cap the configured worker count, warning when the cap applies.
pub fn effective_workers(configured: usize) -> usize {
    if configured > MAX_WORKERS {
        warn!(
            "server.workers = {} exceeds the limit, using {} workers",
            configured, MAX_WORKERS
        );
        MAX_WORKERS
    } else {
        configured
    }
}

/// Run the HTTP server
///
/// This function:
/// 1. Builds the metrics registry and resource stores
/// 2. Configures and starts the HTTP server
/// 3. Returns once actix-web has shut down (SIGINT/SIGTERM)
///
/// **Note**: Logging system must be initialized before calling this function
pub async fn run_server(config: &StaticConfig) -> Result<()> {
    let startup = lifetime::startup::prepare_server_startup(config).map_err(|e| {
        tracing::error!("Server startup failed: {}", e);
        e
    })?;
    let state = startup.state;

    let workers = effective_workers(config.server.workers);
    warn!("Using {} workers for the server", workers);

    let server = HttpServer::new(move || {
        let state = state.clone();
        App::new()
            .wrap(TimingMiddleware::new(state.metrics.clone())) // 最外层，记录请求延迟
            .configure(move |cfg| state.configure(cfg))
    })
    .keep_alive(std::time::Duration::from_secs(30))
    .client_request_timeout(std::time::Duration::from_millis(5000))
    .client_disconnect_timeout(std::time::Duration::from_millis(1000))
    .workers(workers);

    let bind_address = format!("{}:{}", config.server.host, config.server.port);
    warn!("Starting server at http://{}", bind_address);

    server.bind(bind_address)?.run().await?;

    warn!("Server stopped");
    Ok(())
}
