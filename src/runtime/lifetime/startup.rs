use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{debug, info};

use crate::api::AppState;
use crate::config::StaticConfig;
use crate::metrics::PrometheusMetrics;
use crate::metrics_core::MetricsRecorder;

pub struct StartupContext {
    pub state: AppState,
}

/// 准备服务器启动的上下文
/// 包括指标注册表和资源存储
pub fn prepare_server_startup(config: &StaticConfig) -> Result<StartupContext> {
    let start_time = std::time::Instant::now();
    debug!("Starting pre-startup processing...");

    // Created once here and injected everywhere; there is no global registry.
    let metrics: Arc<dyn MetricsRecorder> = Arc::new(
        PrometheusMetrics::new(&config.metrics).context("Failed to create metrics registry")?,
    );

    let state = AppState::new(metrics);

    info!("Pre-startup processing completed in {:?}", start_time.elapsed());

    Ok(StartupContext { state })
}
