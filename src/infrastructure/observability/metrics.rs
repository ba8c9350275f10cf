//! Prometheus metrics infrastructure

use std::sync::Arc;
use std::time::Duration;

use axum::{extract::State, response::IntoResponse, routing::get, Router};
use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

use super::config::MetricsConfig;
use crate::domain::{DataKind, KeyOutcome, SourceStatus};

/// Prometheus metrics handle for serving metrics endpoint
#[derive(Clone)]
pub struct PrometheusMetrics {
    handle: Arc<PrometheusHandle>,
}

impl std::fmt::Debug for PrometheusMetrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrometheusMetrics").finish_non_exhaustive()
    }
}

impl PrometheusMetrics {
    /// Get the metrics as a string for the /metrics endpoint
    pub fn render(&self) -> String {
        self.handle.render()
    }
}

/// Initialize Prometheus metrics. Without a recorder every macro below is a no-op.
pub fn init_metrics(config: &MetricsConfig) -> Option<PrometheusMetrics> {
    if !config.enabled {
        tracing::info!("Prometheus metrics disabled");
        return None;
    }

    match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => {
            gauge!("rural_gateway_info", "version" => env!("CARGO_PKG_VERSION")).set(1.0);
            tracing::info!(path = %config.path, "Prometheus metrics initialized");

            Some(PrometheusMetrics {
                handle: Arc::new(handle),
            })
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to initialize Prometheus metrics");
            None
        }
    }
}

/// Create the metrics router
pub fn create_metrics_router(metrics: PrometheusMetrics, path: &str) -> Router {
    Router::new()
        .route(path, get(metrics_handler))
        .with_state(metrics)
}

async fn metrics_handler(State(metrics): State<PrometheusMetrics>) -> impl IntoResponse {
    metrics.render()
}

/// Record an HTTP request metric; `path` should be the matched route, not the raw URI
pub fn record_http_request(method: &str, path: &str, status: u16, duration: Duration) {
    let labels = [
        ("method", method.to_string()),
        ("path", path.to_string()),
        ("status", status.to_string()),
    ];

    counter!("http_requests_total", &labels).increment(1);
    histogram!("http_request_duration_seconds", &labels).record(duration.as_secs_f64());
}

/// Record the outcome of refreshing one key
pub fn record_refresh_outcome(kind: DataKind, outcome: KeyOutcome) {
    counter!(
        "refresh_key_outcomes_total",
        "kind" => kind.as_str(),
        "outcome" => outcome.as_str()
    )
    .increment(1);
}

/// Record the wall time of a whole refresh cycle
pub fn record_refresh_cycle(duration: Duration, keys: usize) {
    histogram!("refresh_cycle_duration_seconds").record(duration.as_secs_f64());
    gauge!("refresh_cycle_keys").set(keys as f64);
}

/// Record which way a fallback chain resolved
pub fn record_chain_result(kind: DataKind, status: SourceStatus) {
    counter!(
        "fallback_chain_results_total",
        "chain" => kind.as_str(),
        "status" => status.as_str()
    )
    .increment(1);
}

/// Record a cache read: `hit` or `miss`
pub fn record_cache_read(kind: DataKind, hit: bool) {
    counter!(
        "cache_reads_total",
        "kind" => kind.as_str(),
        "result" => if hit { "hit" } else { "miss" }
    )
    .increment(1);
}
