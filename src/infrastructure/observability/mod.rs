//! Observability infrastructure - Prometheus metrics

mod config;
mod metrics;

pub use config::MetricsConfig;
pub use metrics::{
    create_metrics_router, init_metrics, record_cache_read, record_chain_result,
    record_http_request, record_refresh_cycle, record_refresh_outcome, PrometheusMetrics,
};
