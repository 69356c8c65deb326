//! Metrics collection and exposition.
//!
//! # Metrics
//! - `bridge_requests_total` (counter): requests by route, status
//! - `bridge_request_duration_seconds` (histogram): latency by route
//! - `bridge_controller_errors_total` (counter): failed controller calls by operation
//!
//! Recording is a no-op until a recorder is installed by `init_metrics`.

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder and its HTTP scrape endpoint.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint started"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

/// Record one handled request.
pub fn record_request(route: &str, status: u16, start: Instant) {
    metrics::counter!(
        "bridge_requests_total",
        "route" => route.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    metrics::histogram!("bridge_request_duration_seconds", "route" => route.to_string())
        .record(start.elapsed().as_secs_f64());
}

/// Record a controller call that returned an error.
pub fn record_controller_error(operation: &'static str) {
    metrics::counter!("bridge_controller_errors_total", "operation" => operation).increment(1);
}
