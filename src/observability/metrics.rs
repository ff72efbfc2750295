//! Metrics collection and exposition.
//!
//! # Metrics
//! - `proxy_requests_total` (counter): inbound API requests by endpoint, status
//! - `proxy_request_duration_seconds` (histogram): inbound latency by endpoint
//! - `upstream_requests_total` (counter): upstream calls by operation, outcome
//! - `upstream_request_duration_seconds` (histogram): upstream latency by operation

use metrics::{counter, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};
use std::net::SocketAddr;
use std::time::Instant;

/// Install the Prometheus recorder and its scrape listener.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

/// Record a finished inbound API request.
pub fn record_request(endpoint: &'static str, status: u16, start: Instant) {
    counter!("proxy_requests_total", "endpoint" => endpoint, "status" => status.to_string())
        .increment(1);
    histogram!("proxy_request_duration_seconds", "endpoint" => endpoint)
        .record(start.elapsed().as_secs_f64());
}

/// Record a finished upstream call.
pub fn record_upstream(operation: &'static str, outcome: &'static str, start: Instant) {
    counter!("upstream_requests_total", "operation" => operation, "outcome" => outcome)
        .increment(1);
    histogram!("upstream_request_duration_seconds", "operation" => operation)
        .record(start.elapsed().as_secs_f64());
}
