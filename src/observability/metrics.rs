//! Metrics collection and exposition.
//!
//! # Metrics
//! - `mint_requests_total` (counter): mint attempts by outcome
//! - `mint_duration_seconds` (histogram): end-to-end mint latency,
//!   including the confirmation wait
//! - `chain_rpc_failures_total` (counter): failed RPC attempts by method
//!
//! Outcome and method labels are drawn from small fixed sets to keep
//! cardinality bounded.

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter on its own listener.
pub fn init(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

/// Record a finished mint attempt.
pub fn record_mint(outcome: &'static str, started: Instant) {
    counter!("mint_requests_total", "outcome" => outcome).increment(1);
    histogram!("mint_duration_seconds").record(started.elapsed().as_secs_f64());
}

/// Record a failed RPC attempt against one provider.
pub fn record_rpc_failure(method: &'static str) {
    counter!("chain_rpc_failures_total", "method" => method).increment(1);
}
