//! Prometheus metrics implementation.
//!
//! Delegates to the sibling `counters.rs` and `recorder.rs` utilities, which
//! talk to the global `metrics` crate registry. Metrics register themselves
//! on first use and a single global handle renders them in Prometheus text
//! format.

use crate::domain::Metrics;
use std::time::Instant;

/// Prometheus-based metrics implementation.
///
/// Empty because all state lives in the global `metrics` registry.
pub struct PrometheusMetrics {
    // Empty - uses global metrics registry pattern
}

impl PrometheusMetrics {
    pub fn new() -> Self {
        tracing::info!("Creating Prometheus metrics");
        PrometheusMetrics {}
    }
}

impl Metrics for PrometheusMetrics {
    fn render(&self) -> String {
        super::render_metrics()
    }

    fn record_otp_sent(&self) {
        super::increment_otp_sent();
    }

    fn record_otp_verified(&self) {
        super::increment_otp_verified();
    }

    fn record_analysis_completed(&self) {
        tracing::debug!("Recording analysis completed event");
        super::increment_analysis_completed();
    }

    fn record_analysis_stored(&self) {
        super::increment_analysis_stored();
    }

    fn record_http_request(&self, start: Instant, path: &str, method: &str, status: u16) {
        super::track_http_request(start, path, method, status);
    }
}
