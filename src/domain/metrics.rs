use std::sync::Arc;
use std::time::Instant;

/// Abstraction for application metrics (counters, histograms).
pub trait Metrics: Send + Sync + 'static {
    // ---
    /// Render current metrics in Prometheus text format.
    fn render(&self) -> String;

    /// Record a one-time code handed to the SMS collaborator.
    fn record_otp_sent(&self);

    /// Record a successful one-time code verification.
    fn record_otp_verified(&self);

    /// Record a finished skin analysis.
    fn record_analysis_completed(&self);

    /// Record an analysis appended to a user's history.
    fn record_analysis_stored(&self);

    /// Record HTTP request duration and labels.
    fn record_http_request(&self, start: Instant, path: &str, method: &str, status: u16);
}

/// Type alias for any backend that implements Metrics.
pub type MetricsPtr = Arc<dyn Metrics>;
