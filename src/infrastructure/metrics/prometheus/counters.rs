use metrics::{counter, histogram};
use std::time::Instant;

/// Increment a counter for one-time codes sent.
pub fn increment_otp_sent() {
    counter!("otp_sent_total").increment(1);
}

/// Increment a counter for one-time codes verified.
pub fn increment_otp_verified() {
    counter!("otp_verified_total").increment(1);
}

/// Increment a counter for completed analyses.
pub fn increment_analysis_completed() {
    counter!("analyses_completed_total").increment(1);
}

/// Increment a counter for analyses written to history.
pub fn increment_analysis_stored() {
    counter!("analyses_stored_total").increment(1);
}

/// Track HTTP request latency using a histogram.
pub fn track_http_request(start: Instant, path: &str, method: &str, status: u16) {
    let elapsed = start.elapsed();
    histogram!(
        "http_request_duration_seconds",
        "path" => path.to_string(),
        "method" => method.to_string(),
        "status" => status.to_string()
    )
    .record(elapsed);
}
