use metrics::{counter, histogram};
use std::time::Instant;

/// Increment a counter for successful logins.
pub fn increment_login() {
    counter!("logins_total").increment(1);
}

/// Track API request latency using a histogram.
pub fn track_api_request(start: Instant) {
    let elapsed = start.elapsed();
    histogram!("api_request_duration_seconds").record(elapsed);
}
