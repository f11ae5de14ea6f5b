use std::sync::Arc;
use std::time::Instant;

/// Abstraction for client-side metrics (counters, histograms).
pub trait Metrics: Send + Sync + 'static {
    // ---
    /// Render current metrics in Prometheus text format.
    fn render(&self) -> String;

    /// Record a successful login.
    fn record_login(&self);

    /// Record an outgoing API request's duration and labels.
    fn record_request(&self, start: Instant, path: &str, method: &str, status: u16);
}

/// Type alias for any backend that implements Metrics.
pub type MetricsPtr = Arc<dyn Metrics>;
