use lazy_static::lazy_static;
use prometheus::{register_histogram, register_int_counter, Histogram, IntCounter};

lazy_static! {
    /// Total outbound requests made to payment gateways
    pub static ref EXTERNAL_REQUEST_COUNT: IntCounter = register_int_counter!(
        "external_request_count_total",
        "Total number of outbound requests made to payment gateways"
    ).expect("Failed to register external_request_count_total");

    /// Outbound requests that never produced a response
    pub static ref EXTERNAL_REQUEST_FAILURES: IntCounter = register_int_counter!(
        "external_request_failures_total",
        "Total number of outbound gateway requests that failed to complete"
    ).expect("Failed to register external_request_failures_total");

    /// Outbound request duration histogram
    pub static ref EXTERNAL_REQUEST_LATENCY: Histogram = register_histogram!(
        "external_request_duration_seconds",
        "Duration of outbound gateway requests"
    ).expect("Failed to register external_request_duration_seconds");
}

/// Render every registered metric in the Prometheus text format.
pub async fn metrics_handler() -> Result<String, prometheus::Error> {
    let metric_families = prometheus::gather();
    let mut buffer = String::new();
    prometheus::TextEncoder::new().encode_utf8(&metric_families, &mut buffer)?;
    Ok(buffer)
}
