//! Metrics module
//!
//! Prometheus counters and histograms for routing decisions and request
//! outcomes.

pub mod server;

use lazy_static::lazy_static;
use prometheus::{register_counter_vec, register_histogram_vec, CounterVec, HistogramVec};

/// Rejection reasons; also the duration label for requests no handler saw
pub const NOT_FOUND: &str = "not_found";
pub const METHOD_NOT_ALLOWED: &str = "method_not_allowed";

lazy_static! {
    // Routing metrics
    pub static ref ROUTE_DECISIONS_TOTAL: CounterVec = register_counter_vec!(
        "s3emu_route_decisions_total",
        "Requests routed to an operation",
        &["stage", "operation"]
    ).unwrap();

    pub static ref ROUTE_REJECTIONS_TOTAL: CounterVec = register_counter_vec!(
        "s3emu_route_rejections_total",
        "Requests the router could not map to an operation",
        &["reason"]
    ).unwrap();

    // Request metrics
    pub static ref REQUEST_DURATION: HistogramVec = register_histogram_vec!(
        "s3emu_request_duration_seconds",
        "Request duration in seconds, routing plus handler",
        &["operation"],
        vec![0.0001, 0.0005, 0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0, 5.0]
    ).unwrap();

    // Error metrics
    pub static ref ERRORS_TOTAL: CounterVec = register_counter_vec!(
        "s3emu_errors_total",
        "Error responses by S3 error code",
        &["code"]
    ).unwrap();
}

/// Record a request routed to an operation
pub fn record_route(stage: &str, operation: &str) {
    ROUTE_DECISIONS_TOTAL
        .with_label_values(&[stage, operation])
        .inc();
}

/// Record a request that matched no route shape
pub fn record_not_found() {
    ROUTE_REJECTIONS_TOTAL.with_label_values(&[NOT_FOUND]).inc();
}

/// Record a matched shape with an unsupported verb
pub fn record_method_not_allowed() {
    ROUTE_REJECTIONS_TOTAL
        .with_label_values(&[METHOD_NOT_ALLOWED])
        .inc();
}

/// Record request duration, labeled by operation name or rejection reason
pub fn record_request_duration(operation: &str, duration_secs: f64) {
    REQUEST_DURATION
        .with_label_values(&[operation])
        .observe(duration_secs);
}

/// Record an error response
pub fn record_error(code: &str) {
    ERRORS_TOTAL.with_label_values(&[code]).inc();
}
