//! Prometheus Metrics Module
//!
//! Provides application-wide metrics collection using Prometheus.
//!
//! # Metrics Collected
//! - HTTP request counts by method, path, and status
//! - HTTP request latency histograms
//! - Connected hub endpoints, active rooms and the hub command backlog
//! - Broadcasts by scope, mailbox deliveries, and evictions by reason

use once_cell::sync::Lazy;
use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounter, IntCounterVec, IntGauge, Opts, Registry,
    TextEncoder,
};

/// Global metrics registry
pub static REGISTRY: Lazy<Registry> = Lazy::new(|| {
    let registry = Registry::new();
    register_metrics(&registry);
    registry
});

/// HTTP request counter - tracks total requests by method, path, and status code
pub static HTTP_REQUESTS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("http_requests_total", "Total number of HTTP requests")
            .namespace("school_chat"),
        &["method", "path", "status"],
    )
    .expect("Failed to create HTTP_REQUESTS_TOTAL metric")
});

/// HTTP request latency histogram - tracks request duration in seconds
pub static HTTP_REQUEST_DURATION_SECONDS: Lazy<HistogramVec> = Lazy::new(|| {
    let buckets = vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0];
    HistogramVec::new(
        HistogramOpts::new(
            "http_request_duration_seconds",
            "HTTP request latency in seconds",
        )
        .namespace("school_chat")
        .buckets(buckets),
        &["method", "path"],
    )
    .expect("Failed to create HTTP_REQUEST_DURATION_SECONDS metric")
});

/// Endpoints currently registered with the hub
pub static HUB_ENDPOINTS_CONNECTED: Lazy<IntGauge> = Lazy::new(|| {
    IntGauge::with_opts(
        Opts::new("hub_endpoints_connected", "Number of endpoints registered with the hub")
            .namespace("school_chat"),
    )
    .expect("Failed to create HUB_ENDPOINTS_CONNECTED metric")
});

/// Commands waiting for the hub actor
pub static HUB_COMMAND_QUEUE_DEPTH: Lazy<IntGauge> = Lazy::new(|| {
    IntGauge::with_opts(
        Opts::new(
            "hub_command_queue_depth",
            "Commands submitted to the hub but not yet processed",
        )
        .namespace("school_chat"),
    )
    .expect("Failed to create HUB_COMMAND_QUEUE_DEPTH metric")
});

/// Rooms with at least one member
pub static HUB_ROOMS_ACTIVE: Lazy<IntGauge> = Lazy::new(|| {
    IntGauge::with_opts(
        Opts::new("hub_rooms_active", "Number of rooms with at least one member")
            .namespace("school_chat"),
    )
    .expect("Failed to create HUB_ROOMS_ACTIVE metric")
});

/// Broadcasts processed by the hub
pub static HUB_BROADCASTS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("hub_broadcasts_total", "Total number of broadcasts processed")
            .namespace("school_chat"),
        &["scope"], // "all", "room"
    )
    .expect("Failed to create HUB_BROADCASTS_TOTAL metric")
});

/// Payloads accepted by endpoint mailboxes
pub static HUB_DELIVERIES_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::with_opts(
        Opts::new("hub_deliveries_total", "Total number of payloads placed in mailboxes")
            .namespace("school_chat"),
    )
    .expect("Failed to create HUB_DELIVERIES_TOTAL metric")
});

/// Endpoints forcibly removed during delivery
pub static HUB_EVICTIONS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("hub_evictions_total", "Total number of evicted endpoints")
            .namespace("school_chat"),
        &["reason"], // "slow_consumer", "disconnected"
    )
    .expect("Failed to create HUB_EVICTIONS_TOTAL metric")
});

/// Register all metrics with the registry
fn register_metrics(registry: &Registry) {
    registry
        .register(Box::new(HTTP_REQUESTS_TOTAL.clone()))
        .expect("Failed to register HTTP_REQUESTS_TOTAL");
    registry
        .register(Box::new(HTTP_REQUEST_DURATION_SECONDS.clone()))
        .expect("Failed to register HTTP_REQUEST_DURATION_SECONDS");
    registry
        .register(Box::new(HUB_ENDPOINTS_CONNECTED.clone()))
        .expect("Failed to register HUB_ENDPOINTS_CONNECTED");
    registry
        .register(Box::new(HUB_COMMAND_QUEUE_DEPTH.clone()))
        .expect("Failed to register HUB_COMMAND_QUEUE_DEPTH");
    registry
        .register(Box::new(HUB_ROOMS_ACTIVE.clone()))
        .expect("Failed to register HUB_ROOMS_ACTIVE");
    registry
        .register(Box::new(HUB_BROADCASTS_TOTAL.clone()))
        .expect("Failed to register HUB_BROADCASTS_TOTAL");
    registry
        .register(Box::new(HUB_DELIVERIES_TOTAL.clone()))
        .expect("Failed to register HUB_DELIVERIES_TOTAL");
    registry
        .register(Box::new(HUB_EVICTIONS_TOTAL.clone()))
        .expect("Failed to register HUB_EVICTIONS_TOTAL");
}

/// Collect and encode all metrics as Prometheus text format
pub fn gather_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::error!("Failed to encode metrics: {}", e);
        return String::new();
    }
    String::from_utf8(buffer).unwrap_or_default()
}

/// Helper to record HTTP request metrics
pub fn record_http_request(method: &str, path: &str, status: u16, duration_secs: f64) {
    HTTP_REQUESTS_TOTAL
        .with_label_values(&[method, path, &status.to_string()])
        .inc();
    HTTP_REQUEST_DURATION_SECONDS
        .with_label_values(&[method, path])
        .observe(duration_secs);
}

/// Helper to update the hub population gauges
pub fn set_hub_population(endpoints: usize, rooms: usize) {
    HUB_ENDPOINTS_CONNECTED.set(endpoints as i64);
    HUB_ROOMS_ACTIVE.set(rooms as i64);
}

/// Helper to update the hub backlog gauge
pub fn set_hub_queue_depth(depth: usize) {
    HUB_COMMAND_QUEUE_DEPTH.set(depth as i64);
}

/// Helper to record one processed broadcast
pub fn record_broadcast(scope: &str, delivered: usize) {
    HUB_BROADCASTS_TOTAL.with_label_values(&[scope]).inc();
    HUB_DELIVERIES_TOTAL.inc_by(delivered as u64);
}

/// Helper to record an evicted endpoint
pub fn record_eviction(reason: &str) {
    HUB_EVICTIONS_TOTAL.with_label_values(&[reason]).inc();
}
