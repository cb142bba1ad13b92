//! Metrics and observability utilities
//!
//! Describes the analysis metrics and provides recording helpers with
//! standardized naming. Without an installed recorder every call is a no-op.

use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram, Unit};

/// Metrics prefix for all citenet metrics
pub const METRICS_PREFIX: &str = "citenet";

/// Histogram buckets for analysis latency (in seconds)
pub const ANALYSIS_BUCKETS: &[f64] = &[
    0.0005, // 0.5ms
    0.001,  // 1ms
    0.005,  // 5ms
    0.010,  // 10ms
    0.025,  // 25ms
    0.050,  // 50ms
    0.100,  // 100ms
    0.250,  // 250ms
    0.500,  // 500ms
    1.000,  // 1s
];

/// Register all metric descriptions
pub fn register_metrics() {
    describe_counter!(
        format!("{}_analyses_total", METRICS_PREFIX),
        Unit::Count,
        "Total number of network analyses"
    );

    describe_histogram!(
        format!("{}_analysis_duration_seconds", METRICS_PREFIX),
        Unit::Seconds,
        "Network analysis latency in seconds"
    );

    describe_gauge!(
        format!("{}_graph_nodes", METRICS_PREFIX),
        Unit::Count,
        "Number of nodes in the last projected graph"
    );

    describe_gauge!(
        format!("{}_graph_edges", METRICS_PREFIX),
        Unit::Count,
        "Number of edges in the last projected graph"
    );

    describe_counter!(
        format!("{}_records_dropped_total", METRICS_PREFIX),
        Unit::Count,
        "Input records skipped for lack of a resolvable identifier"
    );

    tracing::info!("Metrics registered");
}

/// Helper to record one completed analysis
pub fn record_analysis(duration_secs: f64, node_count: usize, edge_count: usize, dropped: usize) {
    counter!(format!("{}_analyses_total", METRICS_PREFIX)).increment(1);

    histogram!(format!("{}_analysis_duration_seconds", METRICS_PREFIX)).record(duration_secs);

    gauge!(format!("{}_graph_nodes", METRICS_PREFIX)).set(node_count as f64);
    gauge!(format!("{}_graph_edges", METRICS_PREFIX)).set(edge_count as f64);

    if dropped > 0 {
        counter!(format!("{}_records_dropped_total", METRICS_PREFIX)).increment(dropped as u64);
    }
}
