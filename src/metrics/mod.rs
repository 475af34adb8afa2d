//! Metrics collection and exposition for Prometheus.
//!
//! This module owns the exporter's registry and its simulated gauges.

mod recorder;

pub use recorder::{
    MetricsRecorder, ScanKind, ShieldMetrics, ACTIVE_SCANS_METRIC, HEALTH_SCORE_METRIC,
    SCAN_TYPE_LABEL,
};
