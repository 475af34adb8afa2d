//! Simulated Shield gauges backed by a Prometheus registry.

use prometheus::{Encoder, Gauge, GaugeVec, Opts, Registry, TextEncoder};
use std::sync::Arc;

use crate::error::{ExporterError, Result};

/// Name of the health score gauge.
pub const HEALTH_SCORE_METRIC: &str = "shield_system_health_score";
/// Name of the labeled active scan gauge.
pub const ACTIVE_SCANS_METRIC: &str = "shield_active_scans_total";
/// Label partitioning the active scan gauge.
pub const SCAN_TYPE_LABEL: &str = "type";

/// Category of verification scan reported under the `type` label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScanKind {
    Vulnerability,
    Compliance,
}

impl ScanKind {
    pub const ALL: [ScanKind; 2] = [ScanKind::Vulnerability, ScanKind::Compliance];

    pub fn as_str(self) -> &'static str {
        match self {
            ScanKind::Vulnerability => "vulnerability",
            ScanKind::Compliance => "compliance",
        }
    }
}

/// Trait for writing simulated Shield values.
///
/// Implementations must be safe to call concurrently with readers; the
/// updater never holds a lock across calls.
pub trait MetricsRecorder: Clone + Send + Sync + 'static {
    /// Sets the system health score.
    fn set_health_score(&self, score: f64);

    /// Sets the number of active scans of the given kind.
    fn set_active_scans(&self, kind: ScanKind, count: f64);
}

/// Prometheus gauges for the Shield exporter.
#[derive(Clone)]
pub struct ShieldMetrics {
    registry: Arc<Registry>,
    health_score: Gauge,
    active_scans: GaugeVec,
}

impl ShieldMetrics {
    /// Creates the gauges on a fresh, private registry.
    pub fn new() -> Result<Self> {
        Self::with_registry(Arc::new(Registry::new()))
    }

    /// Creates the gauges and registers them on `registry`.
    ///
    /// Fails if the registry already holds metrics with the same names.
    pub fn with_registry(registry: Arc<Registry>) -> Result<Self> {
        let health_score = Gauge::with_opts(Opts::new(
            HEALTH_SCORE_METRIC,
            "Current health score of the Shield security system (0-100)",
        ))
        .map_err(ExporterError::Registration)?;

        let active_scans = GaugeVec::new(
            Opts::new(
                ACTIVE_SCANS_METRIC,
                "Number of active verification scans by type",
            ),
            &[SCAN_TYPE_LABEL],
        )
        .map_err(ExporterError::Registration)?;

        registry
            .register(Box::new(health_score.clone()))
            .map_err(ExporterError::Registration)?;
        registry
            .register(Box::new(active_scans.clone()))
            .map_err(ExporterError::Registration)?;

        // Every known scan type gets a sample line from the first scrape on.
        for kind in ScanKind::ALL {
            active_scans.with_label_values(&[kind.as_str()]).set(0.0);
        }

        Ok(ShieldMetrics {
            registry,
            health_score,
            active_scans,
        })
    }

    /// Current health score.
    pub fn health_score(&self) -> f64 {
        self.health_score.get()
    }

    /// Current number of active scans of `kind`.
    pub fn active_scans(&self, kind: ScanKind) -> f64 {
        self.active_scans.with_label_values(&[kind.as_str()]).get()
    }

    /// Renders all metrics in Prometheus text format.
    pub fn render(&self) -> Result<String> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder
            .encode(&metric_families, &mut buffer)
            .map_err(|e| ExporterError::Encode(e.to_string()))?;
        String::from_utf8(buffer).map_err(|e| ExporterError::Encode(e.to_string()))
    }
}

impl MetricsRecorder for ShieldMetrics {
    fn set_health_score(&self, score: f64) {
        self.health_score.set(score);
    }

    fn set_active_scans(&self, kind: ScanKind, count: f64) {
        self.active_scans
            .with_label_values(&[kind.as_str()])
            .set(count);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_lines(text: &str) -> Vec<&str> {
        text.lines().filter(|l| !l.starts_with('#')).collect()
    }

    #[test]
    fn render_lists_one_line_per_gauge_and_label() {
        let metrics = ShieldMetrics::new().unwrap();
        metrics.set_health_score(97.5);
        metrics.set_active_scans(ScanKind::Vulnerability, 3.0);
        metrics.set_active_scans(ScanKind::Compliance, 1.0);

        let text = metrics.render().unwrap();
        let lines = sample_lines(&text);

        assert_eq!(lines.len(), 3, "unexpected exposition: {text}");
        assert!(lines.contains(&"shield_system_health_score 97.5"));
        assert!(lines.contains(&"shield_active_scans_total{type=\"vulnerability\"} 3"));
        assert!(lines.contains(&"shield_active_scans_total{type=\"compliance\"} 1"));
        assert!(text.contains("# TYPE shield_system_health_score gauge"));
    }

    #[test]
    fn scan_types_are_exposed_before_first_update() {
        let metrics = ShieldMetrics::new().unwrap();
        let text = metrics.render().unwrap();

        assert!(text.contains("shield_active_scans_total{type=\"vulnerability\"} 0"));
        assert!(text.contains("shield_active_scans_total{type=\"compliance\"} 0"));
        assert!(text.contains("shield_system_health_score 0"));
    }

    #[test]
    fn gauge_keeps_only_last_value() {
        let metrics = ShieldMetrics::new().unwrap();
        metrics.set_health_score(94.0);
        metrics.set_health_score(99.25);

        assert_eq!(metrics.health_score(), 99.25);
        assert!(!metrics.render().unwrap().contains("94"));
    }

    #[test]
    fn duplicate_registration_fails() {
        let registry = Arc::new(Registry::new());
        ShieldMetrics::with_registry(registry.clone()).unwrap();

        let err = ShieldMetrics::with_registry(registry).err().unwrap();
        assert!(matches!(
            err,
            ExporterError::Registration(prometheus::Error::AlreadyReg)
        ));
    }

    #[test]
    fn separate_instances_do_not_share_state() {
        let a = ShieldMetrics::new().unwrap();
        let b = ShieldMetrics::new().unwrap();
        a.set_active_scans(ScanKind::Compliance, 1.0);

        assert_eq!(a.active_scans(ScanKind::Compliance), 1.0);
        assert_eq!(b.active_scans(ScanKind::Compliance), 0.0);
    }
}
