//! Shared application state.
//!
//! Contains the state that is shared across all request handlers:
//! the loaded configuration and the metrics registry.

use crate::config::ConfigV1;
use crate::metrics::ShieldMetrics;
use std::sync::Arc;

/// Application state shared across all HTTP handlers.
///
/// This state is cloned for each request handler. `ShieldMetrics` is a set
/// of shared handles, so every clone reads the gauges the updater writes.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded at startup.
    pub config: Arc<ConfigV1>,
    /// Registry holding the simulated Shield gauges.
    pub metrics: ShieldMetrics,
}
