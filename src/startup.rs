//! Application startup and server initialization.
//!
//! This module creates the metrics registry, spawns the updater task and
//! serves the HTTP routes on the configured address.

use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tokio::task::{JoinError, JoinHandle};
use tracing::{debug, info};

use crate::config::ConfigV1;
use crate::error::{ExporterError, Result};
use crate::metrics::ShieldMetrics;
use crate::routes;
use crate::simulation::RandomSource;
use crate::state::AppState;
use crate::updater::Updater;

/// Handle on the spawned updater task.
///
/// Dropping it (or calling [`UpdaterHandle::stop`]) ends the loop after its
/// current sleep is interrupted.
pub struct UpdaterHandle {
    shutdown: watch::Sender<bool>,
    task: JoinHandle<Updater<RandomSource, ShieldMetrics>>,
}

impl UpdaterHandle {
    /// Signals the loop to stop, waits for it and returns how many cycles
    /// it completed.
    ///
    /// # Errors
    ///
    /// Returns the `JoinError` if the updater task panicked or was aborted.
    pub async fn stop(self) -> std::result::Result<u64, JoinError> {
        if self.shutdown.send(true).is_err() {
            debug!("Shield metrics updater had already exited");
        }
        self.task.await.map(|updater| updater.cycles())
    }
}

/// Spawns the random-valued updater writing into `metrics`.
pub fn spawn_updater(config: &ConfigV1, metrics: ShieldMetrics) -> UpdaterHandle {
    let (shutdown, rx) = watch::channel(false);
    let updater = Updater::new(RandomSource::default(), metrics, config.updater.interval());
    let task = tokio::spawn(updater.run(rx));

    UpdaterHandle { shutdown, task }
}

/// Initializes and runs the application server.
///
/// Builds the metrics registry, starts the updater and serves until the
/// listener fails. Under normal operation this never returns.
///
/// # Errors
///
/// Returns an error if the metrics cannot be registered, the server fails
/// to bind to the configured address, or serving fails.
pub async fn run(config: Arc<ConfigV1>) -> Result<()> {
    let metrics = ShieldMetrics::new()?;

    let _updater = spawn_updater(&config, metrics.clone());

    let state = AppState {
        config: config.clone(),
        metrics,
    };
    let app = routes::create_router(state);

    let listener = TcpListener::bind(&config.bind_address)
        .await
        .map_err(|source| ExporterError::Bind {
            address: config.bind_address.clone(),
            source,
        })?;

    info!("Starting Shield exporter on {}", config.bind_address);

    axum::serve(listener, app)
        .await
        .map_err(ExporterError::Serve)
}
