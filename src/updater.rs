//! Background task refreshing the simulated Shield gauges.

use std::time::Duration;

use tokio::sync::watch;
use tracing::{debug, info};

use crate::metrics::{MetricsRecorder, ScanKind};
use crate::simulation::{Sample, ValueSource};

/// Periodically draws a [`Sample`] and writes it into a [`MetricsRecorder`].
pub struct Updater<S, R> {
    source: S,
    recorder: R,
    interval: Duration,
    cycles: u64,
}

impl<S, R> Updater<S, R>
where
    S: ValueSource,
    R: MetricsRecorder,
{
    pub fn new(source: S, recorder: R, interval: Duration) -> Self {
        Updater {
            source,
            recorder,
            interval,
            cycles: 0,
        }
    }

    /// Number of completed update cycles.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Runs a single update cycle and returns the values it published.
    pub fn tick(&mut self) -> Sample {
        let sample = Sample::draw(&mut self.source);

        self.recorder.set_health_score(sample.health_score);
        self.recorder
            .set_active_scans(ScanKind::Vulnerability, f64::from(sample.vulnerability_scans));
        self.recorder
            .set_active_scans(ScanKind::Compliance, f64::from(sample.compliance_scans));
        self.cycles += 1;

        info!(
            health = sample.health_score,
            vulnerability_scans = sample.vulnerability_scans,
            compliance_scans = sample.compliance_scans,
            cycle = self.cycles,
            "Updated Shield metrics: Health={:.2}",
            sample.health_score
        );

        sample
    }

    /// Ticks, then sleeps for the interval, until `shutdown` turns `true`
    /// or its sender is dropped. The first tick happens immediately.
    pub async fn run(mut self, mut shutdown: watch::Receiver<bool>) -> Self {
        loop {
            if *shutdown.borrow_and_update() {
                break;
            }

            self.tick();

            tokio::select! {
                _ = tokio::time::sleep(self.interval) => {}
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
            }
        }

        debug!(cycles = self.cycles, "Shield metrics updater stopped");
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::ShieldMetrics;
    use crate::simulation::RandomSource;

    #[test]
    fn tick_writes_sample_into_recorder() {
        let metrics = ShieldMetrics::new().unwrap();
        let mut updater = Updater::new(
            RandomSource::seeded(1),
            metrics.clone(),
            Duration::from_secs(10),
        );

        let sample = updater.tick();

        assert_eq!(updater.cycles(), 1);
        assert_eq!(metrics.health_score(), sample.health_score);
        assert_eq!(
            metrics.active_scans(ScanKind::Vulnerability),
            f64::from(sample.vulnerability_scans)
        );
        assert_eq!(
            metrics.active_scans(ScanKind::Compliance),
            f64::from(sample.compliance_scans)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn run_stops_when_signalled() {
        let metrics = ShieldMetrics::new().unwrap();
        let updater = Updater::new(
            RandomSource::seeded(2),
            metrics,
            Duration::from_secs(10),
        );
        let (tx, rx) = watch::channel(false);

        let handle = tokio::spawn(updater.run(rx));
        tokio::time::sleep(Duration::from_secs(25)).await;
        tx.send(true).unwrap();

        let updater = handle.await.unwrap();
        assert_eq!(updater.cycles(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn run_stops_when_sender_dropped() {
        let metrics = ShieldMetrics::new().unwrap();
        let updater = Updater::new(RandomSource::seeded(3), metrics, Duration::from_secs(10));
        let (tx, rx) = watch::channel(false);

        let handle = tokio::spawn(updater.run(rx));
        tokio::time::sleep(Duration::from_secs(5)).await;
        drop(tx);

        assert_eq!(handle.await.unwrap().cycles(), 1);
    }

    #[tokio::test]
    async fn run_does_nothing_if_already_stopped() {
        let metrics = ShieldMetrics::new().unwrap();
        let updater = Updater::new(RandomSource::seeded(4), metrics, Duration::from_secs(10));
        let (_tx, rx) = watch::channel(true);

        assert_eq!(updater.run(rx).await.cycles(), 0);
    }
}
