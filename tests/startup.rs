use std::sync::Arc;
use std::time::Duration;

use shield_exporter::config::ConfigV1;
use shield_exporter::error::ExporterError;
use shield_exporter::metrics::ShieldMetrics;
use shield_exporter::startup::{run, spawn_updater};

#[tokio::test]
async fn run_fails_with_bind_error_when_port_is_taken() {
    let occupied = std::net::TcpListener::bind("127.0.0.1:0").expect("should bind a free port");
    let address = occupied
        .local_addr()
        .expect("listener has a local address")
        .to_string();

    let config = ConfigV1 {
        bind_address: address.clone(),
        ..ConfigV1::default()
    };

    match run(Arc::new(config)).await {
        Err(ExporterError::Bind { address: failed, .. }) => assert_eq!(failed, address),
        Err(other) => panic!("expected a bind error, got {other:?}"),
        Ok(()) => panic!("run should not succeed on an occupied port"),
    }
}

#[tokio::test]
async fn run_fails_with_bind_error_on_unparseable_address() {
    let config = ConfigV1 {
        bind_address: "not-an-address".to_string(),
        ..ConfigV1::default()
    };

    let result = run(Arc::new(config)).await;

    assert!(matches!(result, Err(ExporterError::Bind { .. })));
}

#[tokio::test(start_paused = true)]
async fn stopping_the_updater_reports_completed_cycles() {
    let metrics = ShieldMetrics::new().expect("metrics should register");
    let handle = spawn_updater(&ConfigV1::default(), metrics.clone());

    // Ticks at t = 0 and t = 10 under the default 10 s interval.
    tokio::time::sleep(Duration::from_secs(15)).await;
    let cycles = handle.stop().await.expect("updater should not panic");

    assert_eq!(cycles, 2);
    let health = metrics.health_score();
    assert!(health > 93.0 && health <= 100.0, "health {health}");
}
