use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request};
use axum::Router;
use shield_exporter::config::ConfigV1;
use shield_exporter::metrics::ShieldMetrics;
use shield_exporter::routes::create_router;
use shield_exporter::state::AppState;

pub fn build_app() -> (Router, ShieldMetrics) {
    let metrics = ShieldMetrics::new().expect("metrics should register");
    let state = AppState {
        config: Arc::new(ConfigV1::default()),
        metrics: metrics.clone(),
    };

    (create_router(state), metrics)
}

pub fn get(path: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(path)
        .body(Body::empty())
        .expect("failed to build request")
}

pub async fn body_text(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body should be readable");
    String::from_utf8(bytes.to_vec()).expect("body should be UTF-8")
}

/// Sample lines of an exposition body, keyed by series (`name{labels}`).
pub fn samples(text: &str) -> Vec<(String, f64)> {
    text.lines()
        .filter(|line| !line.starts_with('#') && !line.trim().is_empty())
        .map(|line| {
            let (series, value) = line.rsplit_once(' ').expect("sample line has a value");
            (
                series.to_string(),
                value.parse().expect("sample value is numeric"),
            )
        })
        .collect()
}
