//! Error type shared by startup, configuration and the metrics registry.

use thiserror::Error;

/// Shared result type.
pub type Result<T> = std::result::Result<T, ExporterError>;

/// Everything that can stop the exporter from starting or serving.
///
/// The update loop itself has no failure paths, so none of these variants
/// are produced once the server is running, except `Encode` on a
/// `/metrics` request.
#[derive(Debug, Error)]
pub enum ExporterError {
    #[error("failed to load configuration: {0}")]
    Config(#[from] Box<figment::Error>),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("failed to initialise logging: {0}")]
    Logging(String),
    #[error("failed to register metric: {0}")]
    Registration(#[source] prometheus::Error),
    #[error("failed to encode metrics: {0}")]
    Encode(String),
    #[error("could not bind to {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },
    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),
}

impl From<figment::Error> for ExporterError {
    fn from(e: figment::Error) -> Self {
        ExporterError::Config(Box::new(e))
    }
}
