use std::sync::Arc;

use shield_exporter::config::load_config;
use shield_exporter::startup;
use shield_exporter::utils::logger::init_logging;
use tracing::error;

#[tokio::main]
async fn main() {
    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading configuration: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = init_logging(&config.logging) {
        eprintln!("Error initialising logging: {}", e);
        std::process::exit(1);
    }

    if let Err(e) = startup::run(Arc::new(config)).await {
        error!(error = %e, "Shield exporter terminated");
        std::process::exit(1);
    }
}
