//! Library exports for shield-exporter, shared between the binary and tests.

pub mod config;
pub mod error;
pub mod metrics;
pub mod routes;
pub mod simulation;
pub mod startup;
pub mod state;
pub mod updater;
pub mod utils;
