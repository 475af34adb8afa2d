use std::path::Path;
use std::time::Duration;

use figment::providers::{Format, Serialized, Yaml};
use figment::{Figment, Provider};
use serde::{Deserialize, Serialize};

use super::logging::LoggingConfig;
use crate::error::{ExporterError, Result};

/// Default path of the optional configuration file.
pub const CONFIG_PATH: &str = "./config.yaml";

/// A top-level enum for versioned configurations.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(tag = "version")]
pub enum Config {
    #[serde(rename = "1.0.0")]
    ConfigV1(ConfigV1),
}

impl Default for Config {
    fn default() -> Self {
        Config::ConfigV1(ConfigV1::default())
    }
}

/// Main config for v1.0.0.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ConfigV1 {
    pub bind_address: String,
    pub updater: UpdaterConfig,
    pub logging: LoggingConfig,
}

impl Default for ConfigV1 {
    fn default() -> Self {
        ConfigV1 {
            bind_address: "0.0.0.0:8081".to_string(),
            updater: UpdaterConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl ConfigV1 {
    /// Rejects values that would make the exporter misbehave at runtime.
    pub fn validate(&self) -> Result<()> {
        if self.updater.interval_secs == 0 {
            return Err(ExporterError::InvalidConfig(
                "updater.interval_secs must be greater than zero".to_string(),
            ));
        }
        if self.bind_address.trim().is_empty() {
            return Err(ExporterError::InvalidConfig(
                "bind_address must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Settings for the background metric updater.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct UpdaterConfig {
    /// Seconds to sleep between two update cycles.
    pub interval_secs: u64,
}

impl UpdaterConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }
}

impl Default for UpdaterConfig {
    fn default() -> Self {
        UpdaterConfig { interval_secs: 10 }
    }
}

/// Built-in defaults, overridden by whatever `overrides` provides.
pub fn layered(overrides: impl Provider) -> Figment {
    Figment::from(Serialized::defaults(Config::default())).merge(overrides)
}

/// Builds the figment used to resolve configuration: built-in defaults,
/// overridden by the YAML file at `path` when it exists.
pub fn config_figment(path: impl AsRef<Path>) -> Figment {
    layered(Yaml::file(path.as_ref()))
}

/// Extracts and validates a `ConfigV1` from `figment`.
pub fn resolve(figment: Figment) -> Result<ConfigV1> {
    let config = match figment.extract::<Config>()? {
        Config::ConfigV1(c) => c,
    };
    config.validate()?;
    Ok(config)
}

/// Load config from `path`, falling back to defaults for anything it omits.
pub fn load_config_from(path: impl AsRef<Path>) -> Result<ConfigV1> {
    resolve(config_figment(path))
}

/// Load config from a YAML file named "config.yaml" in the current directory.
pub fn load_config() -> Result<ConfigV1> {
    load_config_from(CONFIG_PATH)
}
