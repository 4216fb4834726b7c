//! Service configuration
//!
//! Merge order: built-in defaults, then the first YAML file found (or an
//! explicit --config path), then `RATESRV_*` environment variables.

use crate::error::{RatesrvError, Result};
use figment::{
    providers::{Env, Format, Serialized, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Service configuration
    #[serde(default)]
    pub service: ServiceConfig,

    /// API configuration
    #[serde(default)]
    pub api: ApiConfig,

    /// Initial rate set configuration
    #[serde(default)]
    pub rates: RatesConfig,

    /// Log configuration
    #[serde(default)]
    pub log: LogConfig,
}

/// Service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Service name
    #[serde(default = "default_service_name")]
    pub name: String,

    /// Service port
    #[serde(default = "default_service_port")]
    pub port: u16,
}

/// API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Bind host
    #[serde(default = "default_api_host")]
    pub host: String,
}

/// Initial rate set configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RatesConfig {
    /// JSON file with the initial rate set, `{"rates": [...]}`
    #[serde(default = "default_rates_file")]
    pub file: PathBuf,
}

/// Log configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// Log level filter (overridden by RUST_LOG when set)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Config {
    /// Load configuration, optionally from an explicit YAML path
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(Config::default()));

        let yaml_path = match path {
            Some(explicit) => Some(explicit.to_path_buf()),
            None => [
                "config/ratesrv/ratesrv.yaml",
                "config/ratesrv.yaml",
                "ratesrv.yaml",
            ]
            .iter()
            .map(PathBuf::from)
            .find(|candidate| candidate.exists()),
        };

        if let Some(yaml) = yaml_path {
            figment = figment.merge(Yaml::file(yaml));
        }

        figment
            .merge(Env::prefixed("RATESRV_").split("_"))
            .extract()
            .map_err(|e| RatesrvError::Config(format!("Failed to load config: {}", e)))
    }

    /// Socket address string to bind the API server to
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.api.host, self.service.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            service: ServiceConfig::default(),
            api: ApiConfig::default(),
            rates: RatesConfig::default(),
            log: LogConfig::default(),
        }
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        ServiceConfig {
            name: default_service_name(),
            port: default_service_port(),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            host: default_api_host(),
        }
    }
}

impl Default for RatesConfig {
    fn default() -> Self {
        RatesConfig {
            file: default_rates_file(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig {
            level: default_log_level(),
        }
    }
}

// Default value functions
fn default_service_name() -> String {
    "ratesrv".to_string()
}

fn default_service_port() -> u16 {
    6005
}

fn default_api_host() -> String {
    "0.0.0.0".to_string()
}

fn default_rates_file() -> PathBuf {
    PathBuf::from("config/rates.json")
}

fn default_log_level() -> String {
    "info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.service.name, "ratesrv");
        assert_eq!(config.listen_addr(), "0.0.0.0:6005");
        assert_eq!(config.rates.file, PathBuf::from("config/rates.json"));
        assert_eq!(config.log.level, "info");
    }
}
