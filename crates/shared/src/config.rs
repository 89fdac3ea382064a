//! Application configuration management.

use serde::Deserialize;

use crate::error::AppResult;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Registry configuration.
    #[serde(default)]
    pub registry: RegistryConfig,
    /// Logging configuration.
    #[serde(default)]
    pub log: LogConfig,
}

/// Registry configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct RegistryConfig {
    /// Path to the JSON seed file loaded at startup.
    #[serde(default = "default_seed_path")]
    pub seed_path: String,
    /// Pretty-print JSON output.
    #[serde(default = "default_pretty")]
    pub pretty: bool,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            seed_path: default_seed_path(),
            pretty: default_pretty(),
        }
    }
}

fn default_seed_path() -> String {
    "data/seed.json".to_string()
}

fn default_pretty() -> bool {
    true
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// Fallback filter directive used when `RUST_LOG` is not set.
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
        }
    }
}

fn default_log_filter() -> String {
    "registrar=info".to_string()
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if configuration cannot be loaded.
    pub fn load() -> AppResult<Self> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("REGISTRAR").separator("__"))
            .build()?;

        Ok(config.try_deserialize()?)
    }
}
