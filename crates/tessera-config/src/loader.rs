//! Configuration loader with layered sources.

use crate::{format_validation_errors, AppConfig, ConfigValidator};
use config::{Config, ConfigError, Environment, File};
use std::path::Path;
use std::sync::Arc;
use tessera_core::TesseraError;
use tokio::sync::RwLock;
use tracing::{debug, info};

/// Environment variable selecting the environment-specific config file.
pub const ENVIRONMENT_VAR: &str = "TESSERA_ENVIRONMENT";

/// Configuration loader with runtime refresh support.
#[derive(Clone)]
pub struct ConfigLoader {
    config: Arc<RwLock<AppConfig>>,
    config_dir: String,
}

impl ConfigLoader {
    /// Creates a new configuration loader.
    ///
    /// Configuration is loaded from multiple sources in order:
    /// 1. `config/default.toml` - Default values
    /// 2. `config/{environment}.toml` - Environment-specific overrides
    /// 3. `config/local.toml` - Local overrides
    /// 4. Environment variables with `TESSERA__` prefix
    pub fn new(config_dir: impl Into<String>) -> Result<Self, TesseraError> {
        let config_dir = config_dir.into();
        let config = Self::load_config(&config_dir)?;

        Ok(Self {
            config: Arc::new(RwLock::new(config)),
            config_dir,
        })
    }

    /// Loads configuration from the default location (`./config`).
    pub fn from_default_location() -> Result<Self, TesseraError> {
        Self::new("./config")
    }

    /// Returns the current configuration.
    pub async fn get(&self) -> AppConfig {
        self.config.read().await.clone()
    }

    /// Reloads the configuration from disk.
    ///
    /// The current configuration is kept if the new one fails to load.
    pub async fn reload(&self) -> Result<(), TesseraError> {
        let new_config = Self::load_config(&self.config_dir)?;
        let mut config = self.config.write().await;
        *config = new_config;
        info!("Configuration reloaded successfully");
        Ok(())
    }

    /// Loads configuration from the specified directory.
    fn load_config(config_dir: &str) -> Result<AppConfig, TesseraError> {
        if let Err(e) = dotenvy::dotenv() {
            debug!("No .env file found or error loading it: {}", e);
        }

        let environment =
            std::env::var(ENVIRONMENT_VAR).unwrap_or_else(|_| "development".to_string());

        info!("Loading configuration for environment: {}", environment);

        let mut builder = Config::builder();

        for name in ["default", environment.as_str(), "local"] {
            let path = format!("{}/{}.toml", config_dir, name);
            if Path::new(&path).exists() {
                debug!("Loading config from: {}", path);
                builder = builder.add_source(File::with_name(&path).required(false));
            }
        }

        builder = builder.add_source(
            Environment::with_prefix("TESSERA")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build().map_err(config_error_to_tessera_error)?;

        let mut app_config: AppConfig = config
            .try_deserialize()
            .map_err(config_error_to_tessera_error)?;
        app_config.app.environment = environment;

        ConfigValidator::validate(&app_config)
            .map_err(|errors| TesseraError::Configuration(format_validation_errors(&errors)))?;

        Ok(app_config)
    }

    /// Gets a specific configuration value by key path.
    pub async fn get_value<T: serde::de::DeserializeOwned>(&self, key: &str) -> Option<T> {
        let config = self.config.read().await;
        let json = serde_json::to_value(&*config).ok()?;

        let mut current = &json;
        for part in key.split('.') {
            current = current.get(part)?;
        }

        serde_json::from_value(current.clone()).ok()
    }
}

fn config_error_to_tessera_error(err: ConfigError) -> TesseraError {
    TesseraError::Configuration(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_default(dir: &TempDir, contents: &str) {
        fs::write(dir.path().join("default.toml"), contents).unwrap();
    }

    fn loader_for(dir: &TempDir) -> Result<ConfigLoader, TesseraError> {
        ConfigLoader::new(dir.path().to_string_lossy().to_string())
    }

    #[tokio::test]
    async fn test_load_from_directory() {
        let dir = TempDir::new().unwrap();
        write_default(
            &dir,
            r#"
            [server]
            port = 9999

            [service]
            simulated_latency_ms = 250
            "#,
        );

        let loader = loader_for(&dir).unwrap();
        let config = loader.get().await;
        assert_eq!(config.server.port, 9999);
        assert_eq!(config.service.simulated_latency_ms, 250);
        assert_eq!(config.cache.user_ttl_secs, 1800);
    }

    #[tokio::test]
    async fn test_empty_directory_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let loader = loader_for(&dir).unwrap();
        let config = loader.get().await;
        assert_eq!(config.server.port, 8080);
    }

    #[tokio::test]
    async fn test_local_overrides_default() {
        let dir = TempDir::new().unwrap();
        write_default(&dir, "[server]\nport = 7000\n");
        fs::write(dir.path().join("local.toml"), "[server]\nport = 7001\n").unwrap();

        let loader = loader_for(&dir).unwrap();
        assert_eq!(loader.get().await.server.port, 7001);
    }

    #[tokio::test]
    async fn test_invalid_config_is_rejected() {
        let dir = TempDir::new().unwrap();
        write_default(&dir, "[observability]\nlog_level = \"shout\"\n");

        match loader_for(&dir) {
            Err(TesseraError::Configuration(message)) => {
                assert!(message.contains("Invalid log level"));
            }
            Err(other) => panic!("Expected Configuration error, got {:?}", other),
            Ok(_) => panic!("Expected Configuration error"),
        }
    }

    #[tokio::test]
    async fn test_reload_picks_up_changes() {
        let dir = TempDir::new().unwrap();
        write_default(&dir, "[server]\nport = 7100\n");
        let loader = loader_for(&dir).unwrap();

        write_default(&dir, "[server]\nport = 7200\n");
        loader.reload().await.unwrap();

        assert_eq!(loader.get().await.server.port, 7200);
    }

    #[tokio::test]
    async fn test_get_value_by_path() {
        let dir = TempDir::new().unwrap();
        write_default(&dir, "[messaging]\nchannel = \"audit\"\n");
        let loader = loader_for(&dir).unwrap();

        let channel: Option<String> = loader.get_value("messaging.channel").await;
        assert_eq!(channel.as_deref(), Some("audit"));

        let missing: Option<String> = loader.get_value("messaging.nope").await;
        assert!(missing.is_none());
    }
}
