//! Application configuration storage
//!
//! Settings live in `config.json` inside the data directory. Environment
//! variables override the file after loading.

use std::path::{Path, PathBuf};

use component_generation::GenerationConfig;
use preview_sandbox::SandboxConfig;
use serde::{Deserialize, Serialize};
use tokio::fs;

use crate::constants::{env, hosts, paths, ports};

/// HTTP listener settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: hosts::LOCAL.to_string(),
            port: ports::SERVER,
        }
    }
}

impl ServerConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Full application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    /// Generation provider settings
    pub generation: GenerationConfig,
    /// Preview sandbox limits
    pub sandbox: SandboxConfig,
}

impl AppConfig {
    /// Load configuration from disk
    pub async fn load(data_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = data_dir.join(paths::CONFIG_FILE);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&config_path).await.map_err(ConfigError::Io)?;

        serde_json::from_str(&contents).map_err(ConfigError::Parse)
    }

    /// Save configuration to disk
    pub async fn save(&self, data_dir: &Path) -> Result<(), ConfigError> {
        // Ensure directory exists
        fs::create_dir_all(data_dir).await.map_err(ConfigError::Io)?;

        let config_path = data_dir.join(paths::CONFIG_FILE);
        let contents = serde_json::to_string_pretty(self).map_err(ConfigError::Serialize)?;

        fs::write(&config_path, contents).await.map_err(ConfigError::Io)?;

        log::info!("Configuration saved to {:?}", config_path);
        Ok(())
    }

    /// Apply environment overrides.
    ///
    /// # Arguments
    /// * `lookup` - Variable lookup, normally `std::env::var(..).ok()`
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(key) = lookup(env::API_KEY).filter(|k| !k.trim().is_empty()) {
            self.generation.api_key = Some(key);
        }
        if let Some(host) = lookup(env::HOST) {
            self.server.host = host;
        }
        if let Some(port) = lookup(env::PORT) {
            match port.parse() {
                Ok(port) => self.server.port = port,
                Err(_) => log::warn!("Ignoring invalid {}={:?}", env::PORT, port),
            }
        }
    }
}

/// Directory holding `config.json`.
///
/// `BUILDER_CONFIG_DIR` wins; otherwise the platform config directory, or
/// the working directory when there is none.
pub fn data_dir(lookup: impl Fn(&str) -> Option<String>) -> PathBuf {
    if let Some(dir) = lookup(env::CONFIG_DIR) {
        return PathBuf::from(dir);
    }
    match dirs::config_dir() {
        Some(dir) => dir.join(paths::APP_DIR),
        None => PathBuf::from("."),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(serde_json::Error),
    #[error("Failed to serialize config: {0}")]
    Serialize(serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[tokio::test]
    async fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load(dir.path()).await.unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.server.address(), "127.0.0.1:3000");
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("nested");

        let mut config = AppConfig::default();
        config.server.port = 4010;
        config.generation.model = "command-r-plus".into();
        config.sandbox.timeout_ms = 750;
        config.save(&nested).await.unwrap();

        let loaded = AppConfig::load(&nested).await.unwrap();
        assert_eq!(loaded, config);
    }

    #[tokio::test]
    async fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(paths::CONFIG_FILE),
            r#"{"server": {"port": 9000}, "sandbox": {"max_render_passes": 5}}"#,
        )
        .unwrap();

        let config = AppConfig::load(dir.path()).await.unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.sandbox.max_render_passes, 5);
        assert_eq!(config.generation.model, "command-r");
    }

    #[tokio::test]
    async fn test_malformed_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(paths::CONFIG_FILE), "{ nope").unwrap();
        assert!(matches!(
            AppConfig::load(dir.path()).await,
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_env_overrides() {
        let mut config = AppConfig::default();
        config.apply_env(vars(&[
            (env::API_KEY, "secret"),
            (env::HOST, "0.0.0.0"),
            (env::PORT, "8081"),
        ]));
        assert_eq!(config.generation.api_key.as_deref(), Some("secret"));
        assert_eq!(config.server.address(), "0.0.0.0:8081");
    }

    #[test]
    fn test_invalid_port_ignored() {
        let mut config = AppConfig::default();
        config.apply_env(vars(&[(env::PORT, "eighty"), (env::API_KEY, "  ")]));
        assert_eq!(config.server.port, ports::SERVER);
        assert_eq!(config.generation.api_key, None);
    }

    #[test]
    fn test_data_dir_override() {
        let dir = data_dir(vars(&[(env::CONFIG_DIR, "/tmp/builder")]));
        assert_eq!(dir, PathBuf::from("/tmp/builder"));
        assert!(data_dir(vars(&[])).ends_with(paths::APP_DIR) || data_dir(vars(&[])) == PathBuf::from("."));
    }
}
