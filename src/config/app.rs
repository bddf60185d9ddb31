//! Application configuration loading.
//!
//! Settings come from an optional TOML file (default `storefront.toml`, overridable
//! through `STOREFRONT_CONFIG`) and are then overridden by environment variables.
//! Every field has a default, so a missing file is not an error.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Default location of the configuration file, relative to the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "storefront.toml";

/// Passphrase the admin console accepts when none is configured.
pub const DEFAULT_PASSPHRASE: &str = "L1_TRIANGLE";

/// Configuration structure representing the entire storefront.toml file
#[derive(Debug, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct AppConfig {
    /// HTTP listener settings
    pub server: ServerConfig,
    /// Document store settings
    pub store: StoreConfig,
    /// Admin console settings
    pub console: ConsoleConfig,
}

/// `[server]` section
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind, `0.0.0.0` to accept connections from the local network
    pub host: String,
    /// TCP port, 3000 by default
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

impl ServerConfig {
    /// `host:port` string suitable for `TcpListener::bind`.
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// `[store]` section
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct StoreConfig {
    /// Path of the JSON document holding products, orders and logs
    pub path: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("database.json"),
        }
    }
}

/// `[console]` section
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ConsoleConfig {
    /// Base URL of the API, including the `/api` prefix
    pub api_url: String,
    /// Shared passphrase unlocking the console
    pub passphrase: String,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:3000/api".to_string(),
            passphrase: DEFAULT_PASSPHRASE.to_string(),
        }
    }
}

impl AppConfig {
    /// Applies environment overrides using `lookup` to resolve variable names.
    ///
    /// Recognised variables: `PORT`, `STOREFRONT_HOST`, `STOREFRONT_DB`,
    /// `STOREFRONT_API_URL`, `ADMIN_PASSPHRASE`.
    ///
    /// # Errors
    /// Returns `Error::Config` if `PORT` is not a valid port number.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(port) = lookup("PORT") {
            self.server.port = port.trim().parse().map_err(|e| Error::Config {
                message: format!("Invalid PORT value '{port}': {e}"),
            })?;
        }
        if let Some(host) = lookup("STOREFRONT_HOST") {
            self.server.host = host;
        }
        if let Some(path) = lookup("STOREFRONT_DB") {
            self.store.path = PathBuf::from(path);
        }
        if let Some(url) = lookup("STOREFRONT_API_URL") {
            self.console.api_url = url;
        }
        if let Some(passphrase) = lookup("ADMIN_PASSPHRASE") {
            self.console.passphrase = passphrase;
        }
        Ok(())
    }
}

/// Loads configuration from a TOML file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let path_ref = path.as_ref();
    debug!("Attempting to load configuration from: {:?}", path_ref);
    let contents = std::fs::read_to_string(path_ref).map_err(|e| Error::Config {
        message: format!("Failed to read config file {path_ref:?}: {e}"),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse TOML from config file {path_ref:?}: {e}"),
    })
}

/// Loads the full application configuration: file (if present) then environment.
///
/// # Errors
/// Returns `Error::Config` if the file exists but is invalid, or an override is malformed.
pub fn load_app_configuration() -> Result<AppConfig> {
    let path = std::env::var("STOREFRONT_CONFIG")
        .map_or_else(|_| PathBuf::from(DEFAULT_CONFIG_FILE), PathBuf::from);

    let mut config = if path.exists() {
        info!("Loading configuration from {:?}", path);
        load_config(&path)?
    } else {
        info!("No configuration file at {:?}, using defaults", path);
        AppConfig::default()
    };

    config.apply_overrides(|key| std::env::var(key).ok())?;
    debug!("Effective configuration: {:?}", config);
    Ok(config)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_parse_full_config() {
        let toml_str = r#"
            [server]
            host = "127.0.0.1"
            port = 8080

            [store]
            path = "data/shop.json"

            [console]
            api_url = "http://127.0.0.1:8080/api"
            passphrase = "open-sesame"
        "#;

        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.server.bind_address(), "127.0.0.1:8080");
        assert_eq!(config.store.path, PathBuf::from("data/shop.json"));
        assert_eq!(config.console.api_url, "http://127.0.0.1:8080/api");
        assert_eq!(config.console.passphrase, "open-sesame");
    }

    #[test]
    fn test_partial_config_falls_back_to_defaults() {
        let config: AppConfig = toml::from_str("[server]\nport = 4000\n").unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 4000);
        assert_eq!(config.store, StoreConfig::default());
        assert_eq!(config.console.passphrase, DEFAULT_PASSPHRASE);
    }

    #[test]
    fn test_env_overrides_win_over_file() {
        let env: HashMap<&str, &str> = [
            ("PORT", "5050"),
            ("STOREFRONT_DB", "/tmp/other.json"),
            ("ADMIN_PASSPHRASE", "secret"),
        ]
        .into_iter()
        .collect();

        let mut config = AppConfig::default();
        config
            .apply_overrides(|key| env.get(key).map(|v| (*v).to_string()))
            .unwrap();

        assert_eq!(config.server.port, 5050);
        assert_eq!(config.store.path, PathBuf::from("/tmp/other.json"));
        assert_eq!(config.console.passphrase, "secret");
        assert_eq!(config.console.api_url, ConsoleConfig::default().api_url);
    }

    #[test]
    fn test_invalid_port_is_config_error() {
        let mut config = AppConfig::default();
        let result = config.apply_overrides(|key| (key == "PORT").then(|| "http".to_string()));
        assert!(matches!(result, Err(Error::Config { .. })));
    }

    #[test]
    fn test_load_config_rejects_bad_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storefront.toml");
        std::fs::write(&path, "[server\nport = ").unwrap();
        assert!(matches!(load_config(&path), Err(Error::Config { .. })));
    }
}
