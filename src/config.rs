//! Application configuration
//!
//! Loaded from a TOML file (default `~/.config/media-catalog/config.toml`).
//! Every section is optional; a missing file yields [`AppConfig::default`].
//!
//! ```toml
//! [server]
//! host = "127.0.0.1"
//! port = 8000
//!
//! [database]
//! url = "sqlite://./catalog.db?mode=rwc"
//!
//! [logging]
//! level = "info"
//! format = "json"
//!
//! [pagination]
//! items_per_page = 10
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::infrastructure::database::DEFAULT_DATABASE_URL;

/// Environment variable pointing at the config file
pub const CONFIG_ENV: &str = "CATALOG_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("cannot parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Seconds to wait for in-flight requests on shutdown
    pub shutdown_timeout: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
            shutdown_timeout: 30,
        }
    }
}

impl ServerConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSection {
    pub url: String,
}

impl Default for DatabaseSection {
    fn default() -> Self {
        Self {
            url: DEFAULT_DATABASE_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing` filter directive, e.g. `info` or `media_catalog=debug`
    pub level: String,
    /// `text` or `json`
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "text".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PaginationConfig {
    pub items_per_page: u64,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self { items_per_page: 10 }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseSection,
    pub logging: LoggingConfig,
    pub pagination: PaginationConfig,
}

impl AppConfig {
    /// Load from `path`, then apply environment overrides.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let mut config = if path.exists() {
            let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            Self::from_toml(&raw).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?
        } else {
            Self::default()
        };

        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml(raw: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(raw)
    }

    /// `DATABASE_URL` and `ITEMS_PER_PAGE` take precedence over the file.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("DATABASE_URL").filter(|v| !v.trim().is_empty()) {
            self.database.url = url;
        }
        if let Some(raw) = lookup("ITEMS_PER_PAGE") {
            self.pagination.items_per_page = raw.trim().parse().map_err(|_| {
                ConfigError::Invalid(format!("ITEMS_PER_PAGE must be a positive integer, got {:?}", raw))
            })?;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pagination.items_per_page == 0 {
            return Err(ConfigError::Invalid(
                "pagination.items_per_page must be at least 1".into(),
            ));
        }
        if self.database.url.trim().is_empty() {
            return Err(ConfigError::Invalid("database.url is empty".into()));
        }
        match self.logging.format.to_lowercase().as_str() {
            "text" | "json" => Ok(()),
            other => Err(ConfigError::Invalid(format!(
                "logging.format must be text or json, got {:?}",
                other
            ))),
        }
    }
}

/// `~/.config/media-catalog/config.toml`, or `./config.toml` when no home
/// directory is known.
pub fn default_config_path() -> PathBuf {
    dirs_next::config_dir()
        .map(|dir| dir.join("media-catalog").join("config.toml"))
        .unwrap_or_else(|| PathBuf::from("config.toml"))
}

/// Explicit path, else `CATALOG_CONFIG`, else [`default_config_path`].
pub fn resolve_config_path(explicit: Option<PathBuf>) -> PathBuf {
    explicit
        .or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from))
        .unwrap_or_else(default_config_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.pagination.items_per_page, 10);
        assert_eq!(cfg.database.url, DEFAULT_DATABASE_URL);
        assert_eq!(cfg.server.address(), "127.0.0.1:8000");
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let cfg = AppConfig::from_toml(
            r#"
            [server]
            port = 9090

            [pagination]
            items_per_page = 25
            "#,
        )
        .unwrap();
        assert_eq!(cfg.server.port, 9090);
        assert_eq!(cfg.server.host, "127.0.0.1");
        assert_eq!(cfg.pagination.items_per_page, 25);
        assert_eq!(cfg.logging.level, "info");
    }

    #[test]
    fn environment_overrides_file_values() {
        let mut cfg = AppConfig::default();
        cfg.apply_overrides(env(&[
            ("DATABASE_URL", "sqlite::memory:"),
            ("ITEMS_PER_PAGE", " 3 "),
        ]))
        .unwrap();
        assert_eq!(cfg.database.url, "sqlite::memory:");
        assert_eq!(cfg.pagination.items_per_page, 3);
    }

    #[test]
    fn bad_page_size_is_rejected() {
        let mut cfg = AppConfig::default();
        let err = cfg
            .apply_overrides(env(&[("ITEMS_PER_PAGE", "ten")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        cfg.pagination.items_per_page = 0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn unknown_log_format_is_rejected() {
        let mut cfg = AppConfig::default();
        cfg.logging.format = "xml".into();
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn missing_file_yields_defaults() {
        let path = std::env::temp_dir().join("media-catalog-no-such-config.toml");
        let cfg = AppConfig::load(&path).unwrap();
        assert!(cfg.pagination.items_per_page >= 1);
    }

    #[test]
    fn explicit_path_wins() {
        let path = resolve_config_path(Some(PathBuf::from("/tmp/catalog.toml")));
        assert_eq!(path, PathBuf::from("/tmp/catalog.toml"));
        assert!(default_config_path().ends_with("config.toml"));
    }
}
