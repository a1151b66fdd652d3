//! Server configuration.
//!
//! Values are resolved in layers: built-in defaults, then an optional TOML
//! file named by `CASELOAD_CONFIG`, then individual environment variables.
//! Callers (the CLI) may override fields afterwards.

use std::path::{Path, PathBuf};

use caseload_server_models::ReportDefaults;
use serde::Deserialize;

/// Environment variable naming an optional TOML config file.
pub const CONFIG_ENV: &str = "CASELOAD_CONFIG";

/// Errors that can occur while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("Failed to read config file {}: {source}", path.display())]
    Io {
        /// Path of the config file.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },

    /// The config file is not valid TOML for [`ServerConfig`].
    #[error("Invalid config file: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Runtime configuration for the dashboard server.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    /// CSV file holding the case dataset.
    pub dataset_path: PathBuf,
    /// Address to bind the HTTP listener to.
    pub bind_addr: String,
    /// Port to listen on.
    pub port: u16,
    /// District used when a request does not name one.
    pub default_district: String,
    /// Year used when a request's year is absent or invalid.
    pub default_year: i32,
    /// Directory served under `/static`, if it exists.
    pub static_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            dataset_path: PathBuf::from("data/processos.csv"),
            bind_addr: "127.0.0.1".to_string(),
            port: 8080,
            default_district: "GOIANIRA".to_string(),
            default_year: 2020,
            static_dir: PathBuf::from("static"),
        }
    }
}

impl ServerConfig {
    /// Resolves configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `CASELOAD_CONFIG` names a file that cannot
    /// be read or parsed.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match std::env::var(CONFIG_ENV) {
            Ok(path) if !path.is_empty() => Self::from_file(Path::new(&path))?,
            _ => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Reads a TOML config file. Missing keys keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        log::info!("Reading config from {}", path.display());
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&contents)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Toml`] if the string is not a valid config.
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// Overrides fields from environment-style variables.
    ///
    /// Numeric values that fail to parse are ignored with a warning.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(path) = lookup("CASELOAD_DATASET") {
            self.dataset_path = PathBuf::from(path);
        }
        if let Some(addr) = lookup("BIND_ADDR") {
            self.bind_addr = addr;
        }
        if let Some(port) = lookup("PORT") {
            match port.parse() {
                Ok(port) => self.port = port,
                Err(e) => log::warn!("Ignoring invalid PORT '{port}': {e}"),
            }
        }
        if let Some(district) = lookup("CASELOAD_DEFAULT_DISTRICT") {
            self.default_district = district;
        }
        if let Some(year) = lookup("CASELOAD_DEFAULT_YEAR") {
            match year.parse() {
                Ok(year) => self.default_year = year,
                Err(e) => log::warn!("Ignoring invalid CASELOAD_DEFAULT_YEAR '{year}': {e}"),
            }
        }
        if let Some(dir) = lookup("CASELOAD_STATIC_DIR") {
            self.static_dir = PathBuf::from(dir);
        }
    }

    /// Request defaults derived from this configuration.
    #[must_use]
    pub fn report_defaults(&self) -> ReportDefaults {
        ReportDefaults {
            district: self.default_district.clone(),
            year: self.default_year,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: BTreeMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_match_dashboard() {
        let config = ServerConfig::default();
        assert_eq!(config.default_district, "GOIANIRA");
        assert_eq!(config.default_year, 2020);
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = ServerConfig::from_toml(
            r#"
            dataset_path = "/srv/dados_je_geral.csv"
            port = 9000
            "#,
        )
        .unwrap();
        assert_eq!(config.dataset_path, PathBuf::from("/srv/dados_je_geral.csv"));
        assert_eq!(config.port, 9000);
        assert_eq!(config.bind_addr, "127.0.0.1");
        assert_eq!(config.default_year, 2020);
    }

    #[test]
    fn unknown_toml_keys_are_rejected() {
        let err = ServerConfig::from_toml("dataset = \"x.csv\"").unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
    }

    #[test]
    fn env_overrides_fields() {
        let mut config = ServerConfig::default();
        config.apply_env(env(&[
            ("CASELOAD_DATASET", "other.csv"),
            ("BIND_ADDR", "0.0.0.0"),
            ("PORT", "3000"),
            ("CASELOAD_DEFAULT_DISTRICT", "ANAPOLIS"),
            ("CASELOAD_DEFAULT_YEAR", "2019"),
            ("CASELOAD_STATIC_DIR", "public"),
        ]));
        assert_eq!(config.dataset_path, PathBuf::from("other.csv"));
        assert_eq!(config.bind_addr, "0.0.0.0");
        assert_eq!(config.port, 3000);
        assert_eq!(
            config.report_defaults(),
            ReportDefaults {
                district: "ANAPOLIS".to_string(),
                year: 2019,
            }
        );
        assert_eq!(config.static_dir, PathBuf::from("public"));
    }

    #[test]
    fn invalid_numeric_env_is_ignored() {
        let mut config = ServerConfig::default();
        config.apply_env(env(&[("PORT", "http"), ("CASELOAD_DEFAULT_YEAR", "abc")]));
        assert_eq!(config.port, 8080);
        assert_eq!(config.default_year, 2020);
    }

    #[test]
    fn missing_config_file_is_io_error() {
        let err = ServerConfig::from_file(Path::new("no/such/caseload.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(
            err.to_string()
                .starts_with("Failed to read config file no/such/caseload.toml: ")
        );
    }
}
