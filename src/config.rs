//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Browser localStorage gives each origin roughly this much
pub const DEFAULT_QUOTA_BYTES: usize = 5 * 1024 * 1024;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Record store configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    /// Maximum total size of all records; 0 disables the limit
    #[serde(default = "default_quota_bytes")]
    pub quota_bytes: usize,
}

fn default_data_dir() -> String {
    dirs::data_local_dir()
        .map(|p| p.join("woofwell").to_string_lossy().to_string())
        .unwrap_or_else(|| "./woofwell_data".to_string())
}

fn default_quota_bytes() -> usize {
    DEFAULT_QUOTA_BYTES
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            quota_bytes: default_quota_bytes(),
        }
    }
}

impl StorageConfig {
    /// Quota to enforce, `None` when disabled
    pub fn quota(&self) -> Option<usize> {
        (self.quota_bytes > 0).then_some(self.quota_bytes)
    }

    /// Data directory with a leading `~/` expanded to the home directory
    pub fn data_path(&self) -> PathBuf {
        match self.data_dir.strip_prefix("~/") {
            Some(rest) => dirs::home_dir()
                .map(|home| home.join(rest))
                .unwrap_or_else(|| PathBuf::from(&self.data_dir)),
            None => PathBuf::from(&self.data_dir),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::parse(&content).map_err(|e| match e {
            ConfigError::Parse { error, .. } => ConfigError::Parse {
                path: path.to_path_buf(),
                error,
            },
            other => other,
        })
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: PathBuf::new(),
            error: e.to_string(),
        })
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("woofwell").join("config.toml")),
            Some(PathBuf::from("./woofwell.toml")),
        ];

        for path_opt in config_paths.iter().flatten() {
            if path_opt.exists() {
                match Self::load_with_env(path_opt) {
                    Ok(config) => {
                        tracing::debug!("Loaded config from {:?}", path_opt);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path_opt, e);
                    }
                }
            }
        }

        tracing::debug!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    /// Apply overrides from any variable source
    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        // Storage overrides
        if let Some(data_dir) = var("WOOFWELL_DATA_DIR") {
            self.storage.data_dir = data_dir;
        }
        if let Some(quota) = var("WOOFWELL_QUOTA_BYTES") {
            match quota.parse() {
                Ok(q) => self.storage.quota_bytes = q,
                Err(_) => tracing::warn!("Ignoring invalid WOOFWELL_QUOTA_BYTES: {}", quota),
            }
        }

        // Logging overrides
        if let Some(level) = var("WOOFWELL_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = var("WOOFWELL_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# WoofWell Configuration
#
# Environment variables override these settings:
# - WOOFWELL_DATA_DIR
# - WOOFWELL_QUOTA_BYTES
# - WOOFWELL_LOG_LEVEL
# - WOOFWELL_LOG_FORMAT

[storage]
# Directory holding one JSON file per record
data_dir = "~/.local/share/woofwell"

# Maximum total size of all records in bytes (0 = unlimited)
quota_bytes = 5242880

[logging]
# Log level: trace, debug, info, warn, error
level = "warn"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.storage.quota_bytes, DEFAULT_QUOTA_BYTES);
        assert_eq!(config.storage.quota(), Some(DEFAULT_QUOTA_BYTES));
        assert_eq!(config.logging.level, "warn");
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_generated_config_parses() {
        let config = Config::parse(&generate_default_config()).unwrap();
        assert_eq!(config.storage.data_dir, "~/.local/share/woofwell");
        assert_eq!(config.storage.quota_bytes, 5242880);
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config = Config::parse("[storage]\nquota_bytes = 0\n").unwrap();
        assert_eq!(config.storage.quota(), None);
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_data_path_expands_home() {
        let storage = StorageConfig {
            data_dir: "/var/lib/woofwell".to_string(),
            quota_bytes: 0,
        };
        assert_eq!(storage.data_path(), PathBuf::from("/var/lib/woofwell"));

        if let Some(home) = dirs::home_dir() {
            let storage = StorageConfig {
                data_dir: "~/ww".to_string(),
                quota_bytes: 0,
            };
            assert_eq!(storage.data_path(), home.join("ww"));
        }
    }

    #[test]
    fn test_invalid_config() {
        let err = Config::parse("[storage]\nquota_bytes = \"lots\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("woofwell.toml");
        std::fs::write(&path, "[storage]\ndata_dir = \"/tmp/ww\"\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.storage.data_dir, "/tmp/ww");

        let err = Config::load(&dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [
            ("WOOFWELL_DATA_DIR", "/data/ww"),
            ("WOOFWELL_QUOTA_BYTES", "1024"),
            ("WOOFWELL_LOG_FORMAT", "json"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_overrides(|name| vars.get(name).map(|v| v.to_string()));

        assert_eq!(config.storage.data_dir, "/data/ww");
        assert_eq!(config.storage.quota_bytes, 1024);
        assert_eq!(config.logging.format, "json");
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_invalid_quota_override_ignored() {
        let mut config = Config::default();
        config.apply_overrides(|name| (name == "WOOFWELL_QUOTA_BYTES").then(|| "big".to_string()));
        assert_eq!(config.storage.quota_bytes, DEFAULT_QUOTA_BYTES);
    }
}
