//! Provider configuration for Tideform
//!
//! Settings come from a YAML file and are then overridden by environment
//! variables:
//!
//! ```yaml
//! token: dop_v1_...
//! api_endpoint: https://api.digitalocean.com   # omit for the public API
//! poll_interval_secs: 10
//! per_page: 200
//! timeouts:
//!   create_secs: 1800
//!   update_secs: 1800
//!   delete_secs: 1800
//! ```

pub mod error;

pub use error::*;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const CONFIG_PATH_ENV: &str = "TIDEFORM_CONFIG_PATH";
pub const TOKEN_ENV: &str = "TIDEFORM_TOKEN";
pub const FALLBACK_TOKEN_ENV: &str = "DIGITALOCEAN_TOKEN";
pub const API_ENDPOINT_ENV: &str = "TIDEFORM_API_ENDPOINT";

const MAX_PER_PAGE: u32 = 200;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    /// Vendor API base URL; the client's public endpoint when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_endpoint: Option<String>,
    pub poll_interval_secs: u64,
    pub per_page: u32,
    pub timeouts: TimeoutConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeoutConfig {
    pub create_secs: u64,
    pub update_secs: u64,
    pub delete_secs: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            token: None,
            api_endpoint: None,
            poll_interval_secs: 10,
            per_page: MAX_PER_PAGE,
            timeouts: TimeoutConfig::default(),
        }
    }
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            create_secs: 1800,
            update_secs: 1800,
            delete_secs: 1800,
        }
    }
}

impl ProviderConfig {
    /// Load the config file (if any) and apply environment overrides
    pub fn load() -> Result<Self> {
        let mut config = match find_config_file()? {
            Some(path) => Self::from_file(&path)?,
            None => {
                tracing::debug!("No config file found, using defaults");
                Self::default()
            }
        };
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        tracing::debug!("Loading config from {}", path.display());
        let content = std::fs::read_to_string(path)?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(&content).map_err(|source| ConfigError::Yaml {
            path: path.to_path_buf(),
            source,
        })
    }

    /// `TIDEFORM_TOKEN` wins over `DIGITALOCEAN_TOKEN`, and both over the file
    pub fn apply_env_overrides(&mut self) {
        if let Some(token) = env_value(TOKEN_ENV).or_else(|| env_value(FALLBACK_TOKEN_ENV)) {
            self.token = Some(token);
        }
        if let Some(endpoint) = env_value(API_ENDPOINT_ENV) {
            self.api_endpoint = Some(endpoint);
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.api_endpoint.as_deref().is_some_and(str::is_empty) {
            return Err(ConfigError::Invalid("api_endpoint must not be empty".to_string()));
        }
        if self.poll_interval_secs == 0 {
            return Err(ConfigError::Invalid(
                "poll_interval_secs must be at least 1".to_string(),
            ));
        }
        if !(1..=MAX_PER_PAGE).contains(&self.per_page) {
            return Err(ConfigError::Invalid(format!(
                "per_page must be between 1 and {}, got {}",
                MAX_PER_PAGE, self.per_page
            )));
        }
        Ok(())
    }

    /// The API token; only needed once a vendor client is built
    pub fn require_token(&self) -> Result<&str> {
        self.token
            .as_deref()
            .filter(|t| !t.is_empty())
            .ok_or(ConfigError::MissingToken)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }
}

impl TimeoutConfig {
    pub fn create(&self) -> Duration {
        Duration::from_secs(self.create_secs)
    }

    pub fn update(&self) -> Duration {
        Duration::from_secs(self.update_secs)
    }

    pub fn delete(&self) -> Duration {
        Duration::from_secs(self.delete_secs)
    }
}

/// Directory holding the default config file
pub fn get_config_dir() -> Result<PathBuf> {
    Ok(dirs::config_dir()
        .ok_or(ConfigError::ConfigDirNotFound)?
        .join("tideform"))
}

/// Locate the config file
///
/// 1. `TIDEFORM_CONFIG_PATH` (must exist when set)
/// 2. `<config dir>/tideform/config.yaml`
pub fn find_config_file() -> Result<Option<PathBuf>> {
    if let Some(config_path) = env_value(CONFIG_PATH_ENV) {
        let path = PathBuf::from(config_path);
        if path.exists() {
            return Ok(Some(path));
        }
        return Err(ConfigError::ConfigFileNotFound(path));
    }

    let Ok(config_dir) = get_config_dir() else {
        return Ok(None);
    };
    let path = config_dir.join("config.yaml");
    Ok(path.exists().then_some(path))
}

fn env_value(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::fs;

    /// Environment with only the config path set
    fn only_config_path(path: &Path) -> [(&'static str, Option<String>); 4] {
        [
            (CONFIG_PATH_ENV, Some(path.display().to_string())),
            (TOKEN_ENV, None),
            (FALLBACK_TOKEN_ENV, None),
            (API_ENDPOINT_ENV, None),
        ]
    }

    #[test]
    fn test_defaults() {
        let config = ProviderConfig::default();
        assert_eq!(config.api_endpoint, None);
        assert_eq!(config.poll_interval(), Duration::from_secs(10));
        assert_eq!(config.per_page, 200);
        assert_eq!(config.timeouts.create(), Duration::from_secs(1800));
        assert!(matches!(config.require_token(), Err(ConfigError::MissingToken)));
    }

    #[test]
    fn test_get_config_dir() {
        if let Ok(dir) = get_config_dir() {
            assert!(dir.ends_with("tideform"));
        }
    }

    #[test]
    fn test_from_file_partial() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("config.yaml");
        fs::write(&path, "token: from-file\ntimeouts:\n  create_secs: 60\n").unwrap();

        let config = ProviderConfig::from_file(&path).unwrap();
        assert_eq!(config.require_token().unwrap(), "from-file");
        assert_eq!(config.timeouts.create_secs, 60);
        assert_eq!(config.timeouts.update_secs, 1800);
        assert_eq!(config.api_endpoint, None);
    }

    #[test]
    fn test_from_file_invalid_yaml() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("config.yaml");
        fs::write(&path, "per_page: [not a number").unwrap();

        let err = ProviderConfig::from_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Yaml { .. }));
        assert!(err.to_string().contains("config.yaml"));
    }

    #[test]
    #[serial]
    fn test_load_with_env_overrides() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("custom.yaml");
        fs::write(&path, "token: from-file\napi_endpoint: https://file.example\n").unwrap();
        let path_str = path.to_str().unwrap();

        temp_env::with_vars(
            [
                (CONFIG_PATH_ENV, Some(path_str)),
                (TOKEN_ENV, None),
                (FALLBACK_TOKEN_ENV, Some("fallback")),
                (API_ENDPOINT_ENV, Some("http://127.0.0.1:9999")),
            ],
            || {
                let config = ProviderConfig::load().unwrap();
                assert_eq!(config.token.as_deref(), Some("fallback"));
                assert_eq!(config.api_endpoint.as_deref(), Some("http://127.0.0.1:9999"));
            },
        );

        temp_env::with_vars(
            [
                (CONFIG_PATH_ENV, Some(path_str)),
                (TOKEN_ENV, Some("primary")),
                (FALLBACK_TOKEN_ENV, Some("fallback")),
                (API_ENDPOINT_ENV, None),
            ],
            || {
                let config = ProviderConfig::load().unwrap();
                assert_eq!(config.token.as_deref(), Some("primary"));
                assert_eq!(config.api_endpoint.as_deref(), Some("https://file.example"));
            },
        );
    }

    #[test]
    #[serial]
    fn test_load_missing_explicit_path() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("absent.yaml");
        temp_env::with_vars(only_config_path(&path), || {
            let err = ProviderConfig::load().unwrap_err();
            assert!(matches!(err, ConfigError::ConfigFileNotFound(_)));
        });
    }

    #[test]
    #[serial]
    fn test_load_rejects_bad_values() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("config.yaml");
        fs::write(&path, "per_page: 500\n").unwrap();
        temp_env::with_vars(only_config_path(&path), || {
            let err = ProviderConfig::load().unwrap_err();
            assert_eq!(err.to_string(), "invalid config: per_page must be between 1 and 200, got 500");
        });
    }

    #[test]
    #[serial]
    fn test_load_rejects_empty_endpoint() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("config.yaml");
        fs::write(&path, "api_endpoint: \"\"\n").unwrap();
        temp_env::with_vars(only_config_path(&path), || {
            let err = ProviderConfig::load().unwrap_err();
            assert_eq!(err.to_string(), "invalid config: api_endpoint must not be empty");
        });
    }

    #[test]
    #[serial]
    fn test_empty_file_yields_defaults() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("config.yaml");
        fs::write(&path, "\n").unwrap();
        temp_env::with_vars(only_config_path(&path), || {
            assert_eq!(ProviderConfig::load().unwrap(), ProviderConfig::default());
        });
    }
}
