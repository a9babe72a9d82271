use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::auth::Credentials;
use crate::client::{DEFAULT_ACCESS_CONTROL_URL, DEFAULT_API_URL, DEFAULT_WEB_URL, ScaClient, ScaClientBuilder};
use crate::error::ScaError;

/// Service endpoints, each defaulting to the vendor's public cloud.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    /// REST API base URL.
    pub api: String,
    /// Access-control (identity) base URL.
    pub access_control: String,
    /// Web console base URL.
    pub web: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            api: DEFAULT_API_URL.to_string(),
            access_control: DEFAULT_ACCESS_CONTROL_URL.to_string(),
            web: DEFAULT_WEB_URL.to_string(),
        }
    }
}

/// Connection settings loaded from `.sca.toml`.
///
/// Every field is optional. The password is normally left out of the file
/// and supplied through the environment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Tenant name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant: Option<String>,

    /// User name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    /// Password. Prefer the `SCA_PASSWORD` environment variable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,

    /// Per-request timeout in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,

    /// Service endpoints.
    #[serde(default)]
    pub endpoints: Endpoints,
}

impl Config {
    /// Creates a default configuration with no overrides.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a `.sca.toml` file.
    ///
    /// Returns the default configuration if the file does not exist.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::new());
        }

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: PathBuf::from("<inline>"),
            source,
        })
    }

    /// Serialises this configuration to a pretty-printed TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|source| ConfigError::Serialize { source })
    }

    /// Writes this configuration to `path`.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = self.to_toml()?;
        std::fs::write(path, content).map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Returns the configured timeout, if any.
    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Starts a client builder from these settings and `credentials`.
    #[must_use]
    pub fn client_builder(&self, credentials: Credentials) -> ScaClientBuilder {
        let builder = ScaClient::builder(credentials)
            .api_url(&self.endpoints.api)
            .access_control_url(&self.endpoints.access_control)
            .web_url(&self.endpoints.web);

        match self.timeout() {
            Some(timeout) => builder.timeout(timeout),
            None => builder,
        }
    }

    /// Builds credentials from the file's tenant, username and password.
    pub fn credentials(&self) -> Result<Credentials, ScaError> {
        Credentials::new(
            self.tenant.clone().unwrap_or_default(),
            self.username.clone().unwrap_or_default(),
            self.password.clone().unwrap_or_default(),
        )
    }
}

/// Errors that can occur when reading, parsing, serialising, or writing
/// a `.sca.toml` configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The config file could not be read from disk.
    #[error("failed to read config '{path}': {source}")]
    Read {
        /// Path to the config file that could not be read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The config file contained invalid TOML or unexpected values.
    #[error("failed to parse config '{path}': {source}")]
    Parse {
        /// Path to the config file that could not be parsed.
        path: PathBuf,
        /// The underlying TOML deserialization error.
        #[source]
        source: toml::de::Error,
    },

    /// The in-memory configuration could not be serialised to TOML.
    #[error("failed to serialise config: {source}")]
    Serialize {
        /// The underlying TOML serialization error.
        #[source]
        source: toml::ser::Error,
    },

    /// The config file could not be written to disk.
    #[error("failed to write config '{path}': {source}")]
    Write {
        /// Path to the config file that could not be written.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl ConfigError {
    /// Returns the file path associated with this error, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Read { path, .. } | Self::Parse { path, .. } | Self::Write { path, .. } => Some(path),
            Self::Serialize { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn default_points_at_vendor_cloud() {
        let config = Config::default();
        assert!(config.tenant.is_none());
        assert_eq!(config.endpoints.api, DEFAULT_API_URL);
        assert_eq!(config.endpoints.access_control, DEFAULT_ACCESS_CONTROL_URL);
        assert!(config.timeout().is_none());
    }

    #[test]
    fn from_toml_parses_connection_settings() {
        let config = Config::from_toml(
            r#"
tenant = "acme"
username = "alice"
timeout_secs = 10

[endpoints]
api = "https://eu.api-sca.checkmarx.net"
"#,
        )
        .unwrap();

        assert_eq!(config.tenant.as_deref(), Some("acme"));
        assert_eq!(config.timeout(), Some(Duration::from_secs(10)));
        assert_eq!(config.endpoints.api, "https://eu.api-sca.checkmarx.net");
        assert_eq!(config.endpoints.access_control, DEFAULT_ACCESS_CONTROL_URL);
    }

    #[test]
    fn from_toml_rejects_wrong_types() {
        let err = Config::from_toml("timeout_secs = \"soon\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.path().is_some());
    }

    #[test]
    fn load_missing_file_returns_default() {
        let dir = TempDir::new().unwrap();
        let config = Config::load(&dir.path().join(".sca.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn save_then_load_preserves_settings() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".sca.toml");

        let config = Config {
            tenant: Some("acme".into()),
            username: Some("alice".into()),
            ..Config::default()
        };
        config.save(&path).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(!written.contains("password"));
        assert_eq!(Config::load(&path).unwrap(), config);
    }

    #[test]
    fn credentials_require_all_fields() {
        let config = Config {
            tenant: Some("acme".into()),
            username: Some("alice".into()),
            ..Config::default()
        };

        assert!(matches!(
            config.credentials(),
            Err(ScaError::InvalidArgument { name: "password", .. })
        ));
    }
}
