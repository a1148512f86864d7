//! Connection settings for a search engine.

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{HastaError, Result};

/// Default engine endpoint.
pub const DEFAULT_URL: &str = "https://localhost:9200";

/// Default user for basic authentication.
pub const DEFAULT_USERNAME: &str = "elastic";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// How to reach and authenticate against the engine.
///
/// Missing keys in a configuration file take their default values:
///
/// ```
/// use hasta::backend::BackendConfig;
///
/// let config: BackendConfig =
///     serde_json::from_str(r#"{ "password": "changeme", "verify_certs": false }"#).unwrap();
/// assert_eq!(config.url, "https://localhost:9200");
/// assert_eq!(config.username, "elastic");
/// assert!(!config.verify_certs);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Base URL of the engine.
    pub url: String,
    /// Basic auth user.
    pub username: String,
    /// Basic auth password; no authentication when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// Verify the server's TLS certificate.
    pub verify_certs: bool,
    /// Per-request timeout.
    pub timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        BackendConfig {
            url: DEFAULT_URL.to_string(),
            username: DEFAULT_USERNAME.to_string(),
            password: None,
            verify_certs: true,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl BackendConfig {
    /// Load a configuration from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            HastaError::config(format!("cannot read {}: {e}", path.display()))
        })?;
        let config: BackendConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the settings are usable.
    pub fn validate(&self) -> Result<()> {
        if !(self.url.starts_with("http://") || self.url.starts_with("https://")) {
            return Err(HastaError::config(format!(
                "url must start with http:// or https://, got '{}'",
                self.url
            )));
        }
        if self.timeout_secs == 0 {
            return Err(HastaError::config("timeout_secs must be positive"));
        }
        Ok(())
    }

    /// The base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        self.url.trim_end_matches('/')
    }

    /// The request timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn with_url<S: Into<String>>(mut self, url: S) -> Self {
        self.url = url.into();
        self
    }

    pub fn with_username<S: Into<String>>(mut self, username: S) -> Self {
        self.username = username.into();
        self
    }

    pub fn with_password<S: Into<String>>(mut self, password: S) -> Self {
        self.password = Some(password.into());
        self
    }

    pub fn with_verify_certs(mut self, verify: bool) -> Self {
        self.verify_certs = verify;
        self
    }

    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}
