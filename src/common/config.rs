//! Configuration file handling
//!
//! Every field falls back to the fixed smoke-test target, so running with
//! no file and no flags exercises `http://localhost:3000` record 2.

use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

use super::paths::config_path;
use super::{Error, Result};

/// Main configuration structure
#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
pub struct Config {
    /// Service and record the scenario runs against
    #[serde(default)]
    pub target: Target,

    /// HTTP client settings
    #[serde(default)]
    pub http: HttpConfig,
}

/// Where the scenario points and who it logs in as
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Target {
    /// Base URL of the service, without a trailing slash
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Login email sent to the credentials callback
    #[serde(default = "default_email")]
    pub email: String,

    /// Login password sent to the credentials callback
    #[serde(default = "default_password")]
    pub password: String,

    /// Numeric id of the record that gets patched
    #[serde(default = "default_record_id")]
    pub record_id: u64,

    /// Fail the run when the credentials callback is not 2xx
    #[serde(default)]
    pub require_login: bool,
}

impl Default for Target {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            email: default_email(),
            password: default_password(),
            record_id: default_record_id(),
            require_login: false,
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:3000".to_string()
}
fn default_email() -> String {
    "admin@example.com".to_string()
}
fn default_password() -> String {
    "password123".to_string()
}
fn default_record_id() -> u64 {
    2
}

/// HTTP client settings
#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
pub struct HttpConfig {
    /// Per-request timeout; unset keeps the client library default
    pub timeout_secs: Option<u64>,
}

impl HttpConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

/// Values given on the command line, applied on top of the file
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub base_url: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub record_id: Option<u64>,
    pub timeout_secs: Option<u64>,
    pub require_login: bool,
}

impl Config {
    /// Load configuration
    ///
    /// An explicit `path` must exist. Without one, the platform config file
    /// is used if present, otherwise defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::from_file(path);
        }
        if let Some(path) = config_path() {
            if path.exists() {
                return Self::from_file(&path);
            }
        }
        Ok(Self::default())
    }

    fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::FileRead {
            path: path.display().to_string(),
            error: e.to_string(),
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::ConfigParse(e.to_string()))
    }

    /// Apply command-line overrides; flags win over the file
    pub fn apply(&mut self, overrides: Overrides) {
        if let Some(base_url) = overrides.base_url {
            self.target.base_url = base_url;
        }
        if let Some(email) = overrides.email {
            self.target.email = email;
        }
        if let Some(password) = overrides.password {
            self.target.password = password;
        }
        if let Some(record_id) = overrides.record_id {
            self.target.record_id = record_id;
        }
        if let Some(timeout_secs) = overrides.timeout_secs {
            self.http.timeout_secs = Some(timeout_secs);
        }
        if overrides.require_login {
            self.target.require_login = true;
        }
    }
}
