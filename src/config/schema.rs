//! Configuration schema definitions

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub session: SessionConfig,

    #[serde(default)]
    pub routes: RoutesConfig,
}

/// Backend REST API connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL every endpoint path is appended to, e.g. `http://host:8000/api`
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Ignore HTTP(S)_PROXY from the environment
    #[serde(default)]
    pub bypass_proxy: bool,
}

fn default_base_url() -> String {
    "http://127.0.0.1:8000/api".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            bypass_proxy: false,
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Where credentials survive between runs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "default_store_path")]
    pub store_path: PathBuf,
}

/// `$HOME/.vaporzone/session.json`, the same place `init` writes into the file
fn default_store_path() -> PathBuf {
    let home = std::env::var_os("HOME")
        .filter(|h| !h.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    home.join(".vaporzone").join("session.json")
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            store_path: default_store_path(),
        }
    }
}

/// Special navigation paths
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutesConfig {
    #[serde(default = "default_login_path")]
    pub login: String,

    /// Public landing page, also where unmatched paths end up
    #[serde(default = "default_home_path")]
    pub home: String,
}

fn default_login_path() -> String {
    "/login".to_string()
}

fn default_home_path() -> String {
    "/home".to_string()
}

impl Default for RoutesConfig {
    fn default() -> Self {
        Self {
            login: default_login_path(),
            home: default_home_path(),
        }
    }
}
