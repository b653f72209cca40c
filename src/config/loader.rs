//! Configuration loading and environment variable interpolation

use crate::error::{Error, Result};
use regex::Regex;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use super::Config;

pub const CONFIG_FILENAME: &str = "vaporzone.toml";

/// Load configuration from vaporzone.toml, falling back to defaults when
/// no file exists anywhere above the current directory
pub fn load_config() -> Result<Config> {
    match find_config_file()? {
        Some(path) => load_config_from_path(&path),
        None => {
            tracing::debug!("No {} found, using defaults", CONFIG_FILENAME);
            Ok(Config::default())
        }
    }
}

/// Load configuration from a specific path
pub fn load_config_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .map_err(|_| Error::ConfigNotFound(path.display().to_string()))?;
    parse_config(&content)
}

/// Parse configuration text after interpolating environment variables
pub fn parse_config(content: &str) -> Result<Config> {
    let content = interpolate_env_vars(content);
    let config: Config = toml::from_str(&content)?;
    if config.api.base_url.trim().is_empty() {
        return Err(Error::Config("api.base_url must not be empty".to_string()));
    }
    Ok(config)
}

/// Find the configuration file, searching upward from current directory
fn find_config_file() -> Result<Option<PathBuf>> {
    let mut current = env::current_dir().map_err(|e| Error::Config(e.to_string()))?;

    loop {
        let config_path = current.join(CONFIG_FILENAME);
        if config_path.exists() {
            return Ok(Some(config_path));
        }

        if !current.pop() {
            return Ok(None);
        }
    }
}

/// Interpolate environment variables in the format ${VAR_NAME} or ${VAR_NAME:-default}
fn interpolate_env_vars(content: &str) -> String {
    // Compile-time constant pattern; a failure here is a bug, not a runtime condition
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)(?::-([^}]*))?\}")
        .expect("Invalid regex pattern - this is a bug in the codebase");

    re.replace_all(content, |caps: &regex::Captures| {
        let var_name = &caps[1];
        let default = caps.get(2).map(|m| m.as_str()).unwrap_or("");

        // Same as the shell: an empty variable takes the default too
        env::var(var_name)
            .ok()
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| default.to_string())
    })
    .to_string()
}

/// Generate a default configuration file content
pub fn default_config_content() -> &'static str {
    r#"# VaporZone back-office client configuration

[api]
# Base URL of the shop backend; every endpoint is relative to it
base_url = "${VAPORZONE_API_URL:-http://127.0.0.1:8000/api}"
timeout_secs = 10
# bypass_proxy = true  # ignore HTTP(S)_PROXY for a backend on the local network

[session]
# Token and username are kept here between runs
store_path = "${HOME:-.}/.vaporzone/session.json"

[routes]
login = "/login"
home = "/home"
"#
}
