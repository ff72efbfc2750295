//! Configuration loading from disk and the environment.

use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::config::schema::{LogFormat, ProxyConfig};

pub const ENV_API_KEY: &str = "PANDA_KEY";
pub const ENV_BASE_URL: &str = "PANDA_BASE_URL";
pub const ENV_TIMEOUT_MS: &str = "PANDA_TIMEOUT_MS";
pub const ENV_BIND_ADDRESS: &str = "BIND_ADDRESS";
pub const ENV_PUBLIC_DIR: &str = "PUBLIC_DIR";
pub const ENV_LOG_FORMAT: &str = "LOG_FORMAT";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value '{value}' for {var}: {reason}")]
    Env {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Parse a TOML document into a config. Missing sections take defaults.
pub fn parse_config(content: &str) -> Result<ProxyConfig, ConfigError> {
    Ok(toml::from_str(content)?)
}

/// Overlay environment variables onto `config`.
///
/// `lookup` abstracts the environment so callers (and tests) decide where
/// values come from. Empty values are ignored.
pub fn apply_env_overrides<F>(config: &mut ProxyConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());

    if let Some(key) = get(ENV_API_KEY) {
        config.upstream.api_key = key.trim().to_string();
    }
    if let Some(base) = get(ENV_BASE_URL) {
        config.upstream.base_url = base.trim().to_string();
    }
    if let Some(raw) = get(ENV_TIMEOUT_MS) {
        config.upstream.request_timeout_ms =
            raw.trim().parse().map_err(|e: std::num::ParseIntError| ConfigError::Env {
                var: ENV_TIMEOUT_MS,
                value: raw.clone(),
                reason: e.to_string(),
            })?;
    }
    if let Some(addr) = get(ENV_BIND_ADDRESS) {
        config.listener.bind_address = addr.trim().to_string();
    }
    if let Some(dir) = get(ENV_PUBLIC_DIR) {
        config.static_files.dir = dir.trim().into();
    }
    if let Some(raw) = get(ENV_LOG_FORMAT) {
        config.observability.log_format =
            raw.parse::<LogFormat>().map_err(|reason| ConfigError::Env {
                var: ENV_LOG_FORMAT,
                value: raw.clone(),
                reason,
            })?;
    }

    Ok(())
}

/// Read the optional TOML file and overlay the process environment.
///
/// The result is not validated yet, so callers can apply further
/// overrides (CLI flags) first and then run `validate_config`.
pub fn read_config(path: Option<&Path>) -> Result<ProxyConfig, ConfigError> {
    let mut config = match path {
        Some(path) => parse_config(&fs::read_to_string(path)?)?,
        None => ProxyConfig::default(),
    };
    apply_env_overrides(&mut config, |var| std::env::var(var).ok())?;
    Ok(config)
}
