//! services/dashboard/src/config.rs
//!
//! Defines the dashboard's configuration structure and loading logic.
//!
//! All configuration is loaded from environment variables at startup. The `.env`
//! file is used for local development.

use std::net::SocketAddr;
use std::time::Duration;
use tracing::Level;
use url::Url;

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub bind_address: SocketAddr,
    /// The single origin every backend adapter talks to.
    pub backend_url: Url,
    pub log_level: Level,
    /// Adds `Secure` to the session cookies.
    pub cookie_secure: bool,
    pub backend_timeout: Option<Duration>,
    pub cors_origin: String,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// It will look for a `.env` file in the current directory for development,
    /// but this is skipped in test environments to ensure tests are hermetic.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Only load from .env in non-test mode to avoid contamination.
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // --- Server Settings ---
        let bind_address_str = lookup("BIND_ADDRESS").unwrap_or_else(|| "0.0.0.0:3000".to_string());
        let bind_address = bind_address_str.parse::<SocketAddr>().map_err(|e| {
            ConfigError::InvalidValue("BIND_ADDRESS".to_string(), e.to_string())
        })?;

        let log_level_str = lookup("RUST_LOG").unwrap_or_else(|| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        // --- Backend Settings ---
        let backend_url = parse_backend_url(
            &lookup("BACKEND_URL").unwrap_or_else(|| "http://localhost:5000/api".to_string()),
        )?;

        let backend_timeout = match lookup("BACKEND_TIMEOUT_SECS") {
            None => None,
            Some(raw) => {
                let secs = raw.trim().parse::<u64>().map_err(|_| {
                    ConfigError::InvalidValue(
                        "BACKEND_TIMEOUT_SECS".to_string(),
                        format!("'{}' is not a whole number of seconds", raw),
                    )
                })?;
                (secs > 0).then(|| Duration::from_secs(secs))
            }
        };

        // --- Browser-facing Settings ---
        let cookie_secure = match lookup("COOKIE_SECURE") {
            None => false,
            Some(raw) => parse_bool(&raw).ok_or_else(|| {
                ConfigError::InvalidValue(
                    "COOKIE_SECURE".to_string(),
                    format!("'{}' is not true or false", raw),
                )
            })?,
        };

        let cors_origin =
            lookup("CORS_ORIGIN").unwrap_or_else(|| "http://localhost:3000".to_string());

        Ok(Self {
            bind_address,
            backend_url,
            log_level,
            cookie_secure,
            backend_timeout,
            cors_origin,
        })
    }
}

// Trailing slash is required so relative endpoint paths join under the base path.
fn parse_backend_url(raw: &str) -> Result<Url, ConfigError> {
    let mut normalized = raw.trim().to_string();
    if !normalized.ends_with('/') {
        normalized.push('/');
    }
    let url = Url::parse(&normalized)
        .map_err(|e| ConfigError::InvalidValue("BACKEND_URL".to_string(), e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidValue(
            "BACKEND_URL".to_string(),
            format!("unsupported scheme '{}'", url.scheme()),
        ));
    }
    Ok(url)
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Some(true),
        "0" | "false" | "no" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.bind_address.port(), 3000);
        assert_eq!(config.backend_url.as_str(), "http://localhost:5000/api/");
        assert_eq!(config.log_level, Level::INFO);
        assert!(!config.cookie_secure);
        assert!(config.backend_timeout.is_none());
    }

    #[test]
    fn explicit_values_are_parsed() {
        let config = config_from(&[
            ("BACKEND_URL", "https://api.example.com/v1/"),
            ("COOKIE_SECURE", "true"),
            ("BACKEND_TIMEOUT_SECS", "15"),
            ("RUST_LOG", "debug"),
        ])
        .unwrap();
        assert_eq!(config.backend_url.as_str(), "https://api.example.com/v1/");
        assert!(config.cookie_secure);
        assert_eq!(config.backend_timeout, Some(Duration::from_secs(15)));
        assert_eq!(config.log_level, Level::DEBUG);
    }

    #[test]
    fn invalid_values_name_the_variable() {
        let err = config_from(&[("BACKEND_URL", "ftp://files.example.com")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(ref name, _) if name == "BACKEND_URL"));

        let err = config_from(&[("COOKIE_SECURE", "maybe")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(ref name, _) if name == "COOKIE_SECURE"));
    }
}
