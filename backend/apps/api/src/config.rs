//! Server Configuration
//!
//! Everything the binary reads from the environment, parsed once at startup.
//! Parsing takes a lookup function so it can be tested without touching the
//! process environment.

use std::env;
use std::time::Duration;

use auth::{AuthConfig, AuthConfigError, SigningSecret};
use thiserror::Error;

pub const DEFAULT_FRONTEND_ORIGINS: &str = "http://localhost:3000";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{key} is invalid: {reason}")]
    Invalid { key: &'static str, reason: String },

    #[error(transparent)]
    Auth(#[from] AuthConfigError),
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server_port: u16,
    /// `None` selects the in-memory stores
    pub database_url: Option<String>,
    pub frontend_origins: Vec<String>,
    pub auth: AuthConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let secret = lookup("JWT_SECRET").ok_or(ConfigError::Missing("JWT_SECRET"))?;
        let mut auth = AuthConfig::new(SigningSecret::new(secret.into_bytes())?);

        if let Some(ttl) = get("TOKEN_TTL_SECS") {
            let secs = ttl.trim().parse::<u64>().map_err(|e| ConfigError::Invalid {
                key: "TOKEN_TTL_SECS",
                reason: e.to_string(),
            })?;
            auth = auth.with_token_ttl(Duration::from_secs(secs))?;
        }
        if let Some(issuer) = get("TOKEN_ISSUER") {
            auth = auth.with_token_issuer(issuer.trim());
        }
        if let Some(secure) = get("COOKIE_SECURE") {
            auth = auth.with_cookie_secure(parse_bool("COOKIE_SECURE", &secure)?);
        }

        let server_port = get("SERVER_PORT")
            .ok_or(ConfigError::Missing("SERVER_PORT"))?
            .trim()
            .parse::<u16>()
            .map_err(|e| ConfigError::Invalid {
                key: "SERVER_PORT",
                reason: e.to_string(),
            })?;

        let frontend_origins = get("FRONTEND_ORIGINS")
            .unwrap_or_else(|| DEFAULT_FRONTEND_ORIGINS.to_string())
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(String::from)
            .collect();

        Ok(Self {
            server_port,
            database_url: get("DATABASE_URL"),
            frontend_origins,
            auth,
        })
    }
}

fn parse_bool(key: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(ConfigError::Invalid {
            key,
            reason: format!("expected a boolean, got {:?}", other),
        }),
    }
}
