//! Application Configuration
//!
//! Configuration for the Auth application layer. Built once at startup and
//! shared read-only behind an `Arc`.

use std::fmt;
use std::time::Duration;

use thiserror::Error;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Re-export cookie settings from platform
pub use platform::cookie::{CookieConfig, SameSite};

/// Default token (and cookie) lifetime
pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(3600);

/// Longest accepted token lifetime (one year)
pub const MAX_TOKEN_TTL: Duration = Duration::from_secs(365 * 24 * 60 * 60);

/// Default `iss` claim
pub const DEFAULT_TOKEN_ISSUER: &str = "blog-api";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthConfigError {
    #[error("token signing secret must not be empty")]
    EmptySecret,

    #[error("token lifetime must be at least one second")]
    NonPositiveTtl,

    #[error("token lifetime must not exceed {} seconds", MAX_TOKEN_TTL.as_secs())]
    TtlOutOfRange,
}

/// HMAC key for session tokens. Erased on drop, redacted in `Debug`.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SigningSecret(Vec<u8>);

impl SigningSecret {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Result<Self, AuthConfigError> {
        let bytes = bytes.into();
        if bytes.is_empty() {
            return Err(AuthConfigError::EmptySecret);
        }
        Ok(Self(bytes))
    }

    /// 32 random bytes, for tests and throwaway local runs
    pub fn random() -> Self {
        Self(platform::crypto::random_bytes(32))
    }

    pub fn expose(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for SigningSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SigningSecret([REDACTED])")
    }
}

/// Auth application configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Shared secret for HS256 token signatures
    pub token_secret: SigningSecret,
    /// Token lifetime; also the cookie Max-Age
    pub token_ttl: Duration,
    /// `iss` claim written into every token
    pub token_issuer: String,
    /// Session cookie settings
    pub cookie: CookieConfig,
}

impl AuthConfig {
    pub fn new(token_secret: SigningSecret) -> Self {
        Self {
            token_secret,
            token_ttl: DEFAULT_TOKEN_TTL,
            token_issuer: DEFAULT_TOKEN_ISSUER.to_string(),
            cookie: CookieConfig::default(),
        }
    }

    /// Create config with a random signing secret (for development and tests)
    pub fn with_random_secret() -> Self {
        Self::new(SigningSecret::random())
    }

    /// Set the token lifetime: whole seconds, at most [`MAX_TOKEN_TTL`].
    pub fn with_token_ttl(mut self, ttl: Duration) -> Result<Self, AuthConfigError> {
        if ttl.as_secs() == 0 {
            return Err(AuthConfigError::NonPositiveTtl);
        }
        if ttl > MAX_TOKEN_TTL {
            return Err(AuthConfigError::TtlOutOfRange);
        }
        self.token_ttl = ttl;
        Ok(self)
    }

    pub fn with_token_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.token_issuer = issuer.into();
        self
    }

    pub fn with_cookie_secure(mut self, secure: bool) -> Self {
        self.cookie.secure = secure;
        self
    }
}
