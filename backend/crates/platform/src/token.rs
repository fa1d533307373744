//! Session Token Codec
//!
//! Compact HS256 JWS tokens built with `jsonwebtoken`.
//!
//! The codec is stateless. The signing secret is passed on every call and
//! never stored here, so tests can use any secret they like.
//!
//! Verification order:
//! 1. structure (three base64url segments, JSON header and claims) → [`InvalidTokenError::Malformed`]
//! 2. header `alg` is exactly `HS256` → [`InvalidTokenError::AlgorithmMismatch`]
//! 3. constant-time MAC comparison → [`InvalidTokenError::BadSignature`]
//! 4. `exp > now`, no skew allowance → [`InvalidTokenError::Expired`]

use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::crypto::from_base64url;

/// The only algorithm this codec issues or accepts
pub const ALGORITHM: Algorithm = Algorithm::HS256;

/// Claims carried inside a session token (registered JWT claim names)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject: the account's numeric ID
    pub sub: i64,
    /// Issuer: the service name
    pub iss: String,
    /// Issued at, Unix seconds
    pub iat: i64,
    /// Expires at, Unix seconds (exclusive)
    pub exp: i64,
}

impl SessionClaims {
    pub fn subject_id(&self) -> i64 {
        self.sub
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }
}

/// Why a token was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvalidTokenError {
    #[error("token is malformed")]
    Malformed,

    #[error("token signature does not match")]
    BadSignature,

    #[error("token algorithm is not allowed")]
    AlgorithmMismatch,

    #[error("token has expired")]
    Expired,
}

impl From<jsonwebtoken::errors::Error> for InvalidTokenError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            ErrorKind::InvalidSignature => InvalidTokenError::BadSignature,
            ErrorKind::InvalidAlgorithm | ErrorKind::InvalidAlgorithmName => {
                InvalidTokenError::AlgorithmMismatch
            }
            ErrorKind::ExpiredSignature => InvalidTokenError::Expired,
            _ => InvalidTokenError::Malformed,
        }
    }
}

/// Why a token could not be issued
#[derive(Debug, Error)]
pub enum TokenIssueError {
    #[error("token lifetime must be positive")]
    NonPositiveTtl,

    #[error("token lifetime is out of range")]
    TtlOutOfRange,

    #[error("token encoding failed: {0}")]
    Encoding(#[from] jsonwebtoken::errors::Error),
}

/// Expiry for a token issued at `now` with lifetime `ttl`.
///
/// Fails when the lifetime rounds to zero seconds or the expiry does not fit
/// in a timestamp.
fn expiry_for(ttl: Duration, now: DateTime<Utc>) -> Result<DateTime<Utc>, TokenIssueError> {
    let delta = TimeDelta::from_std(ttl).map_err(|_| TokenIssueError::TtlOutOfRange)?;
    let exp = now
        .checked_add_signed(delta)
        .ok_or(TokenIssueError::TtlOutOfRange)?;

    // Sub-second TTLs would round to iat == exp.
    if exp.timestamp() <= now.timestamp() {
        return Err(TokenIssueError::NonPositiveTtl);
    }
    Ok(exp)
}

/// Issue a token for `subject_id` valid for `ttl` from now.
pub fn issue(
    subject_id: i64,
    ttl: Duration,
    issuer: &str,
    secret: &[u8],
) -> Result<String, TokenIssueError> {
    issue_at(subject_id, ttl, issuer, secret, Utc::now())
}

/// [`issue`] with an explicit clock.
pub fn issue_at(
    subject_id: i64,
    ttl: Duration,
    issuer: &str,
    secret: &[u8],
    now: DateTime<Utc>,
) -> Result<String, TokenIssueError> {
    let exp = expiry_for(ttl, now)?;

    let claims = SessionClaims {
        sub: subject_id,
        iss: issuer.to_string(),
        iat: now.timestamp(),
        exp: exp.timestamp(),
    };

    Ok(encode(
        &Header::new(ALGORITHM),
        &claims,
        &EncodingKey::from_secret(secret),
    )?)
}

/// Verify a token and return its claims.
pub fn verify(token: &str, secret: &[u8]) -> Result<SessionClaims, InvalidTokenError> {
    verify_at(token, secret, Utc::now())
}

/// [`verify`] with an explicit clock. A token is expired when `now >= exp`.
pub fn verify_at(
    token: &str,
    secret: &[u8],
    now: DateTime<Utc>,
) -> Result<SessionClaims, InvalidTokenError> {
    // `jsonwebtoken` cannot parse algorithms it does not know (e.g. "none"),
    // so substitution is caught on the raw header first.
    if declared_algorithm(token).is_some_and(|alg| alg != "HS256") {
        return Err(InvalidTokenError::AlgorithmMismatch);
    }

    let mut validation = Validation::new(ALGORITHM);
    validation.validate_exp = false;
    validation.leeway = 0;

    let claims = decode::<SessionClaims>(token, &DecodingKey::from_secret(secret), &validation)?
        .claims;

    if now.timestamp() >= claims.exp {
        return Err(InvalidTokenError::Expired);
    }

    Ok(claims)
}

#[derive(Deserialize)]
struct RawHeader {
    alg: String,
}

fn declared_algorithm(token: &str) -> Option<String> {
    let (header, _) = token.split_once('.')?;
    let bytes = from_base64url(header).ok()?;
    serde_json::from_slice::<RawHeader>(&bytes)
        .ok()
        .map(|header| header.alg)
}
