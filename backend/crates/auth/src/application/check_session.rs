//! Session Check
//!
//! Turns the token carried by a request into a [`Principal`]. Pure: reads
//! headers and the config, touches no store.

use axum::http::HeaderMap;
use chrono::{DateTime, Utc};
use kernel::id::UserId;
use platform::token::{self, InvalidTokenError};
use thiserror::Error;

use crate::application::config::AuthConfig;
use crate::domain::entity::principal::Principal;

/// Why a request was refused at the gate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Unauthorized {
    #[error("no session token presented")]
    MissingToken,

    #[error("invalid session token: {0}")]
    InvalidToken(InvalidTokenError),
}

impl From<InvalidTokenError> for Unauthorized {
    fn from(err: InvalidTokenError) -> Self {
        Unauthorized::InvalidToken(err)
    }
}

/// Resolve the principal for a request at the current time.
pub fn authorize(headers: &HeaderMap, config: &AuthConfig) -> Result<Principal, Unauthorized> {
    authorize_at(headers, config, Utc::now())
}

/// [`authorize`] with an explicit clock.
pub fn authorize_at(
    headers: &HeaderMap,
    config: &AuthConfig,
    now: DateTime<Utc>,
) -> Result<Principal, Unauthorized> {
    let token = platform::cookie::extract(headers, &config.cookie).ok_or(Unauthorized::MissingToken)?;
    let claims = token::verify_at(&token, config.token_secret.expose(), now)?;

    Ok(Principal::new(UserId::new(claims.subject_id())))
}
