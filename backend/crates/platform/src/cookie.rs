//! Session Cookie Carrier
//!
//! Moves the session token between client and server:
//! - [`attach`] sets an `HttpOnly` cookie with an absolute expiry
//! - [`clear`] overwrites it with an empty, already-expired cookie
//! - [`extract`] reads it back, falling back to `Authorization: Bearer`
//!
//! Clearing the cookie is a client-side logout only. The token itself stays
//! valid until its own expiry.

use std::time::Duration;

use axum::http::header::InvalidHeaderValue;
use axum::http::{HeaderMap, HeaderValue, header};
use chrono::{DateTime, TimeDelta, Utc};

const BEARER_PREFIX: &str = "Bearer ";

/// SameSite policy for cookies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SameSite {
    Strict,
    #[default]
    Lax,
    None,
}

impl SameSite {
    pub fn as_str(&self) -> &'static str {
        match self {
            SameSite::Strict => "Strict",
            SameSite::Lax => "Lax",
            SameSite::None => "None",
        }
    }
}

/// Cookie configuration
#[derive(Debug, Clone)]
pub struct CookieConfig {
    pub name: String,
    pub secure: bool,
    pub same_site: SameSite,
    pub path: String,
}

impl Default for CookieConfig {
    fn default() -> Self {
        Self {
            name: "access-token".to_string(),
            secure: false,
            same_site: SameSite::Lax,
            path: "/".to_string(),
        }
    }
}

impl CookieConfig {
    /// `Set-Cookie` value carrying `value` until `expires_at`
    pub fn build_set_cookie(&self, value: &str, max_age_secs: i64, expires_at: DateTime<Utc>) -> String {
        let mut cookie = format!("{}={}; HttpOnly", self.name, value);

        if self.secure {
            cookie.push_str("; Secure");
        }
        cookie.push_str(&format!("; SameSite={}", self.same_site.as_str()));
        cookie.push_str(&format!("; Path={}", self.path));
        cookie.push_str(&format!("; Max-Age={}", max_age_secs));
        cookie.push_str(&format!("; Expires={}", http_date(expires_at)));

        cookie
    }

    /// `Set-Cookie` value that makes the client drop the cookie
    pub fn build_delete_cookie(&self, now: DateTime<Utc>) -> String {
        self.build_set_cookie("", 0, now - TimeDelta::hours(1))
    }
}

/// IMF-fixdate, e.g. `Sun, 06 Nov 1994 08:49:37 GMT`
fn http_date(at: DateTime<Utc>) -> String {
    at.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

/// Set the session cookie on an outgoing response.
pub fn attach(
    headers: &mut HeaderMap,
    config: &CookieConfig,
    token: &str,
    ttl: Duration,
) -> Result<(), InvalidHeaderValue> {
    attach_at(headers, config, token, ttl, Utc::now())
}

/// [`attach`] with an explicit clock.
pub fn attach_at(
    headers: &mut HeaderMap,
    config: &CookieConfig,
    token: &str,
    ttl: Duration,
    now: DateTime<Utc>,
) -> Result<(), InvalidHeaderValue> {
    let max_age = i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX);
    let expires_at = TimeDelta::try_seconds(max_age)
        .and_then(|delta| now.checked_add_signed(delta))
        .unwrap_or(DateTime::<Utc>::MAX_UTC);

    let value = HeaderValue::from_str(&config.build_set_cookie(token, max_age, expires_at))?;
    headers.append(header::SET_COOKIE, value);
    Ok(())
}

/// Expire the session cookie on an outgoing response.
pub fn clear(headers: &mut HeaderMap, config: &CookieConfig) -> Result<(), InvalidHeaderValue> {
    let value = HeaderValue::from_str(&config.build_delete_cookie(Utc::now()))?;
    headers.append(header::SET_COOKIE, value);
    Ok(())
}

/// Read the session token from an incoming request.
///
/// The cookie wins over the `Authorization` header. Empty values count as
/// absent.
pub fn extract(headers: &HeaderMap, config: &CookieConfig) -> Option<String> {
    extract_cookie(headers, &config.name).or_else(|| extract_bearer(headers))
}

/// Extract a cookie value from headers
pub fn extract_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .find_map(|cookie| {
            let (key, value) = cookie.trim().split_once('=')?;
            (key == name && !value.is_empty()).then(|| value.to_string())
        })
}

fn extract_bearer(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix(BEARER_PREFIX)?.trim();
    (!token.is_empty()).then(|| token.to_string())
}
