//! Auth Middleware
//!
//! The gate in front of protected routes, and the [`Principal`] extractor
//! handlers use behind it.

use axum::body::Body;
use axum::extract::{FromRequestParts, State};
use axum::http::request::Parts;
use axum::http::{HeaderName, HeaderValue, Request};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use kernel::error::app_error::AppError;
use std::sync::Arc;

use crate::application::authorize;
use crate::application::config::AuthConfig;
use crate::domain::entity::principal::Principal;

/// Header telling clients they need to sign in
pub const AUTH_REQUIRED_HEADER: HeaderName = HeaderName::from_static("x-auth-required");

/// Middleware that requires a valid session token.
///
/// Use with `axum::middleware::from_fn_with_state(config, require_auth)`.
/// Every rejection looks the same to the client.
pub async fn require_auth(
    State(config): State<Arc<AuthConfig>>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, Response> {
    let principal = authorize(req.headers(), &config).map_err(|_| unauthorized_response())?;

    req.extensions_mut().insert(principal);

    Ok(next.run(req).await)
}

/// The single 401 the gate ever returns
pub fn unauthorized_response() -> Response {
    let mut response = AppError::unauthorized("Authentication required").into_response();
    response
        .headers_mut()
        .insert(AUTH_REQUIRED_HEADER, HeaderValue::from_static("true"));
    response
}

impl<S> FromRequestParts<S> for Principal
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts.extensions.get::<Principal>().copied().ok_or_else(|| {
            tracing::error!(path = %parts.uri.path(), "Handler mounted without auth gate");
            AppError::internal("principal missing from request context").into_response()
        })
    }
}
