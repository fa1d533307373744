//! HTTP Handlers

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::{SignInInput, SignInUseCase, SignUpInput, SignUpUseCase};
use crate::domain::entity::principal::Principal;
use crate::domain::repository::UserRepository;
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{
    LoginRequest, LoginResponse, MessageResponse, RegisterRequest, UserResponse,
};

/// Shared state for auth handlers
#[derive(Clone)]
pub struct AuthAppState<R>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
}

/// Turn a JSON body rejection into a 400
pub fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> AuthResult<T> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| AuthError::Validation(rejection.body_text()))
}

/// Set the session cookie
pub fn set_session_cookie(
    headers: &mut HeaderMap,
    config: &AuthConfig,
    token: &str,
) -> AuthResult<()> {
    platform::cookie::attach(headers, &config.cookie, token, config.token_ttl)
        .map_err(|e| AuthError::Internal(format!("Invalid session cookie: {}", e)))
}

/// Expire the session cookie
pub fn clear_session_cookie(headers: &mut HeaderMap, config: &AuthConfig) -> AuthResult<()> {
    platform::cookie::clear(headers, &config.cookie)
        .map_err(|e| AuthError::Internal(format!("Invalid session cookie: {}", e)))
}

// ============================================================================
// Register
// ============================================================================

/// POST /v1/auth/register
pub async fn register<R>(
    State(state): State<AuthAppState<R>>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let req = json_body(payload)?;
    let use_case = SignUpUseCase::new(state.repo.clone());

    let user = use_case
        .execute(SignUpInput {
            name: req.name,
            email: req.email,
            password: req.password,
            password_confirm: req.password_confirm,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(&user))))
}

// ============================================================================
// Login
// ============================================================================

/// POST /v1/auth/login
pub async fn login<R>(
    State(state): State<AuthAppState<R>>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let req = json_body(payload)?;
    let use_case = SignInUseCase::new(state.repo.clone(), state.config.clone());

    let output = use_case
        .execute(SignInInput {
            email: req.email,
            password: req.password,
        })
        .await?;

    let mut headers = HeaderMap::new();
    set_session_cookie(&mut headers, &state.config, &output.token)?;

    Ok((
        StatusCode::OK,
        headers,
        Json(LoginResponse { id: output.user_id }),
    ))
}

// ============================================================================
// Logout
// ============================================================================

/// GET /v1/auth/logout
///
/// Only the client's copy is removed; the token stays valid until it expires.
pub async fn logout<R>(
    State(state): State<AuthAppState<R>>,
    principal: Principal,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let mut headers = HeaderMap::new();
    clear_session_cookie(&mut headers, &state.config)?;

    tracing::info!(user_id = %principal.subject_id, "User signed out");

    Ok((
        StatusCode::OK,
        headers,
        Json(MessageResponse::new("logout successful")),
    ))
}
