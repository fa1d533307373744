//! Router tests for the auth endpoints and the gate.
//!
//! Drive the real axum router with `tower::ServiceExt::oneshot` against the
//! in-memory account store.

use axum::{
    Json, Router,
    body::{Body, to_bytes},
    http::{
        HeaderMap, Request, StatusCode,
        header::{CONTENT_TYPE, COOKIE, SET_COOKIE},
    },
    middleware::from_fn_with_state,
    routing::get,
};
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;

use crate::application::config::{AuthConfig, SigningSecret};
use crate::domain::entity::principal::Principal;
use crate::infra::memory::MemoryAuthRepository;
use crate::presentation::middleware::require_auth;
use crate::presentation::router::auth_router;

fn test_config() -> Arc<AuthConfig> {
    Arc::new(AuthConfig::new(
        SigningSecret::new("router-test-signing-secret").unwrap(),
    ))
}

async fn whoami(principal: Principal) -> Json<Value> {
    Json(json!({ "subject_id": principal.subject_id }))
}

fn app(config: Arc<AuthConfig>) -> Router {
    let protected = Router::new()
        .route("/whoami", get(whoami))
        .route_layer(from_fn_with_state(config.clone(), require_auth));

    Router::new()
        .nest(
            "/v1/auth",
            auth_router(Arc::new(MemoryAuthRepository::new()), config),
        )
        .merge(protected)
        .route("/ungated", get(whoami))
}

struct TestResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: Value,
}

async fn send(app: &Router, request: Request<Body>) -> TestResponse {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    TestResponse {
        status,
        headers,
        body,
    }
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get_with_cookie(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(token) = token {
        builder = builder.header(COOKIE, format!("access-token={}", token));
    }
    builder.body(Body::empty()).unwrap()
}

fn session_cookie(headers: &HeaderMap) -> String {
    headers
        .get_all(SET_COOKIE)
        .iter()
        .map(|v| v.to_str().unwrap().to_string())
        .find(|c| c.starts_with("access-token="))
        .expect("session cookie set")
}

fn token_from(set_cookie: &str) -> String {
    set_cookie
        .split(';')
        .next()
        .and_then(|pair| pair.strip_prefix("access-token="))
        .unwrap()
        .to_string()
}

async fn register(app: &Router, email: &str, password: &str) -> TestResponse {
    send(
        app,
        post_json(
            "/v1/auth/register",
            json!({
                "name": "Test User",
                "email": email,
                "password": password,
                "password_confirm": password,
            }),
        ),
    )
    .await
}

async fn login(app: &Router, email: &str, password: &str) -> TestResponse {
    send(
        app,
        post_json(
            "/v1/auth/login",
            json!({ "email": email, "password": password }),
        ),
    )
    .await
}

#[tokio::test]
async fn test_register_login_and_reach_protected_route() {
    let app = app(test_config());

    let registered = register(&app, "a@x.com", "12345678").await;
    assert_eq!(registered.status, StatusCode::CREATED);
    assert_eq!(registered.body["email"], "a@x.com");
    assert_eq!(registered.body["name"], "Test User");
    assert!(registered.body.get("password_hash").is_none());
    let id = registered.body["id"].as_i64().unwrap();

    let logged_in = login(&app, "a@x.com", "12345678").await;
    assert_eq!(logged_in.status, StatusCode::OK);
    assert_eq!(logged_in.body["id"].as_i64(), Some(id));

    let cookie = session_cookie(&logged_in.headers);
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("Path=/"));
    assert!(cookie.contains("Max-Age=3600"));
    assert!(cookie.contains("Expires="));

    let token = token_from(&cookie);
    let me = send(&app, get_with_cookie("/whoami", Some(&token))).await;
    assert_eq!(me.status, StatusCode::OK);
    assert_eq!(me.body["subject_id"].as_i64(), Some(id));
}

#[tokio::test]
async fn test_missing_token_is_rejected_with_auth_required_header() {
    let app = app(test_config());

    let response = send(&app, get_with_cookie("/whoami", None)).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(
        response.headers.get("x-auth-required").unwrap(),
        "true"
    );
}

#[tokio::test]
async fn test_every_gate_rejection_looks_the_same() {
    let config = test_config();
    let app = app(config.clone());

    let missing = send(&app, get_with_cookie("/whoami", None)).await;
    let garbage = send(&app, get_with_cookie("/whoami", Some("abc.def.ghi"))).await;

    let foreign = platform::token::issue(
        1,
        std::time::Duration::from_secs(60),
        "blog-api",
        b"not-the-server-secret",
    )
    .unwrap();
    let forged = send(&app, get_with_cookie("/whoami", Some(&foreign))).await;

    for response in [&garbage, &forged] {
        assert_eq!(response.status, missing.status);
        assert_eq!(response.body, missing.body);
        assert_eq!(
            response.headers.get("x-auth-required"),
            missing.headers.get("x-auth-required")
        );
    }
}

#[tokio::test]
async fn test_wrong_password_and_unknown_email_are_indistinguishable() {
    let app = app(test_config());
    register(&app, "a@x.com", "12345678").await;

    let wrong_password = login(&app, "a@x.com", "87654321").await;
    let unknown_email = login(&app, "nobody@x.com", "12345678").await;

    assert_eq!(wrong_password.status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_password.status, unknown_email.status);
    assert_eq!(wrong_password.body, unknown_email.body);
    assert_eq!(wrong_password.body["detail"], "Invalid login credentials");
    assert!(wrong_password.headers.get(SET_COOKIE).is_none());
}

#[tokio::test]
async fn test_email_is_case_sensitive_at_login() {
    let app = app(test_config());
    register(&app, "a@x.com", "12345678").await;

    let response = login(&app, "A@x.com", "12345678").await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_duplicate_registration_conflicts() {
    let app = app(test_config());

    assert_eq!(
        register(&app, "a@x.com", "12345678").await.status,
        StatusCode::CREATED
    );
    assert_eq!(
        register(&app, "a@x.com", "another-password").await.status,
        StatusCode::CONFLICT
    );
}

#[tokio::test]
async fn test_registration_validation_failures_are_bad_requests() {
    let app = app(test_config());

    let mismatch = send(
        &app,
        post_json(
            "/v1/auth/register",
            json!({
                "name": "Test",
                "email": "a@x.com",
                "password": "12345678",
                "password_confirm": "12345679",
            }),
        ),
    )
    .await;
    assert_eq!(mismatch.status, StatusCode::BAD_REQUEST);
    assert_eq!(mismatch.body["detail"], "Passwords do not match");

    let short = register(&app, "a@x.com", "1234567").await;
    assert_eq!(short.status, StatusCode::BAD_REQUEST);

    let bad_email = register(&app, "not-an-email", "12345678").await;
    assert_eq!(bad_email.status, StatusCode::BAD_REQUEST);

    let missing_fields = send(&app, post_json("/v1/auth/register", json!({}))).await;
    assert_eq!(missing_fields.status, StatusCode::BAD_REQUEST);

    let not_json = send(
        &app,
        Request::builder()
            .method("POST")
            .uri("/v1/auth/register")
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from("{oops"))
            .unwrap(),
    )
    .await;
    assert_eq!(not_json.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login_validation_failures_are_bad_requests() {
    let app = app(test_config());

    assert_eq!(
        login(&app, "not-an-email", "12345678").await.status,
        StatusCode::BAD_REQUEST
    );
    assert_eq!(
        login(&app, "a@x.com", "").await.status,
        StatusCode::BAD_REQUEST
    );
}

#[tokio::test]
async fn test_logout_requires_a_session() {
    let app = app(test_config());

    let response = send(&app, get_with_cookie("/v1/auth/logout", None)).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_clears_cookie_but_token_stays_valid() {
    let app = app(test_config());
    register(&app, "a@x.com", "12345678").await;
    let token = token_from(&session_cookie(&login(&app, "a@x.com", "12345678").await.headers));

    let logout = send(&app, get_with_cookie("/v1/auth/logout", Some(&token))).await;
    assert_eq!(logout.status, StatusCode::OK);
    assert_eq!(logout.body["message"], "logout successful");

    let cleared = session_cookie(&logout.headers);
    assert!(cleared.starts_with("access-token=;"));
    assert!(cleared.contains("Max-Age=0"));

    // Stateless tokens cannot be revoked server-side.
    let replay = send(&app, get_with_cookie("/whoami", Some(&token))).await;
    assert_eq!(replay.status, StatusCode::OK);
}

#[tokio::test]
async fn test_handler_without_gate_fails_closed() {
    let app = app(test_config());

    let response = send(&app, get_with_cookie("/ungated", None)).await;
    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
}
