//! Router assembly shared by both storage backends.

use std::sync::Arc;

use auth::{AuthConfig, UserRepository, auth_router};
use axum::{
    Router,
    http::{HeaderValue, Method, header},
    routing::get,
};
use blog::{blog_router, domain::repository::PostRepository};
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;

/// Plain-text banner served at `GET /v1`
pub const BANNER: &str = "Blog API";

/// Full application router: `/v1/auth/*`, `/v1/user*`, `/v1/posts*`.
pub fn build_router<U, P>(
    users: Arc<U>,
    posts: Arc<P>,
    auth_config: Arc<AuthConfig>,
    frontend_origins: &[String],
) -> Router
where
    U: UserRepository + Clone + Send + Sync + 'static,
    P: PostRepository + Clone + Send + Sync + 'static,
{
    let v1 = Router::new()
        .route("/", get(|| async { BANNER }))
        .nest("/auth", auth_router(users.clone(), auth_config.clone()))
        .merge(blog_router(users, posts, auth_config));

    Router::new()
        .nest("/v1", v1)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(frontend_origins))
}

fn cors_layer(frontend_origins: &[String]) -> CorsLayer {
    let allowed_origins: Vec<HeaderValue> = frontend_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring unparsable CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]))
        .allow_credentials(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use auth::{MemoryAuthRepository, SigningSecret};
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode};
    use blog::MemoryPostRepository;
    use tower::ServiceExt;

    fn app() -> Router {
        build_router(
            Arc::new(MemoryAuthRepository::new()),
            Arc::new(MemoryPostRepository::new()),
            Arc::new(AuthConfig::new(SigningSecret::new("app-test-secret").unwrap())),
            &["http://localhost:3000".to_string()],
        )
    }

    #[tokio::test]
    async fn test_banner_is_public() {
        let response = app()
            .oneshot(Request::get("/v1").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], BANNER.as_bytes());
    }

    #[tokio::test]
    async fn test_mounted_under_v1() {
        let app = app();

        let gated = app
            .clone()
            .oneshot(Request::get("/v1/posts").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(gated.status(), StatusCode::UNAUTHORIZED);

        let unknown = app
            .oneshot(Request::get("/posts").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(unknown.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_cors_preflight_allows_frontend_with_credentials() {
        let request = Request::builder()
            .method(Method::OPTIONS)
            .uri("/v1/posts")
            .header(header::ORIGIN, "http://localhost:3000")
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "PATCH")
            .body(Body::empty())
            .unwrap();

        let response = app().oneshot(request).await.unwrap();

        let headers = response.headers();
        assert_eq!(
            headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "http://localhost:3000"
        );
        assert_eq!(
            headers.get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS).unwrap(),
            "true"
        );
    }
}
