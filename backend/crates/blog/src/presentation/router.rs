//! Blog Router

use axum::{
    Router, middleware,
    routing::{get, patch},
};
use std::sync::Arc;

use auth::AuthConfig;
use auth::domain::UserRepository;
use auth::middleware::require_auth;

use crate::domain::repository::PostRepository;
use crate::presentation::handlers::{self, BlogAppState};

/// Create the blog router for any repository implementations.
///
/// Mount under `/v1`. Every route sits behind the auth gate.
pub fn blog_router<U, P>(users: Arc<U>, posts: Arc<P>, auth_config: Arc<AuthConfig>) -> Router
where
    U: UserRepository + Clone + Send + Sync + 'static,
    P: PostRepository + Clone + Send + Sync + 'static,
{
    let state = BlogAppState {
        users,
        posts,
        auth_config: auth_config.clone(),
    };

    Router::new()
        .route("/user/me", get(handlers::get_me::<U, P>))
        .route(
            "/user",
            patch(handlers::update_profile::<U, P>).delete(handlers::delete_profile::<U, P>),
        )
        .route(
            "/posts",
            get(handlers::list_posts::<U, P>).post(handlers::create_post::<U, P>),
        )
        .route(
            "/posts/{id}",
            get(handlers::get_post::<U, P>)
                .put(handlers::update_post::<U, P>)
                .delete(handlers::delete_post::<U, P>),
        )
        .route_layer(middleware::from_fn_with_state(auth_config, require_auth))
        .with_state(state)
}
