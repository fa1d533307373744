//! HTTP Handlers

use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use std::sync::Arc;

use auth::domain::UserRepository;
use auth::presentation::handlers::clear_session_cookie;
use auth::{AuthConfig, Principal};
use kernel::id::PostId;

use crate::application::{
    CreatePostInput, PostsUseCase, ProfileUseCase, UpdatePostInput, UpdateProfileInput,
};
use crate::domain::repository::PostRepository;
use crate::domain::value_objects::Page;
use crate::error::{BlogError, BlogResult};
use crate::presentation::dto::{
    CreatePostRequest, ListPostsQuery, PostResponse, UpdatePostRequest, UpdateProfileRequest,
    UserResponse,
};

/// Shared state for blog handlers
#[derive(Clone)]
pub struct BlogAppState<U, P>
where
    U: UserRepository + Clone + Send + Sync + 'static,
    P: PostRepository + Clone + Send + Sync + 'static,
{
    pub users: Arc<U>,
    pub posts: Arc<P>,
    pub auth_config: Arc<AuthConfig>,
}

fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> BlogResult<T> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| BlogError::Validation(rejection.body_text()))
}

fn post_id(path: Result<Path<PostId>, PathRejection>) -> BlogResult<PostId> {
    path.map(|Path(id)| id)
        .map_err(|_| BlogError::Validation("Invalid post id".to_string()))
}

// ============================================================================
// Profile
// ============================================================================

/// GET /v1/user/me
pub async fn get_me<U, P>(
    State(state): State<BlogAppState<U, P>>,
    principal: Principal,
) -> BlogResult<Json<UserResponse>>
where
    U: UserRepository + Clone + Send + Sync + 'static,
    P: PostRepository + Clone + Send + Sync + 'static,
{
    let use_case = ProfileUseCase::new(state.users.clone(), state.posts.clone());
    let user = use_case.me(&principal).await?;

    Ok(Json(UserResponse::from(&user)))
}

/// PATCH /v1/user
pub async fn update_profile<U, P>(
    State(state): State<BlogAppState<U, P>>,
    principal: Principal,
    payload: Result<Json<UpdateProfileRequest>, JsonRejection>,
) -> BlogResult<Json<UserResponse>>
where
    U: UserRepository + Clone + Send + Sync + 'static,
    P: PostRepository + Clone + Send + Sync + 'static,
{
    let req = json_body(payload)?;
    let use_case = ProfileUseCase::new(state.users.clone(), state.posts.clone());

    let user = use_case
        .update(
            &principal,
            UpdateProfileInput {
                name: req.name,
                email: req.email,
            },
        )
        .await?;

    Ok(Json(UserResponse::from(&user)))
}

/// DELETE /v1/user
///
/// Removes the account and its posts, then clears the session cookie.
pub async fn delete_profile<U, P>(
    State(state): State<BlogAppState<U, P>>,
    principal: Principal,
) -> BlogResult<impl IntoResponse>
where
    U: UserRepository + Clone + Send + Sync + 'static,
    P: PostRepository + Clone + Send + Sync + 'static,
{
    let use_case = ProfileUseCase::new(state.users.clone(), state.posts.clone());
    use_case.delete(&principal).await?;

    let mut headers = HeaderMap::new();
    clear_session_cookie(&mut headers, &state.auth_config)?;

    Ok((StatusCode::NO_CONTENT, headers))
}

// ============================================================================
// Posts
// ============================================================================

/// POST /v1/posts
pub async fn create_post<U, P>(
    State(state): State<BlogAppState<U, P>>,
    principal: Principal,
    payload: Result<Json<CreatePostRequest>, JsonRejection>,
) -> BlogResult<impl IntoResponse>
where
    U: UserRepository + Clone + Send + Sync + 'static,
    P: PostRepository + Clone + Send + Sync + 'static,
{
    let req = json_body(payload)?;
    let use_case = PostsUseCase::new(state.posts.clone());

    let post = use_case
        .create(
            &principal,
            CreatePostInput {
                title: req.title,
                content: req.content,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(PostResponse::from(&post))))
}

/// GET /v1/posts?page=&limit=
pub async fn list_posts<U, P>(
    State(state): State<BlogAppState<U, P>>,
    Query(query): Query<ListPostsQuery>,
) -> BlogResult<Json<Vec<PostResponse>>>
where
    U: UserRepository + Clone + Send + Sync + 'static,
    P: PostRepository + Clone + Send + Sync + 'static,
{
    let page = Page::from_query(query.page.as_deref(), query.limit.as_deref());
    let use_case = PostsUseCase::new(state.posts.clone());

    let posts = use_case.list(page).await?;

    Ok(Json(posts.iter().map(PostResponse::from).collect()))
}

/// GET /v1/posts/{id}
pub async fn get_post<U, P>(
    State(state): State<BlogAppState<U, P>>,
    path: Result<Path<PostId>, PathRejection>,
) -> BlogResult<Json<PostResponse>>
where
    U: UserRepository + Clone + Send + Sync + 'static,
    P: PostRepository + Clone + Send + Sync + 'static,
{
    let id = post_id(path)?;
    let use_case = PostsUseCase::new(state.posts.clone());

    let post = use_case.get(id).await?;

    Ok(Json(PostResponse::from(&post)))
}

/// PUT /v1/posts/{id}
pub async fn update_post<U, P>(
    State(state): State<BlogAppState<U, P>>,
    principal: Principal,
    path: Result<Path<PostId>, PathRejection>,
    payload: Result<Json<UpdatePostRequest>, JsonRejection>,
) -> BlogResult<Json<PostResponse>>
where
    U: UserRepository + Clone + Send + Sync + 'static,
    P: PostRepository + Clone + Send + Sync + 'static,
{
    let id = post_id(path)?;
    let req = json_body(payload)?;
    let use_case = PostsUseCase::new(state.posts.clone());

    let post = use_case
        .update(
            &principal,
            id,
            UpdatePostInput {
                title: req.title,
                content: req.content,
            },
        )
        .await?;

    Ok(Json(PostResponse::from(&post)))
}

/// DELETE /v1/posts/{id}
pub async fn delete_post<U, P>(
    State(state): State<BlogAppState<U, P>>,
    principal: Principal,
    path: Result<Path<PostId>, PathRejection>,
) -> BlogResult<StatusCode>
where
    U: UserRepository + Clone + Send + Sync + 'static,
    P: PostRepository + Clone + Send + Sync + 'static,
{
    let id = post_id(path)?;
    let use_case = PostsUseCase::new(state.posts.clone());

    use_case.delete(&principal, id).await?;

    Ok(StatusCode::NO_CONTENT)
}
