//! Blog Error Types
//!
//! Blog-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use auth::AuthError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, conversions::sqlx_error_kind, kind::ErrorKind};
use thiserror::Error;

/// Blog-specific result type alias
pub type BlogResult<T> = Result<T, BlogError>;

/// Blog-specific error variants
#[derive(Debug, Error)]
pub enum BlogError {
    #[error("Post not found")]
    PostNotFound,

    /// The principal's own account no longer exists
    #[error("User not found")]
    UserNotFound,

    /// Principal is not the post's author
    #[error("You can only modify your own posts")]
    NotOwner,

    #[error("A post with this title already exists")]
    TitleTaken,

    #[error("{0}")]
    Validation(String),

    /// Failure in the account store
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl BlogError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            BlogError::PostNotFound | BlogError::UserNotFound => ErrorKind::NotFound,
            BlogError::NotOwner => ErrorKind::Forbidden,
            BlogError::TitleTaken => ErrorKind::Conflict,
            BlogError::Validation(_) => ErrorKind::BadRequest,
            BlogError::Auth(e) => e.kind(),
            BlogError::Database(e) => sqlx_error_kind(e),
            BlogError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        match self {
            BlogError::Auth(e) => e.to_app_error(),
            BlogError::Database(_) if !self.kind().is_server_error() => {
                AppError::new(self.kind(), "Database constraint violated")
            }
            _ if self.kind().is_server_error() => {
                AppError::new(self.kind(), "Internal server error")
            }
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            BlogError::Database(e) => {
                tracing::error!(error = %e, "Blog database error");
            }
            BlogError::Auth(e) if e.kind().is_server_error() => {
                tracing::error!(error = %e, "Account store error");
            }
            BlogError::Internal(msg) => {
                tracing::error!(message = %msg, "Blog internal error");
            }
            BlogError::NotOwner => {
                tracing::warn!("Attempt to modify another user's post");
            }
            _ => {
                tracing::debug!(error = %self, "Blog error");
            }
        }
    }
}

impl IntoResponse for BlogError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<AppError> for BlogError {
    fn from(err: AppError) -> Self {
        match err.kind() {
            ErrorKind::BadRequest => BlogError::Validation(err.message().to_string()),
            _ => BlogError::Internal(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(BlogError::PostNotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(BlogError::NotOwner.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(BlogError::TitleTaken.status_code(), StatusCode::CONFLICT);
        assert_eq!(
            BlogError::Validation("x".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_auth_errors_keep_their_status() {
        let err = BlogError::from(AuthError::EmailTaken);
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
        assert_eq!(err.to_app_error().message(), "Email is already registered");
    }
}
