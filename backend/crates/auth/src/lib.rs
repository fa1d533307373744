//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Accounts, the request principal, repository traits
//! - `application/` - Sign-up/sign-in use cases and the session check
//! - `infra/` - PostgreSQL and in-memory account stores
//! - `presentation/` - HTTP handlers, DTOs, router, auth gate
//!
//! ## Security Model
//! - Passwords hashed with Argon2id
//! - Stateless HS256 session tokens in an `HttpOnly` cookie
//!   (`Authorization: Bearer` also accepted)
//! - Uniform 401 for every gate rejection and for every login failure
//! - Logout clears the cookie only; tokens are valid until they expire

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

#[cfg(test)]
mod tests;

// Re-exports for convenience
pub use application::config::{AuthConfig, AuthConfigError, SigningSecret};
pub use domain::{Principal, UserRepository};
pub use error::{AuthError, AuthResult};
pub use infra::{MemoryAuthRepository, PgAuthRepository};
pub use presentation::router::auth_router;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

pub mod middleware {
    pub use crate::presentation::middleware::*;
}
