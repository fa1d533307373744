//! Blog Backend Module
//!
//! Posts and the signed-in user's profile, behind the auth gate.
//!
//! Clean Architecture structure:
//! - `domain/` - Post entity, value objects, repository trait
//! - `application/` - Posts and profile use cases
//! - `infra/` - PostgreSQL and in-memory post stores
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! Every write to a post is limited to its author. Deleting an account
//! deletes its posts.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use error::{BlogError, BlogResult};
pub use infra::{MemoryPostRepository, PgPostRepository};
pub use presentation::router::blog_router;
