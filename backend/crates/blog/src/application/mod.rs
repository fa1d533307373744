//! Application Layer - Use Cases

pub mod posts;
pub mod profile;

pub use posts::{CreatePostInput, PostsUseCase, UpdatePostInput};
pub use profile::{ProfileUseCase, UpdateProfileInput};
