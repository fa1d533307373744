//! Repository Traits
//!
//! Interfaces for data persistence. Implementations are in the infrastructure
//! layer.

use kernel::id::{PostId, UserId};

use crate::domain::entities::{NewPost, Post, PostUpdate};
use crate::domain::value_objects::Page;
use crate::error::BlogResult;

/// Post store
#[trait_variant::make(PostRepository: Send)]
pub trait LocalPostRepository {
    /// Persist a new post. Fails with `BlogError::TitleTaken` on a duplicate
    /// title.
    async fn create(&self, post: NewPost) -> BlogResult<Post>;

    /// Find post by ID
    async fn find_by_id(&self, id: PostId) -> BlogResult<Option<Post>>;

    /// One page of posts, ordered by ID
    async fn list(&self, page: Page) -> BlogResult<Vec<Post>>;

    /// Apply a partial update. Returns `None` if the post does not exist.
    async fn update(&self, id: PostId, update: &PostUpdate) -> BlogResult<Option<Post>>;

    /// Remove a post. Returns whether anything was deleted.
    async fn delete(&self, id: PostId) -> BlogResult<bool>;

    /// Remove every post by an author. Returns the number deleted.
    async fn delete_by_owner(&self, user_id: UserId) -> BlogResult<u64>;
}
