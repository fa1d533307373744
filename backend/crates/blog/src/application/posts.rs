//! Posts Use Case
//!
//! Create, read, list, update and delete posts. Writes to an existing post
//! are limited to its author.

use std::sync::Arc;

use auth::Principal;
use kernel::id::PostId;

use crate::domain::entities::{NewPost, Post, PostUpdate};
use crate::domain::repository::PostRepository;
use crate::domain::value_objects::{Page, PostContent, PostTitle};
use crate::error::{BlogError, BlogResult};

/// New post input
pub struct CreatePostInput {
    pub title: String,
    pub content: String,
}

/// Post change input; absent fields are kept
pub struct UpdatePostInput {
    pub title: Option<String>,
    pub content: Option<String>,
}

/// Posts use case
pub struct PostsUseCase<P>
where
    P: PostRepository,
{
    post_repo: Arc<P>,
}

impl<P> PostsUseCase<P>
where
    P: PostRepository,
{
    pub fn new(post_repo: Arc<P>) -> Self {
        Self { post_repo }
    }

    /// Publish a post authored by the principal
    pub async fn create(&self, principal: &Principal, input: CreatePostInput) -> BlogResult<Post> {
        let title = PostTitle::new(input.title)?;
        let content = PostContent::new(input.content)?;

        let post = self
            .post_repo
            .create(NewPost::new(principal.subject_id, title, content))
            .await?;

        tracing::info!(post_id = %post.id, user_id = %post.user_id, "Post created");

        Ok(post)
    }

    pub async fn get(&self, id: PostId) -> BlogResult<Post> {
        self.post_repo
            .find_by_id(id)
            .await?
            .ok_or(BlogError::PostNotFound)
    }

    pub async fn list(&self, page: Page) -> BlogResult<Vec<Post>> {
        self.post_repo.list(page).await
    }

    pub async fn update(
        &self,
        principal: &Principal,
        id: PostId,
        input: UpdatePostInput,
    ) -> BlogResult<Post> {
        self.owned_post(principal, id).await?;

        let title = input.title.map(PostTitle::new).transpose()?;
        let content = input.content.map(PostContent::new).transpose()?;

        let post = self
            .post_repo
            .update(id, &PostUpdate::new(title, content))
            .await?
            .ok_or(BlogError::PostNotFound)?;

        tracing::info!(post_id = %post.id, "Post updated");

        Ok(post)
    }

    pub async fn delete(&self, principal: &Principal, id: PostId) -> BlogResult<()> {
        self.owned_post(principal, id).await?;

        if !self.post_repo.delete(id).await? {
            return Err(BlogError::PostNotFound);
        }

        tracing::info!(post_id = %id, "Post deleted");

        Ok(())
    }

    /// 404 if missing, 403 if someone else's
    async fn owned_post(&self, principal: &Principal, id: PostId) -> BlogResult<Post> {
        let post = self.get(id).await?;
        if !principal.owns(post.user_id) {
            return Err(BlogError::NotOwner);
        }
        Ok(post)
    }
}
