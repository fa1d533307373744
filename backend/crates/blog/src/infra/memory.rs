//! In-Memory Repository Implementation

use std::collections::BTreeMap;
use std::sync::Arc;

use kernel::id::{PostId, UserId};
use tokio::sync::RwLock;

use crate::domain::entities::{NewPost, Post, PostUpdate};
use crate::domain::repository::PostRepository;
use crate::domain::value_objects::{Page, PostTitle};
use crate::error::{BlogError, BlogResult};

#[derive(Default)]
struct Inner {
    posts: BTreeMap<PostId, Post>,
    last_id: i64,
}

impl Inner {
    fn title_in_use(&self, title: &PostTitle, except: Option<PostId>) -> bool {
        self.posts
            .values()
            .any(|p| &p.title == title && Some(p.id) != except)
    }
}

/// Process-local post store. Clones share the same data.
#[derive(Clone, Default)]
pub struct MemoryPostRepository {
    inner: Arc<RwLock<Inner>>,
}

impl MemoryPostRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PostRepository for MemoryPostRepository {
    async fn create(&self, post: NewPost) -> BlogResult<Post> {
        let mut inner = self.inner.write().await;

        if inner.title_in_use(&post.title, None) {
            return Err(BlogError::TitleTaken);
        }

        inner.last_id += 1;
        let post = post.into_post(PostId::new(inner.last_id));
        inner.posts.insert(post.id, post.clone());

        Ok(post)
    }

    async fn find_by_id(&self, id: PostId) -> BlogResult<Option<Post>> {
        Ok(self.inner.read().await.posts.get(&id).cloned())
    }

    async fn list(&self, page: Page) -> BlogResult<Vec<Post>> {
        let inner = self.inner.read().await;
        let skip = usize::try_from(page.offset()).unwrap_or(usize::MAX);

        Ok(inner
            .posts
            .values()
            .skip(skip)
            .take(page.limit() as usize)
            .cloned()
            .collect())
    }

    async fn update(&self, id: PostId, update: &PostUpdate) -> BlogResult<Option<Post>> {
        let mut inner = self.inner.write().await;

        if let Some(title) = &update.title {
            if inner.title_in_use(title, Some(id)) {
                return Err(BlogError::TitleTaken);
            }
        }

        let Some(post) = inner.posts.get_mut(&id) else {
            return Ok(None);
        };
        update.apply_to(post);

        Ok(Some(post.clone()))
    }

    async fn delete(&self, id: PostId) -> BlogResult<bool> {
        Ok(self.inner.write().await.posts.remove(&id).is_some())
    }

    async fn delete_by_owner(&self, user_id: UserId) -> BlogResult<u64> {
        let mut inner = self.inner.write().await;
        let before = inner.posts.len();
        inner.posts.retain(|_, p| p.user_id != user_id);
        Ok((before - inner.posts.len()) as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::PostContent;

    fn new_post(user: i64, title: &str) -> NewPost {
        NewPost::new(
            UserId::new(user),
            PostTitle::new(title).unwrap(),
            PostContent::new("body").unwrap(),
        )
    }

    #[tokio::test]
    async fn test_list_pages_in_id_order() {
        let repo = MemoryPostRepository::new();
        for i in 1..=7 {
            repo.create(new_post(1, &format!("post {}", i))).await.unwrap();
        }

        let first = repo.list(Page::new(1, 5)).await.unwrap();
        let ids: Vec<i64> = first.iter().map(|p| p.id.get()).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);

        let second = repo.list(Page::new(2, 5)).await.unwrap();
        let ids: Vec<i64> = second.iter().map(|p| p.id.get()).collect();
        assert_eq!(ids, vec![6, 7]);

        assert!(repo.list(Page::new(3, 5)).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_title() {
        let repo = MemoryPostRepository::new();
        repo.create(new_post(1, "same")).await.unwrap();
        assert!(matches!(
            repo.create(new_post(2, "same")).await,
            Err(BlogError::TitleTaken)
        ));
    }

    #[tokio::test]
    async fn test_update_keeps_own_title() {
        let repo = MemoryPostRepository::new();
        let post = repo.create(new_post(1, "mine")).await.unwrap();
        repo.create(new_post(1, "other")).await.unwrap();

        let same_title = PostUpdate::new(Some(PostTitle::new("mine").unwrap()), None);
        assert!(repo.update(post.id, &same_title).await.unwrap().is_some());

        let clash = PostUpdate::new(Some(PostTitle::new("other").unwrap()), None);
        assert!(matches!(
            repo.update(post.id, &clash).await,
            Err(BlogError::TitleTaken)
        ));
    }

    #[tokio::test]
    async fn test_delete_by_owner() {
        let repo = MemoryPostRepository::new();
        repo.create(new_post(1, "a")).await.unwrap();
        repo.create(new_post(2, "b")).await.unwrap();
        repo.create(new_post(1, "c")).await.unwrap();

        assert_eq!(repo.delete_by_owner(UserId::new(1)).await.unwrap(), 2);
        let left = repo.list(Page::default()).await.unwrap();
        assert_eq!(left.len(), 1);
        assert_eq!(left[0].user_id, UserId::new(2));
    }
}
