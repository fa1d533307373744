//! Domain Entities

use chrono::{DateTime, Utc};
use kernel::id::{PostId, UserId};

use crate::domain::value_objects::{PostContent, PostTitle};

/// A published post
#[derive(Debug, Clone)]
pub struct Post {
    pub id: PostId,
    /// Author
    pub user_id: UserId,
    /// Unique across all posts
    pub title: PostTitle,
    pub content: PostContent,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Post data before the store assigns an ID
#[derive(Debug, Clone)]
pub struct NewPost {
    pub user_id: UserId,
    pub title: PostTitle,
    pub content: PostContent,
    pub created_at: DateTime<Utc>,
}

impl NewPost {
    pub fn new(user_id: UserId, title: PostTitle, content: PostContent) -> Self {
        Self {
            user_id,
            title,
            content,
            created_at: Utc::now(),
        }
    }

    pub fn into_post(self, id: PostId) -> Post {
        Post {
            id,
            user_id: self.user_id,
            title: self.title,
            content: self.content,
            created_at: self.created_at,
            updated_at: self.created_at,
        }
    }
}

/// Partial post change; `None` fields are left as they are
#[derive(Debug, Clone)]
pub struct PostUpdate {
    pub title: Option<PostTitle>,
    pub content: Option<PostContent>,
    pub updated_at: DateTime<Utc>,
}

impl PostUpdate {
    pub fn new(title: Option<PostTitle>, content: Option<PostContent>) -> Self {
        Self {
            title,
            content,
            updated_at: Utc::now(),
        }
    }

    pub fn apply_to(&self, post: &mut Post) {
        if let Some(title) = &self.title {
            post.title = title.clone();
        }
        if let Some(content) = &self.content {
            post.content = content.clone();
        }
        post.updated_at = self.updated_at;
    }
}
