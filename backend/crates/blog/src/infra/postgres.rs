//! PostgreSQL Repository Implementation

use chrono::{DateTime, Utc};
use kernel::error::conversions::is_unique_violation;
use kernel::id::{PostId, UserId};
use sqlx::PgPool;

use crate::domain::entities::{NewPost, Post, PostUpdate};
use crate::domain::repository::PostRepository;
use crate::domain::value_objects::{Page, PostContent, PostTitle};
use crate::error::{BlogError, BlogResult};

/// PostgreSQL-backed post store
#[derive(Clone)]
pub struct PgPostRepository {
    pool: PgPool,
}

impl PgPostRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Unique violations on `posts.title` become [`BlogError::TitleTaken`].
fn map_write_error(err: sqlx::Error) -> BlogError {
    if is_unique_violation(&err) {
        BlogError::TitleTaken
    } else {
        BlogError::Database(err)
    }
}

impl PostRepository for PgPostRepository {
    async fn create(&self, post: NewPost) -> BlogResult<Post> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO posts (user_id, title, content, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $4)
            RETURNING id
            "#,
        )
        .bind(post.user_id.get())
        .bind(post.title.as_str())
        .bind(post.content.as_str())
        .bind(post.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_write_error)?;

        Ok(post.into_post(PostId::new(id)))
    }

    async fn find_by_id(&self, id: PostId) -> BlogResult<Option<Post>> {
        let row = sqlx::query_as::<_, PostRow>(
            r#"
            SELECT id, user_id, title, content, created_at, updated_at
            FROM posts
            WHERE id = $1
            "#,
        )
        .bind(id.get())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(PostRow::into_post))
    }

    async fn list(&self, page: Page) -> BlogResult<Vec<Post>> {
        let offset = i64::try_from(page.offset()).unwrap_or(i64::MAX);

        let rows = sqlx::query_as::<_, PostRow>(
            r#"
            SELECT id, user_id, title, content, created_at, updated_at
            FROM posts
            ORDER BY id
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(i64::from(page.limit()))
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(PostRow::into_post).collect())
    }

    async fn update(&self, id: PostId, update: &PostUpdate) -> BlogResult<Option<Post>> {
        let row = sqlx::query_as::<_, PostRow>(
            r#"
            UPDATE posts SET
                title = COALESCE($2, title),
                content = COALESCE($3, content),
                updated_at = $4
            WHERE id = $1
            RETURNING id, user_id, title, content, created_at, updated_at
            "#,
        )
        .bind(id.get())
        .bind(update.title.as_ref().map(PostTitle::as_str))
        .bind(update.content.as_ref().map(PostContent::as_str))
        .bind(update.updated_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_write_error)?;

        Ok(row.map(PostRow::into_post))
    }

    async fn delete(&self, id: PostId) -> BlogResult<bool> {
        let deleted = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id.get())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted > 0)
    }

    async fn delete_by_owner(&self, user_id: UserId) -> BlogResult<u64> {
        let deleted = sqlx::query("DELETE FROM posts WHERE user_id = $1")
            .bind(user_id.get())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted)
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct PostRow {
    id: i64,
    user_id: i64,
    title: String,
    content: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl PostRow {
    fn into_post(self) -> Post {
        Post {
            id: PostId::new(self.id),
            user_id: UserId::new(self.user_id),
            title: PostTitle::from_db(self.title),
            content: PostContent::from_db(self.content),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}
