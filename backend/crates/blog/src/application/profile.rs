//! Profile Use Case
//!
//! The principal's own account: view, edit, delete.

use std::sync::Arc;

use auth::Principal;
use auth::domain::{Email, ProfileUpdate, User, UserName, UserRepository};

use crate::domain::repository::PostRepository;
use crate::error::{BlogError, BlogResult};

/// Profile change input; absent fields are kept
pub struct UpdateProfileInput {
    pub name: Option<String>,
    pub email: Option<String>,
}

/// Profile use case
pub struct ProfileUseCase<U, P>
where
    U: UserRepository,
    P: PostRepository,
{
    user_repo: Arc<U>,
    post_repo: Arc<P>,
}

impl<U, P> ProfileUseCase<U, P>
where
    U: UserRepository,
    P: PostRepository,
{
    pub fn new(user_repo: Arc<U>, post_repo: Arc<P>) -> Self {
        Self {
            user_repo,
            post_repo,
        }
    }

    /// The account behind the principal. A valid token can outlive its
    /// account, so this may be 404.
    pub async fn me(&self, principal: &Principal) -> BlogResult<User> {
        self.user_repo
            .find_by_id(principal.subject_id)
            .await?
            .ok_or(BlogError::UserNotFound)
    }

    pub async fn update(
        &self,
        principal: &Principal,
        input: UpdateProfileInput,
    ) -> BlogResult<User> {
        let update = ProfileUpdate {
            name: input.name.map(UserName::new).transpose()?,
            email: input.email.map(Email::new).transpose()?,
        };

        if update.is_empty() {
            return self.me(principal).await;
        }

        let user = self
            .user_repo
            .update_profile(principal.subject_id, &update)
            .await?
            .ok_or(BlogError::UserNotFound)?;

        tracing::info!(user_id = %user.id, "Profile updated");

        Ok(user)
    }

    /// Delete the account and everything it authored
    pub async fn delete(&self, principal: &Principal) -> BlogResult<()> {
        let user_id = principal.subject_id;

        let posts_deleted = self.post_repo.delete_by_owner(user_id).await?;
        if !self.user_repo.delete(user_id).await? {
            return Err(BlogError::UserNotFound);
        }

        tracing::info!(user_id = %user_id, posts_deleted, "Account deleted");

        Ok(())
    }
}
