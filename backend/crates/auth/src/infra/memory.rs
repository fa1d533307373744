//! In-Memory Repository Implementation
//!
//! Used when no database is configured, and by the router tests.

use std::collections::BTreeMap;
use std::sync::Arc;

use kernel::id::UserId;
use tokio::sync::RwLock;

use crate::domain::entity::user::{NewUser, ProfileUpdate, User};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::email::Email;
use crate::error::{AuthError, AuthResult};

#[derive(Default)]
struct Inner {
    users: BTreeMap<UserId, User>,
    last_id: i64,
}

/// Process-local account store. Clones share the same data.
#[derive(Clone, Default)]
pub struct MemoryAuthRepository {
    inner: Arc<RwLock<Inner>>,
}

impl MemoryAuthRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Inner {
    fn email_in_use(&self, email: &Email, except: Option<UserId>) -> bool {
        self.users
            .values()
            .any(|u| &u.email == email && Some(u.id) != except)
    }
}

impl UserRepository for MemoryAuthRepository {
    async fn create(&self, user: NewUser) -> AuthResult<User> {
        let mut inner = self.inner.write().await;

        if inner.email_in_use(&user.email, None) {
            return Err(AuthError::EmailTaken);
        }

        inner.last_id += 1;
        let user = user.into_user(UserId::new(inner.last_id));
        inner.users.insert(user.id, user.clone());

        Ok(user)
    }

    async fn find_by_id(&self, id: UserId) -> AuthResult<Option<User>> {
        Ok(self.inner.read().await.users.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        let inner = self.inner.read().await;
        Ok(inner.users.values().find(|u| &u.email == email).cloned())
    }

    async fn update_profile(&self, id: UserId, update: &ProfileUpdate) -> AuthResult<Option<User>> {
        let mut inner = self.inner.write().await;

        if let Some(email) = &update.email {
            if inner.email_in_use(email, Some(id)) {
                return Err(AuthError::EmailTaken);
            }
        }

        let Some(user) = inner.users.get_mut(&id) else {
            return Ok(None);
        };
        update.apply_to(user);

        Ok(Some(user.clone()))
    }

    async fn delete(&self, id: UserId) -> AuthResult<bool> {
        Ok(self.inner.write().await.users.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::user_name::UserName;
    use platform::password::ClearTextPassword;

    fn new_user(email: &str) -> NewUser {
        let hash = ClearTextPassword::new_unchecked("password123".to_string())
            .hash()
            .unwrap();
        NewUser::new(
            UserName::new("Test").unwrap(),
            Email::new(email).unwrap(),
            hash,
        )
    }

    #[tokio::test]
    async fn test_ids_are_sequential() {
        let repo = MemoryAuthRepository::new();
        let a = repo.create(new_user("a@x.com")).await.unwrap();
        let b = repo.create(new_user("b@x.com")).await.unwrap();
        assert_eq!(a.id.get(), 1);
        assert_eq!(b.id.get(), 2);
    }

    #[tokio::test]
    async fn test_duplicate_email() {
        let repo = MemoryAuthRepository::new();
        repo.create(new_user("a@x.com")).await.unwrap();
        let err = repo.create(new_user("a@x.com")).await.unwrap_err();
        assert!(matches!(err, AuthError::EmailTaken));

        // case-sensitive identifiers
        assert!(repo.create(new_user("A@x.com")).await.is_ok());
    }

    #[tokio::test]
    async fn test_update_profile() {
        let repo = MemoryAuthRepository::new();
        let a = repo.create(new_user("a@x.com")).await.unwrap();
        repo.create(new_user("b@x.com")).await.unwrap();

        let taken = ProfileUpdate {
            email: Some(Email::new("b@x.com").unwrap()),
            ..Default::default()
        };
        assert!(matches!(
            repo.update_profile(a.id, &taken).await,
            Err(AuthError::EmailTaken)
        ));

        // keeping your own email is not a collision
        let rename = ProfileUpdate {
            name: Some(UserName::new("Renamed").unwrap()),
            email: Some(Email::new("a@x.com").unwrap()),
        };
        let updated = repo.update_profile(a.id, &rename).await.unwrap().unwrap();
        assert_eq!(updated.name.as_str(), "Renamed");
        assert_eq!(updated.email.as_str(), "a@x.com");

        assert!(
            repo.update_profile(UserId::new(99), &rename)
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_delete() {
        let repo = MemoryAuthRepository::new();
        let a = repo.create(new_user("a@x.com")).await.unwrap();
        assert!(repo.delete(a.id).await.unwrap());
        assert!(!repo.delete(a.id).await.unwrap());
        assert!(repo.find_by_id(a.id).await.unwrap().is_none());
    }
}
