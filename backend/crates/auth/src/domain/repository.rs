//! Repository Traits
//!
//! Interfaces for data persistence. Implementations are in the infrastructure
//! layer.

use kernel::id::UserId;

use crate::domain::entity::user::{NewUser, ProfileUpdate, User};
use crate::domain::value_object::email::Email;
use crate::error::AuthResult;

/// Account store
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Persist a new account. Fails with `AuthError::EmailTaken` if the email
    /// is already registered.
    async fn create(&self, user: NewUser) -> AuthResult<User>;

    /// Find account by ID
    async fn find_by_id(&self, id: UserId) -> AuthResult<Option<User>>;

    /// Find account by exact email
    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>>;

    /// Change name and/or email. Returns `None` if the account does not exist.
    async fn update_profile(&self, id: UserId, update: &ProfileUpdate)
    -> AuthResult<Option<User>>;

    /// Remove the account. Returns whether anything was deleted.
    async fn delete(&self, id: UserId) -> AuthResult<bool>;
}
