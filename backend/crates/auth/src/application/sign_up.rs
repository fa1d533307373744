//! Sign Up Use Case
//!
//! Creates a new account.

use std::sync::Arc;

use platform::password::ClearTextPassword;
use zeroize::Zeroize;

use crate::domain::entity::user::{NewUser, User};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{email::Email, user_name::UserName};
use crate::error::{AuthError, AuthResult};

/// Sign up input
pub struct SignUpInput {
    pub name: String,
    pub email: String,
    pub password: String,
    pub password_confirm: String,
}

/// Sign up use case
pub struct SignUpUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
}

impl<U> SignUpUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>) -> Self {
        Self { user_repo }
    }

    pub async fn execute(&self, input: SignUpInput) -> AuthResult<User> {
        let SignUpInput {
            name,
            email,
            mut password,
            mut password_confirm,
        } = input;

        let confirmed = password == password_confirm;
        password_confirm.zeroize();
        if !confirmed {
            password.zeroize();
            return Err(AuthError::Validation("Passwords do not match".to_string()));
        }

        let name = UserName::new(name)?;
        let email = Email::new(email)?;
        let password = ClearTextPassword::new(password)
            .map_err(|e| AuthError::Validation(e.to_string()))?;

        // Checked before hashing; the store's unique constraint still covers races.
        if self.user_repo.find_by_email(&email).await?.is_some() {
            return Err(AuthError::EmailTaken);
        }

        let password_hash = password.hash()?;
        let user = self
            .user_repo
            .create(NewUser::new(name, email, password_hash))
            .await?;

        tracing::info!(user_id = %user.id, "User signed up");

        Ok(user)
    }
}
