//! Sign In Use Case
//!
//! Checks credentials and issues a session token.

use std::sync::Arc;
use std::time::Duration;

use kernel::id::UserId;
use platform::password::{ClearTextPassword, verify_against_dummy};
use platform::token;

use crate::application::config::AuthConfig;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::email::Email;
use crate::error::{AuthError, AuthResult};

/// Sign in input
pub struct SignInInput {
    pub email: String,
    pub password: String,
}

/// Sign in output
pub struct SignInOutput {
    pub user_id: UserId,
    /// Signed session token for the cookie
    pub token: String,
    pub expires_in: Duration,
}

/// Sign in use case
pub struct SignInUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    config: Arc<AuthConfig>,
}

impl<U> SignInUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, config: Arc<AuthConfig>) -> Self {
        Self { user_repo, config }
    }

    /// Unknown email and wrong password both end in
    /// [`AuthError::InvalidCredentials`], after the same amount of Argon2 work.
    pub async fn execute(&self, input: SignInInput) -> AuthResult<SignInOutput> {
        let email = Email::new(input.email)?;
        if input.password.is_empty() {
            return Err(AuthError::Validation("Password is required".to_string()));
        }

        // No policy check here: a policy miss is just a wrong password.
        let candidate = ClearTextPassword::new_unchecked(input.password);

        let Some(user) = self.user_repo.find_by_email(&email).await? else {
            verify_against_dummy(&candidate);
            return Err(AuthError::InvalidCredentials);
        };

        if !user.password_hash.verify(&candidate) {
            return Err(AuthError::InvalidCredentials);
        }

        let token = token::issue(
            user.id.get(),
            self.config.token_ttl,
            &self.config.token_issuer,
            self.config.token_secret.expose(),
        )?;

        tracing::info!(user_id = %user.id, "User signed in");

        Ok(SignInOutput {
            user_id: user.id,
            token,
            expires_in: self.config.token_ttl,
        })
    }
}
