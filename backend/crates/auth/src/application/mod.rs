//! Application Layer
//!
//! Use cases and application services.

pub mod check_session;
pub mod config;
pub mod sign_in;
pub mod sign_up;

// Re-exports
pub use check_session::{Unauthorized, authorize, authorize_at};
pub use config::{AuthConfig, AuthConfigError, SigningSecret};
pub use sign_in::{SignInInput, SignInOutput, SignInUseCase};
pub use sign_up::{SignUpInput, SignUpUseCase};
