//! Entity Module

pub mod principal;
pub mod user;

pub use principal::Principal;
pub use user::{NewUser, ProfileUpdate, User};
