//! Shared Kernel
//!
//! The vocabulary every crate in the blog backend agrees on:
//! - [`error::app_error::AppError`] and the [`error::kind::ErrorKind`] taxonomy
//! - Typed integer identifiers ([`id::UserId`], [`id::PostId`])
//!
//! Nothing in here knows about accounts, tokens or posts.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod id;
