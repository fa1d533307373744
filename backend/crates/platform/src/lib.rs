//! Platform Crate - Technical Infrastructure
//!
//! Shared technical foundations for the services:
//! - Cryptographic utilities (HMAC-SHA256, Base64url)
//! - Password hashing (Argon2id)
//! - Session token codec (HS256)
//! - Session cookie carrier

pub mod cookie;
pub mod crypto;
pub mod password;
pub mod token;
