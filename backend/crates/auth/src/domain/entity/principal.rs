//! Authenticated Principal
//!
//! The identity resolved from a verified session token. Lives for exactly one
//! request, in the request extensions.

use kernel::id::UserId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Principal {
    pub subject_id: UserId,
}

impl Principal {
    pub fn new(subject_id: UserId) -> Self {
        Self { subject_id }
    }

    /// Whether this principal owns a resource belonging to `owner`
    pub fn owns(&self, owner: UserId) -> bool {
        self.subject_id == owner
    }
}
