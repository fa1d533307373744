//! Domain Value Objects
//!
//! Validated post fields and the pagination window.

use kernel::error::app_error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum title length in characters
pub const TITLE_MAX_LENGTH: usize = 255;

/// Post title: trimmed, 1..=255 characters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostTitle(String);

impl PostTitle {
    pub fn new(title: impl AsRef<str>) -> AppResult<Self> {
        let title = title.as_ref().trim();

        if title.is_empty() {
            return Err(AppError::bad_request("Title is required"));
        }
        if title.chars().count() > TITLE_MAX_LENGTH {
            return Err(AppError::bad_request(format!(
                "Title must be at most {} characters",
                TITLE_MAX_LENGTH
            )));
        }

        Ok(Self(title.to_string()))
    }

    pub fn from_db(title: impl Into<String>) -> Self {
        Self(title.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PostTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Post body: anything that is not blank, stored as given
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostContent(String);

impl PostContent {
    pub fn new(content: impl Into<String>) -> AppResult<Self> {
        let content = content.into();
        if content.trim().is_empty() {
            return Err(AppError::bad_request("Content is required"));
        }
        Ok(Self(content))
    }

    pub fn from_db(content: impl Into<String>) -> Self {
        Self(content.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Pagination window for post listings.
///
/// Unparsable or out-of-range values fall back to the defaults rather than
/// failing the request; `limit` is capped at [`Page::MAX_LIMIT`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    number: u32,
    limit: u32,
}

impl Page {
    pub const DEFAULT_NUMBER: u32 = 1;
    pub const DEFAULT_LIMIT: u32 = 5;
    pub const MAX_LIMIT: u32 = 100;

    pub fn new(number: u32, limit: u32) -> Self {
        let number = if number == 0 { Self::DEFAULT_NUMBER } else { number };
        let limit = match limit {
            0 => Self::DEFAULT_LIMIT,
            l => l.min(Self::MAX_LIMIT),
        };
        Self { number, limit }
    }

    /// Build from raw query-string values
    pub fn from_query(page: Option<&str>, limit: Option<&str>) -> Self {
        let parse = |raw: Option<&str>| raw.and_then(|s| s.trim().parse::<u32>().ok()).unwrap_or(0);
        Self::new(parse(page), parse(limit))
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Rows to skip
    pub fn offset(&self) -> u64 {
        u64::from(self.number - 1) * u64::from(self.limit)
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(Self::DEFAULT_NUMBER, Self::DEFAULT_LIMIT)
    }
}
