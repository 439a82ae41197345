//! Domain models for the quotes database.
//!
//! These models are storage-agnostic and represent the core entities
//! used throughout the application.

use serde::{Deserialize, Serialize};

/// Store-assigned quote identifier. Never reused after a delete.
pub type QuoteId = i64;

/// A stored quotation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub id: QuoteId,
    pub text: String,
    pub author: String,
    pub is_favorite: bool,
}

/// Input for creating a quote. The store assigns `id` and `is_favorite`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewQuote {
    pub text: String,
    pub author: String,
}

impl NewQuote {
    pub fn new(text: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            author: author.into(),
        }
    }
}

/// Input for setting the favorite flag of a quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetFavorite {
    pub id: QuoteId,
    pub is_favorite: bool,
}

// =============================================================================
// Query Types for Search and Pagination
// =============================================================================

/// A 1-based page window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    /// Page number, starting at 1.
    pub number: u32,
    /// Items per page.
    pub size: u32,
}

impl Page {
    pub const DEFAULT_SIZE: u32 = 20;

    pub fn new(number: u32, size: u32) -> Self {
        Self { number, size }
    }

    /// Number of rows skipped before this page.
    pub fn offset(&self) -> u64 {
        u64::from(self.number.saturating_sub(1)) * u64::from(self.size)
    }
}

/// Query for listing quotes: optional search text plus optional page window.
///
/// Without a page the whole (filtered) collection is returned.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuoteQuery {
    /// Case-insensitive substring matched against `text` OR `author`.
    pub search: Option<String>,
    pub page: Option<Page>,
}

impl QuoteQuery {
    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn page(mut self, number: u32, size: u32) -> Self {
        self.page = Some(Page::new(number, size));
        self
    }

    /// The trimmed search text, or `None` when absent or blank.
    pub fn search_term(&self) -> Option<&str> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

/// Result of a paginated list query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListResult<T> {
    /// The items in this page.
    pub items: Vec<T>,
    /// Total count of all matching items (before pagination).
    pub total: usize,
}
