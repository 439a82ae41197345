//! Repository traits for data access abstraction.
//!
//! These traits define the contract for data access, allowing different
//! storage backends to be swapped without changing business logic.
//!
//! Methods return `Send` futures so that code generic over [`Database`]
//! can run inside axum handlers and spawned tasks.

use std::future::Future;

use crate::db::{
    DbResult,
    models::{ListResult, NewQuote, Quote, QuoteId, QuoteQuery},
};

/// Repository for Quote operations.
///
/// Implementations store what they are given; trimming and validation
/// happen before a call reaches the repository.
pub trait QuoteRepository: Send + Sync {
    /// List quotes ordered by id, filtered and windowed by `query`.
    fn list(&self, query: &QuoteQuery) -> impl Future<Output = DbResult<ListResult<Quote>>> + Send;

    /// Insert a quote with `is_favorite = false` and return the stored row.
    fn create(&self, quote: &NewQuote) -> impl Future<Output = DbResult<Quote>> + Send;

    /// Delete a quote. Returns `false` when no row matched.
    fn delete(&self, id: QuoteId) -> impl Future<Output = DbResult<bool>> + Send;

    /// Set the favorite flag. Returns the updated row, or `None` when no row matched.
    fn set_favorite(
        &self,
        id: QuoteId,
        is_favorite: bool,
    ) -> impl Future<Output = DbResult<Option<Quote>>> + Send;
}

/// Combined database interface.
pub trait Database: Send + Sync + 'static {
    type Quotes: QuoteRepository;

    /// Run pending migrations.
    fn migrate(&self) -> impl Future<Output = DbResult<()>> + Send;

    /// Check that the store answers a trivial query.
    fn ping(&self) -> impl Future<Output = DbResult<()>> + Send;

    /// Get the quote repository.
    fn quotes(&self) -> &Self::Quotes;
}
