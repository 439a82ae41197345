//! Application state for the API server.

use crate::db::Database;
use crate::service::QuotesService;

/// Shared application state.
///
/// Generic over `D: Database`; the service (and through it the database and
/// change notifier) is injected via the constructor, never created here.
pub struct AppState<D: Database> {
    service: QuotesService<D>,
}

// Manual Clone impl - QuotesService clones its Arc, D need not be Clone
impl<D: Database> Clone for AppState<D> {
    fn clone(&self) -> Self {
        Self {
            service: self.service.clone(),
        }
    }
}

impl<D: Database> AppState<D> {
    pub fn new(service: QuotesService<D>) -> Self {
        Self { service }
    }

    /// Get a reference to the quote service.
    pub fn service(&self) -> &QuotesService<D> {
        &self.service
    }
}
