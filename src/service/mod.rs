//! Quote operations.
//!
//! [`QuotesService`] is the single operation set over a [`Database`]: it
//! validates input at the boundary, bounds every store call with a timeout,
//! and publishes a [`QuoteChange`] after each mutation that touched a row.

mod error;
mod notifier;
mod subscription;

#[cfg(test)]
mod notifier_test;
#[cfg(test)]
pub(crate) mod test_support;

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, instrument};

use crate::db::{
    Database, DbError, DbResult, ListResult, NewQuote, Quote, QuoteId, QuoteQuery,
    QuoteRepository, SetFavorite,
};

pub use error::{ServiceError, ServiceResult};
pub use notifier::{ChangeNotifier, QuoteChange};
pub use subscription::{Subscription, SubscriptionHandle};

/// Default bound on a single store call.
pub const DEFAULT_STORE_TIMEOUT: Duration = Duration::from_secs(5);

/// The quote operations, generic over the storage backend.
pub struct QuotesService<D: Database> {
    db: Arc<D>,
    notifier: ChangeNotifier,
    store_timeout: Duration,
}

// Manual Clone impl - only the Arc is cloned, D need not be Clone
impl<D: Database> Clone for QuotesService<D> {
    fn clone(&self) -> Self {
        Self {
            db: Arc::clone(&self.db),
            notifier: self.notifier.clone(),
            store_timeout: self.store_timeout,
        }
    }
}

impl<D: Database> QuotesService<D> {
    /// Create a service over `db`, publishing changes through `notifier`.
    pub fn new(db: D, notifier: ChangeNotifier) -> Self {
        Self {
            db: Arc::new(db),
            notifier,
            store_timeout: DEFAULT_STORE_TIMEOUT,
        }
    }

    /// Override the per-call store timeout.
    pub fn with_store_timeout(mut self, store_timeout: Duration) -> Self {
        self.store_timeout = store_timeout;
        self
    }

    /// Get a reference to the database.
    pub fn db(&self) -> &D {
        &self.db
    }

    /// Get a reference to the change notifier.
    pub fn notifier(&self) -> &ChangeNotifier {
        &self.notifier
    }

    /// List quotes, optionally filtered by search text and windowed by page.
    ///
    /// `total` always counts the whole filtered set, not just the page.
    #[instrument(skip(self))]
    pub async fn list(&self, query: QuoteQuery) -> ServiceResult<ListResult<Quote>> {
        if let Some(page) = &query.page {
            if page.number < 1 {
                return Err(ServiceError::validation("pagina must be at least 1"));
            }
            if page.size < 1 {
                return Err(ServiceError::validation("per_pagina must be greater than 0"));
            }
        }

        let result = self.bounded(self.db.quotes().list(&query)).await?;
        debug!(returned = result.items.len(), total = result.total, "listed quotes");
        Ok(result)
    }

    /// Create a quote from trimmed `text` and `author`.
    #[instrument(skip(self))]
    pub async fn add(&self, input: NewQuote) -> ServiceResult<Quote> {
        let text = input.text.trim();
        let author = input.author.trim();
        if text.is_empty() {
            return Err(ServiceError::validation("text must not be empty"));
        }
        if author.is_empty() {
            return Err(ServiceError::validation("author must not be empty"));
        }

        let quote = self
            .bounded(self.db.quotes().create(&NewQuote::new(text, author)))
            .await?;
        debug!(id = quote.id, "created quote");

        self.notifier.notify(QuoteChange::Inserted {
            quote: quote.clone(),
        });
        Ok(quote)
    }

    /// Delete a quote. Deleting a missing id succeeds.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: QuoteId) -> ServiceResult<()> {
        validate_id(id)?;

        let removed = self.bounded(self.db.quotes().delete(id)).await?;
        if removed {
            self.notifier.notify(QuoteChange::Deleted { id });
        } else {
            debug!(id, "delete matched no quote");
        }
        Ok(())
    }

    /// Set the favorite flag to the given state. A missing id succeeds.
    #[instrument(skip(self))]
    pub async fn set_favorite(&self, input: SetFavorite) -> ServiceResult<()> {
        validate_id(input.id)?;

        let updated = self
            .bounded(self.db.quotes().set_favorite(input.id, input.is_favorite))
            .await?;
        match updated {
            Some(quote) => self.notifier.notify(QuoteChange::Updated { quote }),
            None => debug!(id = input.id, "favorite update matched no quote"),
        }
        Ok(())
    }

    /// Check that the store is reachable within the store timeout.
    #[instrument(skip(self))]
    pub async fn ping(&self) -> ServiceResult<()> {
        self.bounded(self.db.ping()).await?;
        Ok(())
    }

    /// Open a live feed of every quote change. The caller owns the
    /// subscription and closes it when done.
    pub fn subscribe(&self) -> Subscription {
        debug!(
            subscribers = self.notifier.subscriber_count() + 1,
            "opening quote subscription"
        );
        self.notifier.subscribe()
    }

    async fn bounded<T>(&self, call: impl Future<Output = DbResult<T>>) -> DbResult<T> {
        tokio::time::timeout(self.store_timeout, call)
            .await
            .map_err(|_| DbError::Timeout {
                elapsed_ms: self.store_timeout.as_millis() as u64,
            })?
    }
}

fn validate_id(id: QuoteId) -> ServiceResult<()> {
    if id < 1 {
        return Err(ServiceError::validation("id must be a positive integer"));
    }
    Ok(())
}
