//! Test doubles for the storage traits.

use std::time::Duration;

use crate::db::{
    Database, DbError, DbResult, ListResult, NewQuote, Quote, QuoteId, QuoteQuery,
    QuoteRepository,
};

/// A database whose every call fails with a connection error.
pub struct FailingDatabase {
    quotes: FailingQuotes,
}

impl FailingDatabase {
    pub fn new() -> Self {
        Self {
            quotes: FailingQuotes,
        }
    }
}

pub struct FailingQuotes;

fn unavailable() -> DbError {
    DbError::Connection {
        message: "database is unavailable".to_string(),
    }
}

impl QuoteRepository for FailingQuotes {
    async fn list(&self, _query: &QuoteQuery) -> DbResult<ListResult<Quote>> {
        Err(unavailable())
    }

    async fn create(&self, _quote: &NewQuote) -> DbResult<Quote> {
        Err(unavailable())
    }

    async fn delete(&self, _id: QuoteId) -> DbResult<bool> {
        Err(unavailable())
    }

    async fn set_favorite(&self, _id: QuoteId, _is_favorite: bool) -> DbResult<Option<Quote>> {
        Err(unavailable())
    }
}

impl Database for FailingDatabase {
    type Quotes = FailingQuotes;

    async fn migrate(&self) -> DbResult<()> {
        Ok(())
    }

    async fn ping(&self) -> DbResult<()> {
        Err(unavailable())
    }

    fn quotes(&self) -> &Self::Quotes {
        &self.quotes
    }
}

/// A database that answers every call after `delay`, with empty results.
pub struct SlowDatabase {
    quotes: SlowQuotes,
}

impl SlowDatabase {
    pub fn new(delay: Duration) -> Self {
        Self {
            quotes: SlowQuotes { delay },
        }
    }
}

pub struct SlowQuotes {
    delay: Duration,
}

impl QuoteRepository for SlowQuotes {
    async fn list(&self, _query: &QuoteQuery) -> DbResult<ListResult<Quote>> {
        tokio::time::sleep(self.delay).await;
        Ok(ListResult {
            items: Vec::new(),
            total: 0,
        })
    }

    async fn create(&self, quote: &NewQuote) -> DbResult<Quote> {
        tokio::time::sleep(self.delay).await;
        Ok(Quote {
            id: 1,
            text: quote.text.clone(),
            author: quote.author.clone(),
            is_favorite: false,
        })
    }

    async fn delete(&self, _id: QuoteId) -> DbResult<bool> {
        tokio::time::sleep(self.delay).await;
        Ok(false)
    }

    async fn set_favorite(&self, _id: QuoteId, _is_favorite: bool) -> DbResult<Option<Quote>> {
        tokio::time::sleep(self.delay).await;
        Ok(None)
    }
}

impl Database for SlowDatabase {
    type Quotes = SlowQuotes;

    async fn migrate(&self) -> DbResult<()> {
        Ok(())
    }

    async fn ping(&self) -> DbResult<()> {
        tokio::time::sleep(self.quotes.delay).await;
        Ok(())
    }

    fn quotes(&self) -> &Self::Quotes {
        &self.quotes
    }
}
