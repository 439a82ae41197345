//! Database abstraction layer.
//!
//! This module provides trait-based abstractions for data access,
//! allowing the storage backend to be swapped without changing the
//! quote operations built on top of it.
//!
//! # Architecture
//!
//! - `error`: Storage-agnostic error types
//! - `models`: Domain entities and query types (Quote, NewQuote, QuoteQuery)
//! - `repository`: Trait definitions for data access
//! - `sqlite`: SQLx-backed SQLite implementation

mod error;
mod models;
mod repository;
pub mod sqlite;


pub use error::{DbError, DbResult};
pub use models::*;
pub use repository::*;
pub use sqlite::SqliteDatabase;
