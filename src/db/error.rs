//! Database error types.
//!
//! This module provides abstracted error types for database operations.
//! It uses miette for fancy diagnostic output and thiserror for derive macros.
//! The error types are storage-backend agnostic.

use miette::Diagnostic;
use thiserror::Error;

/// Database operation errors.
#[derive(Error, Diagnostic, Debug)]
pub enum DbError {
    #[error("Database error: {message}")]
    #[diagnostic(code(citazioni::db::database_error))]
    Database { message: String },

    #[error("Migration error: {message}")]
    #[diagnostic(code(citazioni::db::migration_error))]
    Migration { message: String },

    #[error("Connection error: {message}")]
    #[diagnostic(code(citazioni::db::connection_error))]
    Connection { message: String },

    #[error("Constraint violation: {message}")]
    #[diagnostic(code(citazioni::db::constraint))]
    Constraint { message: String },

    #[error("Store call timed out after {elapsed_ms}ms")]
    #[diagnostic(code(citazioni::db::timeout))]
    Timeout { elapsed_ms: u64 },
}

impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db_err)
                if !matches!(db_err.kind(), sqlx::error::ErrorKind::Other) =>
            {
                DbError::Constraint {
                    message: db_err.message().to_string(),
                }
            }
            sqlx::Error::Io(_) | sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => {
                DbError::Connection {
                    message: err.to_string(),
                }
            }
            _ => DbError::Database {
                message: err.to_string(),
            },
        }
    }
}

/// Result type for database operations.
pub type DbResult<T> = Result<T, DbError>;
