//! Service error types.

use miette::Diagnostic;
use thiserror::Error;

use crate::db::DbError;

/// Errors returned by quote operations.
///
/// Every store failure is collapsed into `Store`; callers get no finer
/// categorization of what went wrong in the persistence layer.
#[derive(Error, Diagnostic, Debug)]
pub enum ServiceError {
    #[error("Invalid input: {message}")]
    #[diagnostic(code(citazioni::service::validation))]
    Validation { message: String },

    #[error("Store access failed: {0}")]
    #[diagnostic(code(citazioni::service::store))]
    Store(#[from] DbError),
}

impl ServiceError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
}

/// Result type for service operations.
pub type ServiceResult<T> = Result<T, ServiceError>;
