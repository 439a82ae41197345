//! Request handlers.

mod quotes;
mod system;


use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::error;

use crate::service::ServiceError;

pub use quotes::*;
pub use system::*;

/// Plain-text body returned for every store failure.
pub const SERVER_ERROR_MESSAGE: &str = "Errore server";

/// Handler error: validation failures become 400, store failures 500.
///
/// Both are plain text; the store error itself is only logged.
pub struct HandlerError(ServiceError);

impl From<ServiceError> for HandlerError {
    fn from(err: ServiceError) -> Self {
        Self(err)
    }
}

impl IntoResponse for HandlerError {
    fn into_response(self) -> Response {
        match self.0 {
            ServiceError::Validation { message } => {
                (StatusCode::BAD_REQUEST, message).into_response()
            }
            ServiceError::Store(e) => {
                error!(error = %e, "store access failed");
                (StatusCode::INTERNAL_SERVER_ERROR, SERVER_ERROR_MESSAGE).into_response()
            }
        }
    }
}
