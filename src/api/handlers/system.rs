//! Service health handler.

use axum::{Json, extract::State, http::StatusCode};
use serde::Serialize;
use tracing::{instrument, warn};
use utoipa::ToSchema;

use crate::api::AppState;
use crate::db::Database;

/// Health of the service and its store.
#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    /// `ok` when the store answers, `degraded` otherwise
    #[schema(example = "ok")]
    pub status: String,
    /// `reachable` or `unreachable`
    #[schema(example = "reachable")]
    pub store: String,
}

/// Health check endpoint
///
/// Pings the quote store within the configured store timeout.
#[utoipa::path(
    get,
    path = "/health",
    tag = "system",
    responses(
        (status = 200, description = "Store is reachable", body = HealthResponse),
        (status = 503, description = "Store did not answer", body = HealthResponse)
    )
)]
#[instrument(skip(state))]
pub async fn health<D: Database>(
    State(state): State<AppState<D>>,
) -> (StatusCode, Json<HealthResponse>) {
    match state.service().ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(HealthResponse {
                status: "ok".to_string(),
                store: "reachable".to_string(),
            }),
        ),
        Err(e) => {
            warn!(error = %e, "health check could not reach the store");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthResponse {
                    status: "degraded".to_string(),
                    store: "unreachable".to_string(),
                }),
            )
        }
    }
}
