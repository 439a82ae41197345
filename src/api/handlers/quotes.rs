//! Quote management handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use utoipa::{IntoParams, ToSchema};

use super::HandlerError;
use crate::api::AppState;
use crate::db::{Database, NewQuote, Page, Quote, QuoteId, QuoteQuery, SetFavorite};

/// Response header carrying the total number of matches across all pages.
pub const TOTAL_COUNT_HEADER: &str = "x-total-count";

// =============================================================================
// DTOs
// =============================================================================

/// Quote response DTO
#[derive(Serialize, ToSchema)]
pub struct QuoteResponse {
    /// Store-assigned identifier
    #[schema(example = 1)]
    pub id: QuoteId,
    #[schema(example = "Be yourself; everyone else is already taken.")]
    pub text: String,
    #[schema(example = "Oscar Wilde")]
    pub author: String,
    #[schema(example = false)]
    pub is_favorite: bool,
}

impl From<Quote> for QuoteResponse {
    fn from(q: Quote) -> Self {
        Self {
            id: q.id,
            text: q.text,
            author: q.author,
            is_favorite: q.is_favorite,
        }
    }
}

/// Create quote request DTO
///
/// `Author` (capitalized) is accepted as an alias of `author`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateQuoteRequest {
    #[schema(example = "Carpe diem")]
    pub text: String,
    #[serde(alias = "Author")]
    #[schema(example = "Horace")]
    pub author: String,
}

/// Favorite flag request DTO
#[derive(Debug, Deserialize, ToSchema)]
pub struct SetFavoriteRequest {
    #[schema(example = true)]
    pub is_favorite: bool,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct ListQuotesQuery {
    /// Case-insensitive search over text and author
    #[param(example = "wilde")]
    pub q: Option<String>,
    /// Page number, starting at 1
    #[param(example = 1)]
    pub pagina: Option<u32>,
    /// Items per page (defaults to 20 when only `pagina` is given)
    #[param(example = 20)]
    pub per_pagina: Option<u32>,
}

impl From<ListQuotesQuery> for QuoteQuery {
    fn from(query: ListQuotesQuery) -> Self {
        let page = match (query.pagina, query.per_pagina) {
            (None, None) => None,
            (number, size) => Some(Page::new(
                number.unwrap_or(1),
                size.unwrap_or(Page::DEFAULT_SIZE),
            )),
        };

        QuoteQuery {
            search: query.q,
            page,
        }
    }
}

// =============================================================================
// Handlers
// =============================================================================

#[utoipa::path(
    get,
    path = "/citazioni",
    tag = "citazioni",
    params(ListQuotesQuery),
    responses(
        (status = 200, description = "Matching quotes", body = [QuoteResponse],
            headers(("x-total-count" = usize, description = "Total matches across all pages"))),
        (status = 400, description = "Invalid pagination", body = String, content_type = "text/plain"),
        (status = 500, description = "Store failure", body = String, content_type = "text/plain")
    )
)]
#[instrument(skip(state))]
pub async fn list_quotes<D: Database>(
    State(state): State<AppState<D>>,
    Query(query): Query<ListQuotesQuery>,
) -> Result<([(&'static str, String); 1], Json<Vec<QuoteResponse>>), HandlerError> {
    let result = state.service().list(query.into()).await?;

    let items: Vec<QuoteResponse> = result.items.into_iter().map(QuoteResponse::from).collect();

    Ok(([(TOTAL_COUNT_HEADER, result.total.to_string())], Json(items)))
}

#[utoipa::path(
    post,
    path = "/citazioni",
    tag = "citazioni",
    request_body = CreateQuoteRequest,
    responses(
        (status = 200, description = "Quote created", body = QuoteResponse),
        (status = 400, description = "Blank text or author", body = String, content_type = "text/plain"),
        (status = 500, description = "Store failure", body = String, content_type = "text/plain")
    )
)]
#[instrument(skip(state))]
pub async fn create_quote<D: Database>(
    State(state): State<AppState<D>>,
    Json(req): Json<CreateQuoteRequest>,
) -> Result<Json<QuoteResponse>, HandlerError> {
    let quote = state
        .service()
        .add(NewQuote::new(req.text, req.author))
        .await?;

    Ok(Json(QuoteResponse::from(quote)))
}

#[utoipa::path(
    delete,
    path = "/citazioni/{id}",
    tag = "citazioni",
    params(("id" = i64, Path, description = "Quote ID")),
    responses(
        (status = 204, description = "Quote deleted, or it did not exist"),
        (status = 400, description = "Malformed id", body = String, content_type = "text/plain"),
        (status = 500, description = "Store failure", body = String, content_type = "text/plain")
    )
)]
#[instrument(skip(state))]
pub async fn delete_quote<D: Database>(
    State(state): State<AppState<D>>,
    Path(id): Path<QuoteId>,
) -> Result<StatusCode, HandlerError> {
    state.service().delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    put,
    path = "/citazioni/{id}/preferito",
    tag = "citazioni",
    params(("id" = i64, Path, description = "Quote ID")),
    request_body = SetFavoriteRequest,
    responses(
        (status = 204, description = "Favorite flag set, or the quote did not exist"),
        (status = 400, description = "Malformed id", body = String, content_type = "text/plain"),
        (status = 500, description = "Store failure", body = String, content_type = "text/plain")
    )
)]
#[instrument(skip(state))]
pub async fn set_favorite<D: Database>(
    State(state): State<AppState<D>>,
    Path(id): Path<QuoteId>,
    Json(req): Json<SetFavoriteRequest>,
) -> Result<StatusCode, HandlerError> {
    state
        .service()
        .set_favorite(SetFavorite {
            id,
            is_favorite: req.is_favorite,
        })
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
