//! API route configuration.

use axum::Router;
use axum::http::{Method, header};
use axum::routing::{delete, get, post, put};
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

use super::handlers::{
    self, CreateQuoteRequest, HealthResponse, QuoteResponse, SetFavoriteRequest,
};
use super::state::AppState;
use super::websocket;
use crate::db::Database;

/// Build routes with generic database type.
///
/// This macro reduces boilerplate when registering handlers that are generic
/// over the Database trait. It applies the turbofish operator automatically.
macro_rules! routes {
    ($D:ty => {
        $($method:ident $path:literal => $($handler:ident)::+),* $(,)?
    }) => {{
        let router = Router::new();
        $(
            let router = router.route($path, $method($($handler)::+::<$D>));
        )*
        router
    }};
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Citazioni API",
        version = "0.1.0",
        description = "Quote collection API with search, pagination and realtime changes",
        license(name = "GPL-2.0")
    ),
    paths(
        handlers::health,
        handlers::list_quotes,
        handlers::create_quote,
        handlers::delete_quote,
        handlers::set_favorite,
    ),
    components(
        schemas(
            HealthResponse,
            QuoteResponse,
            CreateQuoteRequest,
            SetFavoriteRequest,
        )
    ),
    tags(
        (name = "system", description = "System health and status endpoints"),
        (name = "citazioni", description = "Quote management endpoints")
    )
)]
pub struct ApiDoc;

/// Create the API router with OpenAPI documentation
pub fn create_router<D: Database>(state: AppState<D>) -> Router {
    let api = ApiDoc::openapi();

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE])
        .expose_headers([header::HeaderName::from_static(
            handlers::TOTAL_COUNT_HEADER,
        )]);

    let system_routes = routes!(D => {
        get "/health" => handlers::health,
    });

    // Quote routes (generic over Database)
    let quote_routes = routes!(D => {
        get "/citazioni" => handlers::list_quotes,
        post "/citazioni" => handlers::create_quote,
        delete "/citazioni/{id}" => handlers::delete_quote,
        put "/citazioni/{id}/preferito" => handlers::set_favorite,
    })
    .layer(cors);

    // Realtime change feed
    let ws_routes = routes!(D => {
        get "/ws" => websocket::ws_handler,
    });

    system_routes
        .merge(quote_routes)
        .merge(ws_routes)
        .merge(Scalar::with_url("/docs", api))
        .with_state(state)
}
