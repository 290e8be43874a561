pub mod restaurants;

use std::sync::Arc;

use axum::{
    routing::{delete, get},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use common::types::Health;
use service::restaurant::RestaurantStore;

use crate::openapi::ApiDoc;

/// Shared handler state: the store chosen at startup.
#[derive(Clone)]
pub struct ServerState {
    pub store: Arc<dyn RestaurantStore>,
}

impl ServerState {
    pub fn new(store: Arc<dyn RestaurantStore>) -> Self { Self { store } }
}

#[utoipa::path(
    get, path = "/health", tag = "health",
    responses((status = 200, description = "OK", body = crate::openapi::HealthResponse))
)]
pub async fn health() -> Json<Health> {
    Json(Health::ok())
}

/// Build the full application router: health, restaurant CRUD and API docs.
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    let restaurant_routes = Router::new()
        .route("/restaurant", get(restaurants::list).post(restaurants::create))
        .route("/restaurant/find", get(restaurants::find))
        .route("/restaurant/:name", delete(restaurants::delete).patch(restaurants::patch));

    Router::new()
        .route("/health", get(health))
        .merge(restaurant_routes)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                // one INFO span per request with method and path
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                // status code and latency on the way out
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
