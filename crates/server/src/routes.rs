use std::sync::Arc;

use axum::{middleware, routing::get, Json, Router};
use tower_http::trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use common::types::{Health, Welcome};
use service::items::ItemStore;

use crate::metrics;
use crate::openapi::ApiDoc;

pub mod items;

/// Shared handler state. The store is created once at startup and owned
/// by the router for the life of the process.
#[derive(Clone)]
pub struct AppState {
    pub items: Arc<dyn ItemStore>,
}

impl AppState {
    pub fn new(items: Arc<dyn ItemStore>) -> Self {
        Self { items }
    }
}

#[utoipa::path(get, path = "/", tag = "root", responses((status = 200, description = "Greeting", body = crate::openapi::WelcomeDoc)))]
pub async fn root() -> Json<Welcome> {
    Json(Welcome::default())
}

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Build the full application router: item routes, probes, metrics and API docs
pub fn build_router(state: AppState) -> Router {
    metrics::register();

    let api = Router::new()
        .route("/", get(root))
        .route("/items", get(items::list_items).post(items::create_item))
        .route("/items/:item_id", get(items::read_item))
        .route_layer(middleware::from_fn(metrics::track_requests));

    let ops = Router::new()
        .route("/health", get(health))
        .route("/metrics", get(metrics::metrics_handler));

    api.merge(ops)
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/openapi.json", ApiDoc::openapi()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(
                    DefaultOnRequest::new()
                        .level(Level::INFO),
                )
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                // 5xx
                .on_failure(
                    DefaultOnFailure::new()
                        .level(Level::ERROR),
                ),
        )
}
