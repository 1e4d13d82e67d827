//! # API REST
//!
//! REST API implementation for the drug interaction checker.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (JSON serialization, CORS, request tracing)
//!
//! Uses `api-shared` for request/response types and `dic-core` for the data operations.

#![warn(rust_2018_idioms)]

pub mod error;
mod handlers;

use api_shared::{paths, CheckInteractionsReq, Drug, ErrorRes, HealthRes, Interaction};
use axum::{routing::get, Router};
use dic_core::{DrugService, DrugStore};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub use error::ApiError;

/// Application state shared across REST API handlers
///
/// Holds the `DrugService`, which owns the store handle. The handle is passed in at
/// construction time so handlers never reach for process-wide state.
#[derive(Clone)]
pub struct AppState {
    service: DrugService,
}

impl AppState {
    pub fn new(store: Arc<dyn DrugStore>) -> Self {
        Self {
            service: DrugService::new(store),
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::liveness,
        handlers::health,
        handlers::search_drugs,
        handlers::check_interactions,
        handlers::list_interactions,
    ),
    components(schemas(Drug, Interaction, CheckInteractionsReq, ErrorRes, HealthRes))
)]
pub struct ApiDoc;

/// Build the REST router over `state`.
///
/// CORS is permissive so that a browser front-end on another origin can call the API.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(paths::ROOT, get(handlers::liveness))
        .route(paths::HEALTH, get(handlers::health))
        .route(paths::DRUGS, get(handlers::search_drugs))
        .route(
            paths::INTERACTIONS,
            get(handlers::list_interactions).post(handlers::check_interactions),
        )
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
