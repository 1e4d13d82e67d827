use crate::{ApiError, AppState};
use api_shared::{
    CheckInteractionsReq, Drug, DrugSearchParams, HealthRes, HealthService, Interaction,
    LIVENESS_MESSAGE,
};
use axum::{
    extract::{rejection::JsonRejection, Query, State},
    response::Json,
};

#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Liveness text", body = String, content_type = "text/plain")
    )
)]
/// Plain-text liveness endpoint.
pub async fn liveness() -> &'static str {
    LIVENESS_MESSAGE
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint for the REST API
///
/// Used for monitoring and load balancer health checks.
pub async fn health() -> Json<HealthRes> {
    Json(HealthService::check_health())
}

#[utoipa::path(
    get,
    path = "/drugs",
    params(DrugSearchParams),
    responses(
        (status = 200, description = "Drugs whose name contains the term", body = [Drug]),
        (status = 500, description = "Store failure", body = ErrorRes)
    )
)]
/// Search drugs by name
///
/// Matches a case-insensitive substring of the drug name. A missing or empty `q` returns
/// every drug.
pub async fn search_drugs(
    State(state): State<AppState>,
    Query(params): Query<DrugSearchParams>,
) -> Result<Json<Vec<Drug>>, ApiError> {
    let drugs = state
        .service
        .search_drugs(params.term())
        .await
        .map_err(ApiError::Search)?;
    Ok(Json(drugs))
}

#[utoipa::path(
    post,
    path = "/interactions",
    request_body = CheckInteractionsReq,
    responses(
        (status = 200, description = "One interaction per drug pair that has one", body = [Interaction]),
        (status = 500, description = "Store failure or malformed body", body = ErrorRes)
    )
)]
/// Check interactions among the given drugs
///
/// Every pair of ids is looked up and the results are deduplicated by unordered pair.
/// A malformed body is reported as a 500 like any other failure.
pub async fn check_interactions(
    State(state): State<AppState>,
    payload: Result<Json<CheckInteractionsReq>, JsonRejection>,
) -> Result<Json<Vec<Interaction>>, ApiError> {
    let Json(req) = payload.map_err(ApiError::MalformedCheck)?;
    let interactions = state
        .service
        .check_interactions(&req.drugs)
        .await
        .map_err(ApiError::Check)?;
    Ok(Json(interactions))
}

#[utoipa::path(
    get,
    path = "/interactions",
    responses(
        (status = 200, description = "Every stored interaction", body = [Interaction]),
        (status = 500, description = "Store failure", body = ErrorRes)
    )
)]
/// List every stored interaction, unfiltered.
pub async fn list_interactions(
    State(state): State<AppState>,
) -> Result<Json<Vec<Interaction>>, ApiError> {
    let interactions = state
        .service
        .list_interactions()
        .await
        .map_err(ApiError::List)?;
    Ok(Json(interactions))
}
