use crate::{error::ApiError, state::AppState};
use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::header,
    response::IntoResponse,
    routing::{get, post},
};
use perpcorr_data::{analysis::AnalysisResult, export::to_csv, symbol::Symbol};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::info;

/// Assemble the service router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/pairs", get(pairs))
        .route("/analyze", post(analyze))
        .route("/export/csv", get(export_csv))
        .route("/health", get(health))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PairsResponse {
    pub symbols: Vec<Symbol>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub base: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AnalyzeResponse {
    pub results: Vec<AnalysisResult>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct HealthResponse {
    pub ok: bool,
}

/// GET /pairs
async fn pairs(State(state): State<Arc<AppState>>) -> Result<Json<PairsResponse>, ApiError> {
    let symbols = state.analyzer.pairs().await?;
    Ok(Json(PairsResponse { symbols }))
}

/// POST /analyze
async fn analyze(
    State(state): State<Arc<AppState>>,
    request: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    let Json(request) = request?;
    let base = Symbol::normalised(&request.base);

    let results = state.analyzer.analyze(&base).await?;
    info!(%base, results = results.len(), "analyze request served");

    *state.last_results.write() = results.clone();
    Ok(Json(AnalyzeResponse { results }))
}

/// GET /export/csv
async fn export_csv(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, ApiError> {
    let body = to_csv(&state.last_results.read())
        .map_err(|error| ApiError::Internal(error.to_string()))?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (header::CONTENT_DISPOSITION, "attachment; filename=results.csv"),
        ],
        body,
    ))
}

/// GET /health
async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        ok: state.analyzer.is_available().await,
    })
}
