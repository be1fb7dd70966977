use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};

use super::{bad_request, internal_error, json_body, ApiError};
use crate::models::simulation::{
    ProjectionRequest, ProjectionResponse, SimulationListResponse, SimulationRecordEntry,
    SimulationRequest, SimulationResponse,
};
use crate::services::simulation_log::{self, NewSimulation};
use crate::AppState;

const EXPORT_FILENAME: &str = "simulacoes.csv";

/// Handler for POST /api/projections
/// Projection rows only: no analysis, nothing stored.
pub async fn post_projections(
    State(state): State<AppState>,
    payload: Result<Json<ProjectionRequest>, JsonRejection>,
) -> Result<Json<ProjectionResponse>, ApiError> {
    let request = json_body(payload)?;
    let market = state.market.current_snapshot().await;
    let input = request
        .validate(&market, &state.projection.config().default_years)
        .map_err(bad_request)?;

    let rows = state.projection.project(&input);

    Ok(Json(ProjectionResponse { market, rows }))
}

/// Handler for POST /api/simulations
pub async fn post_simulation(
    State(state): State<AppState>,
    payload: Result<Json<SimulationRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<SimulationResponse>), ApiError> {
    let request = json_body(payload)?;
    let market = state.market.current_snapshot().await;
    let input = request
        .projection
        .validate(&market, &state.projection.config().default_years)
        .map_err(bad_request)?;

    tracing::info!(
        "Simulating {:.2} for profile {} at Selic {}%",
        input.principal,
        request.profile.label(),
        market.selic
    );

    let rows = state.projection.project(&input);
    let analysis = state.advisor.analyze_projection(&rows, request.profile).await;

    let bank_label = request
        .bank_label
        .map(|label| label.trim().to_string())
        .filter(|label| !label.is_empty());

    let record = simulation_log::record_simulation(
        &state.db,
        NewSimulation {
            principal: input.principal,
            investor_profile: request.profile.label().to_string(),
            benchmark_rate: market.selic,
            analysis_text: analysis.clone(),
            bank_label,
        },
    )
    .await
    .map_err(|e| internal_error("DATABASE_ERROR", "Database error", e))?;

    Ok((
        StatusCode::CREATED,
        Json(SimulationResponse {
            record_id: record.id,
            market,
            profile: request.profile,
            rows,
            analysis,
        }),
    ))
}

/// Handler for GET /api/simulations
pub async fn list_simulations(
    State(state): State<AppState>,
) -> Result<Json<SimulationListResponse>, ApiError> {
    let records = simulation_log::list_simulations(&state.db)
        .await
        .map_err(|e| internal_error("DATABASE_ERROR", "Database error", e))?;

    Ok(Json(SimulationListResponse {
        simulations: records.into_iter().map(SimulationRecordEntry::from).collect(),
    }))
}

/// Handler for GET /api/simulations/export
pub async fn export_simulations(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let records = simulation_log::list_simulations(&state.db)
        .await
        .map_err(|e| internal_error("DATABASE_ERROR", "Database error", e))?;

    let csv = simulation_log::export_csv(&records).map_err(|e| internal_error("EXPORT_ERROR", "Export error", e))?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", EXPORT_FILENAME),
            ),
        ],
        csv,
    ))
}
