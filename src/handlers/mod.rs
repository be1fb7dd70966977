pub mod market;
pub mod simulation;

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::models::ErrorResponse;
use crate::AppState;

pub type ApiError = (StatusCode, Json<ErrorResponse>);

pub(crate) fn bad_request(message: String) -> ApiError {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: message,
            code: Some("INVALID_INPUT".to_string()),
        }),
    )
}

/// Unwrap a JSON body, reporting malformed or mistyped input as a 400.
pub(crate) fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    payload
        .map(|Json(value)| value)
        .map_err(|rejection| bad_request(rejection.body_text()))
}

pub(crate) fn internal_error(code: &str, context: &str, e: impl std::fmt::Display) -> ApiError {
    tracing::error!("{}: {}", context, e);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: format!("{}: {}", context, e),
            code: Some(code.to_string()),
        }),
    )
}

/// Every dashboard route, with request tracing and permissive CORS.
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(market::root))
        .route("/api/market", get(market::get_market))
        .route("/api/concepts", get(market::get_concepts))
        .route("/api/projections", post(simulation::post_projections))
        .route(
            "/api/simulations",
            post(simulation::post_simulation).get(simulation::list_simulations),
        )
        .route("/api/simulations/export", get(simulation::export_simulations))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
