use axum::{extract::State, Json};

use crate::models::market::ConceptsResponse;
use crate::services::market_data::MarketSnapshot;
use crate::AppState;

pub async fn root() -> &'static str {
    "Renda Fixa Advisor backend"
}

/// Handler for GET /api/market
pub async fn get_market(State(state): State<AppState>) -> Json<MarketSnapshot> {
    Json(state.market.current_snapshot().await)
}

/// Handler for GET /api/concepts
pub async fn get_concepts() -> Json<ConceptsResponse> {
    Json(ConceptsResponse::default())
}
