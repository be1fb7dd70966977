// src/lib.rs

use sea_orm::DatabaseConnection;
use services::{advisor::Advisor, market_data::MarketDataService, projection::ProjectionEngine};

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub market: MarketDataService,
    pub advisor: Advisor,
    pub projection: ProjectionEngine,
}

pub mod config;
pub mod telemetry;

pub mod entities {
    pub mod prelude;
    pub mod simulations;
}

pub mod scrapers;

pub mod services {
    pub mod tax;
    pub mod projection;
    pub mod market_data;
    pub mod opportunity;
    pub mod text_table;
    pub mod llm;
    pub mod gemini;
    pub mod advisor;
    pub mod mailer;
    pub mod simulation_log;
    pub mod history;
}

pub mod models;
pub mod handlers;
