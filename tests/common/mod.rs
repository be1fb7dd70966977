use async_trait::async_trait;
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use std::sync::{Arc, Mutex};

use rendafixa_backend::config::MarketConfig;
use rendafixa_backend::services::advisor::Advisor;
use rendafixa_backend::services::llm::{LanguageModel, LlmError};
use rendafixa_backend::services::market_data::MarketDataService;
use rendafixa_backend::services::projection::ProjectionEngine;
use rendafixa_backend::AppState;

/// Fresh in-memory database with every migration applied.
/// A single connection keeps every query on the same in-memory database.
pub async fn setup_test_db() -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1).sqlx_logging(false);

    let db = Database::connect(options).await?;
    Migrator::up(&db, None).await?;
    Ok(db)
}

/// Model stand-in that records prompts and returns a canned reply.
pub struct StubModel {
    reply: Result<String, LlmError>,
    pub prompts: Mutex<Vec<String>>,
}

impl StubModel {
    pub fn replying(reply: Result<String, LlmError>) -> Arc<Self> {
        Arc::new(Self {
            reply,
            prompts: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl LanguageModel for StubModel {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.reply.clone()
    }
}

/// Market client pointed at a closed local port, so every snapshot is the fallback.
pub fn offline_market() -> MarketDataService {
    MarketDataService::new(MarketConfig {
        selic_url: "http://127.0.0.1:9/selic".to_string(),
        fallback_selic: 11.25,
        cdi_spread: 0.10,
    })
}

pub async fn test_app_state(model: Arc<StubModel>) -> AppState {
    let db = setup_test_db().await.expect("Failed to set up test DB");

    AppState {
        db,
        market: offline_market(),
        advisor: Advisor::new(model),
        projection: ProjectionEngine::default(),
    }
}
