use sea_orm::Database;
use sea_orm_migration::MigratorTrait;
use std::sync::Arc;

use rendafixa_backend::config::AppConfig;
use rendafixa_backend::handlers::app_router;
use rendafixa_backend::services::advisor::Advisor;
use rendafixa_backend::services::gemini::GeminiClient;
use rendafixa_backend::services::market_data::MarketDataService;
use rendafixa_backend::services::projection::{ProjectionConfig, ProjectionEngine};
use rendafixa_backend::{telemetry, AppState};

#[tokio::main]
async fn main() {
    // Load environment variables
    dotenvy::dotenv().ok();

    telemetry::init_tracing();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    let api_key = match config.gemini.require_api_key() {
        Ok(key) => key.to_string(),
        Err(e) => {
            eprintln!("⚠️ {}", e);
            std::process::exit(1);
        }
    };

    // Connect to database
    tracing::info!("Connecting to database...");
    let db = Database::connect(&config.database_url)
        .await
        .expect("Failed to connect to database");

    // Run migrations
    tracing::info!("Running migrations...");
    migration::Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    let model = GeminiClient::from_config(&config.gemini, &api_key);

    let state = AppState {
        db,
        market: MarketDataService::new(config.market.clone()),
        advisor: Advisor::new(Arc::new(model)),
        projection: ProjectionEngine::new(ProjectionConfig::new(
            config.custody_fee_rate,
            config.market.cdi_spread,
        )),
    };

    let app = app_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.server_addr)
        .await
        .expect("Failed to bind server address");

    tracing::info!("Server listening on {}", config.server_addr);

    axum::serve(listener, app).await.expect("Server error");
}
