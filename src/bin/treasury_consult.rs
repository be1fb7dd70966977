use std::env;
use std::sync::Arc;

use rendafixa_backend::config::{AppConfig, PipelineArgs};
use rendafixa_backend::services::advisor::Advisor;
use rendafixa_backend::services::gemini::GeminiClient;
use rendafixa_backend::services::history::read_table;
use rendafixa_backend::services::market_data::MarketDataService;
use rendafixa_backend::services::text_table::render_table;
use rendafixa_backend::telemetry;


#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // Load environment variables
    dotenvy::dotenv().ok();
    telemetry::init_tracing();

    let args: Vec<String> = env::args().skip(1).collect();
    let PipelineArgs { principal, years } = match PipelineArgs::from_args(&args) {
        Ok(parsed) => parsed,
        Err(e) => {
            eprintln!("❌ {}", e);
            eprintln!("Usage: cargo run --bin treasury_consult [principal] [years]");
            std::process::exit(1);
        }
    };

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    let api_key = match config.gemini.require_api_key() {
        Ok(key) => key,
        Err(e) => {
            eprintln!("⚠️ {}", e);
            std::process::exit(1);
        }
    };

    let (headers, rows) = match read_table(&config.files.treasury_data) {
        Ok(table) => table,
        Err(e) => {
            eprintln!(
                "❌ Could not read '{}' ({}). Run treasury_scan first!",
                config.files.treasury_data, e
            );
            std::process::exit(1);
        }
    };
    println!("✅ Loaded {} rows from {}", rows.len(), config.files.treasury_data);

    let header_refs: Vec<&str> = headers.iter().map(String::as_str).collect();
    let table = render_table(&header_refs, &rows);

    let benchmark = MarketDataService::new(config.market.clone())
        .current_snapshot()
        .await
        .selic;

    let advisor = Advisor::new(Arc::new(GeminiClient::from_config(&config.gemini, api_key)));

    println!("🤖 Asking the model for an analysis...");
    match advisor.consult(&table, benchmark, principal, years).await {
        Ok(reply) => {
            println!("\n{}", "=".repeat(40));
            println!("📧 GENERATED EMAIL:");
            println!("{}", "=".repeat(40));
            println!("{}", reply);
            Ok(())
        }
        Err(e) => {
            tracing::error!("❌ Model call failed: {}", e);
            Err(e.into())
        }
    }
}
