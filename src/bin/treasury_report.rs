use std::env;
use std::sync::Arc;
use std::time::Instant;

use rendafixa_backend::config::{AppConfig, PipelineArgs};
use rendafixa_backend::scrapers::tesouro::TesouroScraper;
use rendafixa_backend::scrapers::{ExtractionConfig, RateBand, ScraperConfig};
use rendafixa_backend::services::advisor::{opportunity_table, Advisor};
use rendafixa_backend::services::gemini::GeminiClient;
use rendafixa_backend::services::mailer::Mailer;
use rendafixa_backend::services::market_data::MarketDataService;
use rendafixa_backend::services::opportunity::rank_opportunities;
use rendafixa_backend::telemetry;

const REPORT_SUBJECT: &str = "💰 Relatório Diário: Oportunidades no Tesouro";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // Load environment variables
    dotenvy::dotenv().ok();
    telemetry::init_tracing();

    let started = Instant::now();

    let args: Vec<String> = env::args().skip(1).collect();
    let PipelineArgs { principal, years } = match PipelineArgs::from_args(&args) {
        Ok(parsed) => parsed,
        Err(e) => {
            eprintln!("❌ {}", e);
            eprintln!("Usage: cargo run --bin treasury_report [principal] [years]");
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

    // 1. Collect
    println!("🕵️ Collecting treasury rates...");
    let quotes = {
        let scraper = TesouroScraper::new(config.sources.tesouro_url.clone(), &ScraperConfig::default())?;
        match scraper
            .fetch_quotes(&ExtractionConfig::with_band(RateBand::WITH_SPREADS))
            .await
        {
            Ok(quotes) => quotes,
            Err(e) => {
                tracing::error!("❌ Collection failed: {}", e);
                Vec::new()
            }
        }
    };

    if quotes.is_empty() {
        println!("⚠️ No rates found. The page may have changed or blocked the request.");
    } else {
        let snapshot = MarketDataService::new(config.market.clone()).current_snapshot().await;
        let opportunities = rank_opportunities(&quotes, snapshot.selic, principal, years);
        println!("   -> Found {} opportunities.", opportunities.len());
        println!("{}", opportunity_table(&opportunities));

        // 2. Analyze
        println!("🧠 Sending the opportunities to the model...");
        let advisor = Advisor::new(Arc::new(GeminiClient::from_config(&config.gemini, api_key)));
        let analysis = advisor
            .treasury_report(&opportunities, principal, years, snapshot.selic)
            .await?;

        // 3. Send
        match config.email() {
            Ok(email) => {
                if let Err(e) = Mailer::new(email.clone()).send(REPORT_SUBJECT, &analysis).await {
                    tracing::error!("❌ Failed to send email: {}", e);
                }
            }
            Err(e) => tracing::warn!("Skipping email: {}", e),
        }
    }

    println!("🏁 Finished in {:.2} seconds.", started.elapsed().as_secs_f64());
    Ok(())
}
