use std::env;

use rendafixa_backend::config::{AppConfig, PipelineArgs};
use rendafixa_backend::scrapers::tesouro::TesouroScraper;
use rendafixa_backend::scrapers::{ExtractionConfig, RateBand, ScraperConfig};
use rendafixa_backend::services::history::{write_records, TreasuryScanRecord};
use rendafixa_backend::services::projection::{compound, to_money};
use rendafixa_backend::services::text_table::render_table;
use rendafixa_backend::telemetry;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // Load environment variables
    dotenvy::dotenv().ok();
    telemetry::init_tracing();

    // Optional [principal] [years]
    let args: Vec<String> = env::args().skip(1).collect();
    let PipelineArgs { principal, years } = match PipelineArgs::from_args(&args) {
        Ok(parsed) => parsed,
        Err(e) => {
            eprintln!("❌ {}", e);
            eprintln!("Usage: cargo run --bin treasury_scan [principal] [years]");
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

    let scraper = TesouroScraper::new(config.sources.tesouro_url.clone(), &ScraperConfig::default())?;
    let mut quotes = scraper
        .fetch_quotes(&ExtractionConfig::with_band(RateBand::NOMINAL))
        .await?;
    drop(scraper);

    if quotes.is_empty() {
        println!("⚠️ No rates found. The page may not render its table as <tr> rows.");
        println!("   -> Hint: check that the page loads without a browser, or try again later.");
        return Ok(());
    }

    quotes.sort_by(|a, b| b.rate_percent.total_cmp(&a.rate_percent));

    let records: Vec<TreasuryScanRecord> = quotes
        .iter()
        .map(|quote| TreasuryScanRecord {
            title: quote.label.clone(),
            maturity: quote.maturity_display(),
            rate_percent: quote.rate_percent,
            profit: format!("R$ {}", to_money(compound(principal, quote.rate_percent, years) - principal)),
        })
        .collect();

    let rows: Vec<Vec<String>> = records
        .iter()
        .map(|r| vec![r.title.clone(), r.maturity.clone(), format!("{}", r.rate_percent), r.profit.clone()])
        .collect();
    let profit_header = format!("Lucro ({} anos)", years);

    println!("\n{}", "=".repeat(60));
    println!("📊 TESOURO DIRETO (Investimento: R$ {:.2})", principal);
    println!("{}", "=".repeat(60));
    println!("{}", render_table(&["Título", "Vencimento", "Taxa (%)", &profit_header], &rows));
    println!("{}", "=".repeat(60));

    write_records(&config.files.treasury_data, &records)?;
    println!("💾 Saved {} rates to {}", records.len(), config.files.treasury_data);

    Ok(())
}
