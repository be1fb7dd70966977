use chrono::Local;

use rendafixa_backend::config::AppConfig;
use rendafixa_backend::scrapers::exchange_rate::ExchangeRateScraper;
use rendafixa_backend::scrapers::ScraperConfig;
use rendafixa_backend::services::history::{append_record, DollarQuoteRecord};
use rendafixa_backend::services::mailer::Mailer;
use rendafixa_backend::telemetry;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
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

    println!("🚀 Starting the dollar quote monitor...");

    let scraper = ExchangeRateScraper::new(config.sources.dollar_url.clone(), &ScraperConfig::default())?;
    let rate = scraper.fetch_commercial_rate().await?;
    let collected_at = Local::now().format("%d/%m/%Y %H:%M").to_string();

    append_record(
        &config.files.dollar_history,
        &DollarQuoteRecord {
            collected_at: collected_at.clone(),
            currency: "Dólar".to_string(),
            value: rate,
        },
    )?;
    println!("💾 History updated: {}", config.files.dollar_history);

    let subject = format!("🤖 Dólar Hoje: R$ {:.4}", rate);
    let body = format!(
        "Olá!\n\n\
         A coleta acabou de rodar.\n\
         💵 Cotação atual do Dólar Comercial: R$ {:.4}\n\
         📅 Data: {}\n\n\
         O histórico em {} já foi atualizado com essa cotação.\n",
        rate, collected_at, config.files.dollar_history
    );

    match config.email() {
        Ok(email) => {
            if let Err(e) = Mailer::new(email.clone()).send(&subject, &body).await {
                tracing::error!("❌ Failed to send email: {}", e);
            }
        }
        Err(e) => tracing::warn!("Skipping email: {}", e),
    }

    Ok(())
}
