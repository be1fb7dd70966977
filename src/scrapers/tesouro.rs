use reqwest::Client;
use std::time::Duration;

use super::parser::{extract_rate_quotes, extract_row_texts};
use super::{ExtractionConfig, RateQuote, ScraperConfig};

/// Client for the public treasury bond pricing page.
pub struct TesouroScraper {
    client: Client,
    url: String,
}

impl TesouroScraper {
    pub fn new(
        url: String,
        config: &ScraperConfig,
    ) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(Duration::from_secs(config.timeout_secs))
            .gzip(true)
            .deflate(true)
            .brotli(true)
            .build()?;

        Ok(Self { client, url })
    }

    /// Fetch the page and return the text of every table row.
    pub async fn fetch_rows(&self) -> Result<Vec<String>, Box<dyn std::error::Error + Send + Sync>> {
        tracing::info!("Fetching treasury prices from {}", self.url);

        let response = self.client.get(&self.url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(format!("Treasury page returned HTTP {}", status).into());
        }

        let html = response.text().await?;
        let rows = extract_row_texts(&html);

        tracing::info!("Found {} table rows on the treasury page", rows.len());

        Ok(rows)
    }

    /// Fetch the page and run the rate heuristic over its rows.
    pub async fn fetch_quotes(
        &self,
        config: &ExtractionConfig,
    ) -> Result<Vec<RateQuote>, Box<dyn std::error::Error + Send + Sync>> {
        let rows = self.fetch_rows().await?;
        let quotes = extract_rate_quotes(&rows, config);

        tracing::info!("Extracted {} rate quotes from {} rows", quotes.len(), rows.len());

        Ok(quotes)
    }
}
