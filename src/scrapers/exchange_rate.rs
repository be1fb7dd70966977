use reqwest::Client;
use scraper::{Html, Selector};
use std::time::Duration;

use super::ScraperConfig;

/// Read the commercial dollar rate from the quote page's `#comercial` input.
///
/// The page renders the value with a decimal comma, e.g. `5,4321`.
pub fn parse_commercial_rate(html: &str) -> Option<f64> {
    let document = Html::parse_document(html);
    let selector = Selector::parse("#comercial").ok()?;

    let element = document.select(&selector).next()?;
    let raw = element
        .value()
        .attr("value")
        .map(str::to_string)
        .unwrap_or_else(|| element.text().collect::<String>());

    raw.trim().replace(',', ".").parse::<f64>().ok()
}

pub struct ExchangeRateScraper {
    client: Client,
    url: String,
}

impl ExchangeRateScraper {
    pub fn new(
        url: String,
        config: &ScraperConfig,
    ) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { client, url })
    }

    pub async fn fetch_commercial_rate(&self) -> Result<f64, Box<dyn std::error::Error + Send + Sync>> {
        tracing::info!("Fetching dollar quote from {}", self.url);

        let response = self.client.get(&self.url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(format!("Quote page returned HTTP {}", status).into());
        }

        let html = response.text().await?;
        parse_commercial_rate(&html).ok_or_else(|| "Commercial rate not found on quote page".into())
    }
}
