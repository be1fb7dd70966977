use moka::future::Cache;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

use crate::config::MarketConfig;

const SNAPSHOT_CACHE_KEY: &str = "selic_snapshot";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RateSource {
    CentralBank,
    Fallback,
}

/// Benchmark rates plus the note percentages the dashboard starts from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarketSnapshot {
    pub selic: f64,
    pub cdi: f64,
    pub lci_default_percent: u32,
    pub cdb_default_percent: u32,
    pub source: RateSource,
}

impl MarketSnapshot {
    /// With a high benchmark (above 10%) banks pay a smaller share of CDI.
    pub fn from_selic(selic: f64, cdi_spread: f64, source: RateSource) -> Self {
        let (lci_default_percent, cdb_default_percent) = if selic > 10.0 { (88, 105) } else { (92, 110) };

        Self {
            selic,
            cdi: selic - cdi_spread,
            lci_default_percent,
            cdb_default_percent,
            source,
        }
    }
}

#[derive(Debug, Deserialize)]
struct SgsEntry {
    valor: serde_json::Value,
}

/// Read the rate from an SGS time-series body: `[{"data": "...", "valor": "15.00"}]`.
pub fn parse_sgs_response(body: &str) -> Result<f64, Box<dyn std::error::Error + Send + Sync>> {
    let entries: Vec<SgsEntry> = serde_json::from_str(body)?;
    let first = entries.into_iter().next().ok_or("Empty SGS series")?;

    let rate = match &first.valor {
        serde_json::Value::String(s) => s.trim().replace(',', ".").parse::<f64>()?,
        serde_json::Value::Number(n) => n.as_f64().ok_or("Invalid SGS number")?,
        other => return Err(format!("Unexpected SGS value: {}", other).into()),
    };

    if !rate.is_finite() {
        return Err("Non-finite SGS value".into());
    }

    Ok(rate)
}

#[derive(Clone)]
pub struct MarketDataService {
    client: Client,
    config: MarketConfig,
    cache: Arc<Cache<String, MarketSnapshot>>,
}

impl MarketDataService {
    pub fn new(config: MarketConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(1)
            .time_to_live(Duration::from_secs(3600)) // 1 hour TTL
            .build();

        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_default();

        Self {
            client,
            config,
            cache: Arc::new(cache),
        }
    }

    /// Latest benchmark rate from the central bank.
    pub async fn fetch_selic(&self) -> Result<f64, Box<dyn std::error::Error + Send + Sync>> {
        tracing::info!("Fetching Selic from {}", self.config.selic_url);

        let response = self
            .client
            .get(&self.config.selic_url)
            .header("accept", "application/json")
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await?;
            return Err(format!("Central bank API error {}: {}", status, error_text).into());
        }

        let body = response.text().await?;
        parse_sgs_response(&body)
    }

    /// Current snapshot. Never fails: falls back to the configured rate.
    pub async fn current_snapshot(&self) -> MarketSnapshot {
        if let Some(cached) = self.cache.get(SNAPSHOT_CACHE_KEY).await {
            tracing::debug!("Cache hit for {}", SNAPSHOT_CACHE_KEY);
            return cached;
        }

        match self.fetch_selic().await {
            Ok(selic) => {
                let snapshot = MarketSnapshot::from_selic(selic, self.config.cdi_spread, RateSource::CentralBank);
                self.cache
                    .insert(SNAPSHOT_CACHE_KEY.to_string(), snapshot.clone())
                    .await;
                snapshot
            }
            Err(e) => {
                tracing::warn!(
                    "Failed to fetch Selic ({}), using fallback {}%",
                    e,
                    self.config.fallback_selic
                );
                MarketSnapshot::from_selic(self.config.fallback_selic, self.config.cdi_spread, RateSource::Fallback)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_string_value() {
        let body = r#"[{"data":"17/10/2025","valor":"15.00"}]"#;
        assert_eq!(parse_sgs_response(body).unwrap(), 15.0);
    }

    #[test]
    fn test_parse_numeric_value() {
        let body = r#"[{"data":"17/10/2025","valor":10.5}]"#;
        assert_eq!(parse_sgs_response(body).unwrap(), 10.5);
    }

    #[test]
    fn test_parse_failures() {
        assert!(parse_sgs_response("[]").is_err());
        assert!(parse_sgs_response("not json").is_err());
        assert!(parse_sgs_response(r#"[{"valor":"n/a"}]"#).is_err());
        assert!(parse_sgs_response(r#"[{"valor":null}]"#).is_err());
    }

    #[test]
    fn test_snapshot_defaults_for_high_selic() {
        let snapshot = MarketSnapshot::from_selic(11.25, 0.10, RateSource::CentralBank);
        assert!((snapshot.cdi - 11.15).abs() < 1e-9);
        assert_eq!(snapshot.lci_default_percent, 88);
        assert_eq!(snapshot.cdb_default_percent, 105);
    }

    #[test]
    fn test_snapshot_defaults_for_low_selic() {
        let snapshot = MarketSnapshot::from_selic(9.5, 0.10, RateSource::CentralBank);
        assert_eq!(snapshot.lci_default_percent, 92);
        assert_eq!(snapshot.cdb_default_percent, 110);

        // Exactly 10 is not "above 10"
        let snapshot = MarketSnapshot::from_selic(10.0, 0.10, RateSource::CentralBank);
        assert_eq!(snapshot.lci_default_percent, 92);
    }

    #[tokio::test]
    async fn test_unreachable_api_falls_back() {
        let service = MarketDataService::new(MarketConfig {
            selic_url: "http://127.0.0.1:9/selic".to_string(),
            fallback_selic: 11.25,
            cdi_spread: 0.10,
        });

        let snapshot = service.current_snapshot().await;
        assert_eq!(snapshot.selic, 11.25);
        assert_eq!(snapshot.source, RateSource::Fallback);
    }
}
