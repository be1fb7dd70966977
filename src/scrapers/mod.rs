pub mod exchange_rate;
pub mod parser;
pub mod tesouro;

use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Shown where a row carried no maturity year.
pub const MISSING_YEAR_PLACEHOLDER: &str = "-";

/// One rate observation extracted from a pricing table row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateQuote {
    pub label: String,
    pub rate_percent: f64,
    pub maturity_year: Option<i32>,
}

impl RateQuote {
    pub fn maturity_display(&self) -> String {
        self.maturity_year
            .map(|y| y.to_string())
            .unwrap_or_else(|| MISSING_YEAR_PLACEHOLDER.to_string())
    }
}

/// Open interval of plausible annual rates, in percent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RateBand {
    pub min: f64,
    pub max: f64,
}

impl RateBand {
    /// Full-rate pages: anything outside 3–20% is a misread.
    pub const NOMINAL: RateBand = RateBand { min: 3.0, max: 20.0 };
    /// Pages that quote the floating bond as a small spread over the benchmark.
    pub const WITH_SPREADS: RateBand = RateBand { min: 0.0, max: 20.0 };

    pub fn contains(&self, rate: f64) -> bool {
        rate > self.min && rate < self.max
    }
}

impl Default for RateBand {
    fn default() -> Self {
        RateBand::NOMINAL
    }
}

#[derive(Debug, Clone)]
pub struct ExtractionConfig {
    /// Case-sensitive substrings; a row must contain at least one.
    pub keywords: Vec<String>,
    pub band: RateBand,
    /// Only 4-digit tokens strictly above this count as a maturity year.
    pub min_maturity_year: i32,
    /// Number of leading tokens used as the quote label.
    pub label_tokens: usize,
}

impl ExtractionConfig {
    pub fn with_band(band: RateBand) -> Self {
        Self {
            band,
            ..Self::default()
        }
    }
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            keywords: vec!["Selic".to_string(), "IPCA+".to_string()],
            band: RateBand::default(),
            min_maturity_year: Utc::now().year() - 1,
            label_tokens: 3,
        }
    }
}

/// Why a row produced no quote.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RejectionReason {
    EmptyRow,
    NoKeywordMatch,
    NoPercentToken,
    /// Percent tokens parsed, but none inside the band. Carries the first one seen.
    OutOfPlausibleBand(f64),
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectionReason::EmptyRow => write!(f, "empty row"),
            RejectionReason::NoKeywordMatch => write!(f, "no keyword match"),
            RejectionReason::NoPercentToken => write!(f, "no parsable percent token"),
            RejectionReason::OutOfPlausibleBand(rate) => {
                write!(f, "rate {}% outside plausible band", rate)
            }
        }
    }
}

#[derive(Clone)]
pub struct ScraperConfig {
    pub user_agent: String,
    pub timeout_secs: u64,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36".to_string(),
            timeout_secs: 30,
        }
    }
}
