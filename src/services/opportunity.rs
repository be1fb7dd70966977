use rust_decimal::Decimal;
use serde::Serialize;

use super::projection::{compound, to_money};
use crate::scrapers::RateQuote;

/// How the quoted rate of a treasury bond was turned into a yearly rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RateBasis {
    /// The page quotes the floating bond as a spread; the benchmark was added.
    NominalWithSelic,
    /// Inflation-linked real rate, used as quoted.
    RealPlusIpca,
}

impl RateBasis {
    pub fn description(&self) -> &'static str {
        match self {
            RateBasis::NominalWithSelic => "Nominal (inclui Selic)",
            RateBasis::RealPlusIpca => "Real + Inflação (IPCA)",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TreasuryOpportunity {
    pub title: String,
    pub maturity: String,
    pub site_rate: f64,
    pub considered_rate: f64,
    pub basis: RateBasis,
    pub final_value: Decimal,
    pub profit: Decimal,
}

pub fn build_opportunity(
    quote: &RateQuote,
    benchmark_rate: f64,
    principal: f64,
    years: u32,
) -> TreasuryOpportunity {
    let (considered_rate, basis) = if quote.label.contains("Selic") {
        (quote.rate_percent + benchmark_rate, RateBasis::NominalWithSelic)
    } else {
        (quote.rate_percent, RateBasis::RealPlusIpca)
    };

    let final_value = compound(principal, considered_rate, years);

    TreasuryOpportunity {
        title: quote.label.clone(),
        maturity: quote.maturity_display(),
        site_rate: quote.rate_percent,
        considered_rate,
        basis,
        final_value: to_money(final_value),
        profit: to_money(final_value - principal),
    }
}

/// Build every opportunity and order them by considered rate, best first.
pub fn rank_opportunities(
    quotes: &[RateQuote],
    benchmark_rate: f64,
    principal: f64,
    years: u32,
) -> Vec<TreasuryOpportunity> {
    let mut opportunities: Vec<TreasuryOpportunity> = quotes
        .iter()
        .map(|q| build_opportunity(q, benchmark_rate, principal, years))
        .collect();

    opportunities.sort_by(|a, b| b.considered_rate.total_cmp(&a.considered_rate));
    opportunities
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn quote(label: &str, rate: f64, year: Option<i32>) -> RateQuote {
        RateQuote {
            label: label.to_string(),
            rate_percent: rate,
            maturity_year: year,
        }
    }

    #[test]
    fn test_selic_spread_adds_benchmark() {
        let opp = build_opportunity(&quote("Tesouro Selic 2029", 0.05, Some(2029)), 11.25, 1000.0, 2);
        assert_eq!(opp.basis, RateBasis::NominalWithSelic);
        assert!((opp.considered_rate - 11.30).abs() < 1e-9);
        // 1000 × 1.113^2
        assert_eq!(opp.final_value, dec!(1238.77));
        assert_eq!(opp.maturity, "2029");
    }

    #[test]
    fn test_ipca_keeps_real_rate() {
        let opp = build_opportunity(&quote("Tesouro IPCA+ 2035", 7.0, None), 11.25, 1000.0, 2);
        assert_eq!(opp.basis, RateBasis::RealPlusIpca);
        assert_eq!(opp.considered_rate, 7.0);
        assert_eq!(opp.final_value, dec!(1144.90));
        assert_eq!(opp.profit, dec!(144.90));
        assert_eq!(opp.maturity, "-");
    }

    #[test]
    fn test_rank_by_considered_rate() {
        let quotes = vec![
            quote("Tesouro IPCA+ 2035", 7.0, Some(2035)),
            quote("Tesouro Selic 2029", 0.05, Some(2029)),
            quote("Tesouro IPCA+ 2045", 7.2, Some(2045)),
        ];
        let ranked = rank_opportunities(&quotes, 11.25, 1000.0, 2);
        let titles: Vec<&str> = ranked.iter().map(|o| o.title.as_str()).collect();
        assert_eq!(titles, vec!["Tesouro Selic 2029", "Tesouro IPCA+ 2045", "Tesouro IPCA+ 2035"]);
    }
}
