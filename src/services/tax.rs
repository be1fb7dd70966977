//! Regressive withholding tax on fixed-income profits

/// Days counted per year of holding.
pub const DAYS_PER_YEAR: u32 = 365;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TaxBracket {
    /// Inclusive upper bound of the holding period, in days.
    pub max_days: u32,
    pub rate_percent: f64,
}

/// Tax rate schedule that decreases as the holding period grows.
#[derive(Debug, Clone, PartialEq)]
pub struct TaxTable {
    /// Sorted by `max_days`, ascending.
    pub brackets: Vec<TaxBracket>,
    /// Rate once the holding period exceeds every bracket.
    pub long_term_rate_percent: f64,
}

impl Default for TaxTable {
    fn default() -> Self {
        Self {
            brackets: vec![
                TaxBracket { max_days: 180, rate_percent: 22.5 },
                TaxBracket { max_days: 360, rate_percent: 20.0 },
                TaxBracket { max_days: 720, rate_percent: 17.5 },
            ],
            long_term_rate_percent: 15.0,
        }
    }
}

impl TaxTable {
    pub fn rate_for_days(&self, days: u32) -> f64 {
        self.brackets
            .iter()
            .find(|b| days <= b.max_days)
            .map(|b| b.rate_percent)
            .unwrap_or(self.long_term_rate_percent)
    }

    pub fn rate_for_years(&self, years: u32) -> f64 {
        self.rate_for_days(years.saturating_mul(DAYS_PER_YEAR))
    }

    /// Tax owed on the profit part of `gross` only. Losses owe nothing.
    pub fn tax_on_profit(&self, principal: f64, gross: f64, days: u32) -> f64 {
        let profit = (gross - principal).max(0.0);
        profit * (self.rate_for_days(days) / 100.0)
    }
}
