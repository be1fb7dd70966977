//! Multi-year net value projection for the three fixed-income products
//!
//! All rates are percentages (`11.25` means 11.25%). Values stay in `f64`
//! through the whole computation and are rounded to cents only when a row is
//! produced.

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::tax::{TaxTable, DAYS_PER_YEAR};
use crate::config::{DEFAULT_CDI_SPREAD, DEFAULT_CUSTODY_FEE_RATE};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductKind {
    /// Government bond tracking the benchmark. Taxed, pays custody.
    TreasurySelic,
    /// Real-estate/agribusiness credit note. Tax exempt.
    TaxExemptNote,
    /// Bank deposit certificate. Taxed, no custody.
    TaxableBankNote,
}

impl ProductKind {
    pub const ALL: [ProductKind; 3] = [
        ProductKind::TreasurySelic,
        ProductKind::TaxExemptNote,
        ProductKind::TaxableBankNote,
    ];
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectionConfig {
    pub tax_table: TaxTable,
    /// Fraction of the gross value charged per year held (0.002 = 0.2%).
    pub custody_fee_rate: f64,
    /// Points subtracted from the benchmark to get the interbank rate.
    pub cdi_spread: f64,
    pub products: Vec<ProductKind>,
    pub default_years: Vec<u32>,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            tax_table: TaxTable::default(),
            custody_fee_rate: DEFAULT_CUSTODY_FEE_RATE,
            cdi_spread: DEFAULT_CDI_SPREAD,
            products: ProductKind::ALL.to_vec(),
            default_years: vec![1, 2, 3, 4, 5],
        }
    }
}

impl ProjectionConfig {
    pub fn new(custody_fee_rate: f64, cdi_spread: f64) -> Self {
        Self {
            custody_fee_rate,
            cdi_spread,
            ..Self::default()
        }
    }

    /// Variant where the notes are indexed to the benchmark itself.
    pub fn flat_cdi() -> Self {
        Self::new(DEFAULT_CUSTODY_FEE_RATE, 0.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectionInput {
    pub principal: f64,
    pub benchmark_rate: f64,
    /// Year offsets; duplicates are ignored and output is ascending.
    pub years: Vec<u32>,
    pub lci_percent_of_cdi: f64,
    pub cdb_percent_of_cdi: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductProjection {
    pub product: ProductKind,
    pub label: String,
    pub gross_value: Decimal,
    pub net_value: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectionRow {
    pub year: u32,
    pub days: u32,
    pub tax_rate_percent: f64,
    pub products: Vec<ProductProjection>,
}

impl ProjectionRow {
    pub fn net_value(&self, product: ProductKind) -> Option<Decimal> {
        self.products
            .iter()
            .find(|p| p.product == product)
            .map(|p| p.net_value)
    }

    pub fn gross_value(&self, product: ProductKind) -> Option<Decimal> {
        self.products
            .iter()
            .find(|p| p.product == product)
            .map(|p| p.gross_value)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ProjectionEngine {
    config: ProjectionConfig,
}

impl ProjectionEngine {
    pub fn new(config: ProjectionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ProjectionConfig {
        &self.config
    }

    /// Interbank rate the notes are indexed to.
    pub fn cdi_rate(&self, benchmark_rate: f64) -> f64 {
        benchmark_rate - self.config.cdi_spread
    }

    pub fn product_label(&self, product: ProductKind, input: &ProjectionInput) -> String {
        match product {
            ProductKind::TreasurySelic => "Tesouro Selic".to_string(),
            ProductKind::TaxExemptNote => format!("LCI ({}% CDI)", input.lci_percent_of_cdi),
            ProductKind::TaxableBankNote => format!("CDB ({}% CDI)", input.cdb_percent_of_cdi),
        }
    }

    /// One row per distinct year offset, ascending.
    pub fn project(&self, input: &ProjectionInput) -> Vec<ProjectionRow> {
        let mut years = input.years.clone();
        years.sort_unstable();
        years.dedup();

        years
            .into_iter()
            .map(|year| self.project_year(input, year))
            .collect()
    }

    fn project_year(&self, input: &ProjectionInput, year: u32) -> ProjectionRow {
        let days = year.saturating_mul(DAYS_PER_YEAR);

        let products = self
            .config
            .products
            .iter()
            .map(|&product| {
                let (gross, net) = self.values_for(product, input, year, days);
                ProductProjection {
                    product,
                    label: self.product_label(product, input),
                    gross_value: to_money(gross),
                    net_value: to_money(net),
                }
            })
            .collect();

        ProjectionRow {
            year,
            days,
            tax_rate_percent: self.config.tax_table.rate_for_years(year),
            products,
        }
    }

    /// Unrounded (gross, net) for one product and horizon.
    fn values_for(&self, product: ProductKind, input: &ProjectionInput, year: u32, days: u32) -> (f64, f64) {
        let principal = input.principal;
        let tax = &self.config.tax_table;

        match product {
            ProductKind::TreasurySelic => {
                let gross = compound(principal, input.benchmark_rate, year);
                let custody_fee = gross * self.config.custody_fee_rate * year as f64;
                let net = gross - tax.tax_on_profit(principal, gross, days) - custody_fee;
                (gross, net)
            }
            ProductKind::TaxExemptNote => {
                let rate = self.cdi_rate(input.benchmark_rate) * (input.lci_percent_of_cdi / 100.0);
                let value = compound(principal, rate, year);
                (value, value)
            }
            ProductKind::TaxableBankNote => {
                let rate = self.cdi_rate(input.benchmark_rate) * (input.cdb_percent_of_cdi / 100.0);
                let gross = compound(principal, rate, year);
                (gross, gross - tax.tax_on_profit(principal, gross, days))
            }
        }
    }
}

/// `principal × (1 + rate/100)^years`
pub fn compound(principal: f64, rate_percent: f64, years: u32) -> f64 {
    let exponent = i32::try_from(years).unwrap_or(i32::MAX);
    principal * (1.0 + rate_percent / 100.0).powi(exponent)
}

/// Round a currency amount to cents, always carrying two decimal places.
pub fn to_money(value: f64) -> Decimal {
    let mut money = Decimal::from_f64(value).unwrap_or_default().round_dp(2);
    money.rescale(2);
    money
}
