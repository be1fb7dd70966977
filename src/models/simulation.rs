//! Simulation request/response models
//!
//! Models for the projection and simulation endpoints, plus the investor
//! profile stored with every simulation record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

use crate::entities::simulations;
use crate::services::market_data::MarketSnapshot;
use crate::services::projection::{ProjectionInput, ProjectionRow};

pub const LCI_PERCENT_RANGE: RangeInclusive<f64> = 80.0..=110.0;
pub const CDB_PERCENT_RANGE: RangeInclusive<f64> = 90.0..=150.0;
pub const MAX_HORIZON_YEARS: u32 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InvestorProfile {
    #[default]
    #[serde(rename = "conservador", alias = "Conservador")]
    Conservative,
    #[serde(rename = "moderado", alias = "Moderado")]
    Moderate,
    #[serde(rename = "arrojado", alias = "Arrojado")]
    Aggressive,
}

impl InvestorProfile {
    /// Label stored in the simulation log
    pub fn label(&self) -> &'static str {
        match self {
            InvestorProfile::Conservative => "Conservador",
            InvestorProfile::Moderate => "Moderado",
            InvestorProfile::Aggressive => "Arrojado",
        }
    }

    /// What the client cares about, in the words given to the model
    pub fn context(&self) -> &'static str {
        match self {
            InvestorProfile::Conservative => {
                "Prioriza SEGURANÇA. Tem receio de deixar o dinheiro preso e precisar dele; prefere liquidez a rentabilidade máxima."
            }
            InvestorProfile::Moderate => "Busca equilíbrio entre prazo e retorno.",
            InvestorProfile::Aggressive => {
                "Prioriza LUCRO MÁXIMO. Aceita travar o dinheiro por 5 anos se ganhar mais; renda fixa serve só para vencer a inflação."
            }
        }
    }
}

/// Body for POST /api/projections
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectionRequest {
    pub principal: f64,
    /// Year offsets (defaults to 1 through 5)
    #[serde(default)]
    pub years: Option<Vec<u32>>,
    /// LCI/LCA as % of CDI (defaults to the market suggestion)
    #[serde(default)]
    pub lci_percent: Option<f64>,
    /// CDB as % of CDI (defaults to the market suggestion)
    #[serde(default)]
    pub cdb_percent: Option<f64>,
}

impl ProjectionRequest {
    /// Check the inputs and fill the gaps from the market snapshot.
    pub fn validate(
        &self,
        snapshot: &MarketSnapshot,
        default_years: &[u32],
    ) -> Result<ProjectionInput, String> {
        if !self.principal.is_finite() || self.principal <= 0.0 {
            return Err(format!("Invalid principal: {}. Must be a positive amount", self.principal));
        }

        let lci = self
            .lci_percent
            .unwrap_or(snapshot.lci_default_percent as f64);
        if !LCI_PERCENT_RANGE.contains(&lci) {
            return Err(format!("Invalid lci_percent: {}. Must be between 80 and 110", lci));
        }

        let cdb = self
            .cdb_percent
            .unwrap_or(snapshot.cdb_default_percent as f64);
        if !CDB_PERCENT_RANGE.contains(&cdb) {
            return Err(format!("Invalid cdb_percent: {}. Must be between 90 and 150", cdb));
        }

        let years = self.years.clone().unwrap_or_else(|| default_years.to_vec());
        if years.is_empty() {
            return Err("years must not be empty".to_string());
        }
        if let Some(bad) = years.iter().find(|y| **y == 0 || **y > MAX_HORIZON_YEARS) {
            return Err(format!("Invalid year offset: {}. Must be between 1 and {}", bad, MAX_HORIZON_YEARS));
        }

        Ok(ProjectionInput {
            principal: self.principal,
            benchmark_rate: snapshot.selic,
            years,
            lci_percent_of_cdi: lci,
            cdb_percent_of_cdi: cdb,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ProjectionResponse {
    pub market: MarketSnapshot,
    pub rows: Vec<ProjectionRow>,
}

/// Body for POST /api/simulations
#[derive(Debug, Clone, Deserialize)]
pub struct SimulationRequest {
    #[serde(flatten)]
    pub projection: ProjectionRequest,
    #[serde(default)]
    pub profile: InvestorProfile,
    #[serde(default)]
    pub bank_label: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SimulationResponse {
    pub record_id: i32,
    pub market: MarketSnapshot,
    pub profile: InvestorProfile,
    pub rows: Vec<ProjectionRow>,
    pub analysis: String,
}

/// One stored simulation as returned by the admin listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationRecordEntry {
    pub id: i32,
    pub created_at: DateTime<Utc>,
    pub principal: f64,
    pub investor_profile: String,
    pub benchmark_rate: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bank_label: Option<String>,
    pub analysis_text: String,
}

impl From<simulations::Model> for SimulationRecordEntry {
    fn from(model: simulations::Model) -> Self {
        Self {
            id: model.id,
            created_at: model.created_at,
            principal: model.principal,
            investor_profile: model.investor_profile,
            benchmark_rate: model.benchmark_rate,
            bank_label: model.bank_label,
            analysis_text: model.analysis_text,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationListResponse {
    pub simulations: Vec<SimulationRecordEntry>,
}
