//! Append-only log of dashboard simulations

use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, QueryOrder, Set};

use crate::entities::{prelude::*, simulations};

pub const CSV_HEADER: [&str; 7] = [
    "id",
    "created_at",
    "principal",
    "investor_profile",
    "benchmark_rate",
    "bank_label",
    "analysis_text",
];

#[derive(Debug, Clone)]
pub struct NewSimulation {
    pub principal: f64,
    pub investor_profile: String,
    pub benchmark_rate: f64,
    pub analysis_text: String,
    pub bank_label: Option<String>,
}

/// Insert one record, stamped with the current time.
pub async fn record_simulation(
    db: &DatabaseConnection,
    new: NewSimulation,
) -> Result<simulations::Model, DbErr> {
    let record = simulations::ActiveModel {
        created_at: Set(Utc::now()),
        principal: Set(new.principal),
        investor_profile: Set(new.investor_profile),
        benchmark_rate: Set(new.benchmark_rate),
        analysis_text: Set(new.analysis_text),
        bank_label: Set(new.bank_label),
        ..Default::default()
    };

    let model = record.insert(db).await?;

    tracing::info!(
        "Recorded simulation {} ({}, principal {:.2})",
        model.id,
        model.investor_profile,
        model.principal
    );

    Ok(model)
}

/// Every record, most recent first.
pub async fn list_simulations(db: &DatabaseConnection) -> Result<Vec<simulations::Model>, DbErr> {
    Simulations::find()
        .order_by_desc(simulations::Column::CreatedAt)
        .order_by_desc(simulations::Column::Id)
        .all(db)
        .await
}

pub fn export_csv(
    records: &[simulations::Model],
) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(CSV_HEADER)?;

    for record in records {
        writer.write_record([
            record.id.to_string(),
            record.created_at.to_rfc3339(),
            format!("{:.2}", record.principal),
            record.investor_profile.clone(),
            format!("{:.2}", record.benchmark_rate),
            record.bank_label.clone().unwrap_or_default(),
            record.analysis_text.clone(),
        ])?;
    }

    let bytes = writer.into_inner().map_err(|e| e.to_string())?;
    Ok(String::from_utf8(bytes)?)
}
