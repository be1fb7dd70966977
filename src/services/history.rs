//! Local CSV files written by the pipeline binaries

use serde::Serialize;
use std::fs::OpenOptions;
use std::path::Path;

type HistoryResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// One row of the treasury scan output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TreasuryScanRecord {
    #[serde(rename = "Título")]
    pub title: String,
    #[serde(rename = "Vencimento")]
    pub maturity: String,
    #[serde(rename = "Taxa (%)")]
    pub rate_percent: f64,
    #[serde(rename = "Lucro (R$)")]
    pub profit: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DollarQuoteRecord {
    #[serde(rename = "Data da Coleta")]
    pub collected_at: String,
    #[serde(rename = "Moeda")]
    pub currency: String,
    #[serde(rename = "Valor")]
    pub value: f64,
}

/// Replace the file with a header plus `records`.
pub fn write_records<T: Serialize>(path: impl AsRef<Path>, records: &[T]) -> HistoryResult<()> {
    let mut writer = csv::Writer::from_path(path.as_ref())?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;

    tracing::info!("Wrote {} records to {}", records.len(), path.as_ref().display());
    Ok(())
}

/// Append one record. The header is written only when the file is new or empty.
pub fn append_record<T: Serialize>(path: impl AsRef<Path>, record: &T) -> HistoryResult<()> {
    let path = path.as_ref();
    let is_new = std::fs::metadata(path).map(|m| m.len() == 0).unwrap_or(true);

    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let mut writer = csv::WriterBuilder::new()
        .has_headers(is_new)
        .from_writer(file);
    writer.serialize(record)?;
    writer.flush()?;

    Ok(())
}

/// Raw header and rows, for rendering a file whose columns are not known up front.
pub fn read_table(path: impl AsRef<Path>) -> HistoryResult<(Vec<String>, Vec<Vec<String>>)> {
    let mut reader = csv::Reader::from_path(path.as_ref())?;
    let headers = reader.headers()?.iter().map(str::to_string).collect();

    let mut rows = Vec::new();
    for row in reader.records() {
        rows.push(row?.iter().map(str::to_string).collect());
    }

    Ok((headers, rows))
}
