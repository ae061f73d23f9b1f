//! Pipe entry loaders for batch calculation (JSON and CSV)

use std::fs;
use std::path::Path;

use pipeweight_types::{CalculationRequest, Error, Length, PipeEntry, Result};
use serde::Deserialize;

/// Load pipe entries from a JSON file.
///
/// Accepts either a request body (`{"pipesData": [...]}`) or a bare array
/// of entries.
pub fn load_entries_json(path: &Path) -> Result<Vec<PipeEntry>> {
    let content = fs::read_to_string(path)?;
    parse_entries_json(&content)
}

pub fn parse_entries_json(content: &str) -> Result<Vec<PipeEntry>> {
    let value: serde_json::Value = serde_json::from_str(content)?;
    if value.is_array() {
        return Ok(serde_json::from_value(value)?);
    }
    let request: CalculationRequest = serde_json::from_value(value)?;
    Ok(request.pipes_data.unwrap_or_default())
}

#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(default)]
    material: String,
    #[serde(default)]
    thickness: String,
    #[serde(default)]
    shape: String,
    #[serde(default, rename = "pipeType", alias = "pipe_type", alias = "size")]
    pipe_type: String,
    #[serde(default)]
    length: String,
}

impl From<CsvRow> for PipeEntry {
    fn from(row: CsvRow) -> Self {
        PipeEntry {
            material: row.material,
            thickness: row.thickness,
            shape: row.shape,
            pipe_type: row.pipe_type,
            length: Length::parse(&row.length),
        }
    }
}

/// Load pipe entries from a CSV file.
///
/// Expected header: `material,thickness,shape,pipeType,length`
/// (`pipe_type` and `size` are accepted for the fourth column).
pub fn load_entries_csv(path: &Path) -> Result<Vec<PipeEntry>> {
    let content = fs::read_to_string(path)?;
    parse_entries_csv(&content)
}

pub fn parse_entries_csv(content: &str) -> Result<Vec<PipeEntry>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let mut entries = Vec::new();
    for (row_idx, result) in reader.deserialize::<CsvRow>().enumerate() {
        // +2: 0-based index plus header row
        let row: CsvRow =
            result.map_err(|e| Error::Csv(format!("row {}: {}", row_idx + 2, e)))?;
        entries.push(row.into());
    }

    tracing::debug!(count = entries.len(), "loaded pipe entries from CSV");
    Ok(entries)
}
