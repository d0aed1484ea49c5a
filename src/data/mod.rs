//! Restaurant snapshot loading
//!
//! The snapshot is a CSV export with Korean column headers. Text columns that
//! are missing or empty load as empty strings; coordinates that are missing or
//! unparsable load as `None`.


use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

/// One certified restaurant row from the snapshot
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RestaurantRecord {
    #[serde(rename = "업소명", default)]
    pub name: String,
    #[serde(rename = "업종", default)]
    pub category: String,
    #[serde(rename = "도로명주소", default)]
    pub road_address: String,
    #[serde(rename = "지번주소", default)]
    pub lot_address: String,
    #[serde(rename = "전화번호", default)]
    pub phone: String,
    #[serde(rename = "위도", default, deserialize_with = "csv::invalid_option")]
    pub latitude: Option<f64>,
    #[serde(rename = "경도", default, deserialize_with = "csv::invalid_option")]
    pub longitude: Option<f64>,
}

impl RestaurantRecord {
    /// Road address, falling back to the lot address when it is empty
    #[inline]
    pub fn address(&self) -> &str {
        if self.road_address.trim().is_empty() {
            &self.lot_address
        } else {
            &self.road_address
        }
    }

    /// `(latitude, longitude)` when both are present
    #[inline]
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        self.latitude.zip(self.longitude)
    }
}

/// Load every record of a CSV snapshot from disk
#[inline]
pub fn load_records<P: AsRef<Path>>(path: P) -> Result<Vec<RestaurantRecord>> {
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("Failed to open restaurant data: {}", path.display()))?;

    let records = read_records(file)
        .with_context(|| format!("Failed to parse restaurant data: {}", path.display()))?;

    info!("Loaded {} restaurants from {}", records.len(), path.display());
    Ok(records)
}

/// Parse records from any CSV reader
#[inline]
pub fn read_records<R: Read>(reader: R) -> Result<Vec<RestaurantRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader
        .headers()
        .context("Failed to read CSV header")?
        .clone();

    let mut records = Vec::new();
    for (row, result) in reader.records().enumerate() {
        // Header is line 1
        let line = row + 2;
        let mut fields = result.with_context(|| format!("Malformed row at line {line}"))?;

        // Short rows read their missing trailing columns as empty
        fields.truncate(headers.len());
        while fields.len() < headers.len() {
            fields.push_field("");
        }

        let record: RestaurantRecord = fields
            .deserialize(Some(&headers))
            .with_context(|| format!("Malformed row at line {line}"))?;
        records.push(record);
    }

    debug!("Parsed {} restaurant rows", records.len());
    Ok(records)
}

/// Records that can be placed on a map
#[inline]
pub fn with_coordinates(records: &[RestaurantRecord]) -> Vec<&RestaurantRecord> {
    records
        .iter()
        .filter(|record| record.coordinates().is_some())
        .collect()
}

/// Distinct non-empty categories, sorted
#[inline]
pub fn categories(records: &[RestaurantRecord]) -> Vec<String> {
    let mut categories: Vec<String> = records
        .iter()
        .map(|record| record.category.trim())
        .filter(|category| !category.is_empty())
        .map(str::to_string)
        .collect();
    categories.sort();
    categories.dedup();
    categories
}
