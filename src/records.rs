//! Spreadsheet input: brand records and output file naming
//!
//! Reads the input CSV into [`BrandRecord`]s in row order. The four required
//! header columns are validated up front; a missing column aborts the run
//! before any record is processed.

use serde::Deserialize;
use std::io;
use std::path::Path;

use crate::error::{CardGenError, Result};

/// Required column: brand name
pub const COL_BRAND: &str = "brand";
/// Required column: official website URL
pub const COL_WEBSITE: &str = "website";
/// Required column: Brandfetch logo URL
pub const COL_BRANDFETCH: &str = "brandfetch_logo";
/// Required column: Clearbit logo URL
pub const COL_CLEARBIT: &str = "clearbit_logo";

/// One input row. URL fields may be empty; empty fields are skipped by the
/// fetch chain rather than attempted.
#[derive(Debug, Clone, Deserialize)]
pub struct BrandRecord {
    /// Brand name, also the basis of the output file name
    #[serde(rename = "brand")]
    pub name: String,

    /// Official website URL, used to derive the favicon fallback
    #[serde(rename = "website", default)]
    pub website: String,

    /// Brandfetch logo URL (first priority)
    #[serde(rename = "brandfetch_logo", default)]
    pub brandfetch: String,

    /// Clearbit logo URL (second priority)
    #[serde(rename = "clearbit_logo", default)]
    pub clearbit: String,
}

/// Read all brand records from a CSV file, in row order.
///
/// # Errors
///
/// Returns `CardGenError::Spreadsheet` if the file cannot be opened or a row
/// cannot be parsed, and `CardGenError::MissingColumns` if any required
/// header is absent. Both are fatal to the run.
pub fn read_records(path: &Path) -> Result<Vec<BrandRecord>> {
    let file = std::fs::File::open(path).map_err(|e| {
        CardGenError::spreadsheet(format!("cannot open {}", path.display()), e)
    })?;
    read_records_from(file)
}

/// Read brand records from any CSV reader. Split out from [`read_records`]
/// so parsing is testable without touching the filesystem.
pub fn read_records_from<R: io::Read>(reader: R) -> Result<Vec<BrandRecord>> {
    let mut csv_reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);

    let headers = csv_reader
        .headers()
        .map_err(|e| CardGenError::spreadsheet("cannot read header row", e))?
        .clone();

    let missing: Vec<String> = [COL_BRAND, COL_WEBSITE, COL_BRANDFETCH, COL_CLEARBIT]
        .into_iter()
        .filter(|col| !headers.iter().any(|h| h == *col))
        .map(|col| col.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(CardGenError::MissingColumns { columns: missing });
    }

    let mut records = Vec::new();
    for row in csv_reader.deserialize() {
        let record: BrandRecord =
            row.map_err(|e| CardGenError::spreadsheet("cannot parse row", e))?;
        records.push(record);
    }

    Ok(records)
}

/// Sanitize a brand name into a filesystem-safe slug.
///
/// Lowercases, strips punctuation, and collapses whitespace runs into single
/// underscores. An empty result falls back to `"brand"` so the output file
/// always has a name.
pub fn slugify(value: &str) -> String {
    let cleaned: String = value
        .trim()
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace() || *c == '-' || *c == '_')
        .collect();

    let slug: String = cleaned
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_");

    if slug.is_empty() {
        "brand".to_string()
    } else {
        slug
    }
}
