//! Target list input
//!
//! Targets arrive either as the `URL` column of a CSV file or as free text
//! with one URL per line. Normalization happens per target in the scraper.

use crate::error::InputError;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Column holding target URLs in CSV input
pub const URL_COLUMN: &str = "URL";

/// Trim a raw target and prefix `https://` when it has no http(s) scheme
pub fn normalize_target(raw: &str) -> String {
    let trimmed = raw.trim();
    let lower = trimmed.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    }
}

/// Read targets from the `URL` column of CSV data, skipping empty cells
pub fn targets_from_csv<R: Read>(reader: R) -> Result<Vec<String>, InputError> {
    let mut csv_reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);

    let index = csv_reader
        .headers()?
        .iter()
        .position(|h| h == URL_COLUMN)
        .ok_or(InputError::MissingUrlColumn(URL_COLUMN))?;

    let mut targets = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        match record.get(index).map(str::trim) {
            Some(cell) if !cell.is_empty() => targets.push(cell.to_string()),
            _ => {}
        }
    }

    debug!("Read {} targets from CSV", targets.len());
    Ok(targets)
}

/// Read targets from the `URL` column of a CSV file on disk
pub fn targets_from_csv_file(path: impl AsRef<Path>) -> crate::Result<Vec<String>> {
    let file = File::open(path)?;
    Ok(targets_from_csv(file)?)
}

/// Read targets from free text, one per line, skipping blank lines
pub fn targets_from_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
