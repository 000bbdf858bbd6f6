//! Shared CSV reading helpers.

use std::path::Path;

use csv::ReaderBuilder;

use crate::error::{IngestError, Result};

/// Trims a header cell, drops a UTF-8 BOM and collapses inner whitespace.
pub fn normalize_header(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    trimmed.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub fn normalize_cell(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}

/// Reads every record of a CSV file, header row included, without trimming.
///
/// Rows may have different lengths.
pub fn read_raw_rows(path: &Path) -> Result<Vec<Vec<String>>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(|source| IngestError::csv(path, source))?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|source| IngestError::csv(path, source))?;
        rows.push(record.iter().map(str::to_string).collect());
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headers_lose_bom_and_extra_space() {
        assert_eq!(normalize_header("\u{feff} Mood   Disorders "), "Mood Disorders");
        assert_eq!(normalize_header("   "), "");
        assert_eq!(normalize_cell(" adhd\u{feff}"), "adhd");
    }
}
