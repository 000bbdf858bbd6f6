//! Keyword table loading.
//!
//! Keyword sheets come in two shapes. In the column layout every header cell
//! is a category and the cells below it are its keywords. In the row layout
//! each row is one category: its name sits under the domain's label column
//! (`Illness`, `Reasons`, `Symptoms`) and every cell to the right is a keyword.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use ricap_model::{ClassificationDomain, KeywordTable};

use crate::csv_utils::{normalize_cell, normalize_header, read_raw_rows};
use crate::error::{IngestError, Result};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeywordLayout {
    #[default]
    Columns,
    Rows,
}

impl KeywordLayout {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Columns => "columns",
            Self::Rows => "rows",
        }
    }
}

impl fmt::Display for KeywordLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for KeywordLayout {
    type Err = String;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "columns" => Ok(Self::Columns),
            "rows" => Ok(Self::Rows),
            other => Err(format!("unknown keyword layout `{other}` (expected columns or rows)")),
        }
    }
}

/// Reads a keyword table for `domain` from a CSV file.
///
/// # Errors
///
/// Fails when the file cannot be read, has no header row, lacks the label
/// column (row layout), or names a category twice.
pub fn read_keyword_table(
    path: &Path,
    domain: ClassificationDomain,
    layout: KeywordLayout,
) -> Result<KeywordTable> {
    let rows = read_raw_rows(path)?;
    let Some((header, body)) = rows.split_first() else {
        return Err(IngestError::EmptyFile {
            path: path.to_path_buf(),
        });
    };
    let entries = match layout {
        KeywordLayout::Columns => column_entries(header, body),
        KeywordLayout::Rows => row_entries(path, domain, header, body)?,
    };
    let table = KeywordTable::new(domain, entries).map_err(|source| IngestError::KeywordTable {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(
        path = %path.display(),
        %domain,
        %layout,
        categories = table.len(),
        "keyword table loaded"
    );
    Ok(table)
}

fn column_entries(header: &[String], body: &[Vec<String>]) -> Vec<(String, Vec<String>)> {
    let mut entries = Vec::new();
    for (idx, raw_name) in header.iter().enumerate() {
        let name = normalize_header(raw_name);
        let keywords = cells_at(body, idx);
        if name.is_empty() {
            if !keywords.is_empty() {
                warn!(column = idx + 1, "keywords under a blank header skipped");
            }
            continue;
        }
        entries.push((name, keywords));
    }
    entries
}

fn cells_at(body: &[Vec<String>], idx: usize) -> Vec<String> {
    body.iter()
        .filter_map(|row| row.get(idx))
        .map(|cell| normalize_cell(cell))
        .filter(|cell| !cell.is_empty())
        .collect()
}

fn row_entries(
    path: &Path,
    domain: ClassificationDomain,
    header: &[String],
    body: &[Vec<String>],
) -> Result<Vec<(String, Vec<String>)>> {
    let label = domain.label_column();
    let label_idx = header
        .iter()
        .position(|cell| normalize_header(cell).eq_ignore_ascii_case(label))
        .ok_or_else(|| IngestError::MissingLabelColumn {
            path: path.to_path_buf(),
            column: label.to_string(),
        })?;

    let mut entries = Vec::new();
    for (line, row) in body.iter().enumerate() {
        let name = row.get(label_idx).map(|cell| normalize_cell(cell)).unwrap_or_default();
        let keywords: Vec<String> = row
            .iter()
            .skip(label_idx + 1)
            .map(|cell| normalize_cell(cell))
            .filter(|cell| !cell.is_empty())
            .collect();
        if name.is_empty() {
            if !keywords.is_empty() {
                // Header is line 1.
                warn!(line = line + 2, "keywords without a category name skipped");
            }
            continue;
        }
        entries.push((name, keywords));
    }
    Ok(entries)
}
