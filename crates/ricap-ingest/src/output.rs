//! Result columns and output files.
//!
//! Result columns are appended after the source columns, in this order:
//!
//! 1. per diagnostic type: `main_<code>`, `main_<code>_review`, then one
//!    `<code>_<illness>` indicator per illness;
//! 2. one `mrr_<reason>` indicator per referral reason, plus the fallback
//!    category when the referral table does not list it;
//! 3. one `<symptom>` indicator per symptom.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use csv::WriterBuilder;
use tracing::{info, warn};

use ricap_model::{CategorySet, DiagnosisResult, DiagnosticType, KeywordTable, RowClassification};

use crate::error::{IngestError, Result};
use crate::notes::NoteTable;

/// Timestamp format of output file names.
pub const OUTPUT_TIMESTAMP_FORMAT: &str = "%m-%d-%Y_%H-%M-%S";

/// Column layout of the classification result.
#[derive(Debug, Clone)]
pub struct OutputLayout<'a> {
    illness: &'a KeywordTable,
    referral: &'a KeywordTable,
    symptom: &'a KeywordTable,
    referral_fallback: &'a str,
}

impl<'a> OutputLayout<'a> {
    pub fn new(
        illness: &'a KeywordTable,
        referral: &'a KeywordTable,
        symptom: &'a KeywordTable,
        referral_fallback: &'a str,
    ) -> Self {
        Self {
            illness,
            referral,
            symptom,
            referral_fallback,
        }
    }

    fn referral_names(&self) -> Vec<&'a str> {
        let mut names: Vec<&str> = self.referral.category_names().collect();
        if !self.referral.contains(self.referral_fallback) {
            names.push(self.referral_fallback);
        }
        names
    }

    pub fn headers(&self) -> Vec<String> {
        let mut headers = Vec::new();
        for diagnostic_type in DiagnosticType::ALL {
            let code = diagnostic_type.short_code();
            headers.push(format!("main_{code}"));
            headers.push(format!("main_{code}_review"));
            headers.extend(self.illness.category_names().map(|name| format!("{code}_{name}")));
        }
        headers.extend(self.referral_names().into_iter().map(|name| format!("mrr_{name}")));
        headers.extend(self.symptom.category_names().map(str::to_string));
        headers
    }

    /// Result cells for one row, aligned with [`headers`](Self::headers).
    pub fn cells(&self, row: &RowClassification) -> Vec<String> {
        let mut cells = Vec::new();
        for diagnostic_type in DiagnosticType::ALL {
            let result = match diagnostic_type {
                DiagnosticType::Admission => row.admission.as_ref(),
                DiagnosticType::Discharge => row.discharge.as_ref(),
            };
            self.push_diagnosis(&mut cells, result);
        }
        push_indicators(&mut cells, self.referral_names(), &row.referral_reasons);
        push_indicators(&mut cells, self.symptom.category_names(), &row.symptoms);
        cells
    }

    fn push_diagnosis(&self, cells: &mut Vec<String>, result: Option<&DiagnosisResult>) {
        let main = result.and_then(|diagnosis| diagnosis.main.value());
        let review = result.and_then(|diagnosis| diagnosis.main.review_flag());
        cells.push(main.unwrap_or_default());
        cells.push(review.map(|flag| flag.as_str().to_string()).unwrap_or_default());
        let empty = CategorySet::new();
        let found = result.map_or(&empty, |diagnosis| &diagnosis.categories);
        push_indicators(cells, self.illness.category_names(), found);
    }
}

fn push_indicators<'n>(
    cells: &mut Vec<String>,
    names: impl IntoIterator<Item = &'n str>,
    found: &CategorySet,
) {
    cells.extend(names.into_iter().map(|name| indicator(found.contains(name))));
}

fn indicator(present: bool) -> String {
    let value = if present { "1" } else { "0" };
    value.to_string()
}

/// `output-<MM-DD-YYYY_HH-MM-SS>.<extension>`
pub fn output_file_name(timestamp: &DateTime<Local>, extension: &str) -> String {
    format!("output-{}.{extension}", timestamp.format(OUTPUT_TIMESTAMP_FORMAT))
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|source| IngestError::io(parent, source))?;
    }
    Ok(())
}

/// Writes the source table with the result columns appended.
///
/// Source rows are padded or cut to the header width first.
///
/// # Errors
///
/// Fails when `results` does not have one entry per note row or the file
/// cannot be written.
pub fn write_results_csv(
    path: &Path,
    notes: &NoteTable,
    results: &[RowClassification],
    layout: &OutputLayout<'_>,
) -> Result<()> {
    if notes.len() != results.len() {
        return Err(IngestError::RowCountMismatch {
            rows: notes.len(),
            results: results.len(),
        });
    }
    ensure_parent_dir(path)?;
    let mut writer = WriterBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(|source| IngestError::csv(path, source))?;

    let mut header = notes.headers.clone();
    header.extend(layout.headers());
    writer
        .write_record(&header)
        .map_err(|source| IngestError::csv(path, source))?;

    let width = notes.headers.len();
    for (row, (source_row, result)) in notes.rows.iter().zip(results).enumerate() {
        let mut record = source_row.clone();
        if record.len() > width {
            let extra = record[width..].iter().filter(|cell| !cell.trim().is_empty()).count();
            warn!(
                path = %path.display(),
                // Header is line 1.
                line = row + 2,
                cells = record.len() - width,
                non_blank = extra,
                "cells beyond the header dropped"
            );
        }
        // Result cells always start right after the source headers.
        record.resize(width, String::new());
        record.extend(layout.cells(result));
        writer
            .write_record(&record)
            .map_err(|source| IngestError::csv(path, source))?;
    }
    writer.flush().map_err(|source| IngestError::io(path, source))?;
    info!(path = %path.display(), rows = results.len(), "results written");
    Ok(())
}

/// Writes the per-row classifications as pretty JSON.
pub fn write_results_json(path: &Path, results: &[RowClassification]) -> Result<()> {
    ensure_parent_dir(path)?;
    let file = File::create(path).map_err(|source| IngestError::io(path, source))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, results).map_err(|source| IngestError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    writer.flush().map_err(|source| IngestError::io(path, source))?;
    info!(path = %path.display(), rows = results.len(), "results written");
    Ok(())
}

/// CSV and JSON output paths sharing one timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub csv: PathBuf,
    pub json: PathBuf,
}

impl OutputPaths {
    pub fn new(dir: &Path, timestamp: &DateTime<Local>) -> Self {
        Self {
            csv: dir.join(output_file_name(timestamp, "csv")),
            json: dir.join(output_file_name(timestamp, "json")),
        }
    }
}
