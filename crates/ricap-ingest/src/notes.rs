//! Clinical note table loading.

use std::path::Path;

use tracing::{debug, warn};

use ricap_model::{NoteField, NoteRecord};

use crate::csv_utils::{normalize_header, read_raw_rows};
use crate::error::{IngestError, Result};

/// A headed note CSV kept cell-for-cell for pass-through output.
#[derive(Debug, Clone)]
pub struct NoteTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    field_columns: [Option<usize>; 4],
}

impl NoteTable {
    /// Builds a table from already-parsed cells.
    ///
    /// Returns `None` when none of the note fields has a column.
    pub fn from_parts(headers: Vec<String>, rows: Vec<Vec<String>>) -> Option<Self> {
        let field_columns = NoteField::ALL.map(|field| find_column(&headers, field));
        if field_columns.iter().all(Option::is_none) {
            return None;
        }
        Some(Self {
            headers,
            rows,
            field_columns,
        })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Column index holding `field`, if the file has one.
    pub fn column(&self, field: NoteField) -> Option<usize> {
        self.field_columns[field_slot(field)]
    }

    /// Fields with no column in this file.
    pub fn missing_fields(&self) -> Vec<NoteField> {
        NoteField::ALL
            .into_iter()
            .filter(|field| self.column(*field).is_none())
            .collect()
    }

    /// The note fields of row `row`. Out-of-range rows and short rows yield
    /// absent fields.
    pub fn record(&self, row: usize) -> NoteRecord {
        let cells = self.rows.get(row);
        let mut record = NoteRecord::new();
        for field in NoteField::ALL {
            let value = self
                .column(field)
                .and_then(|idx| cells.and_then(|cells| cells.get(idx)))
                .map(String::as_str);
            record.set(field, value);
        }
        record
    }

    pub fn records(&self) -> Vec<NoteRecord> {
        (0..self.rows.len()).map(|row| self.record(row)).collect()
    }
}

fn field_slot(field: NoteField) -> usize {
    match field {
        NoteField::RefReason => 0,
        NoteField::ChiefComplaint => 1,
        NoteField::AdmissionDiagnosis => 2,
        NoteField::DischargeDiagnosis => 3,
    }
}

fn find_column(headers: &[String], field: NoteField) -> Option<usize> {
    headers
        .iter()
        .position(|header| header.eq_ignore_ascii_case(field.column_name()))
}

/// Reads a note CSV.
///
/// Header cells are normalized; data cells are kept as written.
///
/// # Errors
///
/// Fails when the file cannot be read, is empty, or carries none of the
/// `ref_reason`, `chief_complaint`, `admission_diagnosis` and
/// `discharge_diagnosis` columns.
pub fn read_note_table(path: &Path) -> Result<NoteTable> {
    let mut rows = read_raw_rows(path)?;
    if rows.is_empty() {
        return Err(IngestError::EmptyFile {
            path: path.to_path_buf(),
        });
    }
    let headers: Vec<String> = rows.remove(0).iter().map(|cell| normalize_header(cell)).collect();
    let table = NoteTable::from_parts(headers, rows).ok_or_else(|| IngestError::NoNoteColumns {
        path: path.to_path_buf(),
        expected: NoteField::ALL
            .iter()
            .map(|field| field.column_name())
            .collect::<Vec<_>>()
            .join(", "),
    })?;
    for field in table.missing_fields() {
        warn!(path = %path.display(), column = field.column_name(), "note column missing, field treated as absent");
    }
    debug!(path = %path.display(), rows = table.len(), "note table loaded");
    Ok(table)
}
