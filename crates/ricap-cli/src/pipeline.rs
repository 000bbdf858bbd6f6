//! Stages of a classification run: load tables, classify notes, write results.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use tracing::{info, info_span, trace};

use ricap_classify::{ClassificationStats, ClassifyOptions, KeywordTables, RowClassifier};
use ricap_ingest::{
    NoteTable, OutputLayout, OutputPaths, read_keyword_table, read_note_table, write_results_csv,
    write_results_json,
};
use ricap_model::{ClassificationDomain, KeywordTable, NoteField, RowClassification};

use crate::config::ResolvedConfig;
use crate::logging::{log_data_enabled, redact_value};
use crate::types::OutputFormat;

pub fn load_keyword_tables(config: &ResolvedConfig) -> Result<KeywordTables> {
    let load = |domain: ClassificationDomain| -> Result<KeywordTable> {
        let path = config.table_path(domain);
        read_keyword_table(path, domain, config.layout)
            .with_context(|| format!("load {domain} keywords from {}", path.display()))
    };
    let tables = KeywordTables::new(
        load(ClassificationDomain::Illness)?,
        load(ClassificationDomain::ReferralReason)?,
        load(ClassificationDomain::Symptom)?,
    )
    .context("assemble keyword tables")?;
    info!(
        illnesses = tables.illness().len(),
        referral_reasons = tables.referral().len(),
        symptoms = tables.symptom().len(),
        "keyword tables loaded"
    );
    Ok(tables)
}

/// Notes, their classifications and the run counters.
#[derive(Debug)]
pub struct ClassifyRun {
    pub notes: NoteTable,
    pub results: Vec<RowClassification>,
    pub stats: ClassificationStats,
}

pub fn classify_notes(
    notes_path: &Path,
    tables: &KeywordTables,
    options: &ClassifyOptions,
) -> Result<ClassifyRun> {
    let span = info_span!("classify", notes = %notes_path.display());
    let _guard = span.enter();

    let notes = read_note_table(notes_path)
        .with_context(|| format!("read notes {}", notes_path.display()))?;
    let records = notes.records();
    if log_data_enabled() {
        for (row, record) in records.iter().enumerate() {
            for field in NoteField::ALL {
                if let Some(text) = record.get(field) {
                    trace!(row, field = field.column_name(), text = redact_value(text), "note field");
                }
            }
        }
    }

    let classifier = RowClassifier::new(tables, options);
    let results = classifier.classify_all(&records);
    let stats = ClassificationStats::from_rows(&results, &options.referral_fallback);
    info!(
        rows = stats.rows,
        flagged = stats.flagged(),
        referral_fallbacks = stats.referral_fallbacks,
        "notes classified"
    );
    Ok(ClassifyRun {
        notes,
        results,
        stats,
    })
}

/// Writes the requested result files into `output_dir`.
pub fn write_outputs(
    run: &ClassifyRun,
    tables: &KeywordTables,
    options: &ClassifyOptions,
    output_dir: &Path,
    format: OutputFormat,
    timestamp: &DateTime<Local>,
) -> Result<Vec<PathBuf>> {
    let paths = OutputPaths::new(output_dir, timestamp);
    let mut written = Vec::new();
    if format.wants_csv() {
        let layout = OutputLayout::new(
            tables.illness(),
            tables.referral(),
            tables.symptom(),
            &options.referral_fallback,
        );
        write_results_csv(&paths.csv, &run.notes, &run.results, &layout)
            .with_context(|| format!("write {}", paths.csv.display()))?;
        written.push(paths.csv);
    }
    if format.wants_json() {
        write_results_json(&paths.json, &run.results)
            .with_context(|| format!("write {}", paths.json.display()))?;
        written.push(paths.json);
    }
    Ok(written)
}
