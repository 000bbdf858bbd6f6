use std::path::PathBuf;

use ricap_model::KeywordTableError;

#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("failed to read CSV {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write JSON {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("file has no header row: {path}")]
    EmptyFile { path: PathBuf },

    #[error("keyword table {path} has no `{column}` column")]
    MissingLabelColumn { path: PathBuf, column: String },

    #[error("invalid keyword table {path}: {source}")]
    KeywordTable {
        path: PathBuf,
        #[source]
        source: KeywordTableError,
    },

    #[error("note table {path} has none of the columns {expected}")]
    NoNoteColumns { path: PathBuf, expected: String },

    #[error("{results} classified rows for {rows} note rows")]
    RowCountMismatch { rows: usize, results: usize },
}

impl IngestError {
    pub(crate) fn csv(path: impl Into<PathBuf>, source: csv::Error) -> Self {
        Self::Csv {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, IngestError>;
