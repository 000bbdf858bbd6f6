//! File I/O around the classification engine: keyword tables in, note rows in,
//! result tables out.

pub mod csv_utils;
pub mod error;
pub mod keyword_table;
pub mod notes;
pub mod output;

pub use error::{IngestError, Result};
pub use keyword_table::{KeywordLayout, read_keyword_table};
pub use notes::{NoteTable, read_note_table};
pub use output::{
    OUTPUT_TIMESTAMP_FORMAT, OutputLayout, OutputPaths, output_file_name, write_results_csv,
    write_results_json,
};
