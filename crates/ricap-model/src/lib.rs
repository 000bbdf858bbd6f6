pub mod domain;
pub mod error;
pub mod keywords;
pub mod record;
pub mod result;

pub use domain::{ClassificationDomain, DiagnosticType, NoteField};
pub use error::{KeywordTableError, Result};
pub use keywords::{Category, IgnoreList, KeywordTable, STANDARD_IGNORE_KEYWORDS, normalize_keyword};
pub use record::NoteRecord;
pub use result::{CategorySet, DiagnosisResult, MainCategory, ReviewFlag, RowClassification};
