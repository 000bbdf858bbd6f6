use thiserror::Error;

use crate::ClassificationDomain;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeywordTableError {
    #[error("{domain} keyword table has a category with an empty name")]
    EmptyCategory { domain: ClassificationDomain },
    #[error("{domain} keyword table lists category {category:?} more than once")]
    DuplicateCategory {
        domain: ClassificationDomain,
        category: String,
    },
}

pub type Result<T> = std::result::Result<T, KeywordTableError>;
