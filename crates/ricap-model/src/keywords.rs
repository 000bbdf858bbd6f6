//! Analyst-curated keyword tables.
//!
//! A [`KeywordTable`] maps each category of one [`ClassificationDomain`] to the
//! keywords that identify it. Tables are built once from an external sheet and
//! shared read-only by every classification call.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{KeywordTableError, Result};
use crate::ClassificationDomain;

/// Ignore keywords analysts use for uncertain or negated statements.
pub const STANDARD_IGNORE_KEYWORDS: &[&str] = &["query", "vs", "r/o", "rule out", "versus"];

/// Lower-case `raw` and drop every character outside `[a-zA-Z0-9\-_ /]`.
pub fn normalize_keyword(raw: &str) -> String {
    raw.chars()
        .filter(|ch| ch.is_ascii_alphanumeric() || matches!(ch, '-' | '_' | ' ' | '/'))
        .map(|ch| ch.to_ascii_lowercase())
        .collect()
}

/// One named category and its normalized keywords, in sheet order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordTable {
    domain: ClassificationDomain,
    categories: Vec<Category>,
}

impl KeywordTable {
    /// Builds a table from `(category, keywords)` pairs, keeping their order.
    ///
    /// Category names are trimmed. Keywords are normalized; blank keywords and
    /// keywords with nothing left after normalization are dropped.
    ///
    /// # Errors
    ///
    /// Fails on an empty category name or a category listed twice.
    pub fn new<I, N, K, S>(domain: ClassificationDomain, entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (N, K)>,
        N: AsRef<str>,
        K: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let mut categories = Vec::new();
        for (name, keywords) in entries {
            let name = name.as_ref().trim();
            if name.is_empty() {
                return Err(KeywordTableError::EmptyCategory { domain });
            }
            if !seen.insert(name.to_string()) {
                return Err(KeywordTableError::DuplicateCategory {
                    domain,
                    category: name.to_string(),
                });
            }
            let keywords = keywords
                .into_iter()
                .map(|keyword| normalize_keyword(keyword.as_ref()))
                .filter(|keyword| !keyword.trim().is_empty())
                .collect();
            categories.push(Category {
                name: name.to_string(),
                keywords,
            });
        }
        Ok(Self { domain, categories })
    }

    pub fn domain(&self) -> ClassificationDomain {
        self.domain
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn category_names(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|category| category.name.as_str())
    }

    pub fn get(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|category| category.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

/// Keywords whose presence voids a statement for matching.
///
/// Keywords are stored normalized. The default list is empty;
/// [`IgnoreList::standard`] returns the analyst list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct IgnoreList {
    keywords: Vec<String>,
}

impl IgnoreList {
    /// Normalizes each keyword like a table keyword. Keywords with nothing
    /// left after normalization are dropped, since an empty keyword would void
    /// every statement. Repeats are dropped on the normalized form.
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut list = Self::default();
        for keyword in keywords {
            let keyword = normalize_keyword(keyword.as_ref());
            if keyword.trim().is_empty() || list.keywords.contains(&keyword) {
                continue;
            }
            list.keywords.push(keyword);
        }
        list
    }

    pub fn standard() -> Self {
        Self::new(STANDARD_IGNORE_KEYWORDS.iter().copied())
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.keywords.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }
}

impl From<Vec<String>> for IgnoreList {
    fn from(keywords: Vec<String>) -> Self {
        Self::new(keywords)
    }
}

impl From<IgnoreList> for Vec<String> {
    fn from(list: IgnoreList) -> Self {
        list.keywords
    }
}
