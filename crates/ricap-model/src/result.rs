//! Classification outcomes.
//!
//! Every outcome is a value: no category, one category, several categories.
//! Nothing here represents a failure.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Category names in the order they were first added.
///
/// Matching adds categories in keyword-table order, so the serialized form of
/// an ambiguous result is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategorySet {
    names: Vec<String>,
}

impl CategorySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `name` unless already present. Returns true when it was added.
    pub fn insert(&mut self, name: impl Into<String>) -> bool {
        let name = name.into();
        if self.contains(&name) {
            return false;
        }
        self.names.push(name);
        true
    }

    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.names.len();
        self.names.retain(|existing| existing != name);
        self.names.len() != before
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|existing| existing == name)
    }

    /// Adds every name of `other` not already present, keeping `other`'s order.
    pub fn extend_from(&mut self, other: &CategorySet) {
        for name in other.iter() {
            self.insert(name);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn first(&self) -> Option<&str> {
        self.names.first().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// List form used for ambiguous main categories, e.g. `['Mood', 'Anxiety']`.
    pub fn to_list_string(&self) -> String {
        let quoted: Vec<String> = self.names.iter().map(|name| quote_name(name)).collect();
        format!("[{}]", quoted.join(", "))
    }
}

impl<S: Into<String>> FromIterator<S> for CategorySet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = Self::new();
        for name in iter {
            set.insert(name);
        }
        set
    }
}

impl fmt::Display for CategorySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_list_string())
    }
}

/// Quotes a name the way the analysts' list cells spell strings.
///
/// Double quotes when the name has a single quote and no double quote, single
/// quotes otherwise. Backslash, the quote in use, tab, newline and carriage
/// return are escaped; other control characters become `\xNN`.
fn quote_name(name: &str) -> String {
    let quote = if name.contains('\'') && !name.contains('"') {
        '"'
    } else {
        '\''
    };
    let mut quoted = String::with_capacity(name.len() + 2);
    quoted.push(quote);
    for ch in name.chars() {
        match ch {
            '\\' => quoted.push_str("\\\\"),
            '\t' => quoted.push_str("\\t"),
            '\n' => quoted.push_str("\\n"),
            '\r' => quoted.push_str("\\r"),
            ch if ch == quote => {
                quoted.push('\\');
                quoted.push(ch);
            }
            ch if ch.is_control() && u32::from(ch) <= 0xff => {
                quoted.push_str(&format!("\\x{:02x}", u32::from(ch)));
            }
            ch => quoted.push(ch),
        }
    }
    quoted.push(quote);
    quoted
}

/// Why a main category needs a human look.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewFlag {
    Missing,
    Ambiguous,
}

impl ReviewFlag {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Missing => "missing",
            Self::Ambiguous => "ambiguous",
        }
    }
}

impl fmt::Display for ReviewFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The primary category of a diagnosis field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum MainCategory {
    Single(String),
    /// Several categories survived exclusions on the first decisive statement.
    Ambiguous(CategorySet),
    /// No statement matched any category.
    Absent,
}

impl MainCategory {
    /// The cell value: a category name, a serialized candidate list, or nothing.
    pub fn value(&self) -> Option<String> {
        match self {
            Self::Single(name) => Some(name.clone()),
            Self::Ambiguous(candidates) => Some(candidates.to_list_string()),
            Self::Absent => None,
        }
    }

    pub fn is_ambiguous(&self) -> bool {
        matches!(self, Self::Ambiguous(_))
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    pub fn review_flag(&self) -> Option<ReviewFlag> {
        match self {
            Self::Single(_) => None,
            Self::Ambiguous(_) => Some(ReviewFlag::Ambiguous),
            Self::Absent => Some(ReviewFlag::Missing),
        }
    }
}

/// Main category plus every category mentioned anywhere in a diagnosis field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosisResult {
    pub main: MainCategory,
    pub categories: CategorySet,
}

/// All outputs for one note row.
///
/// A diagnosis is `None` when its source field was absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowClassification {
    pub admission: Option<DiagnosisResult>,
    pub discharge: Option<DiagnosisResult>,
    pub referral_reasons: CategorySet,
    pub symptoms: CategorySet,
}
