//! Keyword classification engine.
//!
//! Free text is split into statements ([`tokenizer`]), each statement is
//! resolved to the categories whose keywords it mentions ([`resolver`],
//! [`matcher`]), domain exclusion rules prune the candidates
//! ([`exclusions`]), and the result is either reduced to one main category
//! ([`selector`]) or accumulated into indicator sets ([`encoder`]).
//! [`row`] runs all of it for a whole note row.
//!
//! No function here performs I/O or returns an error for well-formed input.

pub mod context;
pub mod encoder;
pub mod exclusions;
pub mod matcher;
pub mod resolver;
pub mod row;
pub mod selector;
pub mod stats;
pub mod tokenizer;

pub use context::DomainContext;
pub use encoder::{encode_all, encode_pooled, encode_with_fallback};
pub use exclusions::{ExclusionRule, ExclusionRules, apply_exclusions};
pub use matcher::{KeywordMatcher, MATCH_RULES, MatchRule, MatchStrategy, matches};
pub use resolver::resolve;
pub use row::{ClassifyOptions, DEFAULT_REFERRAL_FALLBACK, KeywordTables, RowClassifier, TableMismatch};
pub use selector::select_main;
pub use stats::{ClassificationStats, ReviewCounts};
pub use tokenizer::{DELIMITERS, Tokenizer, lowered_statements, tokenize};
