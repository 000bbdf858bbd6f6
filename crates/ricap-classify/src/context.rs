//! Per-domain classification context.
//!
//! Tables, ignore keywords and rules are passed explicitly to every call so
//! rows can be classified independently (and in parallel) without shared
//! mutable state.

use ricap_model::{CategorySet, ClassificationDomain, IgnoreList, KeywordTable};

use crate::exclusions::{ExclusionRules, apply_exclusions};
use crate::matcher::KeywordMatcher;
use crate::resolver;

/// Everything needed to classify statements of one domain.
#[derive(Debug, Clone)]
pub struct DomainContext<'a> {
    pub table: &'a KeywordTable,
    pub ignore: &'a IgnoreList,
    pub exclusions: ExclusionRules,
    pub matcher: &'a KeywordMatcher,
}

impl<'a> DomainContext<'a> {
    /// Context with the domain's built-in exclusion rules and the standard matcher.
    pub fn new(table: &'a KeywordTable, ignore: &'a IgnoreList) -> Self {
        Self {
            table,
            ignore,
            exclusions: ExclusionRules::for_domain(table.domain()),
            matcher: KeywordMatcher::standard(),
        }
    }

    #[must_use]
    pub fn with_exclusions(mut self, exclusions: ExclusionRules) -> Self {
        self.exclusions = exclusions;
        self
    }

    #[must_use]
    pub fn with_matcher(mut self, matcher: &'a KeywordMatcher) -> Self {
        self.matcher = matcher;
        self
    }

    pub fn domain(&self) -> ClassificationDomain {
        self.table.domain()
    }

    /// Candidate categories of one lower-cased statement after exclusions.
    pub fn categories_for(&self, statement: &str) -> CategorySet {
        let candidates = resolver::resolve_with(self.matcher, statement, self.ignore, self.table);
        if candidates.len() < 2 {
            return candidates;
        }
        apply_exclusions(&candidates, &self.exclusions)
    }
}
