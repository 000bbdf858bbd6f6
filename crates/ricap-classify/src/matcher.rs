//! Keyword matching rules.
//!
//! Most keywords match by plain substring containment against a lower-cased
//! statement. A few short keywords are common fragments of unrelated words
//! ("asd" inside "sad") and one stem collides with an unrelated term, so they
//! carry their own strategy in [`MATCH_RULES`]. The rule table is the contract:
//! adding an exception means adding a row, not another branch.

use std::sync::LazyLock;

use regex::Regex;

use ricap_model::normalize_keyword;

/// How a keyword is tested against a statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchStrategy {
    /// Substring containment.
    Contains,
    /// Containment, and no word character directly before or after any
    /// occurrence of the keyword in the statement.
    Isolated,
    /// Containment, unless the statement also contains the given term.
    ContainsUnless(&'static str),
}

/// A keyword with a non-default strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchRule {
    pub keyword: &'static str,
    pub strategy: MatchStrategy,
}

impl MatchRule {
    pub const fn new(keyword: &'static str, strategy: MatchStrategy) -> Self {
        Self { keyword, strategy }
    }
}

/// Built-in exceptions. Keywords not listed here use [`MatchStrategy::Contains`].
pub const MATCH_RULES: &[MatchRule] = &[
    MatchRule::new("id", MatchStrategy::Isolated),
    MatchRule::new("ied", MatchStrategy::Isolated),
    MatchRule::new("tic", MatchStrategy::Isolated),
    MatchRule::new("si", MatchStrategy::Isolated),
    MatchRule::new("asd", MatchStrategy::Isolated),
    MatchRule::new("psychos", MatchStrategy::ContainsUnless("psychosomatic")),
];

static STANDARD_MATCHER: LazyLock<KeywordMatcher> = LazyLock::new(|| {
    KeywordMatcher::new(MATCH_RULES).expect("built-in match rules must compile")
});

#[derive(Debug, Clone)]
enum CompiledStrategy {
    Isolated { before: Regex, after: Regex },
    ContainsUnless(&'static str),
}

#[derive(Debug, Clone)]
struct CompiledRule {
    keyword: &'static str,
    strategy: CompiledStrategy,
}

/// Evaluates keywords against statements using a rule table.
#[derive(Debug, Clone)]
pub struct KeywordMatcher {
    rules: Vec<CompiledRule>,
}

impl KeywordMatcher {
    /// Compiles a rule table. The first rule listed for a keyword wins.
    ///
    /// # Errors
    ///
    /// Returns the regex error if an isolation pattern cannot be built.
    pub fn new(rules: &[MatchRule]) -> Result<Self, regex::Error> {
        let mut compiled = Vec::with_capacity(rules.len());
        for rule in rules {
            let strategy = match rule.strategy {
                // Contains is the fallback anyway; no need to keep the row.
                MatchStrategy::Contains => continue,
                MatchStrategy::Isolated => {
                    let escaped = regex::escape(rule.keyword);
                    CompiledStrategy::Isolated {
                        before: Regex::new(&format!(r"\w{escaped}"))?,
                        after: Regex::new(&format!(r"{escaped}\w"))?,
                    }
                }
                MatchStrategy::ContainsUnless(term) => CompiledStrategy::ContainsUnless(term),
            };
            compiled.push(CompiledRule {
                keyword: rule.keyword,
                strategy,
            });
        }
        Ok(Self { rules: compiled })
    }

    /// The matcher for [`MATCH_RULES`], compiled once.
    pub fn standard() -> &'static KeywordMatcher {
        &STANDARD_MATCHER
    }

    /// Tests one keyword against a lower-cased statement.
    ///
    /// The keyword is normalized first. Exactly one strategy is evaluated.
    pub fn matches(&self, statement: &str, keyword: &str) -> bool {
        let keyword = normalize_keyword(keyword);
        let rule = self.rules.iter().find(|rule| rule.keyword == keyword);
        match rule.map(|rule| &rule.strategy) {
            Some(CompiledStrategy::Isolated { before, after }) => {
                statement.contains(keyword.as_str())
                    && !before.is_match(statement)
                    && !after.is_match(statement)
            }
            Some(CompiledStrategy::ContainsUnless(term)) => {
                statement.contains(keyword.as_str()) && !statement.contains(term)
            }
            None => statement.contains(keyword.as_str()),
        }
    }

    /// True when any of `keywords` matches the statement.
    pub fn matches_any<'k, I>(&self, statement: &str, keywords: I) -> bool
    where
        I: IntoIterator<Item = &'k str>,
    {
        keywords
            .into_iter()
            .any(|keyword| self.matches(statement, keyword))
    }
}

/// [`KeywordMatcher::matches`] with the built-in rules.
pub fn matches(statement: &str, keyword: &str) -> bool {
    KeywordMatcher::standard().matches(statement, keyword)
}
