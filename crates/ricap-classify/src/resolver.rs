//! Statement-to-category resolution.

use ricap_model::{CategorySet, IgnoreList, KeywordTable};
use tracing::trace;

use crate::matcher::KeywordMatcher;

/// Categories whose keywords appear in `statement`, using the built-in rules.
///
/// See [`resolve_with`].
pub fn resolve(statement: &str, ignore: &IgnoreList, table: &KeywordTable) -> CategorySet {
    resolve_with(KeywordMatcher::standard(), statement, ignore, table)
}

/// Categories whose keywords appear in `statement`.
///
/// A statement mentioning any ignore keyword resolves to nothing, whatever else
/// it mentions. Categories come back in table order.
pub fn resolve_with(
    matcher: &KeywordMatcher,
    statement: &str,
    ignore: &IgnoreList,
    table: &KeywordTable,
) -> CategorySet {
    let mut categories = CategorySet::new();
    if let Some(keyword) = ignore.iter().find(|keyword| matcher.matches(statement, keyword)) {
        trace!(ignore_keyword = keyword, "statement disqualified");
        return categories;
    }
    for category in table.categories() {
        let keywords = category.keywords.iter().map(String::as_str);
        if matcher.matches_any(statement, keywords) {
            categories.insert(category.name.as_str());
        }
    }
    categories
}
