//! Main-category selection for diagnosis fields.
//!
//! Diagnosis text is written in order of clinical priority, so the first
//! statement that names any category decides the main category. Later
//! statements are never consulted once a decision is made.

use ricap_model::MainCategory;
use tracing::trace;

use crate::context::DomainContext;
use crate::tokenizer::tokenize;

/// Selects the main category of a diagnosis field.
///
/// - one category on a statement: that category, stop;
/// - several categories after exclusions: [`MainCategory::Ambiguous`], stop;
/// - none: move to the next statement.
///
/// Returns [`MainCategory::Absent`] when no statement names a category.
pub fn select_main(field: &str, context: &DomainContext<'_>) -> MainCategory {
    let lowered = field.to_lowercase();
    for (index, statement) in tokenize(&lowered).enumerate() {
        let categories = context.categories_for(statement);
        if categories.is_empty() {
            continue;
        }
        if categories.len() == 1
            && let Some(name) = categories.first()
        {
            trace!(statement = index, category = name, "main category selected");
            return MainCategory::Single(name.to_string());
        }
        trace!(
            statement = index,
            candidates = categories.len(),
            "main category ambiguous"
        );
        return MainCategory::Ambiguous(categories);
    }
    MainCategory::Absent
}
