//! One-hot encoding across whole fields.
//!
//! Unlike [`select_main`](crate::selector::select_main), these functions read
//! every statement and union the categories found. For the same diagnosis the
//! two may disagree: the main category is the first illness named, while the
//! indicator set also holds illnesses named later.

use ricap_model::CategorySet;

use crate::context::DomainContext;
use crate::tokenizer::{lowered_statements, tokenize};

/// Union of the categories of every statement in `field`.
///
/// Exclusion rules apply per statement.
pub fn encode_all(field: &str, context: &DomainContext<'_>) -> CategorySet {
    let lowered = field.to_lowercase();
    let mut found = CategorySet::new();
    for statement in tokenize(&lowered) {
        found.extend_from(&context.categories_for(statement));
    }
    found
}

/// Pools the statements of several fields and encodes them together.
///
/// Absent fields contribute nothing; which field a match came from is not kept.
pub fn encode_pooled(fields: &[Option<&str>], context: &DomainContext<'_>) -> CategorySet {
    let mut found = CategorySet::new();
    let statements = fields
        .iter()
        .flat_map(|field| lowered_statements(*field));
    for statement in statements {
        found.extend_from(&context.categories_for(&statement));
    }
    found
}

/// Encodes each present field and falls back to `fallback` when the combined
/// set is empty.
///
/// The fallback is decided once, after every field has been read.
pub fn encode_with_fallback(
    fields: &[Option<&str>],
    context: &DomainContext<'_>,
    fallback: &str,
) -> CategorySet {
    let mut combined = CategorySet::new();
    for field in fields.iter().flatten() {
        combined.extend_from(&encode_all(field, context));
    }
    if combined.is_empty() {
        combined.insert(fallback);
    }
    combined
}

#[cfg(test)]
mod tests {
    use ricap_model::{ClassificationDomain, IgnoreList, KeywordTable, MainCategory};

    use super::*;
    use crate::exclusions::{PERSONALITY, SCHIZOPHRENIA_SPECTRUM};
    use crate::selector::select_main;

    fn illness_table() -> KeywordTable {
        KeywordTable::new(
            ClassificationDomain::Illness,
            [
                ("Anxiety", vec!["anxiety"]),
                ("Mood", vec!["mood", "depress"]),
                (SCHIZOPHRENIA_SPECTRUM, vec!["psychos"]),
                (PERSONALITY, vec!["personality"]),
            ],
        )
        .unwrap()
    }

    fn referral_table() -> KeywordTable {
        KeywordTable::new(
            ClassificationDomain::ReferralReason,
            [
                ("Aggression", vec!["aggress", "violent"]),
                ("Suicidal", vec!["suicid", "si"]),
                ("Other", vec![]),
            ],
        )
        .unwrap()
    }

    #[test]
    fn encode_all_diverges_from_main_selection() {
        let table = illness_table();
        let ignore = IgnoreList::standard();
        let context = DomainContext::new(&table, &ignore);
        let field = "Anxiety disorder, depression";

        assert_eq!(
            encode_all(field, &context).iter().collect::<Vec<_>>(),
            vec!["Anxiety", "Mood"]
        );
        assert_eq!(
            select_main(field, &context),
            MainCategory::Single("Anxiety".to_string())
        );
    }

    #[test]
    fn encode_all_applies_exclusions_per_statement() {
        let table = illness_table();
        let ignore = IgnoreList::standard();
        let context = DomainContext::new(&table, &ignore);

        let same_statement = encode_all("personality traits with psychosis", &context);
        assert_eq!(same_statement.iter().collect::<Vec<_>>(), vec![PERSONALITY]);

        let separate = encode_all("psychosis, personality traits", &context);
        assert_eq!(
            separate.iter().collect::<Vec<_>>(),
            vec![SCHIZOPHRENIA_SPECTRUM, PERSONALITY]
        );
    }

    #[test]
    fn encode_all_skips_ignored_statements() {
        let table = illness_table();
        let ignore = IgnoreList::standard();
        let context = DomainContext::new(&table, &ignore);
        let found = encode_all("rule out psychosis; anxiety", &context);
        assert_eq!(found.iter().collect::<Vec<_>>(), vec!["Anxiety"]);
    }

    #[test]
    fn fallback_only_when_nothing_matched() {
        let table = referral_table();
        let ignore = IgnoreList::standard();
        let context = DomainContext::new(&table, &ignore);

        let none = encode_with_fallback(&[Some("school refusal"), None], &context, "Other");
        assert_eq!(none.iter().collect::<Vec<_>>(), vec!["Other"]);

        let absent = encode_with_fallback(&[None, None], &context, "Other");
        assert_eq!(absent.iter().collect::<Vec<_>>(), vec!["Other"]);

        let found = encode_with_fallback(
            &[Some("violent outbursts"), Some("si, cutting")],
            &context,
            "Other",
        );
        assert_eq!(found.iter().collect::<Vec<_>>(), vec!["Aggression", "Suicidal"]);
        assert!(!found.contains("Other"));
    }

    #[test]
    fn pooled_fields_share_indicators() {
        let table = KeywordTable::new(
            ClassificationDomain::Symptom,
            [("Insomnia", vec!["insomnia", "poor sleep"]), ("Hallucinations", vec!["ah/vh"])],
        )
        .unwrap();
        let ignore = IgnoreList::standard();
        let context = DomainContext::new(&table, &ignore);
        let found = encode_pooled(
            &[None, Some("Poor sleep"), Some("AH/VH. query insomnia"), None],
            &context,
        );
        assert_eq!(found.iter().collect::<Vec<_>>(), vec!["Insomnia", "Hallucinations"]);
    }
}
