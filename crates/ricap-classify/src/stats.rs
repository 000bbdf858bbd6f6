//! Run-level counters over classified rows.

use std::collections::BTreeMap;

use ricap_model::{
    CategorySet, ClassificationDomain, DiagnosisResult, DiagnosticType, ReviewFlag,
    RowClassification,
};

/// Review counts for one diagnostic type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReviewCounts {
    /// Rows where the field was present.
    pub present: usize,
    pub missing: usize,
    pub ambiguous: usize,
}

impl ReviewCounts {
    pub fn flagged(&self) -> usize {
        self.missing + self.ambiguous
    }
}

/// Aggregated counts over a batch of [`RowClassification`]s.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassificationStats {
    pub rows: usize,
    /// Rows whose referral reasons are only the fallback category.
    pub referral_fallbacks: usize,
    reviews: BTreeMap<DiagnosticType, ReviewCounts>,
    hits: BTreeMap<ClassificationDomain, BTreeMap<String, usize>>,
}

impl ClassificationStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_rows(rows: &[RowClassification], referral_fallback: &str) -> Self {
        let mut stats = Self::new();
        for row in rows {
            stats.record(row, referral_fallback);
        }
        stats
    }

    pub fn record(&mut self, row: &RowClassification, referral_fallback: &str) {
        self.rows += 1;
        self.record_diagnosis(DiagnosticType::Admission, row.admission.as_ref());
        self.record_diagnosis(DiagnosticType::Discharge, row.discharge.as_ref());
        self.count_hits(ClassificationDomain::ReferralReason, &row.referral_reasons);
        self.count_hits(ClassificationDomain::Symptom, &row.symptoms);
        if row.referral_reasons.len() == 1 && row.referral_reasons.contains(referral_fallback) {
            self.referral_fallbacks += 1;
        }
    }

    fn record_diagnosis(&mut self, diagnostic_type: DiagnosticType, result: Option<&DiagnosisResult>) {
        let Some(result) = result else {
            return;
        };
        let counts = self.reviews.entry(diagnostic_type).or_default();
        counts.present += 1;
        match result.main.review_flag() {
            Some(ReviewFlag::Missing) => counts.missing += 1,
            Some(ReviewFlag::Ambiguous) => counts.ambiguous += 1,
            None => {}
        }
        self.count_hits(ClassificationDomain::Illness, &result.categories);
    }

    fn count_hits(&mut self, domain: ClassificationDomain, categories: &CategorySet) {
        let counts = self.hits.entry(domain).or_default();
        for name in categories.iter() {
            *counts.entry(name.to_string()).or_default() += 1;
        }
    }

    pub fn review(&self, diagnostic_type: DiagnosticType) -> ReviewCounts {
        self.reviews.get(&diagnostic_type).copied().unwrap_or_default()
    }

    /// Total rows needing review across both diagnostic types.
    pub fn flagged(&self) -> usize {
        self.reviews.values().map(ReviewCounts::flagged).sum()
    }

    /// How often `category` was indicated in `domain`.
    ///
    /// Illness hits count admission and discharge separately.
    pub fn hits(&self, domain: ClassificationDomain, category: &str) -> usize {
        self.hits
            .get(&domain)
            .and_then(|counts| counts.get(category))
            .copied()
            .unwrap_or(0)
    }

    /// Categories with at least one hit, most frequent first.
    pub fn top_categories(&self, domain: ClassificationDomain) -> Vec<(&str, usize)> {
        let mut ranked: Vec<(&str, usize)> = self
            .hits
            .get(&domain)
            .map(|counts| counts.iter().map(|(name, count)| (name.as_str(), *count)).collect())
            .unwrap_or_default();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked
    }
}

#[cfg(test)]
mod tests {
    use ricap_model::MainCategory;

    use super::*;

    fn set(names: &[&str]) -> CategorySet {
        names.iter().copied().collect()
    }

    fn row(main: MainCategory, illness: &[&str], referral: &[&str]) -> RowClassification {
        RowClassification {
            admission: Some(DiagnosisResult {
                main,
                categories: set(illness),
            }),
            discharge: None,
            referral_reasons: set(referral),
            symptoms: set(&["Insomnia"]),
        }
    }

    #[test]
    fn counts_reviews_fallbacks_and_hits() {
        let rows = vec![
            row(MainCategory::Single("Mood".into()), &["Mood"], &["Suicidal"]),
            row(MainCategory::Absent, &[], &["Other"]),
            row(
                MainCategory::Ambiguous(set(&["Mood", "Anxiety"])),
                &["Mood", "Anxiety"],
                &["Other"],
            ),
        ];
        let stats = ClassificationStats::from_rows(&rows, "Other");

        assert_eq!(stats.rows, 3);
        assert_eq!(stats.referral_fallbacks, 2);
        assert_eq!(
            stats.review(DiagnosticType::Admission),
            ReviewCounts {
                present: 3,
                missing: 1,
                ambiguous: 1,
            }
        );
        assert_eq!(stats.review(DiagnosticType::Discharge), ReviewCounts::default());
        assert_eq!(stats.flagged(), 2);
        assert_eq!(stats.hits(ClassificationDomain::Illness, "Mood"), 2);
        assert_eq!(stats.hits(ClassificationDomain::Symptom, "Insomnia"), 3);
        assert_eq!(
            stats.top_categories(ClassificationDomain::Illness),
            vec![("Mood", 2), ("Anxiety", 1)]
        );
    }
}
