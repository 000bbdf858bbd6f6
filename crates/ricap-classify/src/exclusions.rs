//! Domain-specific exclusion rules applied to a statement's candidate set.

use ricap_model::{CategorySet, ClassificationDomain};

pub const SCHIZOPHRENIA_SPECTRUM: &str = "Schizophrenia Spectrum and Other Psychotic Disorders";
pub const PERSONALITY: &str = "Personality";

/// Drops `remove` whenever `when_present` is also a candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExclusionRule {
    pub remove: String,
    pub when_present: String,
}

impl ExclusionRule {
    pub fn new(remove: impl Into<String>, when_present: impl Into<String>) -> Self {
        Self {
            remove: remove.into(),
            when_present: when_present.into(),
        }
    }

    /// Applies the rule in place. Returns true when a category was removed.
    pub fn apply(&self, categories: &mut CategorySet) -> bool {
        if categories.contains(&self.remove) && categories.contains(&self.when_present) {
            return categories.remove(&self.remove);
        }
        false
    }
}

/// Ordered exclusion rules for one classification domain.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionRules {
    rules: Vec<ExclusionRule>,
}

impl ExclusionRules {
    pub fn new(rules: Vec<ExclusionRule>) -> Self {
        Self { rules }
    }

    /// Built-in rules: a personality disorder takes precedence over the
    /// schizophrenia spectrum for illnesses; other domains have none.
    pub fn for_domain(domain: ClassificationDomain) -> Self {
        match domain {
            ClassificationDomain::Illness => {
                Self::new(vec![ExclusionRule::new(SCHIZOPHRENIA_SPECTRUM, PERSONALITY)])
            }
            ClassificationDomain::ReferralReason | ClassificationDomain::Symptom => Self::default(),
        }
    }

    #[must_use]
    pub fn with_rule(mut self, rule: ExclusionRule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = &ExclusionRule> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Applies every rule in order and returns the pruned set.
///
/// The relative order of surviving categories is unchanged.
pub fn apply_exclusions(categories: &CategorySet, rules: &ExclusionRules) -> CategorySet {
    let mut pruned = categories.clone();
    for rule in rules.iter() {
        if rule.apply(&mut pruned) {
            tracing::trace!(removed = %rule.remove, kept = %rule.when_present, "exclusion rule applied");
        }
    }
    pruned
}
