//! Row-level classification.
//!
//! A [`RowClassifier`] turns one [`NoteRecord`] into a [`RowClassification`]:
//!
//! - each present diagnosis field gets a main category and an illness set;
//! - `ref_reason` and `chief_complaint` are unioned into referral reasons, with
//!   the fallback category when neither names one;
//! - all four fields are pooled for symptoms.

use ricap_model::{
    ClassificationDomain, DiagnosisResult, DiagnosticType, IgnoreList, KeywordTable, NoteField,
    NoteRecord, RowClassification,
};
use thiserror::Error;
use tracing::{debug, info_span};

use crate::context::DomainContext;
use crate::encoder::{encode_all, encode_pooled, encode_with_fallback};
use crate::selector::select_main;

pub const DEFAULT_REFERRAL_FALLBACK: &str = "Other";

/// Classification settings shared by every row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifyOptions {
    pub ignore: IgnoreList,
    /// Referral category used when no referral reason matched.
    pub referral_fallback: String,
}

impl Default for ClassifyOptions {
    fn default() -> Self {
        Self {
            ignore: IgnoreList::standard(),
            referral_fallback: DEFAULT_REFERRAL_FALLBACK.to_string(),
        }
    }
}

impl ClassifyOptions {
    #[must_use]
    pub fn with_ignore(mut self, ignore: IgnoreList) -> Self {
        self.ignore = ignore;
        self
    }

    #[must_use]
    pub fn with_referral_fallback(mut self, fallback: impl Into<String>) -> Self {
        self.referral_fallback = fallback.into();
        self
    }
}

/// A keyword table was supplied for the wrong domain.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("wrong keyword table: expected {expected}, found {actual}")]
pub struct TableMismatch {
    pub expected: ClassificationDomain,
    pub actual: ClassificationDomain,
}

/// The three keyword tables of a run.
#[derive(Debug, Clone)]
pub struct KeywordTables {
    illness: KeywordTable,
    referral: KeywordTable,
    symptom: KeywordTable,
}

impl KeywordTables {
    /// # Errors
    ///
    /// Fails when a table belongs to a different domain than its slot.
    pub fn new(
        illness: KeywordTable,
        referral: KeywordTable,
        symptom: KeywordTable,
    ) -> Result<Self, TableMismatch> {
        expect_domain(&illness, ClassificationDomain::Illness)?;
        expect_domain(&referral, ClassificationDomain::ReferralReason)?;
        expect_domain(&symptom, ClassificationDomain::Symptom)?;
        Ok(Self {
            illness,
            referral,
            symptom,
        })
    }

    pub fn illness(&self) -> &KeywordTable {
        &self.illness
    }

    pub fn referral(&self) -> &KeywordTable {
        &self.referral
    }

    pub fn symptom(&self) -> &KeywordTable {
        &self.symptom
    }

    pub fn get(&self, domain: ClassificationDomain) -> &KeywordTable {
        match domain {
            ClassificationDomain::Illness => &self.illness,
            ClassificationDomain::ReferralReason => &self.referral,
            ClassificationDomain::Symptom => &self.symptom,
        }
    }
}

fn expect_domain(table: &KeywordTable, expected: ClassificationDomain) -> Result<(), TableMismatch> {
    if table.domain() == expected {
        Ok(())
    } else {
        Err(TableMismatch {
            expected,
            actual: table.domain(),
        })
    }
}

/// Classifies note rows against a fixed set of tables.
#[derive(Debug, Clone)]
pub struct RowClassifier<'a> {
    illness: DomainContext<'a>,
    referral: DomainContext<'a>,
    symptom: DomainContext<'a>,
    referral_fallback: &'a str,
}

impl<'a> RowClassifier<'a> {
    pub fn new(tables: &'a KeywordTables, options: &'a ClassifyOptions) -> Self {
        Self {
            illness: DomainContext::new(tables.illness(), &options.ignore),
            referral: DomainContext::new(tables.referral(), &options.ignore),
            symptom: DomainContext::new(tables.symptom(), &options.ignore),
            referral_fallback: &options.referral_fallback,
        }
    }

    /// Context used for one domain, e.g. to swap in custom exclusion rules.
    pub fn context_mut(&mut self, domain: ClassificationDomain) -> &mut DomainContext<'a> {
        match domain {
            ClassificationDomain::Illness => &mut self.illness,
            ClassificationDomain::ReferralReason => &mut self.referral,
            ClassificationDomain::Symptom => &mut self.symptom,
        }
    }

    pub fn classify(&self, record: &NoteRecord) -> RowClassification {
        RowClassification {
            admission: self.diagnosis(record, DiagnosticType::Admission),
            discharge: self.diagnosis(record, DiagnosticType::Discharge),
            referral_reasons: encode_with_fallback(
                &[
                    record.get(NoteField::RefReason),
                    record.get(NoteField::ChiefComplaint),
                ],
                &self.referral,
                self.referral_fallback,
            ),
            symptoms: encode_pooled(&NoteField::ALL.map(|field| record.get(field)), &self.symptom),
        }
    }

    /// Classifies records in order. Row `i` of the output belongs to record `i`.
    pub fn classify_all(&self, records: &[NoteRecord]) -> Vec<RowClassification> {
        records
            .iter()
            .enumerate()
            .map(|(row, record)| {
                let span = info_span!("row", row);
                let _guard = span.enter();
                let result = self.classify(record);
                debug!(
                    admission = main_label(result.admission.as_ref()),
                    discharge = main_label(result.discharge.as_ref()),
                    referral_reasons = result.referral_reasons.len(),
                    symptoms = result.symptoms.len(),
                    "row classified"
                );
                result
            })
            .collect()
    }

    /// Main category and illness set for one diagnosis field.
    ///
    /// Returns `None` when the field is absent.
    pub fn diagnosis(
        &self,
        record: &NoteRecord,
        diagnostic_type: DiagnosticType,
    ) -> Option<DiagnosisResult> {
        let field = record.get(diagnostic_type.field())?;
        Some(DiagnosisResult {
            main: select_main(field, &self.illness),
            categories: encode_all(field, &self.illness),
        })
    }
}

fn main_label(result: Option<&DiagnosisResult>) -> &'static str {
    match result.map(|diagnosis| diagnosis.main.review_flag()) {
        None => "absent field",
        Some(None) => "selected",
        Some(Some(flag)) => flag.as_str(),
    }
}
