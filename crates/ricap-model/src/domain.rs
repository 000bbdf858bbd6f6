//! Classification domains, diagnostic types and the note fields they read.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A family of categories sharing one keyword table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassificationDomain {
    Illness,
    ReferralReason,
    Symptom,
}

impl ClassificationDomain {
    pub const ALL: [ClassificationDomain; 3] = [Self::Illness, Self::ReferralReason, Self::Symptom];

    /// Header of the column holding category names in row-layout keyword sheets.
    pub fn label_column(self) -> &'static str {
        match self {
            Self::Illness => "Illness",
            Self::ReferralReason => "Reasons",
            Self::Symptom => "Symptoms",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Illness => "illness",
            Self::ReferralReason => "referral reason",
            Self::Symptom => "symptom",
        }
    }
}

impl fmt::Display for ClassificationDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which diagnosis field a main category was selected from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticType {
    Admission,
    Discharge,
}

impl DiagnosticType {
    pub const ALL: [DiagnosticType; 2] = [Self::Admission, Self::Discharge];

    /// Prefix used for the result columns of this diagnostic type.
    pub fn short_code(self) -> &'static str {
        match self {
            Self::Admission => "addx",
            Self::Discharge => "dcdx",
        }
    }

    pub fn field(self) -> NoteField {
        match self {
            Self::Admission => NoteField::AdmissionDiagnosis,
            Self::Discharge => NoteField::DischargeDiagnosis,
        }
    }
}

impl fmt::Display for DiagnosticType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Admission => f.write_str("admission"),
            Self::Discharge => f.write_str("discharge"),
        }
    }
}

/// Free-text source fields of a note row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoteField {
    RefReason,
    ChiefComplaint,
    AdmissionDiagnosis,
    DischargeDiagnosis,
}

impl NoteField {
    pub const ALL: [NoteField; 4] = [
        Self::RefReason,
        Self::ChiefComplaint,
        Self::AdmissionDiagnosis,
        Self::DischargeDiagnosis,
    ];

    /// Column name of this field in the source data.
    pub fn column_name(self) -> &'static str {
        match self {
            Self::RefReason => "ref_reason",
            Self::ChiefComplaint => "chief_complaint",
            Self::AdmissionDiagnosis => "admission_diagnosis",
            Self::DischargeDiagnosis => "discharge_diagnosis",
        }
    }
}

impl fmt::Display for NoteField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_name())
    }
}
