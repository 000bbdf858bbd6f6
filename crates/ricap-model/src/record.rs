use serde::{Deserialize, Deserializer, Serialize};

use crate::NoteField;

/// The free-text fields of one source row.
///
/// `None` marks an absent value; blank text is stored as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteRecord {
    #[serde(default, deserialize_with = "blank_as_absent")]
    pub ref_reason: Option<String>,
    #[serde(default, deserialize_with = "blank_as_absent")]
    pub chief_complaint: Option<String>,
    #[serde(default, deserialize_with = "blank_as_absent")]
    pub admission_diagnosis: Option<String>,
    #[serde(default, deserialize_with = "blank_as_absent")]
    pub discharge_diagnosis: Option<String>,
}

fn blank_as_absent<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|text| !text.trim().is_empty()))
}

impl NoteRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a field, treating blank text as absent.
    #[must_use]
    pub fn with(mut self, field: NoteField, value: Option<&str>) -> Self {
        self.set(field, value);
        self
    }

    pub fn set(&mut self, field: NoteField, value: Option<&str>) {
        let value = value
            .filter(|text| !text.trim().is_empty())
            .map(str::to_string);
        *self.slot_mut(field) = value;
    }

    pub fn get(&self, field: NoteField) -> Option<&str> {
        match field {
            NoteField::RefReason => self.ref_reason.as_deref(),
            NoteField::ChiefComplaint => self.chief_complaint.as_deref(),
            NoteField::AdmissionDiagnosis => self.admission_diagnosis.as_deref(),
            NoteField::DischargeDiagnosis => self.discharge_diagnosis.as_deref(),
        }
    }

    fn slot_mut(&mut self, field: NoteField) -> &mut Option<String> {
        match field {
            NoteField::RefReason => &mut self.ref_reason,
            NoteField::ChiefComplaint => &mut self.chief_complaint,
            NoteField::AdmissionDiagnosis => &mut self.admission_diagnosis,
            NoteField::DischargeDiagnosis => &mut self.discharge_diagnosis,
        }
    }
}
