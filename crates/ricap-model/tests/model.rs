use ricap_model::{
    CategorySet, ClassificationDomain, DiagnosisResult, KeywordTable, KeywordTableError,
    MainCategory, NoteField, NoteRecord, RowClassification,
};

#[test]
fn row_classification_serializes_with_tagged_main_category() {
    let row = RowClassification {
        admission: Some(DiagnosisResult {
            main: MainCategory::Ambiguous(["Mood", "Anxiety"].into_iter().collect()),
            categories: ["Mood", "Anxiety"].into_iter().collect(),
        }),
        discharge: Some(DiagnosisResult {
            main: MainCategory::Absent,
            categories: CategorySet::new(),
        }),
        referral_reasons: ["Other"].into_iter().collect(),
        symptoms: CategorySet::new(),
    };

    let value = serde_json::to_value(&row).expect("serialize");
    assert_eq!(
        value["admission"]["main"],
        serde_json::json!({"kind": "ambiguous", "value": ["Mood", "Anxiety"]})
    );
    assert_eq!(value["discharge"]["main"], serde_json::json!({"kind": "absent"}));
    assert_eq!(value["referral_reasons"], serde_json::json!(["Other"]));

    let back: RowClassification = serde_json::from_value(value).expect("deserialize");
    assert_eq!(back, row);
}

#[test]
fn keyword_table_rejects_duplicates_after_trimming() {
    let err = KeywordTable::new(
        ClassificationDomain::Symptom,
        [("Insomnia", vec!["insomnia"]), (" Insomnia ", vec!["poor sleep"])],
    )
    .unwrap_err();
    assert_eq!(
        err,
        KeywordTableError::DuplicateCategory {
            domain: ClassificationDomain::Symptom,
            category: "Insomnia".to_string(),
        }
    );
}

#[test]
fn note_record_treats_blank_cells_as_absent() {
    let record = NoteRecord::new()
        .with(NoteField::RefReason, Some("   "))
        .with(NoteField::ChiefComplaint, Some("low mood"));
    assert_eq!(record.get(NoteField::RefReason), None);
    assert_eq!(record.get(NoteField::ChiefComplaint), Some("low mood"));
    assert_eq!(record.get(NoteField::DischargeDiagnosis), None);
}

#[test]
fn deserialized_note_record_treats_blank_text_as_absent() {
    let record: NoteRecord = serde_json::from_value(serde_json::json!({
        "ref_reason": "  ",
        "chief_complaint": null,
        "admission_diagnosis": "MDD",
    }))
    .expect("deserialize");
    assert_eq!(
        record,
        NoteRecord::new().with(NoteField::AdmissionDiagnosis, Some("MDD"))
    );
}
