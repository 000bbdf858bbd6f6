use std::fs;
use std::path::{Path, PathBuf};

use ricap_ingest::{
    IngestError, KeywordLayout, OutputLayout, read_keyword_table, read_note_table,
    write_results_csv, write_results_json,
};
use ricap_model::{
    CategorySet, ClassificationDomain, DiagnosisResult, KeywordTableError, MainCategory, NoteField,
    RowClassification,
};

fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).expect("write file");
    path
}

#[test]
fn reads_column_layout_with_bom_and_ragged_columns() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = write_file(
        dir.path(),
        "illness.csv",
        "\u{feff}Mood ,ADHD,Autism\ndepress,adhd,asd\nmood,,autis\n\"low, mood\"\n",
    );
    let table = read_keyword_table(&path, ClassificationDomain::Illness, KeywordLayout::Columns)
        .expect("read table");

    assert_eq!(table.category_names().collect::<Vec<_>>(), vec!["Mood", "ADHD", "Autism"]);
    assert_eq!(
        table.get("Mood").expect("Mood").keywords,
        vec!["depress", "mood", "low mood"]
    );
    assert_eq!(table.get("ADHD").expect("ADHD").keywords, vec!["adhd"]);
}

#[test]
fn reads_row_layout_including_the_last_column() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = write_file(
        dir.path(),
        "mrr.csv",
        "Notes,Reasons,k1,k2,k3\nx,Suicidal,suicid,si,overdose\n,Aggression,aggress\n,Other,,\n",
    );
    let table = read_keyword_table(&path, ClassificationDomain::ReferralReason, KeywordLayout::Rows)
        .expect("read table");

    assert_eq!(
        table.category_names().collect::<Vec<_>>(),
        vec!["Suicidal", "Aggression", "Other"]
    );
    assert_eq!(
        table.get("Suicidal").expect("Suicidal").keywords,
        vec!["suicid", "si", "overdose"]
    );
    assert!(table.get("Other").expect("Other").keywords.is_empty());
}

#[test]
fn row_layout_needs_the_label_column() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = write_file(dir.path(), "symptoms.csv", "Name,k1\nInsomnia,insomnia\n");
    let err = read_keyword_table(&path, ClassificationDomain::Symptom, KeywordLayout::Rows)
        .expect_err("missing label column");
    assert!(matches!(err, IngestError::MissingLabelColumn { ref column, .. } if column == "Symptoms"));
}

#[test]
fn duplicate_categories_are_reported_with_the_path() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = write_file(dir.path(), "dup.csv", "Mood,Mood\nmood,depress\n");
    let err = read_keyword_table(&path, ClassificationDomain::Illness, KeywordLayout::Columns)
        .expect_err("duplicate category");
    match err {
        IngestError::KeywordTable { path: reported, source } => {
            assert_eq!(reported, path);
            assert_eq!(
                source,
                KeywordTableError::DuplicateCategory {
                    domain: ClassificationDomain::Illness,
                    category: "Mood".to_string(),
                }
            );
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn empty_keyword_file_is_rejected() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = write_file(dir.path(), "empty.csv", "");
    let err = read_keyword_table(&path, ClassificationDomain::Symptom, KeywordLayout::Columns)
        .expect_err("empty file");
    assert!(matches!(err, IngestError::EmptyFile { .. }));
}

#[test]
fn note_table_without_note_columns_is_rejected() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = write_file(dir.path(), "notes.csv", "record_id,comment\n1,hello\n");
    let err = read_note_table(&path).expect_err("no note columns");
    assert!(matches!(err, IngestError::NoNoteColumns { .. }));
}

#[test]
fn writes_source_columns_then_results() {
    let dir = tempfile::tempdir().expect("temp dir");
    let notes_path = write_file(
        dir.path(),
        "notes.csv",
        "record_id,ref_reason,admission_diagnosis\n1,\"si, cutting\",MDD\n2,,\n",
    );
    let notes = read_note_table(&notes_path).expect("read notes");
    assert_eq!(notes.len(), 2);
    assert_eq!(notes.record(0).get(NoteField::RefReason), Some("si, cutting"));
    assert_eq!(notes.record(1).get(NoteField::AdmissionDiagnosis), None);

    let illness = ricap_model::KeywordTable::new(
        ClassificationDomain::Illness,
        [("Depression", ["mdd"])],
    )
    .expect("illness");
    let referral = ricap_model::KeywordTable::new(
        ClassificationDomain::ReferralReason,
        [("Suicidal", ["si"])],
    )
    .expect("referral");
    let symptom =
        ricap_model::KeywordTable::new(ClassificationDomain::Symptom, [("Cutting", ["cutting"])])
            .expect("symptom");
    let layout = OutputLayout::new(&illness, &referral, &symptom, "Other");

    let results = vec![
        RowClassification {
            admission: Some(DiagnosisResult {
                main: MainCategory::Single("Depression".to_string()),
                categories: ["Depression"].into_iter().collect(),
            }),
            discharge: None,
            referral_reasons: ["Suicidal"].into_iter().collect(),
            symptoms: ["Cutting"].into_iter().collect(),
        },
        RowClassification {
            referral_reasons: ["Other"].into_iter().collect(),
            symptoms: CategorySet::new(),
            ..RowClassification::default()
        },
    ];

    let out = dir.path().join("out").join("result.csv");
    write_results_csv(&out, &notes, &results, &layout).expect("write csv");
    let written = fs::read_to_string(&out).expect("read output");
    insta::assert_snapshot!(written, @r#"
    record_id,ref_reason,admission_diagnosis,main_addx,main_addx_review,addx_Depression,main_dcdx,main_dcdx_review,dcdx_Depression,mrr_Suicidal,mrr_Other,Cutting
    1,"si, cutting",MDD,Depression,,1,,,0,1,0,1
    2,,,,,0,,,0,0,1,0
    "#);

    let json_path = dir.path().join("out").join("result.json");
    write_results_json(&json_path, &results).expect("write json");
    let parsed: Vec<RowClassification> =
        serde_json::from_str(&fs::read_to_string(&json_path).expect("read json")).expect("parse");
    assert_eq!(parsed, results);
}

#[test]
fn row_count_must_match() {
    let dir = tempfile::tempdir().expect("temp dir");
    let notes_path = write_file(dir.path(), "notes.csv", "ref_reason\nx\n");
    let notes = read_note_table(&notes_path).expect("read notes");
    let table =
        ricap_model::KeywordTable::new(ClassificationDomain::Symptom, [("A", ["a"])]).expect("table");
    let layout = OutputLayout::new(&table, &table, &table, "Other");
    let err = write_results_csv(&dir.path().join("out.csv"), &notes, &[], &layout)
        .expect_err("mismatch");
    assert!(matches!(err, IngestError::RowCountMismatch { rows: 1, results: 0 }));
}

#[test]
fn long_source_rows_are_cut_to_the_header_width() {
    let dir = tempfile::tempdir().expect("temp dir");
    let notes_path = write_file(dir.path(), "notes.csv", "id,ref_reason\n1,violent,\n2,calm,extra,\n");
    let notes = read_note_table(&notes_path).expect("read notes");
    let empty = |domain| {
        ricap_model::KeywordTable::new(domain, Vec::<(&str, Vec<&str>)>::new()).expect("table")
    };
    let illness = empty(ClassificationDomain::Illness);
    let symptom = empty(ClassificationDomain::Symptom);
    let referral = ricap_model::KeywordTable::new(
        ClassificationDomain::ReferralReason,
        [("Aggression", ["violen"])],
    )
    .expect("referral");
    let layout = OutputLayout::new(&illness, &referral, &symptom, "Other");
    let results = vec![
        RowClassification {
            referral_reasons: ["Aggression"].into_iter().collect(),
            ..RowClassification::default()
        },
        RowClassification {
            referral_reasons: ["Other"].into_iter().collect(),
            ..RowClassification::default()
        },
    ];

    let out = dir.path().join("result.csv");
    write_results_csv(&out, &notes, &results, &layout).expect("write csv");

    let mut reader = csv::Reader::from_path(&out).expect("open output");
    let headers = reader.headers().expect("headers").clone();
    let aggression = headers
        .iter()
        .position(|header| header == "mrr_Aggression")
        .expect("aggression column");
    let rows: Vec<csv::StringRecord> = reader.records().map(|row| row.expect("row")).collect();
    assert!(rows.iter().all(|row| row.len() == headers.len()));
    assert_eq!(&rows[0][aggression], "1");
    assert_eq!(&rows[1][aggression], "0");
    assert_eq!(&rows[1][1], "calm");
}
