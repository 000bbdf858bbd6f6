use std::fs;
use std::path::{Path, PathBuf};

use ricap_cli::config::{ConfigError, ConfigFile, ConfigOverrides, ResolvedConfig, load_config_file};
use ricap_ingest::KeywordLayout;
use ricap_model::IgnoreList;

const FULL_CONFIG: &str = r#"
[keywords]
dir = "tables"
illness = "ill.csv"
layout = "rows"

[classification]
ignore = ["query", "possible"]
referral_fallback = "Unspecified"
"#;

#[test]
fn config_file_beats_environment_and_defaults() {
    let file = ConfigFile::parse(FULL_CONFIG, Path::new("ricap.toml")).expect("parse");
    let config = ResolvedConfig::resolve(
        &ConfigOverrides::default(),
        Some(&file),
        Some(PathBuf::from("from-env")),
    );

    assert_eq!(config.illness_path, Path::new("tables").join("ill.csv"));
    assert_eq!(config.referral_path, Path::new("tables").join("mrr_keywords.csv"));
    assert_eq!(config.layout, KeywordLayout::Rows);
    assert_eq!(config.ignore, IgnoreList::new(["query", "possible"]));
    assert_eq!(config.referral_fallback, "Unspecified");
}

#[test]
fn command_line_beats_config_file() {
    let file = ConfigFile::parse(FULL_CONFIG, Path::new("ricap.toml")).expect("parse");
    let overrides = ConfigOverrides {
        keywords_dir: Some(PathBuf::from("cli-dir")),
        symptom: Some(PathBuf::from("elsewhere/sx.csv")),
        layout: Some(KeywordLayout::Columns),
        ignore: Some(vec!["vs".to_string()]),
        referral_fallback: Some("Other".to_string()),
        ..ConfigOverrides::default()
    };
    let config = ResolvedConfig::resolve(&overrides, Some(&file), None);

    assert_eq!(config.illness_path, Path::new("cli-dir").join("ill.csv"));
    assert_eq!(config.symptom_path, PathBuf::from("elsewhere/sx.csv"));
    assert_eq!(config.layout, KeywordLayout::Columns);
    assert_eq!(config.ignore, IgnoreList::new(["vs"]));
    assert_eq!(config.referral_fallback, "Other");
}

#[test]
fn environment_directory_beats_default() {
    let config = ResolvedConfig::resolve(
        &ConfigOverrides::default(),
        None,
        Some(PathBuf::from("/srv/keywords")),
    );
    assert_eq!(config.illness_path, Path::new("/srv/keywords").join("illness_keywords.csv"));
}

#[test]
fn implicit_config_file_is_found_in_working_directory() {
    let dir = tempfile::tempdir().expect("temp dir");
    assert_eq!(load_config_file(None, dir.path()).expect("no file"), None);

    fs::write(dir.path().join("ricap.toml"), "[keywords]\nlayout = \"rows\"\n").expect("write");
    let file = load_config_file(None, dir.path())
        .expect("load")
        .expect("file found");
    assert_eq!(file.keywords.layout, Some(KeywordLayout::Rows));
}

#[test]
fn explicit_config_file_must_exist() {
    let dir = tempfile::tempdir().expect("temp dir");
    let missing = dir.path().join("nope.toml");
    let err = load_config_file(Some(&missing), dir.path()).expect_err("missing file");
    assert!(matches!(err, ConfigError::Io { .. }));
}

#[test]
fn unknown_layout_is_a_parse_error() {
    let err = ConfigFile::parse("[keywords]\nlayout = \"grid\"\n", Path::new("ricap.toml"))
        .expect_err("bad layout");
    assert!(matches!(err, ConfigError::Toml { .. }));
}
