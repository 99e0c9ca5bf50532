use super::*;
use std::fs::write;
use tempfile::tempdir;

#[test]
fn from_json_parses_full_record() {
    let cfg = SweepConfig::from_json(
        r#"{
            "directories": "/var/log/app|/tmp/cache",
            "extensions": "log|TMP",
            "pattern": "^tmp_",
            "days_of_expiration": 30,
            "search_in_subdirectories": true
        }"#,
    )
    .expect("valid config");

    assert_eq!(
        cfg.directories,
        vec![PathBuf::from("/var/log/app"), PathBuf::from("/tmp/cache")]
    );
    assert_eq!(cfg.extensions, vec!["log".to_string(), "TMP".to_string()]);
    assert_eq!(cfg.pattern, "^tmp_");
    assert_eq!(cfg.min_age_days, 30);
    assert!(cfg.recursive);
}

#[test]
fn from_json_defaults_missing_fields() {
    let cfg = SweepConfig::from_json(r#"{"directories": "/srv"}"#).expect("valid config");

    assert_eq!(cfg.directories, vec![PathBuf::from("/srv")]);
    assert_eq!(cfg.extensions, vec![String::new()]);
    assert_eq!(cfg.pattern, "");
    assert_eq!(cfg.min_age_days, 0);
    assert!(!cfg.recursive);
}

#[test]
fn from_json_drops_blank_directories_but_keeps_order() {
    let cfg = SweepConfig::from_json(r#"{"directories": "/b||/a| |/c"}"#).expect("valid config");

    assert_eq!(
        cfg.directories,
        vec![
            PathBuf::from("/b"),
            PathBuf::from("/a"),
            PathBuf::from("/c")
        ]
    );
}

#[test]
fn from_json_rejects_bad_input() {
    let cases: &[(&str, &str)] = &[
        (r#"{"days_of_expiration": -1}"#, "negative age"),
        (r#"{"days_of_expiration": 1.5}"#, "fractional age"),
        (r#"{"search_in_subdirectories": "yes"}"#, "non-boolean recursion"),
        (r#"{"directories": "/a""#, "truncated document"),
    ];

    for (json, why) in cases {
        let err = SweepConfig::from_json(json).expect_err(why);
        assert!(
            matches!(err, ConfigError::Parse(_)),
            "{why}: expected parse error, got {err:?}"
        );
    }
}

#[test]
fn from_json_keeps_invalid_pattern_for_the_sweep_to_report() {
    let cfg = SweepConfig::from_json(
        r#"{"directories": "/tmp", "extensions": "log", "pattern": "(["}"#,
    )
    .expect("invalid pattern is not a load error");

    assert_eq!(cfg.pattern, "([");
    assert_eq!(cfg.extensions, vec!["log".to_string()]);
}

#[test]
fn from_json_accepts_blank_pattern_without_compiling() {
    let cfg = SweepConfig::from_json(r#"{"pattern": "   "}"#).expect("blank pattern");
    assert_eq!(cfg.pattern, "   ");
}

#[test]
fn load_reads_file_from_disk() {
    let tmp = tempdir().expect("create temp dir");
    let path = tmp.path().join("config.json");
    write(
        &path,
        r#"{"directories": "/var/log", "extensions": "log", "days_of_expiration": 7}"#,
    )
    .expect("write config");

    let cfg = SweepConfig::load(&path).expect("load config");
    assert_eq!(cfg.directories, vec![PathBuf::from("/var/log")]);
    assert_eq!(cfg.min_age_days, 7);
}

#[test]
fn load_missing_file_reports_path() {
    let tmp = tempdir().expect("create temp dir");
    let path = tmp.path().join("absent.json");

    let err = SweepConfig::load(&path).expect_err("missing file");
    match &err {
        ConfigError::Io { path: p, .. } => assert_eq!(p, &path),
        other => panic!("expected io error, got {other:?}"),
    }
    assert!(err.to_string().contains("absent.json"));
}

#[test]
fn display_matches_log_format() {
    let cfg = SweepConfig {
        directories: vec![PathBuf::from("/a"), PathBuf::from("/b")],
        extensions: vec!["log".into(), "tmp".into()],
        pattern: "^x".into(),
        min_age_days: 3,
        recursive: false,
    };

    assert_eq!(
        cfg.to_string(),
        "{Directories: /a|/b, Extensions: log|tmp, Pattern: ^x, DaysOfExpiration: 3, SearchInSubdirectories: false}"
    );
}
