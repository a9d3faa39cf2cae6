use blockhook_dispatch::{ConfigError, DispatchConfig, FailureMode};
use pretty_assertions::assert_eq;
use std::io::Write;

#[test]
fn defaults() {
    let config = DispatchConfig::default();
    assert_eq!(config.failure_mode, FailureMode::Abort);
    assert_eq!(config.max_depth, 16);
    assert!(!config.log_values);
}

#[test]
fn parses_dispatch_table() {
    let config = DispatchConfig::from_toml_str(
        r#"
        [dispatch]
        failure-mode = "continue"
        max-depth = 4
        log-values = true
        "#,
    )
    .unwrap();
    assert_eq!(
        config,
        DispatchConfig {
            failure_mode: FailureMode::Continue,
            max_depth: 4,
            log_values: true,
        }
    );
}

#[test]
fn missing_table_and_keys_use_defaults() {
    assert_eq!(DispatchConfig::from_toml_str("").unwrap(), DispatchConfig::default());
    let partial = DispatchConfig::from_toml_str("[dispatch]\nlog-values = true\n").unwrap();
    assert_eq!(partial.failure_mode, FailureMode::Abort);
    assert!(partial.log_values);
}

#[test]
fn zero_depth_is_invalid() {
    let err = DispatchConfig::from_toml_str("[dispatch]\nmax-depth = 0\n").unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
}

#[test]
fn unknown_failure_mode_is_parse_error() {
    let err = DispatchConfig::from_toml_str("[dispatch]\nfailure-mode = \"retry\"\n").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn failure_mode_from_str() {
    assert_eq!("abort".parse::<FailureMode>().unwrap(), FailureMode::Abort);
    assert_eq!("Continue".parse::<FailureMode>().unwrap(), FailureMode::Continue);
    assert!("skip".parse::<FailureMode>().is_err());
    assert_eq!(FailureMode::Continue.to_string(), "continue");
}

// ── File loading ─────────────────────────────────────────────────

#[test]
fn load_from_missing_file_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = DispatchConfig::load_from(&dir.path().join("blockhook.toml"));
    assert_eq!(config, DispatchConfig::default());
}

#[test]
fn load_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[dispatch]\nfailure-mode = \"continue\"").unwrap();
    let config = DispatchConfig::load_from(file.path());
    assert_eq!(config.failure_mode, FailureMode::Continue);
}

#[test]
fn load_from_malformed_file_falls_back_but_try_load_errors() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[dispatch\nnot toml").unwrap();
    assert_eq!(DispatchConfig::load_from(file.path()), DispatchConfig::default());
    assert!(DispatchConfig::try_load_from(file.path()).is_err());
}
