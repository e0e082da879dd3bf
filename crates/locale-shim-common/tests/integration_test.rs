//! Integration tests for locale-shim-common.

use locale_shim_common::{init_logging, LogFormat, LoggingConfig, ShimError};

#[test]
fn test_logging_config_from_yaml() {
    let yaml = r#"
level: "locale_shim_i18n=debug,info"
format: json
file_path: /tmp/locale-shim.log
"#;
    let config: LoggingConfig = serde_yaml::from_str(yaml).unwrap();

    assert_eq!(config.level, "locale_shim_i18n=debug,info");
    assert_eq!(config.format, LogFormat::Json);
    assert_eq!(config.file_path.as_deref(), Some("/tmp/locale-shim.log"));
    // Unspecified fields fall back to defaults
    assert!(config.include_targets);
    assert!(!config.include_spans);
}

#[test]
fn test_unwritable_log_file_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let config = LoggingConfig {
        // A directory cannot be opened for appending
        file_path: Some(dir.path().to_string_lossy().into_owned()),
        ..LoggingConfig::default()
    };

    let err = init_logging(&config).unwrap_err();
    assert!(matches!(err, ShimError::Io(_)));
}
