use locale_shim_common::test_utils::{create_temp_dir, write_fixture};
use locale_shim_common::LogFormat;
use locale_shim_config::{ConfigError, ConfigLoader};

#[test]
fn test_load_full_file() {
    let dir = create_temp_dir();
    let path = write_fixture(
        dir.path(),
        "locale-shim.yaml",
        r#"
assets:
  public_base_path: "https://cdn.example.com/app"
  locales: ["es", "en"]
http:
  timeout_secs: 10
  max_idle_per_host: 4
  max_retries: 1
bundle:
  use_isolating: true
logging:
  level: "warn"
  format: "json"
"#,
    );

    let settings = ConfigLoader::load_from_file_with(&path, |_| None).unwrap();

    assert_eq!(settings.assets.locales, vec!["es", "en"]);
    assert_eq!(settings.http.timeout_secs, 10);
    assert_eq!(settings.http.max_idle_per_host, 4);
    assert!(settings.bundle.use_isolating);
    assert_eq!(settings.logging.level, "warn");
    assert_eq!(settings.logging.format, LogFormat::Json);
}

#[test]
fn test_missing_file() {
    let dir = create_temp_dir();
    let result = ConfigLoader::load_from_file_with(dir.path().join("absent.yaml"), |_| None);
    assert!(matches!(result, Err(ConfigError::Io(_))));
}

#[test]
fn test_bad_base_url_rejected() {
    let dir = create_temp_dir();
    let path = write_fixture(dir.path(), "bad.yaml", "assets:\n  public_base_path: \"http://\"\n");

    let result = ConfigLoader::load_from_file_with(&path, |_| None);
    assert!(matches!(result, Err(ConfigError::Validation(_))));
}
