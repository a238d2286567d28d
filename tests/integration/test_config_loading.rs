use pipeline_fixtures::core::config::ConfigLoader;
use pipeline_fixtures::core::types::{DocumentFormat, ErrorCategory};
use pipeline_fixtures::logging::{ConsoleOutput, LoggingConfig};
use serial_test::serial;
use std::env;
use std::fs;
use tempfile::TempDir;

fn clear_fixture_env() {
    for v in &[
        "PIPELINE_FIXTURES_SENTINEL",
        "PIPELINE_FIXTURES_QUALIFIED",
        "PIPELINE_FIXTURES_OUTPUT_FORMAT",
        "PIPELINE_FIXTURES_LOG_LEVEL",
    ] {
        env::remove_var(v);
    }
}

fn write_config(dir: &TempDir, content: &str) -> std::path::PathBuf {
    let path = dir.path().join("pipeline-fixtures.toml");
    fs::write(&path, content).unwrap();
    path
}

#[test]
#[serial]
fn test_file_values_are_loaded() {
    clear_fixture_env();
    let temp_dir = TempDir::new().unwrap();
    let path = write_config(
        &temp_dir,
        r#"
[scan]
sentinel = "<+runtime>"
qualified = true

[output]
format = "json"
"#,
    );

    let config = ConfigLoader::load(Some(path.as_path())).unwrap();
    assert_eq!(config.scan.sentinel, "<+runtime>");
    assert!(config.scan.qualified);
    assert_eq!(config.output.format, DocumentFormat::Json);
}

#[test]
#[serial]
fn test_env_overrides_file_values() {
    clear_fixture_env();
    let temp_dir = TempDir::new().unwrap();
    let path = write_config(&temp_dir, "[scan]\nsentinel = \"<+runtime>\"\n");

    env::set_var("PIPELINE_FIXTURES_SENTINEL", "<+env>");
    env::set_var("PIPELINE_FIXTURES_QUALIFIED", "true");
    env::set_var("PIPELINE_FIXTURES_OUTPUT_FORMAT", "json");
    let config = ConfigLoader::load(Some(path.as_path())).unwrap();
    clear_fixture_env();

    assert_eq!(config.scan.sentinel, "<+env>");
    assert!(config.scan.qualified);
    assert_eq!(config.output.format, DocumentFormat::Json);
}

#[test]
#[serial]
fn test_invalid_env_values_are_ignored() {
    clear_fixture_env();
    let temp_dir = TempDir::new().unwrap();
    let path = write_config(&temp_dir, "");

    env::set_var("PIPELINE_FIXTURES_QUALIFIED", "maybe");
    env::set_var("PIPELINE_FIXTURES_OUTPUT_FORMAT", "toml");
    let config = ConfigLoader::load(Some(path.as_path())).unwrap();
    clear_fixture_env();

    assert!(!config.scan.qualified);
    assert_eq!(config.output.format, DocumentFormat::Yaml);
}

#[test]
#[serial]
fn test_blank_sentinel_fails_validation() {
    clear_fixture_env();
    let temp_dir = TempDir::new().unwrap();
    let path = write_config(&temp_dir, "[scan]\nsentinel = \"\"\n");

    let err = ConfigLoader::load(Some(path.as_path())).unwrap_err();
    assert_eq!(err.category, ErrorCategory::ValidationError);
    assert_eq!(err.code, "FIX-CFG-003");
}

#[test]
#[serial]
fn test_resolve_skips_validation() {
    clear_fixture_env();
    let temp_dir = TempDir::new().unwrap();
    let path = write_config(&temp_dir, "[output]\nformat = \"json\"\n");

    env::set_var("PIPELINE_FIXTURES_SENTINEL", "");
    let resolved = ConfigLoader::resolve(Some(path.as_path()));
    let loaded = ConfigLoader::load(Some(path.as_path()));
    clear_fixture_env();

    let resolved = resolved.unwrap();
    assert_eq!(resolved.scan.sentinel, "");
    assert_eq!(resolved.output.format, DocumentFormat::Json);
    assert_eq!(loaded.unwrap_err().code, "FIX-CFG-003");
}

#[test]
#[serial]
fn test_malformed_toml_is_config_error() {
    clear_fixture_env();
    let temp_dir = TempDir::new().unwrap();
    let path = write_config(&temp_dir, "[scan\nsentinel = 1\n");

    let err = ConfigLoader::load(Some(path.as_path())).unwrap_err();
    assert_eq!(err.category, ErrorCategory::ConfigError);
    assert_eq!(err.code, "FIX-CFG-001");
}

#[test]
#[serial]
fn test_missing_explicit_file_is_an_error() {
    clear_fixture_env();
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("absent.toml");

    let err = ConfigLoader::load(Some(path.as_path())).unwrap_err();
    assert_eq!(err.code, "FIX-CFG-002");
}

#[test]
#[serial]
fn test_logging_section_shares_config_file() {
    clear_fixture_env();
    let temp_dir = TempDir::new().unwrap();
    let path = write_config(
        &temp_dir,
        r#"
[scan]
qualified = true

[logging]
default_level = "debug"
console_output = "stdout"
"#,
    );

    let logging = LoggingConfig::load(Some(path.as_path())).unwrap();
    assert_eq!(logging.default_level, "debug");
    assert_eq!(logging.console_output, ConsoleOutput::Stdout);

    env::set_var("PIPELINE_FIXTURES_LOG_LEVEL", "trace");
    let overridden = LoggingConfig::load(Some(path.as_path())).unwrap();
    clear_fixture_env();
    assert_eq!(overridden.default_level, "trace");
}

#[test]
fn test_env_var_documentation_lists_every_override() {
    let docs = ConfigLoader::env_var_documentation();
    for name in [
        "PIPELINE_FIXTURES_SENTINEL",
        "PIPELINE_FIXTURES_QUALIFIED",
        "PIPELINE_FIXTURES_OUTPUT_FORMAT",
        "PIPELINE_FIXTURES_LOG_LEVEL",
    ] {
        assert!(docs.iter().any(|line| line.starts_with(name)), "{} undocumented", name);
    }
}
