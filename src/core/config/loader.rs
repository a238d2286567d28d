#![allow(clippy::result_large_err)]

use super::{ConfigValidator, FixturesConfig, CONFIG_FILE_NAME};
use crate::core::error::AppError;
use crate::core::types::{DocumentFormat, ErrorCategory};
use std::env;
use std::path::{Path, PathBuf};

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config from an explicit file, or from ./pipeline-fixtures.toml when none is given.
    /// Environment variables override config file values.
    /// An explicit path must exist; the default path may be absent.
    pub fn load(explicit: Option<&Path>) -> Result<FixturesConfig, AppError> {
        let config = Self::resolve(explicit)?;
        ConfigValidator::validate(&config)?;
        Ok(config)
    }

    /// Same precedence as [`ConfigLoader::load`] without running [`ConfigValidator`].
    pub fn resolve(explicit: Option<&Path>) -> Result<FixturesConfig, AppError> {
        let config_file = match explicit {
            Some(path) => Some(Self::load_from_file(path)?.ok_or_else(|| {
                AppError::new(
                    ErrorCategory::ConfigError,
                    format!("Config file {} does not exist", path.display()),
                )
                .with_code("FIX-CFG-002")
            })?),
            None => Self::load_from_file(&Self::default_path())?,
        };

        let mut config = config_file.unwrap_or_default();
        Self::apply_env_overrides(&mut config);
        Ok(config)
    }

    pub fn default_path() -> PathBuf {
        PathBuf::from(CONFIG_FILE_NAME)
    }

    /// Load config from specific file path
    /// Returns Ok(None) if file doesn't exist
    pub fn load_from_file(path: &Path) -> Result<Option<FixturesConfig>, AppError> {
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            AppError::new(
                ErrorCategory::IoError,
                format!("Failed to read config file {}: {}", path.display(), e),
            )
        })?;

        let config: FixturesConfig = toml::from_str(&content).map_err(|e| {
            AppError::new(
                ErrorCategory::ConfigError,
                format!("Failed to parse config file {}: {}", path.display(), e),
            )
            .with_code("FIX-CFG-001")
        })?;

        Ok(Some(config))
    }

    /// Apply environment variable overrides to the configuration
    /// Environment variables take precedence over config file values
    fn apply_env_overrides(config: &mut FixturesConfig) {
        if let Ok(sentinel) = env::var("PIPELINE_FIXTURES_SENTINEL") {
            config.scan.sentinel = sentinel;
        }

        if let Ok(qualified_str) = env::var("PIPELINE_FIXTURES_QUALIFIED") {
            if let Ok(qualified) = qualified_str.parse::<bool>() {
                config.scan.qualified = qualified;
            }
        }

        if let Ok(format_str) = env::var("PIPELINE_FIXTURES_OUTPUT_FORMAT") {
            match format_str.parse::<DocumentFormat>() {
                Ok(format) => config.output.format = format,
                Err(err) => tracing::warn!("ignoring PIPELINE_FIXTURES_OUTPUT_FORMAT: {}", err),
            }
        }
    }

    /// Get documentation for supported environment variables
    pub fn env_var_documentation() -> &'static [&'static str] {
        &[
            "PIPELINE_FIXTURES_SENTINEL - Override the runtime-input sentinel (default: <+input>)",
            "PIPELINE_FIXTURES_QUALIFIED - Report qualified paths from scan (true/false, default: false)",
            "PIPELINE_FIXTURES_OUTPUT_FORMAT - Format for rewritten documents (yaml/json, default: yaml)",
            "PIPELINE_FIXTURES_LOG_LEVEL - Default tracing level when RUST_LOG is unset (default: warn)",
        ]
    }
}
