#![allow(clippy::result_large_err)]

use super::FixturesConfig;
use crate::core::error::AppError;
use crate::core::types::ErrorCategory;

pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate configuration rules
    pub fn validate(config: &FixturesConfig) -> Result<(), AppError> {
        if config.scan.sentinel.trim().is_empty() {
            return Err(AppError::new(
                ErrorCategory::ValidationError,
                "scan.sentinel cannot be empty",
            )
            .with_code("FIX-CFG-003"));
        }

        Ok(())
    }
}
