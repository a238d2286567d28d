pub mod loader;
pub mod validation;

pub use loader::ConfigLoader;
pub use validation::ConfigValidator;

use crate::core::runtime_inputs::RUNTIME_INPUT_SENTINEL;
use crate::core::types::DocumentFormat;
use serde::{Deserialize, Serialize};

/// Default config file name, looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "pipeline-fixtures.toml";

/// Configuration loaded from pipeline-fixtures.toml
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct FixturesConfig {
    /// Runtime-input scan configuration
    #[serde(default)]
    pub scan: ScanConfig,

    /// Rendered document configuration
    #[serde(default)]
    pub output: OutputConfig,
}

/// Runtime-input scan configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScanConfig {
    /// Value that marks a field as a runtime input
    #[serde(default = "default_sentinel")]
    pub sentinel: String,

    /// Report qualified paths instead of bare keys
    #[serde(default)]
    pub qualified: bool,
}

/// Rendered document configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct OutputConfig {
    /// Format used when writing rewritten documents
    #[serde(default)]
    pub format: DocumentFormat,
}

fn default_sentinel() -> String {
    RUNTIME_INPUT_SENTINEL.to_string()
}

impl Default for ScanConfig {
    fn default() -> Self {
        ScanConfig {
            sentinel: default_sentinel(),
            qualified: false,
        }
    }
}
