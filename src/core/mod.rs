pub mod config;
pub mod document;
pub mod error;
pub mod runtime_inputs;
pub mod transform;
pub mod types;

pub use config::{ConfigLoader, ConfigValidator, FixturesConfig};
pub use document::{load_document, parse_document, render_document, Document, KeyPath};
pub use error::{AppError, DefaultErrorReporter, ErrorReporter};
pub use runtime_inputs::{
    collect_runtime_input_keys, scan_runtime_inputs, RuntimeInputField, RuntimeInputScanner,
    RUNTIME_INPUT_SENTINEL,
};
pub use transform::{
    apply_transform, locate_first_step, rewrite_step_as_template, DocumentTransform,
    RewriteOutcome, StepLookup, StepTemplateTransform,
};
pub use types::*;
