#![allow(clippy::result_large_err)] // Transforms return AppError for structured diagnostics.

use crate::core::document::Value;
use crate::core::error::AppError;

mod locate;
mod step_template;

pub use locate::{
    get_execution_steps, get_first_stage, get_first_step, get_stages, locate_first_step,
    Located, MissingSegment, StepLookup,
};
pub use step_template::{rewrite_step_as_template, RewriteOutcome, StepTemplateTransform};

/// Pure transform from one parsed pipeline document to another.
///
/// The input is borrowed and never modified, so a parsed fixture can be shared between
/// several transforms or test cases.
pub trait DocumentTransform {
    fn name(&self) -> &'static str;
    fn transform(&self, doc: &Value) -> Result<Value, AppError>;
}

/// Run `transform` inside a span named after it.
pub fn apply_transform(doc: &Value, transform: &dyn DocumentTransform) -> Result<Value, AppError> {
    let span = tracing::debug_span!("transform", name = transform.name());
    let _entered = span.enter();
    let result = transform.transform(doc);
    if let Err(err) = &result {
        tracing::debug!(code = %err.code, "transform failed");
    }
    result
}
