use crate::core::document::{value_at_mut, Mapping, Value};
use crate::core::error::AppError;
use crate::core::transform::locate::locate_first_step;
use crate::core::transform::DocumentTransform;
use crate::core::types::ErrorCategory;

const IDENTIFIER_KEY: &str = "identifier";
const TEMPLATE_KEY: &str = "template";
const TEMPLATE_INPUTS_KEY: &str = "templateInputs";

/// Rewrites the first step of the first stage as if it were instantiated from a step
/// template: every field except `identifier` moves under `template.templateInputs`.
pub struct StepTemplateTransform;

#[derive(Debug, Clone, PartialEq)]
pub enum RewriteOutcome {
    Templated(Value),
    /// The step already carries a `template` key and was left alone.
    AlreadyTemplated,
}

impl StepTemplateTransform {
    pub fn rewrite(&self, doc: &Value) -> Result<RewriteOutcome, AppError> {
        let step = locate_first_step(doc).into_result()?;

        if step.node.contains_key(TEMPLATE_KEY) {
            tracing::debug!(path = %step.path, "step already templated");
            return Ok(RewriteOutcome::AlreadyTemplated);
        }

        let identifier = step.node.get(IDENTIFIER_KEY).cloned().ok_or_else(|| {
            AppError::new(
                ErrorCategory::ShapeMismatch,
                format!("step at '{}' has no identifier", step.path),
            )
            .with_code("FIX-SHAPE-002")
        })?;

        let templated = templated_step(identifier, step.node);
        let mut rewritten = doc.clone();
        let slot = value_at_mut(&mut rewritten, &step.path).ok_or_else(|| {
            AppError::new(
                ErrorCategory::InternalError,
                format!("step path '{}' vanished from cloned document", step.path),
            )
        })?;
        *untagged_mut(slot) = Value::Mapping(templated);
        tracing::debug!(path = %step.path, "wrapped step in template inputs");
        Ok(RewriteOutcome::Templated(rewritten))
    }
}

impl DocumentTransform for StepTemplateTransform {
    fn name(&self) -> &'static str {
        "StepTemplateTransform"
    }

    fn transform(&self, doc: &Value) -> Result<Value, AppError> {
        match self.rewrite(doc)? {
            RewriteOutcome::Templated(rewritten) => Ok(rewritten),
            RewriteOutcome::AlreadyTemplated => Ok(doc.clone()),
        }
    }
}

/// `{identifier, template: {templateInputs: <every other field, in order>}}`
fn templated_step(identifier: Value, step: &Mapping) -> Mapping {
    let inputs: Mapping = step
        .iter()
        .filter(|(key, _)| key.as_str() != Some(IDENTIFIER_KEY))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();

    let mut template = Mapping::new();
    template.insert(Value::from(TEMPLATE_INPUTS_KEY), Value::Mapping(inputs));

    let mut wrapped = Mapping::new();
    wrapped.insert(Value::from(IDENTIFIER_KEY), identifier);
    wrapped.insert(Value::from(TEMPLATE_KEY), Value::Mapping(template));
    wrapped
}

/// Innermost value beneath any YAML tags.
fn untagged_mut(value: &mut Value) -> &mut Value {
    match value {
        Value::Tagged(tagged) => untagged_mut(&mut tagged.value),
        other => other,
    }
}

/// Rewrite the first step of `doc` into its template-wrapped shape.
pub fn rewrite_step_as_template(doc: &Value) -> Result<Value, AppError> {
    StepTemplateTransform.transform(doc)
}
