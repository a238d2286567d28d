//! Named accessors for the first execution step of a pipeline.
//!
//! The step lives at `pipeline.stages[0].stage.spec.execution.steps[0].step`. Each
//! accessor resolves one part of that path and reports the exact segment where the
//! document stops matching.

use crate::core::document::{KeyPath, Mapping, Value};
use serde_yaml::Sequence;

/// The document does not have the expected shape at `at`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("expected {expected} at '{at}'")]
pub struct MissingSegment {
    pub at: KeyPath,
    pub expected: String,
}

impl MissingSegment {
    pub fn new<T: Into<String>>(at: KeyPath, expected: T) -> Self {
        Self {
            at,
            expected: expected.into(),
        }
    }
}

/// A node found inside a document, with the path it was found at.
#[derive(Debug, Clone, PartialEq)]
pub struct Located<'a, T> {
    pub node: &'a T,
    pub path: KeyPath,
}

impl<'a, T> Located<'a, T> {
    fn new(node: &'a T, path: KeyPath) -> Self {
        Self { node, path }
    }
}

/// Result of looking up the first execution step.
#[derive(Debug, Clone, PartialEq)]
pub enum StepLookup<'a> {
    Found { node: &'a Mapping, path: KeyPath },
    Missing(MissingSegment),
}

impl<'a> StepLookup<'a> {
    pub fn into_result(self) -> Result<Located<'a, Mapping>, MissingSegment> {
        match self {
            StepLookup::Found { node, path } => Ok(Located::new(node, path)),
            StepLookup::Missing(missing) => Err(missing),
        }
    }
}

/// `pipeline.stages`
pub fn get_stages(doc: &Value) -> Result<Located<'_, Sequence>, MissingSegment> {
    let root = expect_mapping(Located::new(doc, KeyPath::root()))?;
    let pipeline = expect_mapping(entry(&root, "pipeline")?)?;
    expect_sequence(entry(&pipeline, "stages")?)
}

/// `stages[0].stage`
pub fn get_first_stage<'a>(
    stages: &Located<'a, Sequence>,
) -> Result<Located<'a, Mapping>, MissingSegment> {
    let first = expect_mapping(first_item(stages)?)?;
    expect_mapping(entry(&first, "stage")?)
}

/// `stage.spec.execution.steps`
pub fn get_execution_steps<'a>(
    stage: &Located<'a, Mapping>,
) -> Result<Located<'a, Sequence>, MissingSegment> {
    let spec = expect_mapping(entry(stage, "spec")?)?;
    let execution = expect_mapping(entry(&spec, "execution")?)?;
    expect_sequence(entry(&execution, "steps")?)
}

/// `steps[0].step`
pub fn get_first_step<'a>(
    steps: &Located<'a, Sequence>,
) -> Result<Located<'a, Mapping>, MissingSegment> {
    let first = expect_mapping(first_item(steps)?)?;
    expect_mapping(entry(&first, "step")?)
}

/// Find the step node of the first step in the first stage.
pub fn locate_first_step(doc: &Value) -> StepLookup<'_> {
    let found = get_stages(doc)
        .and_then(|stages| get_first_stage(&stages))
        .and_then(|stage| get_execution_steps(&stage))
        .and_then(|steps| get_first_step(&steps));
    match found {
        Ok(step) => StepLookup::Found {
            node: step.node,
            path: step.path,
        },
        Err(missing) => StepLookup::Missing(missing),
    }
}

fn entry<'a>(
    parent: &Located<'a, Mapping>,
    key: &str,
) -> Result<Located<'a, Value>, MissingSegment> {
    parent
        .node
        .get(key)
        .map(|value| Located::new(value, parent.path.child_key(key)))
        .ok_or_else(|| MissingSegment::new(parent.path.clone(), format!("key '{}'", key)))
}

fn first_item<'a>(seq: &Located<'a, Sequence>) -> Result<Located<'a, Value>, MissingSegment> {
    seq.node
        .first()
        .map(|value| Located::new(value, seq.path.child_index(0)))
        .ok_or_else(|| MissingSegment::new(seq.path.clone(), "non-empty sequence"))
}

fn expect_mapping(located: Located<'_, Value>) -> Result<Located<'_, Mapping>, MissingSegment> {
    match located.node {
        Value::Mapping(map) => Ok(Located::new(map, located.path)),
        Value::Tagged(tagged) => expect_mapping(Located::new(&tagged.value, located.path)),
        _ => Err(MissingSegment::new(located.path, "mapping")),
    }
}

fn expect_sequence(located: Located<'_, Value>) -> Result<Located<'_, Sequence>, MissingSegment> {
    match located.node {
        Value::Sequence(items) => Ok(Located::new(items, located.path)),
        Value::Tagged(tagged) => expect_sequence(Located::new(&tagged.value, located.path)),
        _ => Err(MissingSegment::new(located.path, "sequence")),
    }
}
