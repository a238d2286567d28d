//! Runtime-input detection.
//!
//! Pipeline YAML marks fields that must be supplied when a run is triggered with the
//! literal string `<+input>`. The scanner walks a document and reports the mapping keys
//! that carry it, either as bare key names or together with their qualified path.

use crate::core::config::ScanConfig;
use crate::core::document::{key_to_string, KeyPath, Value};
use serde::Serialize;

/// Value marking a field as supplied at run time.
pub const RUNTIME_INPUT_SENTINEL: &str = "<+input>";

/// A mapping entry whose value is the runtime-input sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuntimeInputField {
    /// Immediate key name, e.g. `timeout`.
    pub key: String,
    /// Qualified location, e.g. `pipeline.stages[0].stage.spec.timeout`.
    pub path: KeyPath,
}

#[derive(Debug, Clone)]
pub struct RuntimeInputScanner {
    sentinel: String,
}

impl Default for RuntimeInputScanner {
    fn default() -> Self {
        Self::new(RUNTIME_INPUT_SENTINEL)
    }
}

impl RuntimeInputScanner {
    pub fn new<T: Into<String>>(sentinel: T) -> Self {
        Self {
            sentinel: sentinel.into(),
        }
    }

    pub fn from_config(config: &ScanConfig) -> Self {
        Self::new(config.sentinel.clone())
    }

    pub fn sentinel(&self) -> &str {
        &self.sentinel
    }

    /// Bare key names of every runtime-input field, in pre-order.
    ///
    /// Two fields sharing a name at different depths are reported twice and cannot be
    /// told apart; use [`RuntimeInputScanner::scan`] when the location matters.
    pub fn keys(&self, doc: &Value) -> Vec<String> {
        self.scan(doc).into_iter().map(|field| field.key).collect()
    }

    /// Every runtime-input field with its qualified path, in pre-order.
    pub fn scan(&self, doc: &Value) -> Vec<RuntimeInputField> {
        let mut fields = Vec::new();
        let mut path = KeyPath::root();
        self.walk(doc, &mut path, &mut fields);
        tracing::debug!(
            sentinel = %self.sentinel,
            count = fields.len(),
            "scanned document for runtime inputs"
        );
        fields
    }

    fn walk(&self, value: &Value, path: &mut KeyPath, fields: &mut Vec<RuntimeInputField>) {
        match value {
            Value::Mapping(map) => {
                for (key, child) in map {
                    let key = key_to_string(key);
                    path.push_key(key.clone());
                    match untagged(child) {
                        nested @ (Value::Mapping(_) | Value::Sequence(_)) => {
                            self.walk(nested, path, fields);
                        }
                        Value::String(text) if *text == self.sentinel => {
                            fields.push(RuntimeInputField {
                                key,
                                path: path.clone(),
                            });
                        }
                        _ => {}
                    }
                    path.pop();
                }
            }
            Value::Sequence(items) => {
                for (index, item) in items.iter().enumerate() {
                    path.push_index(index);
                    self.walk(untagged(item), path, fields);
                    path.pop();
                }
            }
            Value::Tagged(tagged) => self.walk(&tagged.value, path, fields),
            _ => {}
        }
    }
}

fn untagged(value: &Value) -> &Value {
    match value {
        Value::Tagged(tagged) => untagged(&tagged.value),
        other => other,
    }
}

/// Bare key names whose value is exactly `<+input>`.
pub fn collect_runtime_input_keys(doc: &Value) -> Vec<String> {
    RuntimeInputScanner::default().keys(doc)
}

/// Runtime-input fields with their qualified paths, using the default sentinel.
pub fn scan_runtime_inputs(doc: &Value) -> Vec<RuntimeInputField> {
    RuntimeInputScanner::default().scan(doc)
}
