#![allow(clippy::result_large_err)] // Document APIs return AppError to keep parse diagnostics structured.

//! Parsing and rendering of pipeline documents.
//!
//! A document is a plain `serde_yaml::Value`: mappings keep their insertion order, so a
//! fixture read from disk renders back in the order it was written. JSON input is
//! deserialized straight into the same value model.

mod path;

pub use path::{value_at, value_at_mut, KeyPath, PathSegment};
pub use serde_yaml::{Mapping, Value};

use crate::core::error::AppError;
use crate::core::types::{DocumentFormat, ErrorCategory};
use crate::utils::serialization::{JsonSerializer, Serializer, YamlSerializer};
use std::fs;
use std::io::{self, Read};
use std::path::Path;

/// Parsed pipeline document.
pub type Document = Value;

/// Parse `text` in the given format.
pub fn parse_document(text: &str, format: DocumentFormat) -> Result<Document, AppError> {
    let parsed = match format {
        DocumentFormat::Yaml => YamlSerializer.deserialize::<Value>(text.as_bytes()),
        DocumentFormat::Json => JsonSerializer.deserialize::<Value>(text.as_bytes()),
    }
    .map_err(|err| parse_error(format, err.into()))?;
    tracing::trace!(%format, "parsed document");
    Ok(parsed)
}

/// Render `doc` back to text.
pub fn render_document(doc: &Document, format: DocumentFormat) -> Result<String, AppError> {
    let bytes = match format {
        DocumentFormat::Yaml => YamlSerializer.serialize(doc),
        DocumentFormat::Json => JsonSerializer.serialize(doc),
    }
    .map_err(|err| {
        AppError::new(
            ErrorCategory::SerializationError,
            format!("failed to render document as {}: {}", format, err),
        )
        .with_code("FIX-SER-001")
    })?;
    String::from_utf8(bytes).map_err(|err| {
        AppError::with_source(
            ErrorCategory::SerializationError,
            format!("rendered {} is not valid UTF-8", format),
            Box::new(err),
        )
        .with_code("FIX-SER-001")
    })
}

/// Read and parse a document from `path`, or from stdin when `path` is `-`.
///
/// The format comes from `format_override` when given, otherwise from the file
/// extension. Stdin defaults to YAML, which also accepts most JSON.
pub fn load_document(
    path: &Path,
    format_override: Option<DocumentFormat>,
) -> Result<Document, AppError> {
    let (text, detected) = if path == Path::new("-") {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        (buffer, DocumentFormat::Yaml)
    } else {
        let text = fs::read_to_string(path).map_err(|err| {
            let mut error = AppError::from(err);
            error.add_context("path", &path.display().to_string());
            error
        })?;
        (text, DocumentFormat::from_path(path))
    };
    let format = format_override.unwrap_or(detected);
    parse_document(&text, format).map_err(|mut err| {
        err.add_context("path", &path.display().to_string());
        err
    })
}

/// Render a mapping key as plain text.
pub fn key_to_string(key: &Value) -> String {
    match key {
        Value::String(text) => text.clone(),
        Value::Number(number) => number.to_string(),
        Value::Bool(flag) => flag.to_string(),
        Value::Null => "null".to_string(),
        other => serde_yaml::to_string(other)
            .map(|rendered| rendered.trim().to_string())
            .unwrap_or_else(|_| "<key>".to_string()),
    }
}

fn parse_error(
    format: DocumentFormat,
    source: Box<dyn std::error::Error + Send + Sync>,
) -> AppError {
    AppError::with_source(
        ErrorCategory::ParseError,
        format!("failed to parse {} document", format),
        source,
    )
    .with_code("FIX-PARSE-001")
}
