use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use thiserror::Error;

//
// ──────────────────────────────────────────────────────────
// Error codes
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    Required,
    InvalidType,
    TooSmall,
    TooBig,
    InvalidString,
    InvalidEnumValue,
    InvalidDate,
    Custom,
    UnrecognizedPath,
    Unknown,
}

//
// ──────────────────────────────────────────────────────────
// ValidationError
// ──────────────────────────────────────────────────────────
//

/// One rule violation. `field` is a dot-path into the document
/// (`images`, `experience.lastUsed`, `links.1.url`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
    pub code: ErrorCode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

impl ValidationError {
    pub fn new(
        field: impl Into<String>,
        code: ErrorCode,
        message: impl Into<String>,
        value: Option<&Value>,
    ) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            code,
            value: value.cloned(),
        }
    }

    pub fn required(field: impl Into<String>) -> Self {
        Self::new(field, ErrorCode::Required, "Required", None)
    }

    /// Catch-all for failures that are not a rule violation.
    pub fn unknown(detail: impl fmt::Display) -> Self {
        tracing::error!("Unexpected validation failure: {}", detail);
        Self::new("", ErrorCode::Unknown, "Unknown validation error", None)
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.field.is_empty() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{}: {}", self.field, self.message)
        }
    }
}

//
// ──────────────────────────────────────────────────────────
// ValidationErrors
// ──────────────────────────────────────────────────────────
//

fn summarize(errors: &[ValidationError]) -> String {
    let messages: Vec<String> = errors.iter().map(ToString::to_string).collect();
    messages.join("; ")
}

/// Every violation collected during one validation call.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, Error)]
#[serde(transparent)]
#[error("{}", summarize(.0))]
pub struct ValidationErrors(pub Vec<ValidationError>);

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ValidationError> {
        self.0.iter()
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.0.iter().any(|e| e.field == field)
    }

    pub fn for_field<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a ValidationError> {
        self.0.iter().filter(move |e| e.field == field)
    }

    pub fn into_inner(self) -> Vec<ValidationError> {
        self.0
    }
}

impl From<Vec<ValidationError>> for ValidationErrors {
    fn from(errors: Vec<ValidationError>) -> Self {
        ValidationErrors(errors)
    }
}

/// Joins a parent path and a child segment into a dot-path.
pub fn join_path(prefix: &str, segment: &str) -> String {
    if prefix.is_empty() {
        segment.to_string()
    } else {
        format!("{}.{}", prefix, segment)
    }
}
