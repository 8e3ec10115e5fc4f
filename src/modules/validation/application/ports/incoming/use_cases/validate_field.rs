use async_trait::async_trait;
use serde_json::Value;
use std::fmt;

use crate::modules::schema::application::domain::EntityType;
use crate::modules::validation::application::domain::ValidationReport;

#[derive(Debug, Clone)]
pub struct ValidateFieldCommand {
    pub entity: EntityType,
    /// Dot-path such as `title` or `experience.lastUsed`.
    pub path: String,
    pub value: Value,
}

//
// ──────────────────────────────────────────────────────────
// Errors
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone)]
pub enum ValidateFieldError {
    UnknownPath(String),
    Invalid(ValidationReport<Value>),
}

impl fmt::Display for ValidateFieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidateFieldError::UnknownPath(path) => write!(f, "unknown field path '{}'", path),
            ValidateFieldError::Invalid(report) => {
                write!(f, "field has {} validation error(s)", report.errors.len())
            }
        }
    }
}

//
// ──────────────────────────────────────────────────────────
// Use case trait
// ──────────────────────────────────────────────────────────
//

#[async_trait]
pub trait ValidateFieldUseCase: Send + Sync {
    async fn execute(
        &self,
        command: ValidateFieldCommand,
    ) -> Result<ValidationReport<Value>, ValidateFieldError>;
}
