use async_trait::async_trait;
use serde_json::Value;
use std::fmt;

use crate::modules::schema::application::domain::{EntityType, SchemaMode};
use crate::modules::validation::application::domain::ValidationReport;

#[derive(Debug, Clone)]
pub struct ValidateDocumentCommand {
    pub entity: EntityType,
    pub mode: SchemaMode,
    pub document: Value,
}

//
// ──────────────────────────────────────────────────────────
// Errors
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone)]
pub enum ValidateDocumentError {
    /// The document broke at least one rule. Carries the full report.
    Invalid(ValidationReport<Value>),
}

impl fmt::Display for ValidateDocumentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidateDocumentError::Invalid(report) => {
                write!(f, "document has {} validation error(s)", report.errors.len())
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
pub trait ValidateDocumentUseCase: Send + Sync {
    async fn execute(
        &self,
        command: ValidateDocumentCommand,
    ) -> Result<ValidationReport<Value>, ValidateDocumentError>;
}
