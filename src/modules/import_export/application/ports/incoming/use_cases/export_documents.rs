use async_trait::async_trait;
use serde_json::Value;
use std::fmt;

use crate::modules::import_export::application::domain::ExportFormat;
use crate::modules::schema::application::domain::EntityType;
use crate::modules::validation::application::domain::BulkValidationResult;

#[derive(Debug, Clone)]
pub struct ExportDocumentsCommand {
    pub entity: EntityType,
    pub format: ExportFormat,
    pub documents: Vec<Value>,
}

/// Rendered export, ready to be sent as a response body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedDocuments {
    pub content_type: &'static str,
    pub body: String,
    pub count: usize,
}

//
// ──────────────────────────────────────────────────────────
// Errors
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone)]
pub enum ExportDocumentsError {
    TooManyItems { max: usize, received: usize },
    /// Nothing is exported unless every document is valid.
    Invalid(BulkValidationResult<Value>),
    RenderFailed(String),
}

impl fmt::Display for ExportDocumentsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportDocumentsError::TooManyItems { max, received } => {
                write!(f, "received {} items, at most {} allowed", received, max)
            }
            ExportDocumentsError::Invalid(result) => write!(
                f,
                "{} of {} documents are invalid",
                result.summary.invalid_count, result.summary.total
            ),
            ExportDocumentsError::RenderFailed(msg) => write!(f, "export failed: {}", msg),
        }
    }
}

//
// ──────────────────────────────────────────────────────────
// Use case trait
// ──────────────────────────────────────────────────────────
//

#[async_trait]
pub trait ExportDocumentsUseCase: Send + Sync {
    async fn execute(
        &self,
        command: ExportDocumentsCommand,
    ) -> Result<ExportedDocuments, ExportDocumentsError>;
}
