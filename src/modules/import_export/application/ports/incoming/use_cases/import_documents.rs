use async_trait::async_trait;
use serde_json::Value;
use std::fmt;

use crate::modules::import_export::application::domain::ImportFormat;
use crate::modules::schema::application::domain::EntityType;
use crate::modules::validation::application::domain::BulkValidationResult;

#[derive(Debug, Clone)]
pub struct ImportDocumentsCommand {
    pub entity: EntityType,
    pub format: ImportFormat,
    /// Raw request text in `format`.
    pub text: String,
}

//
// ──────────────────────────────────────────────────────────
// Errors
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportDocumentsError {
    Malformed(String),
    TooManyItems { max: usize, received: usize },
}

impl fmt::Display for ImportDocumentsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImportDocumentsError::Malformed(msg) => write!(f, "{}", msg),
            ImportDocumentsError::TooManyItems { max, received } => {
                write!(f, "received {} items, at most {} allowed", received, max)
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
pub trait ImportDocumentsUseCase: Send + Sync {
    async fn execute(
        &self,
        command: ImportDocumentsCommand,
    ) -> Result<BulkValidationResult<Value>, ImportDocumentsError>;
}
