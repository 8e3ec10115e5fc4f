use async_trait::async_trait;
use serde_json::Value;
use std::fmt;

use crate::modules::migration::application::domain::MigrationResult;
use crate::modules::schema::application::domain::EntityType;

#[derive(Debug, Clone)]
pub struct RollbackDocumentCommand {
    pub entity: EntityType,
    pub document: Value,
    /// The document's current version.
    pub from_version: String,
    /// The lower version to roll back to.
    pub to_version: String,
}

//
// ──────────────────────────────────────────────────────────
// Errors
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone)]
pub enum RollbackDocumentError {
    InvalidRange { from: String, to: String },
    Failed(MigrationResult),
}

impl fmt::Display for RollbackDocumentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RollbackDocumentError::InvalidRange { from, to } => {
                write!(f, "cannot roll back from {} to the newer version {}", from, to)
            }
            RollbackDocumentError::Failed(result) => {
                write!(f, "rollback failed: {}", result.errors.join("; "))
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
pub trait RollbackDocumentUseCase: Send + Sync {
    async fn execute(
        &self,
        command: RollbackDocumentCommand,
    ) -> Result<MigrationResult, RollbackDocumentError>;
}
