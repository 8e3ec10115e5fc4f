use async_trait::async_trait;
use serde_json::Value;
use std::fmt;

use crate::modules::migration::application::domain::MigrationResult;
use crate::modules::schema::application::domain::EntityType;

#[derive(Debug, Clone)]
pub struct MigrateDocumentCommand {
    pub entity: EntityType,
    pub document: Value,
    /// Falls back to the configured target version.
    pub target_version: Option<String>,
}

//
// ──────────────────────────────────────────────────────────
// Errors
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone)]
pub enum MigrateDocumentError {
    /// At least one step was skipped or failed. Carries the partial result.
    Failed(MigrationResult),
}

impl fmt::Display for MigrateDocumentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MigrateDocumentError::Failed(result) => {
                write!(f, "migration failed: {}", result.errors.join("; "))
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
pub trait MigrateDocumentUseCase: Send + Sync {
    async fn execute(
        &self,
        command: MigrateDocumentCommand,
    ) -> Result<MigrationResult, MigrateDocumentError>;
}
