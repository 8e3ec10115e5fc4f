use async_trait::async_trait;
use serde_json::Value;
use std::fmt;

use crate::modules::migration::application::domain::BatchMigrationResult;
use crate::modules::schema::application::domain::EntityType;

#[derive(Debug, Clone)]
pub struct BatchMigrateCommand {
    pub entity: EntityType,
    pub documents: Vec<Value>,
    pub target_version: Option<String>,
}

//
// ──────────────────────────────────────────────────────────
// Errors
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone)]
pub enum BatchMigrateError {
    TooManyItems { max: usize, received: usize },
}

impl fmt::Display for BatchMigrateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BatchMigrateError::TooManyItems { max, received } => {
                write!(f, "batch of {} documents exceeds the limit of {}", received, max)
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
pub trait BatchMigrateUseCase: Send + Sync {
    async fn execute(
        &self,
        command: BatchMigrateCommand,
    ) -> Result<BatchMigrationResult, BatchMigrateError>;
}
