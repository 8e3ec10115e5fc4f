use async_trait::async_trait;
use serde_json::Value;
use std::fmt;

use crate::modules::schema::application::domain::EntityType;
use crate::modules::validation::application::domain::MigratedValidation;

#[derive(Debug, Clone)]
pub struct MigrateAndValidateCommand {
    pub entity: EntityType,
    pub document: Value,
}

//
// ──────────────────────────────────────────────────────────
// Errors
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone)]
pub enum MigrateAndValidateError {
    /// Migration or validation failed. Carries both results.
    Failed(MigratedValidation),
}

impl fmt::Display for MigrateAndValidateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MigrateAndValidateError::Failed(outcome) => write!(
                f,
                "{} migration error(s), {} validation error(s)",
                outcome.migration.errors.len(),
                outcome.validation.errors.len()
            ),
        }
    }
}

//
// ──────────────────────────────────────────────────────────
// Use case trait
// ──────────────────────────────────────────────────────────
//

#[async_trait]
pub trait MigrateAndValidateUseCase: Send + Sync {
    async fn execute(
        &self,
        command: MigrateAndValidateCommand,
    ) -> Result<MigratedValidation, MigrateAndValidateError>;
}
