use async_trait::async_trait;
use serde_json::Value;
use std::fmt;

use crate::modules::schema::application::domain::EntityType;
use crate::modules::validation::application::domain::BulkValidationResult;

#[derive(Debug, Clone)]
pub struct ValidateBulkCommand {
    pub entity: EntityType,
    pub documents: Vec<Value>,
}

//
// ──────────────────────────────────────────────────────────
// Errors
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidateBulkError {
    TooManyItems { max: usize, received: usize },
}

impl fmt::Display for ValidateBulkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidateBulkError::TooManyItems { max, received } => {
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
pub trait ValidateBulkUseCase: Send + Sync {
    async fn execute(
        &self,
        command: ValidateBulkCommand,
    ) -> Result<BulkValidationResult<Value>, ValidateBulkError>;
}
