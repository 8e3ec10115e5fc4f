use async_trait::async_trait;

use crate::modules::migration::application::domain::{
    auto_migrate, MigrationExecutor, MigrationResult,
};
use crate::modules::migration::application::ports::incoming::use_cases::{
    MigrateDocumentCommand, MigrateDocumentError, MigrateDocumentUseCase,
};

//
// ──────────────────────────────────────────────────────────
// Service
// ──────────────────────────────────────────────────────────
//

#[derive(Clone)]
pub struct MigrateDocumentService {
    executor: MigrationExecutor,
    default_target: String,
}

impl MigrateDocumentService {
    pub fn new(executor: MigrationExecutor, default_target: impl Into<String>) -> Self {
        Self {
            executor,
            default_target: default_target.into(),
        }
    }
}

#[async_trait]
impl MigrateDocumentUseCase for MigrateDocumentService {
    async fn execute(
        &self,
        command: MigrateDocumentCommand,
    ) -> Result<MigrationResult, MigrateDocumentError> {
        let target = command
            .target_version
            .as_deref()
            .unwrap_or(&self.default_target);

        let result = auto_migrate(&self.executor, &command.document, command.entity, target);
        if result.success {
            Ok(result)
        } else {
            Err(MigrateDocumentError::Failed(result))
        }
    }
}
