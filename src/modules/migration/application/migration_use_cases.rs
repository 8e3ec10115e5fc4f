use std::sync::Arc;

use crate::modules::migration::application::ports::incoming::use_cases::{
    BatchMigrateUseCase, MigrateDocumentUseCase, RollbackDocumentUseCase,
};

#[derive(Clone)]
pub struct MigrationUseCases {
    pub migrate: Arc<dyn MigrateDocumentUseCase + Send + Sync>,
    pub rollback: Arc<dyn RollbackDocumentUseCase + Send + Sync>,
    pub batch: Arc<dyn BatchMigrateUseCase + Send + Sync>,
}
