use std::sync::Arc;

use crate::modules::validation::application::ports::incoming::use_cases::{
    MigrateAndValidateUseCase, ValidateBulkUseCase, ValidateDocumentUseCase, ValidateFieldUseCase,
};

#[derive(Clone)]
pub struct ValidationUseCases {
    pub document: Arc<dyn ValidateDocumentUseCase + Send + Sync>,
    pub bulk: Arc<dyn ValidateBulkUseCase + Send + Sync>,
    pub field: Arc<dyn ValidateFieldUseCase + Send + Sync>,
    pub migrate_and_validate: Arc<dyn MigrateAndValidateUseCase + Send + Sync>,
}
