use std::sync::Arc;

use crate::modules::import_export::application::ports::incoming::use_cases::{
    ExportDocumentsUseCase, ImportDocumentsUseCase,
};

#[derive(Clone)]
pub struct TransferUseCases {
    pub export: Arc<dyn ExportDocumentsUseCase + Send + Sync>,
    pub import: Arc<dyn ImportDocumentsUseCase + Send + Sync>,
}
