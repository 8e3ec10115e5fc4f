use async_trait::async_trait;
use tracing::{debug, error};

use crate::modules::import_export::application::domain::render;
use crate::modules::import_export::application::ports::incoming::use_cases::{
    ExportDocumentsCommand, ExportDocumentsError, ExportDocumentsUseCase, ExportedDocuments,
};
use crate::modules::validation::application::domain::validate_bulk;

#[derive(Clone)]
pub struct ExportDocumentsService {
    max_items: usize,
}

impl ExportDocumentsService {
    pub fn new(max_items: usize) -> Self {
        Self { max_items }
    }
}

#[async_trait]
impl ExportDocumentsUseCase for ExportDocumentsService {
    async fn execute(
        &self,
        command: ExportDocumentsCommand,
    ) -> Result<ExportedDocuments, ExportDocumentsError> {
        let received = command.documents.len();
        if received > self.max_items {
            return Err(ExportDocumentsError::TooManyItems {
                max: self.max_items,
                received,
            });
        }

        let validated = validate_bulk(command.entity, &command.documents);
        if !validated.invalid.is_empty() {
            return Err(ExportDocumentsError::Invalid(validated));
        }

        let body = render(&validated.valid, command.entity, command.format).map_err(|e| {
            error!(entity = %command.entity, "Export failed: {}", e);
            ExportDocumentsError::RenderFailed(e.to_string())
        })?;

        debug!(entity = %command.entity, count = received, "Exported documents");
        Ok(ExportedDocuments {
            content_type: command.format.content_type(),
            body,
            count: received,
        })
    }
}
