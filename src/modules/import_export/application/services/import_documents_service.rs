use async_trait::async_trait;
use serde_json::Value;
use tracing::info;

use crate::modules::import_export::application::domain::{import_rows, parse};
use crate::modules::import_export::application::ports::incoming::use_cases::{
    ImportDocumentsCommand, ImportDocumentsError, ImportDocumentsUseCase,
};
use crate::modules::validation::application::domain::BulkValidationResult;

#[derive(Clone)]
pub struct ImportDocumentsService {
    max_items: usize,
}

impl ImportDocumentsService {
    pub fn new(max_items: usize) -> Self {
        Self { max_items }
    }
}

#[async_trait]
impl ImportDocumentsUseCase for ImportDocumentsService {
    async fn execute(
        &self,
        command: ImportDocumentsCommand,
    ) -> Result<BulkValidationResult<Value>, ImportDocumentsError> {
        let rows = parse(&command.text, command.format)
            .map_err(|e| ImportDocumentsError::Malformed(e.to_string()))?;

        if rows.len() > self.max_items {
            return Err(ImportDocumentsError::TooManyItems {
                max: self.max_items,
                received: rows.len(),
            });
        }

        let result = import_rows(&rows, command.entity);
        info!(
            entity = %command.entity,
            total = result.summary.total,
            invalid = result.summary.invalid_count,
            "Imported documents"
        );
        Ok(result)
    }
}
