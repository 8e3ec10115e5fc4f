use async_trait::async_trait;
use serde_json::Value;

use crate::modules::validation::application::domain::{validate_document, ValidationReport};
use crate::modules::validation::application::ports::incoming::use_cases::{
    ValidateDocumentCommand, ValidateDocumentError, ValidateDocumentUseCase,
};

#[derive(Clone, Default)]
pub struct ValidateDocumentService;

impl ValidateDocumentService {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ValidateDocumentUseCase for ValidateDocumentService {
    async fn execute(
        &self,
        command: ValidateDocumentCommand,
    ) -> Result<ValidationReport<Value>, ValidateDocumentError> {
        let report = validate_document(command.entity, command.mode, &command.document);
        if report.success {
            Ok(report)
        } else {
            Err(ValidateDocumentError::Invalid(report))
        }
    }
}
