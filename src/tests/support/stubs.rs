use async_trait::async_trait;
use serde_json::Value;

use crate::modules::import_export::application::ports::incoming::use_cases::{
    ExportDocumentsCommand, ExportDocumentsError, ExportDocumentsUseCase, ExportedDocuments,
};
use crate::modules::migration::application::domain::MigrationResult;
use crate::modules::migration::application::ports::incoming::use_cases::{
    MigrateDocumentCommand, MigrateDocumentError, MigrateDocumentUseCase,
};

#[derive(Clone)]
pub struct StubMigrateDocumentUseCase {
    result: Result<MigrationResult, MigrateDocumentError>,
}

impl StubMigrateDocumentUseCase {
    pub fn failing(msg: &str) -> Self {
        let mut result = MigrationResult::unchanged(Value::Null, "0.1.0");
        result.success = false;
        result.to_version = "1.0.0".to_string();
        result.errors.push(msg.to_string());
        Self {
            result: Err(MigrateDocumentError::Failed(result)),
        }
    }
}

#[async_trait]
impl MigrateDocumentUseCase for StubMigrateDocumentUseCase {
    async fn execute(
        &self,
        _command: MigrateDocumentCommand,
    ) -> Result<MigrationResult, MigrateDocumentError> {
        self.result.clone()
    }
}

#[derive(Clone)]
pub struct StubExportDocumentsUseCase {
    result: Result<ExportedDocuments, ExportDocumentsError>,
}

impl StubExportDocumentsUseCase {
    pub fn render_failed(msg: &str) -> Self {
        Self {
            result: Err(ExportDocumentsError::RenderFailed(msg.to_string())),
        }
    }
}

#[async_trait]
impl ExportDocumentsUseCase for StubExportDocumentsUseCase {
    async fn execute(
        &self,
        _command: ExportDocumentsCommand,
    ) -> Result<ExportedDocuments, ExportDocumentsError> {
        self.result.clone()
    }
}
