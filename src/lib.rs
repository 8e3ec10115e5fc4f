pub mod health;
pub mod modules;
pub mod shared;

use actix_web::web;
use std::sync::Arc;

use crate::modules::import_export::application::services::{
    ExportDocumentsService, ImportDocumentsService,
};
use crate::modules::import_export::application::TransferUseCases;
use crate::modules::migration::adapter::outgoing::TracingProgressReporter;
use crate::modules::migration::application::domain::{MigrationExecutor, MigrationRegistry};
use crate::modules::migration::application::services::{
    BatchMigrateService, MigrateDocumentService, RollbackDocumentService,
};
use crate::modules::migration::application::MigrationUseCases;
use crate::modules::schema::application::domain::policies::SchemaPolicy;
use crate::modules::validation::application::services::{
    MigrateAndValidateService, ValidateBulkService, ValidateDocumentService, ValidateFieldService,
};
use crate::modules::validation::application::ValidationUseCases;

#[cfg(test)]
mod tests;

#[derive(Clone)]
pub struct AppState {
    pub validation: ValidationUseCases,
    pub migration: MigrationUseCases,
    pub transfer: TransferUseCases,
}

/// Wires every use case against one shared migration registry.
pub fn build_app_state(registry: Arc<MigrationRegistry>, policy: &SchemaPolicy) -> AppState {
    let executor = MigrationExecutor::new(registry);
    let max_items = policy.max_bulk_items;

    AppState {
        validation: ValidationUseCases {
            document: Arc::new(ValidateDocumentService::new()),
            bulk: Arc::new(ValidateBulkService::new(max_items)),
            field: Arc::new(ValidateFieldService::new()),
            migrate_and_validate: Arc::new(MigrateAndValidateService::new(executor.clone())),
        },
        migration: MigrationUseCases {
            migrate: Arc::new(MigrateDocumentService::new(
                executor.clone(),
                policy.target_version.clone(),
            )),
            rollback: Arc::new(RollbackDocumentService::new(executor.clone())),
            batch: Arc::new(BatchMigrateService::new(
                executor,
                TracingProgressReporter,
                policy.clone(),
            )),
        },
        transfer: TransferUseCases {
            export: Arc::new(ExportDocumentsService::new(max_items)),
            import: Arc::new(ImportDocumentsService::new(max_items)),
        },
    }
}

#[cfg(not(tarpaulin_include))]
pub fn init_routes(cfg: &mut web::ServiceConfig) {
    // Health
    cfg.service(crate::health::health);
    cfg.service(crate::health::readiness);
    // Validation
    cfg.service(crate::modules::validation::adapter::incoming::web::routes::validate_bulk_handler);
    cfg.service(crate::modules::validation::adapter::incoming::web::routes::validate_field_handler);
    cfg.service(
        crate::modules::validation::adapter::incoming::web::routes::migrate_and_validate_handler,
    );
    cfg.service(
        crate::modules::validation::adapter::incoming::web::routes::validate_document_handler,
    );
    // Migration
    cfg.service(crate::modules::migration::adapter::incoming::web::routes::migrate_document_handler);
    cfg.service(
        crate::modules::migration::adapter::incoming::web::routes::rollback_document_handler,
    );
    cfg.service(crate::modules::migration::adapter::incoming::web::routes::batch_migrate_handler);
    // Import / export
    cfg.service(
        crate::modules::import_export::adapter::incoming::web::routes::export_documents_handler,
    );
    cfg.service(
        crate::modules::import_export::adapter::incoming::web::routes::import_documents_handler,
    );
}
