mod batch_migrate_service;
mod migrate_document_service;
mod rollback_document_service;

pub use batch_migrate_service::BatchMigrateService;
pub use migrate_document_service::MigrateDocumentService;
pub use rollback_document_service::RollbackDocumentService;
