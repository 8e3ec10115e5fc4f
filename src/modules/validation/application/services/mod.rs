mod migrate_and_validate_service;
mod validate_bulk_service;
mod validate_document_service;
mod validate_field_service;

pub use migrate_and_validate_service::MigrateAndValidateService;
pub use validate_bulk_service::ValidateBulkService;
pub use validate_document_service::ValidateDocumentService;
pub use validate_field_service::ValidateFieldService;
