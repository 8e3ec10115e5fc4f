mod migrate_and_validate;
mod validate_bulk;
mod validate_document;
mod validate_field;

pub use migrate_and_validate::{
    MigrateAndValidateCommand, MigrateAndValidateError, MigrateAndValidateUseCase,
};
pub use validate_bulk::{ValidateBulkCommand, ValidateBulkError, ValidateBulkUseCase};
pub use validate_document::{
    ValidateDocumentCommand, ValidateDocumentError, ValidateDocumentUseCase,
};
pub use validate_field::{ValidateFieldCommand, ValidateFieldError, ValidateFieldUseCase};
