mod batch_migrate;
mod migrate_document;
mod rollback_document;

pub use batch_migrate::{BatchMigrateCommand, BatchMigrateError, BatchMigrateUseCase};
pub use migrate_document::{MigrateDocumentCommand, MigrateDocumentError, MigrateDocumentUseCase};
pub use rollback_document::{
    RollbackDocumentCommand, RollbackDocumentError, RollbackDocumentUseCase,
};
