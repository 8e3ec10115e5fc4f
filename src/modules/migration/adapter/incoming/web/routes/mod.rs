mod batch_migrate;
mod migrate_document;
mod rollback_document;

pub use batch_migrate::batch_migrate_handler;
pub use migrate_document::migrate_document_handler;
pub use rollback_document::rollback_document_handler;
