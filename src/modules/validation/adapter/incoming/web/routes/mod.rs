mod migrate_and_validate;
mod validate_bulk;
mod validate_document;
mod validate_field;

pub use migrate_and_validate::migrate_and_validate_handler;
pub use validate_bulk::validate_bulk_handler;
pub use validate_document::validate_document_handler;
pub use validate_field::validate_field_handler;
