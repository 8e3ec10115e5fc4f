mod export_documents;
mod import_documents;

pub use export_documents::export_documents_handler;
pub use import_documents::import_documents_handler;
