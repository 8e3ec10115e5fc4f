mod export_documents_service;
mod import_documents_service;

pub use export_documents_service::ExportDocumentsService;
pub use import_documents_service::ImportDocumentsService;
