mod export_documents;
mod import_documents;

pub use export_documents::{
    ExportDocumentsCommand, ExportDocumentsError, ExportDocumentsUseCase, ExportedDocuments,
};
pub use import_documents::{ImportDocumentsCommand, ImportDocumentsError, ImportDocumentsUseCase};
