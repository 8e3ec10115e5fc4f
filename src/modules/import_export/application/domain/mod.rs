pub mod export;
pub mod format;
pub mod import;

pub use export::{export_csv, export_json, export_xml, render, ExportError};
pub use format::{ExportFormat, ImportFormat};
pub use import::{coerce_cell, import_rows, parse, parse_csv, parse_json, ImportError};
