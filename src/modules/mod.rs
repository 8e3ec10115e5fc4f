pub mod import_export;
pub mod migration;
pub mod project;
pub mod schema;
pub mod skill;
pub mod validation;
