pub mod pipeline;
pub mod report;
pub mod update;
pub mod validator;
pub mod warnings;

pub use pipeline::{migrate_and_validate, MigratedValidation};
pub use report::{BulkSummary, BulkValidationResult, InvalidItem, ValidationMetrics, ValidationReport};
pub use update::{apply_project_update, apply_skill_update};
pub use validator::{
    schema_for, validate_bulk, validate_document, validate_field, validate_project,
    validate_project_create, validate_project_update, validate_projects_bulk, validate_skill,
    validate_skill_create, validate_skill_update, validate_skills_bulk,
};
pub use warnings::{project_warnings, skill_warnings};
