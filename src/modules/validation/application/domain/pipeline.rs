use serde::Serialize;
use serde_json::Value;

use crate::modules::migration::application::domain::{
    auto_migrate, MigrationExecutor, MigrationResult,
};
use crate::modules::schema::application::domain::{EntityType, SchemaMode, CURRENT_SCHEMA_VERSION};
use crate::modules::validation::application::domain::report::ValidationReport;
use crate::modules::validation::application::domain::validator::validate_document;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MigratedValidation {
    pub success: bool,
    pub migration: MigrationResult,
    pub validation: ValidationReport<Value>,
}

/// Brings `data` to the current schema version and validates the result with
/// the full schema. The migrated document is validated even when a step was
/// skipped, so the report shows what is still wrong with it.
pub fn migrate_and_validate(
    executor: &MigrationExecutor,
    data: &Value,
    entity: EntityType,
) -> MigratedValidation {
    let migration = auto_migrate(executor, data, entity, CURRENT_SCHEMA_VERSION);
    let validation = validate_document(entity, SchemaMode::Full, &migration.data);
    MigratedValidation {
        success: migration.success && validation.success,
        migration,
        validation,
    }
}
