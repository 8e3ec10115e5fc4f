use chrono::Utc;
use serde::Serialize;
use serde_json::Value;
use std::time::Instant;

use crate::modules::project::application::domain::{
    parse_project, parse_project_create, parse_project_update, Project, ProjectUpdate,
    PROJECT_SCHEMA,
};
use crate::modules::schema::application::domain::{
    EntityType, ErrorCode, ObjectSchema, SchemaMode, ValidationError, ValidationErrors,
};
use crate::modules::skill::application::domain::{
    parse_skill, parse_skill_create, parse_skill_update, Skill, SkillUpdate, SKILL_SCHEMA,
};
use crate::modules::validation::application::domain::report::{
    elapsed_ms, BulkSummary, BulkValidationResult, InvalidItem, ValidationReport,
};
use crate::modules::validation::application::domain::warnings::{
    project_warnings, skill_warnings,
};

pub fn schema_for(entity: EntityType) -> &'static ObjectSchema {
    match entity {
        EntityType::Project => &PROJECT_SCHEMA,
        EntityType::Skill => &SKILL_SCHEMA,
    }
}

fn fields_checked(data: &Value) -> usize {
    data.as_object().map_or(0, |obj| obj.len())
}

fn run<T>(
    data: &Value,
    parse: impl FnOnce(&Value) -> Result<T, ValidationErrors>,
    warn: impl FnOnce(&T) -> Vec<String>,
) -> ValidationReport<T> {
    let started = Instant::now();
    let fields = fields_checked(data);
    match parse(data) {
        Ok(entity) => {
            let warnings = warn(&entity);
            ValidationReport::passed(entity, warnings, started, fields)
        }
        Err(errors) => ValidationReport::failed(errors, started, fields),
    }
}

//
// ──────────────────────────────────────────────────────────
// Projects
// ──────────────────────────────────────────────────────────
//

pub fn validate_project(data: &Value) -> ValidationReport<Project> {
    run(data, parse_project, project_warnings)
}

pub fn validate_project_create(data: &Value) -> ValidationReport<Project> {
    run(data, parse_project_create, project_warnings)
}

pub fn validate_project_update(data: &Value) -> ValidationReport<ProjectUpdate> {
    run(data, parse_project_update, |_| Vec::new())
}

//
// ──────────────────────────────────────────────────────────
// Skills
// ──────────────────────────────────────────────────────────
//

pub fn validate_skill(data: &Value) -> ValidationReport<Skill> {
    run(data, parse_skill, |skill| skill_warnings(skill, Utc::now()))
}

pub fn validate_skill_create(data: &Value) -> ValidationReport<Skill> {
    run(data, parse_skill_create, |skill| skill_warnings(skill, Utc::now()))
}

pub fn validate_skill_update(data: &Value) -> ValidationReport<SkillUpdate> {
    run(data, parse_skill_update, |_| Vec::new())
}

/// Entry point for callers that only know the entity type and mode at runtime.
pub fn validate_document(entity: EntityType, mode: SchemaMode, data: &Value) -> ValidationReport<Value> {
    match (entity, mode) {
        (EntityType::Project, SchemaMode::Full) => validate_project(data).into_value(),
        (EntityType::Project, SchemaMode::Create) => validate_project_create(data).into_value(),
        (EntityType::Project, SchemaMode::Update) => validate_project_update(data).into_value(),
        (EntityType::Skill, SchemaMode::Full) => validate_skill(data).into_value(),
        (EntityType::Skill, SchemaMode::Create) => validate_skill_create(data).into_value(),
        (EntityType::Skill, SchemaMode::Update) => validate_skill_update(data).into_value(),
    }
}

//
// ──────────────────────────────────────────────────────────
// Bulk
// ──────────────────────────────────────────────────────────
//

fn bulk<T>(
    items: &[Value],
    parse: impl Fn(&Value) -> Result<T, ValidationErrors>,
) -> BulkValidationResult<T> {
    let started = Instant::now();
    let mut valid = Vec::new();
    let mut invalid = Vec::new();

    for (index, item) in items.iter().enumerate() {
        match parse(item) {
            Ok(entity) => valid.push(entity),
            Err(errors) => invalid.push(InvalidItem {
                index,
                data: item.clone(),
                errors: errors.into_inner(),
            }),
        }
    }

    BulkValidationResult {
        summary: BulkSummary {
            total: items.len(),
            valid_count: valid.len(),
            invalid_count: invalid.len(),
            processing_time: elapsed_ms(started),
        },
        valid,
        invalid,
    }
}

fn to_document<T: Serialize>(entity: T) -> Result<Value, ValidationErrors> {
    serde_json::to_value(entity).map_err(|e| ValidationErrors(vec![ValidationError::unknown(e)]))
}

pub fn validate_projects_bulk(items: &[Value]) -> BulkValidationResult<Project> {
    bulk(items, parse_project)
}

pub fn validate_skills_bulk(items: &[Value]) -> BulkValidationResult<Skill> {
    bulk(items, parse_skill)
}

/// Bulk validation with the full schema, entities returned as documents.
pub fn validate_bulk(entity: EntityType, items: &[Value]) -> BulkValidationResult<Value> {
    match entity {
        EntityType::Project => bulk(items, |item| parse_project(item).and_then(to_document)),
        EntityType::Skill => bulk(items, |item| parse_skill(item).and_then(to_document)),
    }
}

//
// ──────────────────────────────────────────────────────────
// Single field
// ──────────────────────────────────────────────────────────
//

/// Checks `value` against the rule at the dot-path `path`, e.g. `title`,
/// `clientInfo.email` or `images.0`. An unknown path yields a single
/// `unrecognized_path` error.
pub fn validate_field(entity: EntityType, path: &str, value: &Value) -> ValidationReport<Value> {
    let started = Instant::now();
    let Some(resolved) = schema_for(entity).resolve(path) else {
        let error = ValidationError::new(
            path,
            ErrorCode::UnrecognizedPath,
            format!("Unknown field path '{}'", path),
            None,
        );
        return ValidationReport::failed(ValidationErrors(vec![error]), started, 1);
    };

    let mut errors = Vec::new();
    match resolved.check(value, path, &mut errors) {
        Some(normalized) if errors.is_empty() => {
            ValidationReport::passed(normalized, Vec::new(), started, 1)
        }
        _ => ValidationReport::failed(ValidationErrors(errors), started, 1),
    }
}
