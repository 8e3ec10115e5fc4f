use serde_json::{json, Map, Value};

use crate::modules::project::application::domain::entities::{Project, ProjectUpdate};
use crate::modules::schema::application::domain::enums::{
    ClientSize, ClosedEnum, LinkType, Priority, ProjectCategory, ProjectStatus,
};
use crate::modules::schema::application::domain::field_validators as fv;
use crate::modules::schema::application::domain::field_validators::parse_date;
use crate::modules::schema::application::domain::rules::{
    default_false, default_list, default_schema_version, default_version,
    FieldKind::{List, Object, Value as Check},
    FieldRule, ObjectSchema, SchemaMode,
};
use crate::modules::schema::application::domain::validation::{
    join_path, ErrorCode, ValidationError, ValidationErrors,
};

/// Minimum description length for a featured project.
pub const FEATURED_DESCRIPTION_MIN: usize = 50;

type Errors = Vec<ValidationError>;

//
// ──────────────────────────────────────────────────────────
// Field checks
// ──────────────────────────────────────────────────────────
//

fn id(v: &Value, p: &str, e: &mut Errors) -> Option<Value> {
    fv::text(v, p, e, 1, 128, true)
}

fn title(v: &Value, p: &str, e: &mut Errors) -> Option<Value> {
    fv::text(v, p, e, 1, 100, true)
}

fn description(v: &Value, p: &str, e: &mut Errors) -> Option<Value> {
    fv::text(v, p, e, 10, 500, true)
}

fn long_description(v: &Value, p: &str, e: &mut Errors) -> Option<Value> {
    fv::text(v, p, e, 0, 5000, false)
}

fn short_text(v: &Value, p: &str, e: &mut Errors) -> Option<Value> {
    fv::text(v, p, e, 0, 100, false)
}

fn label_100(v: &Value, p: &str, e: &mut Errors) -> Option<Value> {
    fv::text(v, p, e, 1, 100, true)
}

fn duration(v: &Value, p: &str, e: &mut Errors) -> Option<Value> {
    fv::text(v, p, e, 0, 50, false)
}

fn team_size(v: &Value, p: &str, e: &mut Errors) -> Option<Value> {
    fv::int_range(v, p, e, 1, 100)
}

fn technologies(v: &Value, p: &str, e: &mut Errors) -> Option<Value> {
    fv::string_list(v, p, e, 1)
}

fn strings(v: &Value, p: &str, e: &mut Errors) -> Option<Value> {
    fv::string_list(v, p, e, 0)
}

fn category(v: &Value, p: &str, e: &mut Errors) -> Option<Value> {
    fv::enum_value::<ProjectCategory>(v, p, e)
}

fn status(v: &Value, p: &str, e: &mut Errors) -> Option<Value> {
    fv::enum_value::<ProjectStatus>(v, p, e)
}

fn priority(v: &Value, p: &str, e: &mut Errors) -> Option<Value> {
    fv::enum_value::<Priority>(v, p, e)
}

fn link_type(v: &Value, p: &str, e: &mut Errors) -> Option<Value> {
    fv::enum_value::<LinkType>(v, p, e)
}

fn client_size(v: &Value, p: &str, e: &mut Errors) -> Option<Value> {
    fv::enum_value::<ClientSize>(v, p, e)
}

fn alt(v: &Value, p: &str, e: &mut Errors) -> Option<Value> {
    fv::text(v, p, e, 1, 200, true)
}

fn caption(v: &Value, p: &str, e: &mut Errors) -> Option<Value> {
    fv::text(v, p, e, 0, 200, false)
}

fn link_label(v: &Value, p: &str, e: &mut Errors) -> Option<Value> {
    fv::text(v, p, e, 1, 50, true)
}

fn testimonial(v: &Value, p: &str, e: &mut Errors) -> Option<Value> {
    fv::text(v, p, e, 0, 1000, false)
}

fn meta_title(v: &Value, p: &str, e: &mut Errors) -> Option<Value> {
    fv::text(v, p, e, 0, 60, false)
}

fn meta_description(v: &Value, p: &str, e: &mut Errors) -> Option<Value> {
    fv::text(v, p, e, 0, 160, false)
}

fn schema_version(v: &Value, p: &str, e: &mut Errors) -> Option<Value> {
    fv::text(v, p, e, 1, 20, true)
}

fn default_status() -> Value {
    Value::String(ProjectStatus::default().as_str().to_string())
}

fn default_priority() -> Value {
    Value::String(Priority::default().as_str().to_string())
}

fn default_team_size() -> Value {
    json!(1)
}

//
// ──────────────────────────────────────────────────────────
// Cross-field rules
// ──────────────────────────────────────────────────────────
//

fn custom(prefix: &str, field: &str, message: &str, value: Option<&Value>) -> ValidationError {
    ValidationError::new(join_path(prefix, field), ErrorCode::Custom, message, value)
}

/// Reads absence of `endDate`, so a partial update cannot be judged here;
/// the merged document is checked in full instead.
fn completed_requires_end_date(
    map: &Map<String, Value>,
    prefix: &str,
    mode: SchemaMode,
    errors: &mut Errors,
) {
    if mode == SchemaMode::Update {
        return;
    }
    let completed = map.get("status").and_then(Value::as_str) == Some("COMPLETED");
    if completed && map.contains_key("startDate") && !map.contains_key("endDate") {
        errors.push(custom(
            prefix,
            "endDate",
            "Completed projects with a start date must have an end date",
            None,
        ));
    }
}

fn end_after_start(
    map: &Map<String, Value>,
    prefix: &str,
    _mode: SchemaMode,
    errors: &mut Errors,
) {
    let start = map.get("startDate").and_then(parse_date);
    let end = map.get("endDate").and_then(parse_date);
    if let (Some(start), Some(end)) = (start, end) {
        if end < start {
            errors.push(custom(
                prefix,
                "endDate",
                "End date must be on or after the start date",
                map.get("endDate"),
            ));
        }
    }
}

fn featured_needs_description(
    map: &Map<String, Value>,
    prefix: &str,
    _mode: SchemaMode,
    errors: &mut Errors,
) {
    if map.get("featured") != Some(&Value::Bool(true)) {
        return;
    }
    if let Some(desc) = map.get("description").and_then(Value::as_str) {
        if desc.chars().count() < FEATURED_DESCRIPTION_MIN {
            errors.push(custom(
                prefix,
                "description",
                "Featured projects need a description of at least 50 characters",
                map.get("description"),
            ));
        }
    }
}

fn primary_count(list: Option<&Value>) -> usize {
    list.and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter(|item| item.get("isPrimary") == Some(&Value::Bool(true)))
                .count()
        })
        .unwrap_or(0)
}

fn single_primary_image(
    map: &Map<String, Value>,
    prefix: &str,
    _mode: SchemaMode,
    errors: &mut Errors,
) {
    if primary_count(map.get("images")) > 1 {
        errors.push(custom(
            prefix,
            "images",
            "Only one image can be marked as primary",
            None,
        ));
    }
}

fn single_primary_link(
    map: &Map<String, Value>,
    prefix: &str,
    _mode: SchemaMode,
    errors: &mut Errors,
) {
    if primary_count(map.get("links")) > 1 {
        errors.push(custom(
            prefix,
            "links",
            "Only one link can be marked as primary",
            None,
        ));
    }
}

//
// ──────────────────────────────────────────────────────────
// Schemas
// ──────────────────────────────────────────────────────────
//

pub static PROJECT_IMAGE_SCHEMA: ObjectSchema = ObjectSchema {
    name: "projectImage",
    fields: &[
        FieldRule::required("url", Check(fv::url)),
        FieldRule::required("alt", Check(alt)),
        FieldRule::optional("caption", Check(caption)),
        FieldRule::defaulted("isPrimary", Check(fv::boolean), default_false),
        FieldRule::optional("width", Check(fv::positive_u32)),
        FieldRule::optional("height", Check(fv::positive_u32)),
    ],
    refinements: &[],
    update_required: &[],
    finalize: None,
};

pub static PROJECT_LINK_SCHEMA: ObjectSchema = ObjectSchema {
    name: "projectLink",
    fields: &[
        FieldRule::required("type", Check(link_type)),
        FieldRule::required("url", Check(fv::url)),
        FieldRule::required("label", Check(link_label)),
        FieldRule::defaulted("isPrimary", Check(fv::boolean), default_false),
    ],
    refinements: &[],
    update_required: &[],
    finalize: None,
};

pub static CLIENT_INFO_SCHEMA: ObjectSchema = ObjectSchema {
    name: "clientInfo",
    fields: &[
        FieldRule::required("name", Check(label_100)),
        FieldRule::optional("industry", Check(short_text)),
        FieldRule::optional("size", Check(client_size)),
        FieldRule::optional("location", Check(short_text)),
        FieldRule::optional("website", Check(fv::url)),
        FieldRule::optional("email", Check(fv::email)),
        FieldRule::optional("phone", Check(fv::phone)),
        FieldRule::defaulted("isPublic", Check(fv::boolean), default_false),
        FieldRule::optional("contactPerson", Check(short_text)),
        FieldRule::optional("projectBudget", Check(short_text)),
        FieldRule::optional("testimonial", Check(testimonial)),
    ],
    refinements: &[],
    update_required: &[],
    finalize: None,
};

pub static PROJECT_METRICS_SCHEMA: ObjectSchema = ObjectSchema {
    name: "metrics",
    fields: &[
        FieldRule::optional("usersReached", Check(fv::non_negative_int)),
        FieldRule::optional("performanceImprovement", Check(short_text)),
        FieldRule::optional("revenueImpact", Check(short_text)),
        FieldRule::optional("uptime", Check(fv::percentage)),
        FieldRule::optional("loadTime", Check(fv::load_time)),
        FieldRule::optional("codeReduction", Check(short_text)),
        FieldRule::optional("securityImprovements", Check(strings)),
        FieldRule::optional("customMetrics", Check(fv::scalar_map)),
    ],
    refinements: &[],
    update_required: &[],
    finalize: None,
};

pub static PROJECT_SEO_SCHEMA: ObjectSchema = ObjectSchema {
    name: "seo",
    fields: &[
        FieldRule::required("slug", Check(fv::slug)),
        FieldRule::optional("metaTitle", Check(meta_title)),
        FieldRule::optional("metaDescription", Check(meta_description)),
        FieldRule::optional("keywords", Check(strings)),
        FieldRule::optional("ogImage", Check(fv::url)),
    ],
    refinements: &[],
    update_required: &[],
    finalize: None,
};

pub static PROJECT_SCHEMA: ObjectSchema = ObjectSchema {
    name: "project",
    fields: &[
        FieldRule::optional("id", Check(id)),
        FieldRule::required("title", Check(title)),
        FieldRule::required("description", Check(description)),
        FieldRule::optional("longDescription", Check(long_description)),
        FieldRule::required("category", Check(category)),
        FieldRule::defaulted("status", Check(status), default_status),
        FieldRule::defaulted("priority", Check(priority), default_priority),
        FieldRule::defaulted("featured", Check(fv::boolean), default_false),
        FieldRule::required("technologies", Check(technologies)),
        FieldRule::defaulted("achievements", Check(strings), default_list),
        FieldRule::defaulted("challenges", Check(strings), default_list),
        FieldRule::defaulted("solutions", Check(strings), default_list),
        FieldRule::defaulted("tags", Check(strings), default_list),
        FieldRule::defaulted("images", List(&PROJECT_IMAGE_SCHEMA), default_list),
        FieldRule::defaulted("links", List(&PROJECT_LINK_SCHEMA), default_list),
        FieldRule::optional("startDate", Check(fv::date)),
        FieldRule::optional("endDate", Check(fv::date)),
        FieldRule::optional("duration", Check(duration)),
        FieldRule::defaulted("teamSize", Check(team_size), default_team_size),
        FieldRule::required("role", Check(label_100)),
        FieldRule::optional("clientInfo", Object(&CLIENT_INFO_SCHEMA)),
        FieldRule::optional("metrics", Object(&PROJECT_METRICS_SCHEMA)),
        FieldRule::optional("seo", Object(&PROJECT_SEO_SCHEMA)),
        FieldRule::required("createdAt", Check(fv::timestamp)).system(),
        FieldRule::required("updatedAt", Check(fv::timestamp)).system(),
        FieldRule::defaulted("version", Check(fv::positive_u32), default_version).system(),
        FieldRule::defaulted("schemaVersion", Check(schema_version), default_schema_version)
            .system(),
    ],
    refinements: &[
        completed_requires_end_date,
        end_after_start,
        featured_needs_description,
        single_primary_image,
        single_primary_link,
    ],
    update_required: &["updatedAt"],
    finalize: None,
};

//
// ──────────────────────────────────────────────────────────
// Entry points
// ──────────────────────────────────────────────────────────
//

/// Validates a stored project document.
pub fn parse_project(raw: &Value) -> Result<Project, ValidationErrors> {
    PROJECT_SCHEMA.validate(raw, SchemaMode::Full)
}

/// Validates a new project; system fields are stamped fresh.
pub fn parse_project_create(raw: &Value) -> Result<Project, ValidationErrors> {
    PROJECT_SCHEMA.validate(raw, SchemaMode::Create)
}

pub fn parse_project_update(raw: &Value) -> Result<ProjectUpdate, ValidationErrors> {
    PROJECT_SCHEMA.validate(raw, SchemaMode::Update)
}
