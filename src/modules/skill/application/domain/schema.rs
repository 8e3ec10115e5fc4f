use serde_json::{Map, Value};

use crate::modules::schema::application::domain::enums::{
    ClosedEnum, Frequency, ResourceType, SkillCategory, SkillLevel, Visibility,
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
use crate::modules::skill::application::domain::entities::{Skill, SkillUpdate};

pub const FEATURED_MIN_PROFICIENCY: i64 = 70;
pub const UNVERIFIED_MAX_PROFICIENCY: i64 = 79;
pub const DEFAULT_SKILL_PRIORITY: i64 = 50;

type Errors = Vec<ValidationError>;

//
// ──────────────────────────────────────────────────────────
// Field checks
// ──────────────────────────────────────────────────────────
//

fn id(v: &Value, p: &str, e: &mut Errors) -> Option<Value> {
    fv::text(v, p, e, 1, 128, true)
}

/// 1–50 characters, not blank and not only digits.
fn name(v: &Value, p: &str, e: &mut Errors) -> Option<Value> {
    let normalized = fv::text(v, p, e, 1, 50, true)?;
    let numeric = normalized
        .as_str()
        .is_some_and(|s| {
            s.chars().any(|c| c.is_ascii_digit())
                && s.chars().all(|c| c.is_ascii_digit() || c == '.')
        });
    if numeric {
        e.push(ValidationError::new(
            p,
            ErrorCode::InvalidString,
            "Name cannot be purely numeric",
            Some(v),
        ));
        return None;
    }
    Some(normalized)
}

fn category(v: &Value, p: &str, e: &mut Errors) -> Option<Value> {
    fv::enum_value::<SkillCategory>(v, p, e)
}

fn level(v: &Value, p: &str, e: &mut Errors) -> Option<Value> {
    fv::enum_value::<SkillLevel>(v, p, e)
}

fn frequency(v: &Value, p: &str, e: &mut Errors) -> Option<Value> {
    fv::enum_value::<Frequency>(v, p, e)
}

fn visibility(v: &Value, p: &str, e: &mut Errors) -> Option<Value> {
    fv::enum_value::<Visibility>(v, p, e)
}

fn resource_type(v: &Value, p: &str, e: &mut Errors) -> Option<Value> {
    fv::enum_value::<ResourceType>(v, p, e)
}

fn percent(v: &Value, p: &str, e: &mut Errors) -> Option<Value> {
    fv::int_range(v, p, e, 0, 100)
}

fn score(v: &Value, p: &str, e: &mut Errors) -> Option<Value> {
    fv::number_range(v, p, e, 0.0, 100.0)
}

fn priority(v: &Value, p: &str, e: &mut Errors) -> Option<Value> {
    fv::int_range(v, p, e, 1, 100)
}

fn years(v: &Value, p: &str, e: &mut Errors) -> Option<Value> {
    fv::int_range(v, p, e, 0, 50)
}

fn months(v: &Value, p: &str, e: &mut Errors) -> Option<Value> {
    fv::int_range(v, p, e, 0, 11)
}

fn label_100(v: &Value, p: &str, e: &mut Errors) -> Option<Value> {
    fv::text(v, p, e, 1, 100, true)
}

fn resource_title(v: &Value, p: &str, e: &mut Errors) -> Option<Value> {
    fv::text(v, p, e, 1, 200, true)
}

fn short_text(v: &Value, p: &str, e: &mut Errors) -> Option<Value> {
    fv::text(v, p, e, 0, 100, false)
}

fn description(v: &Value, p: &str, e: &mut Errors) -> Option<Value> {
    fv::text(v, p, e, 0, 500, false)
}

fn strings(v: &Value, p: &str, e: &mut Errors) -> Option<Value> {
    fv::string_list(v, p, e, 0)
}

fn schema_version(v: &Value, p: &str, e: &mut Errors) -> Option<Value> {
    fv::text(v, p, e, 1, 20, true)
}

fn zero() -> Value {
    Value::from(0)
}

fn default_frequency() -> Value {
    Value::String(Frequency::default().as_str().to_string())
}

fn default_visibility() -> Value {
    Value::String(Visibility::default().as_str().to_string())
}

fn default_resource_type() -> Value {
    Value::String(ResourceType::default().as_str().to_string())
}

fn default_priority() -> Value {
    Value::from(DEFAULT_SKILL_PRIORITY)
}

pub fn default_experience() -> Value {
    serde_json::json!({
        "years": 0,
        "months": 0,
        "totalMonths": 0,
        "frequency": Frequency::default().as_str()
    })
}

//
// ──────────────────────────────────────────────────────────
// Derived fields and cross-field rules
// ──────────────────────────────────────────────────────────
//

fn derive_total_months(map: &mut Map<String, Value>) {
    let years = map.get("years").and_then(Value::as_i64).unwrap_or(0);
    let months = map.get("months").and_then(Value::as_i64).unwrap_or(0);
    map.insert("totalMonths".into(), Value::from(years * 12 + months));
}

fn last_used_after_first(
    map: &Map<String, Value>,
    prefix: &str,
    _mode: SchemaMode,
    errors: &mut Errors,
) {
    let first = map.get("firstUsed").and_then(parse_date);
    let last = map.get("lastUsed").and_then(parse_date);
    if let (Some(first), Some(last)) = (first, last) {
        if last < first {
            errors.push(ValidationError::new(
                join_path(prefix, "lastUsed"),
                ErrorCode::Custom,
                "Last used date must be on or after the first used date",
                map.get("lastUsed"),
            ));
        }
    }
}

fn proficiency_error(prefix: &str, message: String, value: &Value) -> ValidationError {
    ValidationError::new(
        join_path(prefix, "proficiency"),
        ErrorCode::Custom,
        message,
        Some(value),
    )
}

/// Every proficiency rule reports on `proficiency`.
fn proficiency_rules(
    map: &Map<String, Value>,
    prefix: &str,
    _mode: SchemaMode,
    errors: &mut Errors,
) {
    let Some(raw) = map.get("proficiency") else {
        return;
    };
    let Some(proficiency) = raw.as_i64() else {
        return;
    };

    if proficiency < 90 && proficiency % 5 != 0 {
        errors.push(proficiency_error(
            prefix,
            "Proficiency below 90 must be a multiple of 5".to_string(),
            raw,
        ));
    }

    let level = map
        .get("level")
        .and_then(Value::as_str)
        .and_then(SkillLevel::parse);
    if let Some(level) = level {
        let band = level.proficiency_band();
        if !band.contains(&proficiency) {
            errors.push(proficiency_error(
                prefix,
                format!(
                    "Proficiency for {} must be between {} and {}",
                    level.as_str(),
                    band.start(),
                    band.end()
                ),
                raw,
            ));
        }
    }

    let experience = map.get("experience");
    let total_months = experience
        .and_then(|e| e.get("totalMonths"))
        .and_then(Value::as_i64);
    if let Some(total) = total_months.filter(|t| *t >= 24) {
        let floor = (total * 2).min(90);
        if proficiency < floor {
            errors.push(proficiency_error(
                prefix,
                format!(
                    "Proficiency must be at least {} for {} months of experience",
                    floor, total
                ),
                raw,
            ));
        }
    }

    let certifications = map.get("certifications").and_then(Value::as_array);
    if proficiency > UNVERIFIED_MAX_PROFICIENCY && (experience.is_some() || certifications.is_some())
    {
        let has_experience = total_months.is_some_and(|t| t > 0);
        let has_certification = certifications.is_some_and(|c| !c.is_empty());
        if !has_experience && !has_certification {
            errors.push(proficiency_error(
                prefix,
                "Proficiency of 80 or more needs experience or a certification".to_string(),
                raw,
            ));
        }
    }

    if map.get("featured") == Some(&Value::Bool(true)) && proficiency < FEATURED_MIN_PROFICIENCY {
        errors.push(proficiency_error(
            prefix,
            "Featured skills need a proficiency of at least 70".to_string(),
            raw,
        ));
    }
}

//
// ──────────────────────────────────────────────────────────
// Schemas
// ──────────────────────────────────────────────────────────
//

pub static SKILL_EXPERIENCE_SCHEMA: ObjectSchema = ObjectSchema {
    name: "experience",
    fields: &[
        FieldRule::defaulted("years", Check(years), zero),
        FieldRule::defaulted("months", Check(months), zero),
        FieldRule::optional("totalMonths", Check(fv::non_negative_u32)),
        FieldRule::optional("firstUsed", Check(fv::date)),
        FieldRule::optional("lastUsed", Check(fv::date)),
        FieldRule::defaulted("frequency", Check(frequency), default_frequency),
    ],
    refinements: &[last_used_after_first],
    update_required: &[],
    finalize: Some(derive_total_months),
};

pub static CERTIFICATION_SCHEMA: ObjectSchema = ObjectSchema {
    name: "certification",
    fields: &[
        FieldRule::required("name", Check(label_100)),
        FieldRule::required("issuer", Check(label_100)),
        FieldRule::optional("issueDate", Check(fv::date)),
        FieldRule::optional("expiryDate", Check(fv::future_date)),
        FieldRule::optional("credentialId", Check(short_text)),
        FieldRule::optional("url", Check(fv::url)),
        FieldRule::defaulted("verified", Check(fv::boolean), default_false),
        FieldRule::optional("score", Check(score)),
    ],
    refinements: &[],
    update_required: &[],
    finalize: None,
};

pub static LEARNING_RESOURCE_SCHEMA: ObjectSchema = ObjectSchema {
    name: "learningResource",
    fields: &[
        FieldRule::required("title", Check(resource_title)),
        FieldRule::optional("url", Check(fv::url)),
        FieldRule::defaulted("type", Check(resource_type), default_resource_type),
        FieldRule::defaulted("completed", Check(fv::boolean), default_false),
    ],
    refinements: &[],
    update_required: &[],
    finalize: None,
};

pub static SKILL_SCHEMA: ObjectSchema = ObjectSchema {
    name: "skill",
    fields: &[
        FieldRule::optional("id", Check(id)),
        FieldRule::required("name", Check(name)),
        FieldRule::required("category", Check(category)),
        FieldRule::required("level", Check(level)),
        FieldRule::required("proficiency", Check(percent)),
        FieldRule::defaulted(
            "experience",
            Object(&SKILL_EXPERIENCE_SCHEMA),
            default_experience,
        ),
        FieldRule::defaulted("certifications", List(&CERTIFICATION_SCHEMA), default_list),
        FieldRule::defaulted(
            "learningResources",
            List(&LEARNING_RESOURCE_SCHEMA),
            default_list,
        ),
        FieldRule::defaulted("learningPath", Check(strings), default_list),
        FieldRule::defaulted("relatedSkills", Check(strings), default_list),
        FieldRule::defaulted("projects", Check(strings), default_list),
        FieldRule::optional("description", Check(description)),
        FieldRule::defaulted("featured", Check(fv::boolean), default_false),
        FieldRule::optional("icon", Check(short_text)),
        FieldRule::optional("color", Check(fv::hex_color)),
        FieldRule::defaulted("visibility", Check(visibility), default_visibility),
        FieldRule::defaulted("priority", Check(priority), default_priority),
        FieldRule::defaulted("tags", Check(strings), default_list),
        FieldRule::required("createdAt", Check(fv::timestamp)).system(),
        FieldRule::required("updatedAt", Check(fv::timestamp)).system(),
        FieldRule::defaulted("version", Check(fv::positive_u32), default_version).system(),
        FieldRule::defaulted("schemaVersion", Check(schema_version), default_schema_version)
            .system(),
    ],
    refinements: &[proficiency_rules],
    update_required: &["updatedAt"],
    finalize: None,
};

//
// ──────────────────────────────────────────────────────────
// Entry points
// ──────────────────────────────────────────────────────────
//

pub fn parse_skill(raw: &Value) -> Result<Skill, ValidationErrors> {
    SKILL_SCHEMA.validate(raw, SchemaMode::Full)
}

pub fn parse_skill_create(raw: &Value) -> Result<Skill, ValidationErrors> {
    SKILL_SCHEMA.validate(raw, SchemaMode::Create)
}

pub fn parse_skill_update(raw: &Value) -> Result<SkillUpdate, ValidationErrors> {
    SKILL_SCHEMA.validate(raw, SchemaMode::Update)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn valid_skill() -> Value {
        json!({
            "name": "Rust",
            "category": "LANGUAGES",
            "level": "ADVANCED",
            "proficiency": 75,
            "createdAt": 1_700_000_000_000i64,
            "updatedAt": 1_700_000_500_000i64
        })
    }

    fn with(mut base: Value, key: &str, value: Value) -> Value {
        base[key] = value;
        base
    }

    fn proficiency_errors(raw: &Value) -> usize {
        parse_skill(raw)
            .err()
            .map(|errors| errors.for_field("proficiency").count())
            .unwrap_or(0)
    }

    #[test]
    fn minimal_skill_gets_defaults() {
        let skill = parse_skill(&valid_skill()).unwrap();

        assert_eq!(skill.priority, 50);
        assert_eq!(skill.experience.total_months, 0);
        assert_eq!(skill.experience.frequency, Frequency::Occasionally);
        assert_eq!(skill.visibility, Visibility::Public);
        assert!(skill.certifications.is_empty());
    }

    #[test]
    fn total_months_is_always_recomputed() {
        let raw = with(
            valid_skill(),
            "experience",
            json!({"years": 2, "months": 3, "totalMonths": 999}),
        );
        let skill = parse_skill(&raw).unwrap();
        assert_eq!(skill.experience.total_months, 27);
    }

    #[test]
    fn name_rules() {
        let errors = parse_skill(&with(valid_skill(), "name", json!("2024"))).unwrap_err();
        assert!(errors.has_field("name"));
        let errors = parse_skill(&with(valid_skill(), "name", json!("  "))).unwrap_err();
        assert!(errors.has_field("name"));
        assert!(parse_skill(&with(valid_skill(), "name", json!("C++ 20"))).is_ok());
    }

    #[test]
    fn proficiency_must_be_multiple_of_five_below_ninety() {
        assert_eq!(proficiency_errors(&with(valid_skill(), "proficiency", json!(73))), 1);

        let expert = with(valid_skill(), "level", json!("EXPERT"));
        let expert = with(expert, "experience", json!({"years": 5}));
        let expert = with(expert, "proficiency", json!(93));
        assert!(parse_skill(&expert).is_ok());
    }

    #[test]
    fn experience_sets_a_proficiency_floor() {
        let raw = with(valid_skill(), "experience", json!({"years": 3}));
        let raw = with(raw, "proficiency", json!(70));
        let errors = parse_skill(&raw).unwrap_err();
        assert!(errors.has_field("proficiency"));

        let raw = with(raw, "proficiency", json!(75));
        assert!(parse_skill(&raw).is_ok());
    }

    #[test]
    fn high_proficiency_needs_evidence() {
        let raw = with(valid_skill(), "proficiency", json!(80));
        assert_eq!(proficiency_errors(&raw), 1);

        let certified = with(
            raw.clone(),
            "certifications",
            json!([{"name": "Rust Cert", "issuer": "Ferris"}]),
        );
        assert!(parse_skill(&certified).is_ok());

        let experienced = with(raw, "experience", json!({"years": 1}));
        assert!(parse_skill(&experienced).is_ok());
    }

    #[test]
    fn featured_skill_gate() {
        let raw = with(valid_skill(), "featured", json!(true));
        let raw = with(raw, "level", json!("INTERMEDIATE"));
        let raw = with(raw, "proficiency", json!(50));
        let errors = parse_skill(&raw).unwrap_err();
        assert!(errors.has_field("proficiency"));

        let raw = with(raw, "level", json!("ADVANCED"));
        let raw = with(raw, "proficiency", json!(70));
        assert!(parse_skill(&raw).is_ok());
    }

    #[test]
    fn last_used_before_first_used_fails() {
        let raw = with(
            valid_skill(),
            "experience",
            json!({"years": 1, "firstUsed": "2022-01-01", "lastUsed": "2021-06-01"}),
        );
        let errors = parse_skill(&raw).unwrap_err();
        assert!(errors.has_field("experience.lastUsed"));
    }

    #[test]
    fn certification_checks() {
        let raw = with(
            valid_skill(),
            "certifications",
            json!([
                {"name": "Old", "issuer": "X", "expiryDate": "2001-01-01"},
                {"name": "", "issuer": "Y", "score": 140}
            ]),
        );
        let errors = parse_skill(&raw).unwrap_err();
        assert!(errors.has_field("certifications.0.expiryDate"));
        assert!(errors.has_field("certifications.1.name"));
        assert!(errors.has_field("certifications.1.score"));
    }

    #[test]
    fn color_must_be_hex() {
        let errors = parse_skill(&with(valid_skill(), "color", json!("orange"))).unwrap_err();
        assert!(errors.has_field("color"));
        assert!(parse_skill(&with(valid_skill(), "color", json!("#f60"))).is_ok());
    }

    #[test]
    fn update_skips_rules_without_their_fields() {
        let update = parse_skill_update(&json!({"proficiency": 85, "updatedAt": 10})).unwrap();
        assert_eq!(update.proficiency, Some(85));

        let errors = parse_skill_update(&json!({
            "proficiency": 50,
            "featured": true,
            "updatedAt": 10
        }))
        .unwrap_err();
        assert!(errors.has_field("proficiency"));
    }

    proptest! {
        #[test]
        fn beginner_band(proficiency in 0i64..=100) {
            let raw = with(valid_skill(), "level", json!("BEGINNER"));
            let raw = with(raw, "proficiency", json!(proficiency));
            let ok = parse_skill(&raw).is_ok();

            if proficiency > 30 {
                prop_assert!(!ok);
            } else {
                prop_assert_eq!(ok, proficiency % 5 == 0);
            }
        }

        #[test]
        fn featured_requires_seventy(proficiency in (0i64..=20).prop_map(|n| n * 5)) {
            let level = SkillLevel::from_score(proficiency as f64);
            let raw = with(valid_skill(), "featured", json!(true));
            let raw = with(raw, "level", json!(level.as_str()));
            let raw = with(raw, "proficiency", json!(proficiency));
            let raw = with(raw, "experience", json!({"years": 1}));

            prop_assert_eq!(parse_skill(&raw).is_ok(), proficiency >= 70);
        }
    }
}
