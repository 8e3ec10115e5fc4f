use serde_json::{json, Map, Value};

use crate::modules::schema::application::domain::enums::{ClosedEnum, Frequency, SkillLevel};
use crate::modules::schema::application::domain::field_validators::coerce_number;
use crate::modules::schema::application::domain::legacy::{
    self, fill_system_fields, int_in_range, lookup, text_field,
};
use crate::modules::schema::application::domain::version::CURRENT_SCHEMA_VERSION;
use crate::modules::skill::application::domain::schema::{parse_skill, DEFAULT_SKILL_PRIORITY};

const CATEGORY_TABLE: &[(&[&str], &str)] = &[
    (&["frontend", "ui", "web", "client"], "FRONTEND"),
    (&["backend", "server", "api"], "BACKEND"),
    (&["database", "databases", "db", "storage"], "DATABASE"),
    (&["devops", "cicd", "infrastructure", "ops"], "DEVOPS"),
    (&["cloud", "aws", "gcp", "azure"], "CLOUD"),
    (&["mobile", "ios", "android"], "MOBILE"),
    (&["design", "ux", "uiux"], "DESIGN"),
    (&["testing", "qa", "test"], "TESTING"),
    (&["datascience", "data", "analytics"], "DATA_SCIENCE"),
    (&["machinelearning", "ml", "ai"], "MACHINE_LEARNING"),
    (&["security", "infosec", "cybersecurity"], "SECURITY"),
    (&["tools", "tool", "tooling"], "TOOLS"),
    (
        &["languages", "language", "programminglanguage", "programminglanguages"],
        "LANGUAGES",
    ),
    (&["softskills", "softskill", "soft"], "SOFT_SKILLS"),
    (&["other", "misc"], "OTHER"),
];

const LEVEL_TABLE: &[(&[&str], &str)] = &[
    (&["beginner", "novice", "basic", "junior"], "BEGINNER"),
    (&["intermediate", "mid", "competent"], "INTERMEDIATE"),
    (&["advanced", "proficient", "senior"], "ADVANCED"),
    (&["expert", "master"], "EXPERT"),
];

const LEGACY_KEYS: &[&str] = &["yearsOfExperience", "skill", "title"];

/// Level and proficiency read from a legacy `level`, which may be a 0–100
/// score or a level name.
fn level_and_proficiency(obj: &Map<String, Value>) -> (SkillLevel, i64) {
    let supplied = int_in_range(obj.get("proficiency"), 0, 100);
    let raw_level = obj.get("level");

    let score = raw_level
        .and_then(coerce_number)
        .filter(|n| (0.0..=100.0).contains(n));
    if let Some(score) = score {
        let level = SkillLevel::from_score(score);
        let rounded = ((score / 5.0).round() * 5.0) as i64;
        return (level, supplied.unwrap_or(rounded));
    }

    let level = raw_level
        .and_then(Value::as_str)
        .and_then(|s| lookup(LEVEL_TABLE, s))
        .and_then(SkillLevel::parse)
        .unwrap_or(SkillLevel::Intermediate);
    (level, supplied.unwrap_or_else(|| level.default_proficiency()))
}

/// Upper bound applied before the integer split. Above the schema's own limit,
/// so oversized values still fail validation on `experience.years`.
const MAX_LEGACY_YEARS: f64 = 100.0;

/// `years = floor(x)`, `months = round(frac * 12)`, with a 12-month carry.
/// `x` is clamped to `[0, MAX_LEGACY_YEARS]`; NaN reads as zero.
pub fn experience_from_years(years_of_experience: f64) -> Value {
    let x = years_of_experience.max(0.0).min(MAX_LEGACY_YEARS);
    let mut years = x.floor() as i64;
    let mut months = ((x - years as f64) * 12.0).round() as i64;
    if months >= 12 {
        years += 1;
        months -= 12;
    }
    json!({
        "years": years,
        "months": months,
        "totalMonths": years * 12 + months,
        "frequency": Frequency::default().as_str()
    })
}

fn experience(obj: &Map<String, Value>) -> Value {
    if let Some(existing) = obj.get("experience").filter(|v| v.is_object()) {
        return existing.clone();
    }
    obj.get("yearsOfExperience")
        .or_else(|| obj.get("experience"))
        .and_then(coerce_number)
        .map(experience_from_years)
        .unwrap_or_else(|| experience_from_years(0.0))
}

/// Plain names become unverified certifications from an unknown issuer.
pub fn certification(value: &Value) -> Option<Value> {
    match value {
        Value::String(name) if !name.trim().is_empty() => Some(json!({
            "name": name.trim(),
            "issuer": "Unknown",
            "verified": false
        })),
        Value::Object(_) => Some(value.clone()),
        _ => None,
    }
}

fn certifications(obj: &Map<String, Value>) -> Value {
    let list: Vec<Value> = match obj.get("certifications") {
        Some(Value::Array(items)) => items.iter().filter_map(certification).collect(),
        other => legacy::string_list(other)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|name| certification(&Value::String(name)))
            .collect(),
    };
    Value::Array(list)
}

fn visibility(obj: &Map<String, Value>) -> &'static str {
    match obj.get("visibility").and_then(Value::as_str) {
        Some(v) if v.eq_ignore_ascii_case("private") => "private",
        _ => match legacy::boolean(obj.get("isPublic")) {
            Some(false) => "private",
            _ => "public",
        },
    }
}

/// Reshapes a skill document of any earlier shape into current-schema input.
/// Never fails; unreadable values fall back to defaults.
pub fn transform(raw: &Value) -> Value {
    let empty = Map::new();
    let obj = raw.as_object().unwrap_or(&empty);
    let mut out = obj.clone();
    for key in LEGACY_KEYS {
        out.remove(*key);
    }
    out.remove("isPublic");

    let name = text_field(obj, "name")
        .or_else(|| text_field(obj, "skill"))
        .or_else(|| text_field(obj, "title"));
    if let Some(name) = name {
        out.insert("name".into(), Value::String(name));
    }

    let category = obj
        .get("category")
        .and_then(Value::as_str)
        .and_then(|s| lookup(CATEGORY_TABLE, s))
        .unwrap_or("OTHER");
    out.insert("category".into(), json!(category));

    let (level, proficiency) = level_and_proficiency(obj);
    out.insert("level".into(), json!(level.as_str()));
    out.insert("proficiency".into(), json!(proficiency));

    out.insert("experience".into(), experience(obj));
    out.insert("certifications".into(), certifications(obj));
    out.insert(
        "featured".into(),
        json!(legacy::boolean(obj.get("featured")).unwrap_or(false)),
    );
    out.insert("visibility".into(), json!(visibility(obj)));
    out.insert(
        "priority".into(),
        json!(int_in_range(obj.get("priority"), 1, 100).unwrap_or(DEFAULT_SKILL_PRIORITY)),
    );
    for key in ["learningPath", "relatedSkills", "projects", "tags"] {
        if let Some(list) = legacy::string_list(obj.get(key)) {
            out.insert(key.into(), json!(list));
        } else if obj.contains_key(key) {
            out.insert(key.into(), json!([]));
        }
    }

    fill_system_fields(&mut out);
    out.insert("schemaVersion".into(), json!(CURRENT_SCHEMA_VERSION));
    Value::Object(out)
}

/// Transforms then validates against the full skill schema.
pub fn is_valid(raw: &Value) -> bool {
    parse_skill(&transform(raw)).is_ok()
}
