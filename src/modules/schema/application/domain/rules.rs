use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::field_validators::type_name;
use super::validation::{join_path, ErrorCode, ValidationError, ValidationErrors};
use super::version::CURRENT_SCHEMA_VERSION;

/// Checks one value at `path`. Returns the normalized value, or `None` after
/// pushing at least one error.
pub type CheckFn = fn(&Value, &str, &mut Vec<ValidationError>) -> Option<Value>;

/// Cross-field rule over the normalized fields of one object. Only fields that
/// passed their own check are present; in [`SchemaMode::Update`] that is only
/// the fields the update carries.
pub type RefineFn = fn(&Map<String, Value>, &str, SchemaMode, &mut Vec<ValidationError>);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaMode {
    /// Stored document: system timestamps required, defaults applied.
    #[default]
    Full,
    /// New document: caller-supplied system fields are replaced.
    Create,
    /// Partial change: every field optional, no defaults.
    Update,
}

pub enum Presence {
    Required,
    Optional,
    Defaulted(fn() -> Value),
}

pub enum FieldKind {
    Value(CheckFn),
    Object(&'static ObjectSchema),
    List(&'static ObjectSchema),
}

pub struct FieldRule {
    pub name: &'static str,
    pub presence: Presence,
    /// Managed by the store rather than the author.
    pub system: bool,
    pub kind: FieldKind,
}

impl FieldRule {
    pub const fn required(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            presence: Presence::Required,
            system: false,
            kind,
        }
    }

    pub const fn optional(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            presence: Presence::Optional,
            system: false,
            kind,
        }
    }

    pub const fn defaulted(name: &'static str, kind: FieldKind, default: fn() -> Value) -> Self {
        Self {
            name,
            presence: Presence::Defaulted(default),
            system: false,
            kind,
        }
    }

    pub const fn system(mut self) -> Self {
        self.system = true;
        self
    }

    /// Checks a present value against this field's kind.
    pub fn check(&self, value: &Value, path: &str, errors: &mut Vec<ValidationError>) -> Option<Value> {
        match &self.kind {
            FieldKind::Value(check) => check(value, path, errors),
            FieldKind::Object(schema) => {
                let before = errors.len();
                let map = schema.parse(value, path, SchemaMode::Full, errors);
                (errors.len() == before).then(|| Value::Object(map))
            }
            FieldKind::List(schema) => schema.parse_list(value, path, errors),
        }
    }
}

/// Where a dot-path lands inside a schema.
pub enum ResolvedPath {
    Field(&'static FieldRule),
    Element(&'static ObjectSchema),
}

impl ResolvedPath {
    pub fn check(&self, value: &Value, path: &str, errors: &mut Vec<ValidationError>) -> Option<Value> {
        match self {
            ResolvedPath::Field(rule) => {
                if value.is_null() {
                    return match rule.presence {
                        Presence::Required => {
                            errors.push(ValidationError::required(path));
                            None
                        }
                        _ => Some(Value::Null),
                    };
                }
                rule.check(value, path, errors)
            }
            ResolvedPath::Element(schema) => {
                let before = errors.len();
                let map = schema.parse(value, path, SchemaMode::Full, errors);
                (errors.len() == before).then(|| Value::Object(map))
            }
        }
    }
}

/// Declarative description of one JSON object: its fields, an optional pass
/// that derives fields, and the cross-field rules run last.
pub struct ObjectSchema {
    pub name: &'static str,
    pub fields: &'static [FieldRule],
    pub refinements: &'static [RefineFn],
    /// Fields still required in [`SchemaMode::Update`].
    pub update_required: &'static [&'static str],
    pub finalize: Option<fn(&mut Map<String, Value>)>,
}

impl ObjectSchema {
    pub fn field(&self, name: &str) -> Option<&FieldRule> {
        self.fields.iter().find(|f| f.name == name)
    }

    fn has_system_fields(&self) -> bool {
        self.fields.iter().any(|f| f.system)
    }

    /// Checks every field, then every refinement, collecting all violations.
    /// The returned map holds the normalized fields that passed; unknown keys
    /// are dropped.
    pub fn parse(
        &self,
        raw: &Value,
        prefix: &str,
        mode: SchemaMode,
        errors: &mut Vec<ValidationError>,
    ) -> Map<String, Value> {
        let mut out = Map::new();
        let Some(obj) = raw.as_object() else {
            errors.push(ValidationError::new(
                prefix,
                ErrorCode::InvalidType,
                format!("Expected object, received {}", type_name(raw)),
                Some(raw),
            ));
            return out;
        };

        for rule in self.fields {
            if mode == SchemaMode::Create && rule.system {
                continue;
            }
            let path = join_path(prefix, rule.name);
            match obj.get(rule.name).filter(|v| !v.is_null()) {
                Some(value) => {
                    if let Some(normalized) = rule.check(value, &path, errors) {
                        out.insert(rule.name.to_string(), normalized);
                    }
                }
                None if mode == SchemaMode::Update => {
                    if self.update_required.contains(&rule.name) {
                        errors.push(ValidationError::required(path));
                    }
                }
                None => match rule.presence {
                    Presence::Required => errors.push(ValidationError::required(path)),
                    Presence::Optional => {}
                    Presence::Defaulted(default) => {
                        out.insert(rule.name.to_string(), default());
                    }
                },
            }
        }

        if mode != SchemaMode::Update {
            if let Some(finalize) = self.finalize {
                finalize(&mut out);
            }
        }
        for refine in self.refinements {
            refine(&out, prefix, mode, errors);
        }

        if mode == SchemaMode::Create && self.has_system_fields() {
            fill_system_defaults(&mut out);
        }
        out
    }

    /// Array whose items each follow this schema; item paths are `prefix.i`.
    pub fn parse_list(
        &self,
        raw: &Value,
        prefix: &str,
        errors: &mut Vec<ValidationError>,
    ) -> Option<Value> {
        let Some(items) = raw.as_array() else {
            errors.push(ValidationError::new(
                prefix,
                ErrorCode::InvalidType,
                format!("Expected array, received {}", type_name(raw)),
                Some(raw),
            ));
            return None;
        };
        let before = errors.len();
        let parsed: Vec<Value> = items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                let path = join_path(prefix, &i.to_string());
                Value::Object(self.parse(item, &path, SchemaMode::Full, errors))
            })
            .collect();
        (errors.len() == before).then_some(Value::Array(parsed))
    }

    /// Normalizes `raw` or returns every violation found.
    pub fn normalize(
        &self,
        raw: &Value,
        mode: SchemaMode,
    ) -> Result<Map<String, Value>, ValidationErrors> {
        let mut errors = Vec::new();
        let map = self.parse(raw, "", mode, &mut errors);
        if errors.is_empty() {
            Ok(map)
        } else {
            Err(ValidationErrors(errors))
        }
    }

    /// Normalizes `raw` and builds the typed entity from the result.
    pub fn validate<T: DeserializeOwned>(
        &self,
        raw: &Value,
        mode: SchemaMode,
    ) -> Result<T, ValidationErrors> {
        let map = self.normalize(raw, mode)?;
        serde_json::from_value(Value::Object(map))
            .map_err(|e| ValidationErrors(vec![ValidationError::unknown(e)]))
    }

    /// Follows a dot-path through nested objects and lists. Numeric segments
    /// index into list fields.
    pub fn resolve(&'static self, path: &str) -> Option<ResolvedPath> {
        let mut segments = path.split('.').peekable();
        let mut schema: &'static ObjectSchema = self;

        loop {
            let segment = segments.next()?;
            if segment.is_empty() {
                return None;
            }
            let rule = schema.fields.iter().find(|f| f.name == segment)?;
            if segments.peek().is_none() {
                return Some(ResolvedPath::Field(rule));
            }
            match &rule.kind {
                FieldKind::Value(_) => return None,
                FieldKind::Object(nested) => schema = *nested,
                FieldKind::List(element) => {
                    let index = segments.next()?;
                    index.parse::<usize>().ok()?;
                    if segments.peek().is_none() {
                        return Some(ResolvedPath::Element(*element));
                    }
                    schema = *element;
                }
            }
        }
    }
}

pub fn default_false() -> Value {
    Value::Bool(false)
}

pub fn default_list() -> Value {
    Value::Array(Vec::new())
}

pub fn default_version() -> Value {
    Value::from(1)
}

pub fn default_schema_version() -> Value {
    Value::String(CURRENT_SCHEMA_VERSION.to_string())
}

/// System values stamped onto a newly created document.
pub fn fill_system_defaults(map: &mut Map<String, Value>) {
    let now = Utc::now().timestamp_millis();
    map.insert("createdAt".into(), Value::from(now));
    map.insert("updatedAt".into(), Value::from(now));
    map.insert("version".into(), Value::from(1));
    map.insert(
        "schemaVersion".into(),
        Value::String(CURRENT_SCHEMA_VERSION.to_string()),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::schema::application::domain::field_validators as fv;
    use serde_json::json;

    fn name(v: &Value, p: &str, e: &mut Vec<ValidationError>) -> Option<Value> {
        fv::text(v, p, e, 1, 20, true)
    }

    fn count(v: &Value, p: &str, e: &mut Vec<ValidationError>) -> Option<Value> {
        fv::int_range(v, p, e, 0, 10)
    }

    fn zero() -> Value {
        json!(0)
    }

    fn min_le_max(
        map: &Map<String, Value>,
        prefix: &str,
        _mode: SchemaMode,
        errors: &mut Vec<ValidationError>,
    ) {
        if let (Some(min), Some(max)) = (map.get("min"), map.get("max")) {
            if min.as_i64() > max.as_i64() {
                errors.push(ValidationError::new(
                    join_path(prefix, "max"),
                    ErrorCode::Custom,
                    "max must not be below min",
                    None,
                ));
            }
        }
    }

    static RANGE: ObjectSchema = ObjectSchema {
        name: "range",
        fields: &[
            FieldRule::defaulted("min", FieldKind::Value(count), zero),
            FieldRule::required("max", FieldKind::Value(count)),
        ],
        refinements: &[min_le_max],
        update_required: &[],
        finalize: None,
    };

    static ITEM: ObjectSchema = ObjectSchema {
        name: "item",
        fields: &[
            FieldRule::required("name", FieldKind::Value(name)),
            FieldRule::optional("range", FieldKind::Object(&RANGE)),
            FieldRule::optional("parts", FieldKind::List(&RANGE)),
            FieldRule::required("updatedAt", FieldKind::Value(fv::timestamp)).system(),
        ],
        refinements: &[],
        update_required: &["updatedAt"],
        finalize: None,
    };

    #[test]
    fn full_mode_collects_every_error_and_strips_unknown_keys() {
        let raw = json!({
            "name": "   ",
            "range": {"min": 5, "max": 2},
            "parts": [{"max": 1}, {"max": 99}],
            "extra": true
        });
        let errors = ITEM.normalize(&raw, SchemaMode::Full).unwrap_err();

        assert!(errors.has_field("name"));
        assert!(errors.has_field("range.max"));
        assert!(errors.has_field("parts.1.max"));
        assert!(errors.has_field("updatedAt"));
        assert_eq!(errors.len(), 4);
    }

    #[test]
    fn defaults_apply_outside_update_mode() {
        let raw = json!({"name": "a", "range": {"max": 3}, "updatedAt": 1, "extra": 1});
        let map = ITEM.normalize(&raw, SchemaMode::Full).unwrap();
        assert_eq!(map["range"], json!({"min": 0, "max": 3}));
        assert!(!map.contains_key("extra"));
    }

    #[test]
    fn update_mode_only_requires_update_fields() {
        let ok = ITEM.normalize(&json!({"updatedAt": 5}), SchemaMode::Update).unwrap();
        assert_eq!(ok.len(), 1);

        let errors = ITEM
            .normalize(&json!({"name": "b"}), SchemaMode::Update)
            .unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors.has_field("updatedAt"));
    }

    #[test]
    fn create_mode_replaces_system_fields() {
        let map = ITEM
            .normalize(&json!({"name": "c", "updatedAt": -4}), SchemaMode::Create)
            .unwrap();
        assert!(map["updatedAt"].as_i64().unwrap() > 0);
        assert_eq!(map["version"], 1);
        assert_eq!(map["schemaVersion"], CURRENT_SCHEMA_VERSION);
    }

    #[test]
    fn resolve_walks_objects_and_lists() {
        assert!(matches!(ITEM.resolve("name"), Some(ResolvedPath::Field(r)) if r.name == "name"));
        assert!(matches!(ITEM.resolve("range.max"), Some(ResolvedPath::Field(r)) if r.name == "max"));
        assert!(matches!(ITEM.resolve("parts.0.min"), Some(ResolvedPath::Field(r)) if r.name == "min"));
        assert!(matches!(ITEM.resolve("parts.3"), Some(ResolvedPath::Element(_))));
        assert!(ITEM.resolve("parts.x.min").is_none());
        assert!(ITEM.resolve("name.first").is_none());
        assert!(ITEM.resolve("missing").is_none());
        assert!(ITEM.resolve("").is_none());
    }

    #[test]
    fn non_object_input_is_a_type_error() {
        let errors = ITEM.normalize(&json!([1, 2]), SchemaMode::Full).unwrap_err();
        assert_eq!(errors.0[0].code, ErrorCode::InvalidType);
        assert_eq!(errors.0[0].field, "");
    }
}
