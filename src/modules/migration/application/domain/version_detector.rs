use serde_json::Value;

use crate::modules::schema::application::domain::enums::EntityType;
use crate::modules::schema::application::domain::version::{
    BASELINE_SCHEMA_VERSION, CURRENT_SCHEMA_VERSION,
};

fn is_array(data: &Value, key: &str) -> bool {
    data.get(key).is_some_and(Value::is_array)
}

fn is_object(data: &Value, key: &str) -> bool {
    data.get(key).is_some_and(Value::is_object)
}

/// Infers a document's schema version.
///
/// A string `schemaVersion` wins. Otherwise the shape is matched against each
/// version's signature, newest first; the first match is returned.
pub fn detect_version(data: &Value, entity: EntityType) -> String {
    if let Some(version) = data.get("schemaVersion").and_then(Value::as_str) {
        return version.to_string();
    }
    let has_version_key = data.get("schemaVersion").is_some();

    let detected = match entity {
        EntityType::Project => {
            let images = is_array(data, "images");
            let links = is_array(data, "links");
            if images && links && has_version_key {
                CURRENT_SCHEMA_VERSION
            } else if links {
                "0.4.0"
            } else if images {
                "0.3.0"
            } else if is_object(data, "clientInfo") || is_object(data, "metrics") {
                "0.2.0"
            } else {
                BASELINE_SCHEMA_VERSION
            }
        }
        EntityType::Skill => {
            let experience = is_object(data, "experience");
            let certifications = data
                .get("certifications")
                .and_then(Value::as_array)
                .is_some_and(|certs| !certs.is_empty() && certs.iter().all(Value::is_object));
            if experience && certifications && has_version_key {
                CURRENT_SCHEMA_VERSION
            } else if certifications {
                "0.3.0"
            } else if experience {
                "0.2.0"
            } else {
                BASELINE_SCHEMA_VERSION
            }
        }
    };
    detected.to_string()
}
