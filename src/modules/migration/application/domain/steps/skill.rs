use serde_json::Value;

use crate::modules::migration::application::domain::step::{
    object, DocumentMigration, MigrationStepError,
};
use crate::modules::schema::application::domain::field_validators::coerce_number;
use crate::modules::skill::application::domain::legacy_transformer::{
    self, certification, experience_from_years,
};

pub struct StructuredExperience;

impl DocumentMigration for StructuredExperience {
    fn version(&self) -> &'static str {
        "0.2.0"
    }

    fn description(&self) -> &'static str {
        "Replace yearsOfExperience with a structured experience object"
    }

    fn up(&self, data: &Value) -> Result<Value, MigrationStepError> {
        let mut obj = object(data, self.version())?;
        let years = obj.remove("yearsOfExperience");

        if !obj.get("experience").is_some_and(Value::is_object) {
            let years = years
                .as_ref()
                .or_else(|| obj.get("experience"))
                .and_then(coerce_number)
                .unwrap_or(0.0);
            obj.insert("experience".into(), experience_from_years(years));
        }

        Ok(Value::Object(obj))
    }

    fn down(&self, data: &Value) -> Option<Result<Value, MigrationStepError>> {
        Some(object(data, self.version()).map(|mut obj| {
            if let Some(Value::Object(experience)) = obj.remove("experience") {
                let years = experience.get("years").and_then(Value::as_f64).unwrap_or(0.0);
                let months = experience.get("months").and_then(Value::as_f64).unwrap_or(0.0);
                let total = ((years + months / 12.0) * 100.0).round() / 100.0;
                obj.insert("yearsOfExperience".into(), Value::from(total));
            }
            Value::Object(obj)
        }))
    }
}

pub struct CertificationObjects;

impl DocumentMigration for CertificationObjects {
    fn version(&self) -> &'static str {
        "0.3.0"
    }

    fn description(&self) -> &'static str {
        "Turn certification names into certification objects"
    }

    fn up(&self, data: &Value) -> Result<Value, MigrationStepError> {
        let mut obj = object(data, self.version())?;
        let certifications: Vec<Value> = match obj.remove("certifications") {
            Some(Value::Array(items)) => items.iter().filter_map(certification).collect(),
            Some(Value::String(names)) => names
                .split(',')
                .filter_map(|name| certification(&Value::String(name.to_string())))
                .collect(),
            _ => Vec::new(),
        };
        obj.insert("certifications".into(), Value::Array(certifications));
        Ok(Value::Object(obj))
    }

    fn down(&self, data: &Value) -> Option<Result<Value, MigrationStepError>> {
        Some(object(data, self.version()).map(|mut obj| {
            if let Some(Value::Array(items)) = obj.remove("certifications") {
                let names: Vec<Value> = items
                    .iter()
                    .filter_map(|c| match c {
                        Value::Object(cert) => cert.get("name").cloned(),
                        Value::String(_) => Some(c.clone()),
                        _ => None,
                    })
                    .collect();
                obj.insert("certifications".into(), Value::Array(names));
            }
            Value::Object(obj)
        }))
    }
}

pub struct CurrentSkillSchema;

impl DocumentMigration for CurrentSkillSchema {
    fn version(&self) -> &'static str {
        "1.0.0"
    }

    fn description(&self) -> &'static str {
        "Normalize to the current skill schema"
    }

    fn up(&self, data: &Value) -> Result<Value, MigrationStepError> {
        object(data, self.version())?;
        Ok(legacy_transformer::transform(data))
    }

    fn validate(&self, data: &Value) -> bool {
        data.get("name").is_some_and(Value::is_string)
    }
}
