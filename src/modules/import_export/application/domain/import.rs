use serde_json::{Map, Value};
use thiserror::Error;

use crate::modules::import_export::application::domain::format::ImportFormat;
use crate::modules::project::application::domain::legacy_transformer as project_transformer;
use crate::modules::schema::application::domain::EntityType;
use crate::modules::skill::application::domain::legacy_transformer as skill_transformer;
use crate::modules::validation::application::domain::{validate_bulk, BulkValidationResult};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImportError {
    #[error("malformed JSON: {0}")]
    Json(String),
    #[error("malformed CSV: {0}")]
    Csv(String),
}

/// Reads one CSV cell. Empty cells are omitted; numeric text becomes a
/// number, `true`/`false` a boolean and `{…}`/`[…]` parsed JSON when it parses.
pub fn coerce_cell(raw: &str) -> Option<Value> {
    let cell = raw.trim();
    if cell.is_empty() {
        return None;
    }
    match cell {
        "true" => return Some(Value::Bool(true)),
        "false" => return Some(Value::Bool(false)),
        _ => {}
    }
    if let Ok(i) = cell.parse::<i64>() {
        return Some(Value::from(i));
    }
    if let Ok(f) = cell.parse::<f64>() {
        if f.is_finite() {
            return Some(Value::from(f));
        }
    }
    if (cell.starts_with('{') && cell.ends_with('}')) || (cell.starts_with('[') && cell.ends_with(']')) {
        if let Ok(parsed) = serde_json::from_str(cell) {
            return Some(parsed);
        }
    }
    Some(Value::String(cell.to_string()))
}

/// Accepts an array of documents or a single document.
pub fn parse_json(text: &str) -> Result<Vec<Value>, ImportError> {
    let value: Value = serde_json::from_str(text).map_err(|e| ImportError::Json(e.to_string()))?;
    match value {
        Value::Array(items) => Ok(items),
        single => Ok(vec![single]),
    }
}

/// One document per row, keyed by the header row.
pub fn parse_csv(text: &str) -> Result<Vec<Value>, ImportError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .from_reader(text.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| ImportError::Csv(e.to_string()))?
        .clone();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| ImportError::Csv(e.to_string()))?;
        let row: Map<String, Value> = headers
            .iter()
            .zip(record.iter())
            .filter_map(|(key, cell)| coerce_cell(cell).map(|value| (key.to_string(), value)))
            .collect();
        rows.push(Value::Object(row));
    }
    Ok(rows)
}

pub fn parse(text: &str, format: ImportFormat) -> Result<Vec<Value>, ImportError> {
    match format {
        ImportFormat::Json => parse_json(text),
        ImportFormat::Csv => parse_csv(text),
    }
}

/// Runs each parsed row through the legacy transformer, then validates the
/// lot with the full schema.
pub fn import_rows(rows: &[Value], entity: EntityType) -> BulkValidationResult<Value> {
    let transformed: Vec<Value> = rows
        .iter()
        .map(|row| match entity {
            EntityType::Project => project_transformer::transform(row),
            EntityType::Skill => skill_transformer::transform(row),
        })
        .collect();
    validate_bulk(entity, &transformed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn cells_are_coerced() {
        assert_eq!(coerce_cell(""), None);
        assert_eq!(coerce_cell("   "), None);
        assert_eq!(coerce_cell("42"), Some(json!(42)));
        assert_eq!(coerce_cell("2.5"), Some(json!(2.5)));
        assert_eq!(coerce_cell("true"), Some(json!(true)));
        assert_eq!(coerce_cell("[\"a\",\"b\"]"), Some(json!(["a", "b"])));
        assert_eq!(coerce_cell("{\"k\":1}"), Some(json!({"k": 1})));
        assert_eq!(coerce_cell("{not json}"), Some(json!("{not json}")));
        assert_eq!(coerce_cell("Rust"), Some(json!("Rust")));
        assert_eq!(coerce_cell("NaN"), Some(json!("NaN")));
    }

    #[test]
    fn json_accepts_one_object_or_many() {
        assert_eq!(parse_json(r#"{"name": "Go"}"#).unwrap().len(), 1);
        assert_eq!(parse_json(r#"[{"name": "Go"}, {"name": "C"}]"#).unwrap().len(), 2);
        assert!(matches!(parse_json("[{"), Err(ImportError::Json(_))));
    }

    #[test]
    fn csv_rows_become_documents() {
        let text = "name, level ,yearsOfExperience,tags\nGo,advanced,3,\"[\"\"cli\"\"]\"\nSQL,,,\n";

        let rows = parse_csv(text).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(
            rows[0],
            json!({"name": "Go", "level": "advanced", "yearsOfExperience": 3, "tags": ["cli"]})
        );
        assert_eq!(rows[1], json!({"name": "SQL"}));
    }

    #[test]
    fn ragged_csv_is_rejected() {
        let text = "name,level\nGo,advanced,extra\n";
        assert!(matches!(parse_csv(text), Err(ImportError::Csv(_))));
    }

    #[test]
    fn imported_legacy_rows_are_transformed_then_validated() {
        let rows = parse_csv(
            "title,description,category,technologies,role,liveUrl\n\
             Shop,An online shop for handmade goods,web,\"React, Node.js\",Developer,https://shop.example.com\n\
             ,missing title,web,Rust,Developer,\n",
        )
        .unwrap();

        let result = import_rows(&rows, EntityType::Project);

        assert_eq!(result.summary.total, 2);
        assert_eq!(result.summary.valid_count, 1);
        assert_eq!(result.valid[0]["links"][0]["type"], "live");
        assert_eq!(result.valid[0]["technologies"], json!(["React", "Node.js"]));
        assert_eq!(result.invalid[0].index, 1);
    }
}
