use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use serde_json::Value;
use std::collections::HashSet;
use std::io::Cursor;
use thiserror::Error;

use crate::modules::import_export::application::domain::format::ExportFormat;
use crate::modules::schema::application::domain::{ClosedEnum, EntityType};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExportError {
    #[error("failed to render JSON: {0}")]
    Json(String),
    #[error("failed to render CSV: {0}")]
    Csv(String),
    #[error("failed to render XML: {0}")]
    Xml(String),
}

/// Scalar text for a flat cell or element: strings as-is, nested values as
/// compact JSON, null as empty.
fn flat_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(_) | Value::Number(_) => value.to_string(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

pub fn export_json(items: &[Value]) -> Result<String, ExportError> {
    serde_json::to_string_pretty(items).map_err(|e| ExportError::Json(e.to_string()))
}

/// Header is the union of keys in first-seen order.
pub fn export_csv(items: &[Value]) -> Result<String, ExportError> {
    let mut seen = HashSet::new();
    let mut header: Vec<&str> = Vec::new();
    for obj in items.iter().filter_map(Value::as_object) {
        for key in obj.keys() {
            if seen.insert(key.as_str()) {
                header.push(key.as_str());
            }
        }
    }

    let mut writer = csv::Writer::from_writer(Vec::new());
    if !header.is_empty() {
        writer
            .write_record(&header)
            .map_err(|e| ExportError::Csv(e.to_string()))?;
    }
    for item in items {
        let row: Vec<String> = header
            .iter()
            .map(|key| item.get(*key).map(flat_text).unwrap_or_default())
            .collect();
        writer
            .write_record(&row)
            .map_err(|e| ExportError::Csv(e.to_string()))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ExportError::Csv(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| ExportError::Csv(e.to_string()))
}

/// `<projects><project><title>…</title>…</project></projects>`; nested values
/// are JSON-stringified text.
pub fn export_xml(items: &[Value], entity: EntityType) -> Result<String, ExportError> {
    let xml_err = |e: std::io::Error| ExportError::Xml(e.to_string());
    let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);

    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .map_err(xml_err)?;
    writer
        .write_event(Event::Start(BytesStart::new(entity.plural())))
        .map_err(xml_err)?;

    for item in items {
        writer
            .write_event(Event::Start(BytesStart::new(entity.as_str())))
            .map_err(xml_err)?;
        if let Some(obj) = item.as_object() {
            for (key, value) in obj {
                writer
                    .write_event(Event::Start(BytesStart::new(key.as_str())))
                    .map_err(xml_err)?;
                writer
                    .write_event(Event::Text(BytesText::new(&flat_text(value))))
                    .map_err(xml_err)?;
                writer
                    .write_event(Event::End(BytesEnd::new(key.as_str())))
                    .map_err(xml_err)?;
            }
        }
        writer
            .write_event(Event::End(BytesEnd::new(entity.as_str())))
            .map_err(xml_err)?;
    }

    writer
        .write_event(Event::End(BytesEnd::new(entity.plural())))
        .map_err(xml_err)?;

    String::from_utf8(writer.into_inner().into_inner()).map_err(|e| ExportError::Xml(e.to_string()))
}

pub fn render(items: &[Value], entity: EntityType, format: ExportFormat) -> Result<String, ExportError> {
    match format {
        ExportFormat::Json => export_json(items),
        ExportFormat::Csv => export_csv(items),
        ExportFormat::Xml => export_xml(items, entity),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn json_is_a_pretty_array() {
        let out = export_json(&[json!({"name": "Go"})]).unwrap();

        assert!(out.starts_with("[\n"));
        assert_eq!(serde_json::from_str::<Value>(&out).unwrap(), json!([{"name": "Go"}]));
    }

    #[test]
    fn csv_header_is_the_union_of_keys() {
        let items = vec![
            json!({"name": "Go", "proficiency": 60}),
            json!({"name": "Rust", "tags": ["systems", "cli"], "featured": true}),
        ];

        let out = export_csv(&items).unwrap();
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines[0], "name,proficiency,tags,featured");
        assert_eq!(lines[1], "Go,60,,");
        assert_eq!(lines[2], r#"Rust,,"[""systems"",""cli""]",true"#);
    }

    #[test]
    fn csv_of_nothing_is_empty() {
        assert_eq!(export_csv(&[]).unwrap(), "");
    }

    #[test]
    fn xml_escapes_text_and_stringifies_nested_values() {
        let items = vec![json!({
            "title": "Fish & <Chips>",
            "teamSize": 2,
            "clientInfo": {"name": "ACME"}
        })];

        let out = export_xml(&items, EntityType::Project).unwrap();

        assert!(out.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(out.contains("<projects>"));
        assert!(out.contains("<project>"));
        assert!(out.contains("<title>Fish &amp; &lt;Chips&gt;</title>"));
        assert!(out.contains("<teamSize>2</teamSize>"));
        assert!(out.contains("<clientInfo>{"));
        assert!(!out.contains("<name>ACME</name>"));
        assert!(out.trim_end().ends_with("</projects>"));
    }

    #[test]
    fn skills_use_their_own_element_names() {
        let out = render(&[json!({"name": "Go"})], EntityType::Skill, ExportFormat::Xml).unwrap();

        assert!(out.contains("<skills>"));
        assert!(out.contains("<skill>"));
        assert!(out.contains("<name>Go</name>"));
    }
}
