//! Helpers shared by the per-entity legacy transformers. Every function here
//! is total: bad input yields `None` or a fallback, never an error.

use chrono::Utc;
use serde_json::{Map, Value};

use super::field_validators::{coerce_integer, parse_date};

/// Lowercases and drops everything but ASCII letters and digits, so
/// `"Web Application"`, `"web-application"` and `"WEB_APPLICATION"` compare equal.
pub fn lookup_key(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Finds `raw` in a `(aliases, canonical)` table.
pub fn lookup<'a>(table: &[(&[&str], &'a str)], raw: &str) -> Option<&'a str> {
    let key = lookup_key(raw);
    table
        .iter()
        .find(|(aliases, _)| aliases.contains(&key.as_str()))
        .map(|(_, canonical)| *canonical)
}

/// Non-blank string at `key`, trimmed.
pub fn text_field(obj: &Map<String, Value>, key: &str) -> Option<String> {
    obj.get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Reads an array of strings or a comma separated string. Blank entries are dropped.
pub fn string_list(value: Option<&Value>) -> Option<Vec<String>> {
    let items: Vec<String> = match value? {
        Value::Array(items) => items
            .iter()
            .filter_map(|v| match v {
                Value::String(s) => Some(s.trim().to_string()),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
            .collect(),
        Value::String(s) => s.split(',').map(|s| s.trim().to_string()).collect(),
        _ => return None,
    };
    let items: Vec<String> = items.into_iter().filter(|s| !s.is_empty()).collect();
    (!items.is_empty()).then_some(items)
}

/// Integer within `min..=max`, accepting numeric strings.
pub fn int_in_range(value: Option<&Value>, min: i64, max: i64) -> Option<i64> {
    value
        .and_then(coerce_integer)
        .filter(|n| (min..=max).contains(n))
}

pub fn boolean(value: Option<&Value>) -> Option<bool> {
    match value? {
        Value::Bool(b) => Some(*b),
        Value::String(s) if s.eq_ignore_ascii_case("true") => Some(true),
        Value::String(s) if s.eq_ignore_ascii_case("false") => Some(false),
        Value::Number(n) => n.as_i64().map(|n| n != 0),
        _ => None,
    }
}

/// Epoch milliseconds from a number or any accepted date string.
pub fn timestamp_millis(value: Option<&Value>) -> Option<i64> {
    let value = value?;
    if let Some(ms) = coerce_integer(value).filter(|ms| *ms > 0) {
        return Some(ms);
    }
    parse_date(value)
        .map(|d| d.timestamp_millis())
        .filter(|ms| *ms > 0)
}

/// Stamps `createdAt`, `updatedAt` and `version`, keeping usable values.
pub fn fill_system_fields(out: &mut Map<String, Value>) {
    let now = Utc::now().timestamp_millis();
    let created = timestamp_millis(out.get("createdAt")).unwrap_or(now);
    let updated = timestamp_millis(out.get("updatedAt")).unwrap_or(now);
    let version = int_in_range(out.get("version"), 1, i64::MAX).unwrap_or(1);

    out.insert("createdAt".into(), Value::from(created));
    out.insert("updatedAt".into(), Value::from(updated));
    out.insert("version".into(), Value::from(version));
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const TABLE: &[(&[&str], &str)] = &[
        (&["webapplication", "web", "webapp"], "WEB_APPLICATION"),
        (&["other"], "OTHER"),
    ];

    #[test]
    fn lookup_ignores_case_and_separators() {
        assert_eq!(lookup(TABLE, "Web Application"), Some("WEB_APPLICATION"));
        assert_eq!(lookup(TABLE, "WEB_APPLICATION"), Some("WEB_APPLICATION"));
        assert_eq!(lookup(TABLE, " web-app "), Some("WEB_APPLICATION"));
        assert_eq!(lookup(TABLE, "spaceship"), None);
    }

    #[test]
    fn string_list_accepts_comma_strings() {
        assert_eq!(
            string_list(Some(&json!("Rust, Go ,,"))),
            Some(vec!["Rust".to_string(), "Go".to_string()])
        );
        assert_eq!(string_list(Some(&json!([" ", ""]))), None);
        assert_eq!(string_list(Some(&json!(3))), None);
    }

    #[test]
    fn timestamps_from_numbers_and_dates() {
        assert_eq!(timestamp_millis(Some(&json!("1640995200000"))), Some(1_640_995_200_000));
        assert_eq!(timestamp_millis(Some(&json!("2022-01-01"))), Some(1_640_995_200_000));
        assert_eq!(timestamp_millis(Some(&json!(-5))), None);
        assert_eq!(timestamp_millis(None), None);
    }

    #[test]
    fn system_fields_fall_back() {
        let mut out = Map::new();
        out.insert("createdAt".into(), json!("junk"));
        out.insert("version".into(), json!(3));
        fill_system_fields(&mut out);

        assert!(out["createdAt"].as_i64().unwrap() > 0);
        assert_eq!(out["version"], 3);
    }
}
