use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, TimeZone, Utc};
use email_address::EmailAddress;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};

use super::enums::ClosedEnum;
use super::validation::{join_path, ErrorCode, ValidationError};

static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[0-9][0-9\s\-().]{5,19}$").expect("static phone pattern"));
static HEX_COLOR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^#(?:[0-9a-fA-F]{3}|[0-9a-fA-F]{6})$").expect("static color pattern")
});
static SLUG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").expect("static slug pattern"));
static PERCENTAGE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{1,3}(?:\.\d+)?%$").expect("static percentage pattern"));
static LOAD_TIME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+(?:\.\d+)?\s?(?:ms|s)$").expect("static load time pattern"));

/// JSON type name used in `invalid_type` messages.
pub fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn invalid_type(path: &str, expected: &str, value: &Value) -> ValidationError {
    ValidationError::new(
        path,
        ErrorCode::InvalidType,
        format!("Expected {}, received {}", expected, type_name(value)),
        Some(value),
    )
}

//
// ──────────────────────────────────────────────────────────
// Coercion helpers
// ──────────────────────────────────────────────────────────
//

/// Reads a number, accepting numeric strings.
pub fn coerce_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        _ => None,
    }
}

/// Reads a whole number, accepting numeric strings and integral floats.
pub fn coerce_integer(value: &Value) -> Option<i64> {
    if let Some(i) = value.as_i64() {
        return Some(i);
    }
    let n = coerce_number(value)?;
    if n.fract() == 0.0 && n >= i64::MIN as f64 && n <= i64::MAX as f64 {
        Some(n as i64)
    } else {
        None
    }
}

/// Reads a date from an RFC 3339 string, a `YYYY-MM-DD` string, a naive
/// `YYYY-MM-DDTHH:MM:SS` string or epoch milliseconds.
pub fn parse_date(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .and_then(|ms| Utc.timestamp_millis_opt(ms).single()),
        Value::String(s) => {
            let s = s.trim();
            if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
                return Some(dt.with_timezone(&Utc));
            }
            if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
                return Some(Utc.from_utc_datetime(&naive));
            }
            if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
                return date.and_hms_opt(0, 0, 0).map(|n| Utc.from_utc_datetime(&n));
            }
            None
        }
        _ => None,
    }
}

/// Canonical wire form of a date: RFC 3339, UTC, millisecond precision.
pub fn format_date(date: &DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Millis, true)
}

//
// ──────────────────────────────────────────────────────────
// Strings
// ──────────────────────────────────────────────────────────
//

/// String of `min..=max` characters. With `trim`, surrounding whitespace is
/// removed first and an all-whitespace value is rejected.
pub fn text(
    value: &Value,
    path: &str,
    errors: &mut Vec<ValidationError>,
    min: usize,
    max: usize,
    trim: bool,
) -> Option<Value> {
    let Some(raw) = value.as_str() else {
        errors.push(invalid_type(path, "string", value));
        return None;
    };
    let s = if trim { raw.trim() } else { raw };

    if trim && min > 0 && s.is_empty() && !raw.is_empty() {
        errors.push(ValidationError::new(
            path,
            ErrorCode::InvalidString,
            "Must contain non-whitespace characters",
            Some(value),
        ));
        return None;
    }

    let len = s.chars().count();
    if len < min {
        errors.push(ValidationError::new(
            path,
            ErrorCode::TooSmall,
            format!("Must contain at least {} character(s)", min),
            Some(value),
        ));
        return None;
    }
    if len > max {
        errors.push(ValidationError::new(
            path,
            ErrorCode::TooBig,
            format!("Must contain at most {} character(s)", max),
            Some(value),
        ));
        return None;
    }
    Some(Value::String(s.to_string()))
}

/// Array of non-empty strings. `min_items` of 1 makes the list itself required
/// to be non-empty.
pub fn string_list(
    value: &Value,
    path: &str,
    errors: &mut Vec<ValidationError>,
    min_items: usize,
) -> Option<Value> {
    let Some(items) = value.as_array() else {
        errors.push(invalid_type(path, "array", value));
        return None;
    };
    if items.len() < min_items {
        errors.push(ValidationError::new(
            path,
            ErrorCode::TooSmall,
            format!("Must contain at least {} item(s)", min_items),
            Some(value),
        ));
        return None;
    }

    let before = errors.len();
    let mut out = Vec::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        let item_path = join_path(path, &i.to_string());
        if let Some(v) = text(item, &item_path, errors, 1, usize::MAX, true) {
            out.push(v);
        }
    }
    (errors.len() == before).then_some(Value::Array(out))
}

fn pattern(
    value: &Value,
    path: &str,
    errors: &mut Vec<ValidationError>,
    re: &Regex,
    message: &str,
) -> Option<Value> {
    let Some(s) = value.as_str() else {
        errors.push(invalid_type(path, "string", value));
        return None;
    };
    let s = s.trim();
    if re.is_match(s) {
        Some(Value::String(s.to_string()))
    } else {
        errors.push(ValidationError::new(
            path,
            ErrorCode::InvalidString,
            message,
            Some(value),
        ));
        None
    }
}

/// Absolute http(s) URL.
pub fn url(value: &Value, path: &str, errors: &mut Vec<ValidationError>) -> Option<Value> {
    let Some(s) = value.as_str() else {
        errors.push(invalid_type(path, "string", value));
        return None;
    };
    match url::Url::parse(s.trim()) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") && parsed.has_host() => {
            Some(Value::String(s.trim().to_string()))
        }
        _ => {
            errors.push(ValidationError::new(
                path,
                ErrorCode::InvalidString,
                "Invalid URL",
                Some(value),
            ));
            None
        }
    }
}

pub fn email(value: &Value, path: &str, errors: &mut Vec<ValidationError>) -> Option<Value> {
    let Some(s) = value.as_str() else {
        errors.push(invalid_type(path, "string", value));
        return None;
    };
    if EmailAddress::is_valid(s.trim()) {
        Some(Value::String(s.trim().to_string()))
    } else {
        errors.push(ValidationError::new(
            path,
            ErrorCode::InvalidString,
            "Invalid email address",
            Some(value),
        ));
        None
    }
}

pub fn phone(value: &Value, path: &str, errors: &mut Vec<ValidationError>) -> Option<Value> {
    pattern(value, path, errors, &PHONE_RE, "Invalid phone number")
}

pub fn hex_color(value: &Value, path: &str, errors: &mut Vec<ValidationError>) -> Option<Value> {
    pattern(
        value,
        path,
        errors,
        &HEX_COLOR_RE,
        "Must be a hex color (#RGB or #RRGGBB)",
    )
}

pub fn slug(value: &Value, path: &str, errors: &mut Vec<ValidationError>) -> Option<Value> {
    pattern(
        value,
        path,
        errors,
        &SLUG_RE,
        "Must be lowercase letters, digits and single hyphens",
    )
}

/// `99.9%`-shaped string.
pub fn percentage(value: &Value, path: &str, errors: &mut Vec<ValidationError>) -> Option<Value> {
    pattern(
        value,
        path,
        errors,
        &PERCENTAGE_RE,
        "Must be a percentage such as 99.9%",
    )
}

/// Number followed by `s` or `ms`.
pub fn load_time(value: &Value, path: &str, errors: &mut Vec<ValidationError>) -> Option<Value> {
    pattern(
        value,
        path,
        errors,
        &LOAD_TIME_RE,
        "Must be a duration such as 1.2s or 300ms",
    )
}

pub fn enum_value<E: ClosedEnum>(
    value: &Value,
    path: &str,
    errors: &mut Vec<ValidationError>,
) -> Option<Value> {
    let Some(s) = value.as_str() else {
        errors.push(invalid_type(path, "string", value));
        return None;
    };
    match E::parse(s) {
        Some(v) => Some(Value::String(v.as_str().to_string())),
        None => {
            errors.push(ValidationError::new(
                path,
                ErrorCode::InvalidEnumValue,
                format!("Invalid enum value. Expected one of: {}", E::allowed()),
                Some(value),
            ));
            None
        }
    }
}

//
// ──────────────────────────────────────────────────────────
// Numbers and flags
// ──────────────────────────────────────────────────────────
//

fn check_bounds(
    n: f64,
    value: &Value,
    path: &str,
    errors: &mut Vec<ValidationError>,
    min: f64,
    max: f64,
) -> bool {
    if n < min {
        errors.push(ValidationError::new(
            path,
            ErrorCode::TooSmall,
            format!("Must be at least {}", min),
            Some(value),
        ));
        return false;
    }
    if n > max {
        errors.push(ValidationError::new(
            path,
            ErrorCode::TooBig,
            format!("Must be at most {}", max),
            Some(value),
        ));
        return false;
    }
    true
}

pub fn int_range(
    value: &Value,
    path: &str,
    errors: &mut Vec<ValidationError>,
    min: i64,
    max: i64,
) -> Option<Value> {
    if coerce_number(value).is_none() {
        errors.push(invalid_type(path, "number", value));
        return None;
    }
    let Some(n) = coerce_integer(value) else {
        errors.push(invalid_type(path, "integer", value));
        return None;
    };
    check_bounds(n as f64, value, path, errors, min as f64, max as f64).then(|| Value::from(n))
}

pub fn number_range(
    value: &Value,
    path: &str,
    errors: &mut Vec<ValidationError>,
    min: f64,
    max: f64,
) -> Option<Value> {
    let Some(n) = coerce_number(value) else {
        errors.push(invalid_type(path, "number", value));
        return None;
    };
    check_bounds(n, value, path, errors, min, max).then(|| Value::from(n))
}

/// Counts stored as `u32` on the entities.
pub fn positive_u32(value: &Value, path: &str, errors: &mut Vec<ValidationError>) -> Option<Value> {
    int_range(value, path, errors, 1, i64::from(u32::MAX))
}

pub fn non_negative_u32(
    value: &Value,
    path: &str,
    errors: &mut Vec<ValidationError>,
) -> Option<Value> {
    int_range(value, path, errors, 0, i64::from(u32::MAX))
}

pub fn non_negative_int(
    value: &Value,
    path: &str,
    errors: &mut Vec<ValidationError>,
) -> Option<Value> {
    int_range(value, path, errors, 0, i64::MAX)
}

pub fn boolean(value: &Value, path: &str, errors: &mut Vec<ValidationError>) -> Option<Value> {
    match value {
        Value::Bool(b) => Some(Value::Bool(*b)),
        Value::String(s) if s.eq_ignore_ascii_case("true") => Some(Value::Bool(true)),
        Value::String(s) if s.eq_ignore_ascii_case("false") => Some(Value::Bool(false)),
        _ => {
            errors.push(invalid_type(path, "boolean", value));
            None
        }
    }
}

//
// ──────────────────────────────────────────────────────────
// Dates and timestamps
// ──────────────────────────────────────────────────────────
//

pub fn date(value: &Value, path: &str, errors: &mut Vec<ValidationError>) -> Option<Value> {
    match parse_date(value) {
        Some(d) => Some(Value::String(format_date(&d))),
        None => {
            errors.push(ValidationError::new(
                path,
                ErrorCode::InvalidDate,
                "Invalid date",
                Some(value),
            ));
            None
        }
    }
}

/// Date strictly after the current instant.
pub fn future_date(value: &Value, path: &str, errors: &mut Vec<ValidationError>) -> Option<Value> {
    let normalized = date(value, path, errors)?;
    match parse_date(&normalized) {
        Some(d) if d > Utc::now() => Some(normalized),
        _ => {
            errors.push(ValidationError::new(
                path,
                ErrorCode::Custom,
                "Date must be in the future",
                Some(value),
            ));
            None
        }
    }
}

/// Positive epoch-millisecond timestamp.
pub fn timestamp(value: &Value, path: &str, errors: &mut Vec<ValidationError>) -> Option<Value> {
    match coerce_integer(value) {
        Some(ms) if ms > 0 => Some(Value::from(ms)),
        Some(_) => {
            errors.push(ValidationError::new(
                path,
                ErrorCode::TooSmall,
                "Timestamp must be positive",
                Some(value),
            ));
            None
        }
        None => {
            errors.push(invalid_type(path, "integer", value));
            None
        }
    }
}

/// String keys mapped to strings or numbers.
pub fn scalar_map(value: &Value, path: &str, errors: &mut Vec<ValidationError>) -> Option<Value> {
    let Some(obj) = value.as_object() else {
        errors.push(invalid_type(path, "object", value));
        return None;
    };
    let before = errors.len();
    let mut out = Map::new();
    for (key, v) in obj {
        match v {
            Value::String(_) | Value::Number(_) => {
                out.insert(key.clone(), v.clone());
            }
            other => errors.push(invalid_type(&join_path(path, key), "string or number", other)),
        }
    }
    (errors.len() == before).then_some(Value::Object(out))
}
