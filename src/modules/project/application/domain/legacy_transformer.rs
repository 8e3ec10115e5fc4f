use serde_json::{json, Map, Value};

use crate::modules::project::application::domain::schema::parse_project;
use crate::modules::schema::application::domain::legacy::{
    self, fill_system_fields, int_in_range, lookup, text_field,
};
use crate::modules::schema::application::domain::version::CURRENT_SCHEMA_VERSION;

const CATEGORY_TABLE: &[(&[&str], &str)] = &[
    (
        &["webapplication", "web", "webapp", "website", "webdevelopment", "frontend"],
        "WEB_APPLICATION",
    ),
    (
        &["mobileapplication", "mobile", "mobileapp", "ios", "android"],
        "MOBILE_APPLICATION",
    ),
    (
        &["desktopapplication", "desktop", "desktopapp"],
        "DESKTOP_APPLICATION",
    ),
    (&["apibackend", "api", "backend", "server", "rest"], "API_BACKEND"),
    (&["datascience", "data", "analytics"], "DATA_SCIENCE"),
    (&["machinelearning", "ml", "ai"], "MACHINE_LEARNING"),
    (&["devops", "infrastructure", "cicd"], "DEVOPS"),
    (&["opensource", "oss"], "OPEN_SOURCE"),
    (&["ecommerce", "shop", "store"], "E_COMMERCE"),
    (&["gamedevelopment", "game", "gamedev", "games"], "GAME_DEVELOPMENT"),
    (&["blockchain", "web3", "crypto"], "BLOCKCHAIN"),
    (&["other", "misc"], "OTHER"),
];

const STATUS_TABLE: &[(&[&str], &str)] = &[
    (&["planning", "planned", "idea"], "PLANNING"),
    (
        &["inprogress", "active", "ongoing", "wip", "indevelopment", "development"],
        "IN_PROGRESS",
    ),
    (
        &["completed", "complete", "done", "finished", "launched", "live"],
        "COMPLETED",
    ),
    (&["maintenance", "maintained"], "MAINTENANCE"),
    (&["onhold", "paused", "hold"], "ON_HOLD"),
    (&["archived", "deprecated", "inactive"], "ARCHIVED"),
];

const PRIORITY_TABLE: &[(&[&str], &str)] = &[
    (&["low"], "LOW"),
    (&["medium", "normal"], "MEDIUM"),
    (&["high"], "HIGH"),
    (&["critical", "urgent"], "CRITICAL"),
];

const PRIORITY_BY_RANK: [&str; 4] = ["LOW", "MEDIUM", "HIGH", "CRITICAL"];

/// `(legacy key, link type, label)`, in the order links are emitted.
const LEGACY_LINKS: &[(&str, &str, &str)] = &[
    ("liveUrl", "live", "Live Site"),
    ("githubUrl", "github", "Source Code"),
    ("demoUrl", "demo", "Demo"),
    ("caseStudyUrl", "case-study", "Case Study"),
];

const LEGACY_KEYS: &[&str] = &[
    "image",
    "logo",
    "liveUrl",
    "githubUrl",
    "demoUrl",
    "caseStudyUrl",
    "client",
    "clientName",
    "usersReached",
    "techStack",
    "tech",
];

fn map_category(raw: Option<&Value>) -> &'static str {
    raw.and_then(Value::as_str)
        .and_then(|s| lookup(CATEGORY_TABLE, s))
        .unwrap_or("OTHER")
}

fn map_status(raw: Option<&Value>) -> &'static str {
    raw.and_then(Value::as_str)
        .and_then(|s| lookup(STATUS_TABLE, s))
        .unwrap_or("COMPLETED")
}

/// Numbers 1–4 rank LOW..CRITICAL; names go through the lookup table.
fn map_priority(raw: Option<&Value>) -> &'static str {
    if let Some(rank) = int_in_range(raw, 1, 4) {
        return PRIORITY_BY_RANK[(rank - 1) as usize];
    }
    raw.and_then(Value::as_str)
        .and_then(|s| lookup(PRIORITY_TABLE, s))
        .unwrap_or("MEDIUM")
}

fn legacy_images(obj: &Map<String, Value>, title: &str) -> Vec<Value> {
    ["image", "logo"]
        .iter()
        .filter_map(|key| text_field(obj, key).map(|url| (*key, url)))
        .enumerate()
        .map(|(i, (key, url))| {
            let alt = if key == "logo" {
                format!("{} logo", title)
            } else {
                title.to_string()
            };
            json!({"url": url, "alt": alt, "isPrimary": i == 0})
        })
        .collect()
}

fn legacy_links(obj: &Map<String, Value>) -> Vec<Value> {
    let found: Vec<(&str, &str, String)> = LEGACY_LINKS
        .iter()
        .filter_map(|(key, link_type, label)| {
            text_field(obj, key).map(|url| (*link_type, *label, url))
        })
        .collect();
    let primary = found
        .iter()
        .position(|(link_type, _, _)| *link_type == "live")
        .unwrap_or(0);

    found
        .into_iter()
        .enumerate()
        .map(|(i, (link_type, label, url))| {
            json!({"type": link_type, "url": url, "label": label, "isPrimary": i == primary})
        })
        .collect()
}

fn client_info(obj: &Map<String, Value>) -> Option<Value> {
    if let Some(existing) = obj.get("clientInfo").filter(|v| v.is_object()) {
        return Some(existing.clone());
    }
    match obj.get("client") {
        Some(Value::Object(client)) => return Some(Value::Object(client.clone())),
        Some(Value::String(name)) if !name.trim().is_empty() => {
            return Some(json!({"name": name.trim()}))
        }
        _ => {}
    }
    text_field(obj, "clientName").map(|name| json!({"name": name}))
}

fn metrics(obj: &Map<String, Value>) -> Option<Value> {
    let mut metrics = obj
        .get("metrics")
        .and_then(Value::as_object)
        .cloned()
        .unwrap_or_default();

    let users = metrics
        .get("usersReached")
        .or_else(|| obj.get("usersReached"))
        .cloned();
    match int_in_range(users.as_ref(), 0, i64::MAX) {
        Some(n) => {
            metrics.insert("usersReached".into(), Value::from(n));
        }
        None => {
            metrics.remove("usersReached");
        }
    }

    (!metrics.is_empty()).then_some(Value::Object(metrics))
}

fn technologies(obj: &Map<String, Value>) -> Value {
    let list = legacy::string_list(obj.get("technologies"))
        .or_else(|| legacy::string_list(obj.get("techStack")))
        .or_else(|| legacy::string_list(obj.get("tech")))
        .unwrap_or_else(|| vec!["Unspecified".to_string()]);
    json!(list)
}

/// Reshapes a project document of any earlier shape into current-schema
/// input. Never fails; values that cannot be read fall back to defaults.
pub fn transform(raw: &Value) -> Value {
    let empty = Map::new();
    let obj = raw.as_object().unwrap_or(&empty);
    let mut out = obj.clone();
    for key in LEGACY_KEYS {
        out.remove(*key);
    }

    let title = text_field(obj, "title").or_else(|| text_field(obj, "name"));
    if let Some(title) = &title {
        out.insert("title".into(), Value::String(title.clone()));
    }
    out.remove("name");

    out.insert("category".into(), json!(map_category(obj.get("category"))));
    out.insert("status".into(), json!(map_status(obj.get("status"))));
    out.insert("priority".into(), json!(map_priority(obj.get("priority"))));
    out.insert(
        "featured".into(),
        json!(legacy::boolean(obj.get("featured")).unwrap_or(false)),
    );
    out.insert(
        "teamSize".into(),
        json!(int_in_range(obj.get("teamSize"), 1, 100).unwrap_or(1)),
    );
    out.insert("technologies".into(), technologies(obj));

    if !obj.get("images").is_some_and(Value::is_array) {
        let alt = title.as_deref().unwrap_or("Project image");
        out.insert("images".into(), Value::Array(legacy_images(obj, alt)));
    }
    if !obj.get("links").is_some_and(Value::is_array) {
        out.insert("links".into(), Value::Array(legacy_links(obj)));
    }

    match client_info(obj) {
        Some(info) => out.insert("clientInfo".into(), info),
        None => out.remove("clientInfo"),
    };
    match metrics(obj) {
        Some(m) => out.insert("metrics".into(), m),
        None => out.remove("metrics"),
    };

    fill_system_fields(&mut out);
    out.insert("schemaVersion".into(), json!(CURRENT_SCHEMA_VERSION));
    Value::Object(out)
}

/// Transforms then validates against the full project schema.
pub fn is_valid(raw: &Value) -> bool {
    parse_project(&transform(raw)).is_ok()
}
