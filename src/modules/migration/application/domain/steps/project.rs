use serde_json::{json, Map, Value};

use crate::modules::migration::application::domain::step::{
    object, DocumentMigration, MigrationStepError,
};
use crate::modules::project::application::domain::legacy_transformer;
use crate::modules::schema::application::domain::legacy::text_field;

/// `(legacy key, link type, label)`.
const LINK_KEYS: &[(&str, &str, &str)] = &[
    ("liveUrl", "live", "Live Site"),
    ("githubUrl", "github", "Source Code"),
    ("demoUrl", "demo", "Demo"),
    ("caseStudyUrl", "case-study", "Case Study"),
];

fn title_of(obj: &Map<String, Value>) -> String {
    text_field(obj, "title")
        .or_else(|| text_field(obj, "name"))
        .unwrap_or_else(|| "Project image".to_string())
}

//
// ──────────────────────────────────────────────────────────
// 0.2.0 business context
// ──────────────────────────────────────────────────────────
//

pub struct BusinessContext;

impl DocumentMigration for BusinessContext {
    fn version(&self) -> &'static str {
        "0.2.0"
    }

    fn description(&self) -> &'static str {
        "Group client fields into clientInfo and usage figures into metrics"
    }

    fn up(&self, data: &Value) -> Result<Value, MigrationStepError> {
        let mut obj = object(data, self.version())?;

        let client = obj.remove("client");
        let client_name = obj.remove("clientName");
        if !obj.contains_key("clientInfo") {
            let info = match (client, client_name) {
                (Some(Value::Object(client)), _) => Some(Value::Object(client)),
                (Some(Value::String(name)), _) | (_, Some(Value::String(name))) => {
                    Some(json!({ "name": name }))
                }
                _ => None,
            };
            if let Some(info) = info {
                obj.insert("clientInfo".into(), info);
            }
        }

        if let Some(users) = obj.remove("usersReached") {
            let metrics = obj
                .entry("metrics")
                .or_insert_with(|| Value::Object(Map::new()));
            if let Some(metrics) = metrics.as_object_mut() {
                metrics.entry("usersReached").or_insert(users);
            }
        }

        Ok(Value::Object(obj))
    }

    fn down(&self, data: &Value) -> Option<Result<Value, MigrationStepError>> {
        Some(object(data, self.version()).map(|mut obj| {
            if let Some(Value::Object(info)) = obj.remove("clientInfo") {
                if let Some(name) = info.get("name").cloned() {
                    obj.insert("clientName".into(), name);
                }
            }
            if let Some(Value::Object(mut metrics)) = obj.remove("metrics") {
                if let Some(users) = metrics.remove("usersReached") {
                    obj.insert("usersReached".into(), users);
                }
                if !metrics.is_empty() {
                    obj.insert("metrics".into(), Value::Object(metrics));
                }
            }
            Value::Object(obj)
        }))
    }
}

//
// ──────────────────────────────────────────────────────────
// 0.3.0 image gallery
// ──────────────────────────────────────────────────────────
//

pub struct ImageGallery;

impl DocumentMigration for ImageGallery {
    fn version(&self) -> &'static str {
        "0.3.0"
    }

    fn description(&self) -> &'static str {
        "Replace image and logo with an images list"
    }

    fn up(&self, data: &Value) -> Result<Value, MigrationStepError> {
        let mut obj = object(data, self.version())?;
        let title = title_of(&obj);

        let mut images = Vec::new();
        for key in ["image", "logo"] {
            if let Some(url) = text_field(&obj, key) {
                let alt = if key == "logo" {
                    format!("{} logo", title)
                } else {
                    title.clone()
                };
                images.push(json!({"url": url, "alt": alt, "isPrimary": images.is_empty()}));
            }
            obj.remove(key);
        }
        if !obj.get("images").is_some_and(Value::is_array) {
            obj.insert("images".into(), Value::Array(images));
        }

        Ok(Value::Object(obj))
    }

    fn down(&self, data: &Value) -> Option<Result<Value, MigrationStepError>> {
        Some(object(data, self.version()).map(|mut obj| {
            if let Some(Value::Array(images)) = obj.remove("images") {
                let primary = images
                    .iter()
                    .find(|img| img.get("isPrimary") == Some(&Value::Bool(true)))
                    .or_else(|| images.first());
                if let Some(url) = primary.and_then(|img| img.get("url")).cloned() {
                    obj.insert("image".into(), url);
                }
            }
            Value::Object(obj)
        }))
    }
}

//
// ──────────────────────────────────────────────────────────
// 0.4.0 structured links
// ──────────────────────────────────────────────────────────
//

pub struct StructuredLinks;

impl DocumentMigration for StructuredLinks {
    fn version(&self) -> &'static str {
        "0.4.0"
    }

    fn description(&self) -> &'static str {
        "Replace the *Url fields with a links list"
    }

    fn up(&self, data: &Value) -> Result<Value, MigrationStepError> {
        let mut obj = object(data, self.version())?;

        let found: Vec<(&str, &str, String)> = LINK_KEYS
            .iter()
            .filter_map(|(key, link_type, label)| {
                text_field(&obj, key).map(|url| (*link_type, *label, url))
            })
            .collect();
        for (key, _, _) in LINK_KEYS {
            obj.remove(*key);
        }

        if !obj.get("links").is_some_and(Value::is_array) {
            let primary = found
                .iter()
                .position(|(link_type, _, _)| *link_type == "live")
                .unwrap_or(0);
            let links = found
                .into_iter()
                .enumerate()
                .map(|(i, (link_type, label, url))| {
                    json!({"type": link_type, "url": url, "label": label, "isPrimary": i == primary})
                })
                .collect();
            obj.insert("links".into(), Value::Array(links));
        }

        Ok(Value::Object(obj))
    }

    fn down(&self, data: &Value) -> Option<Result<Value, MigrationStepError>> {
        Some(object(data, self.version()).map(|mut obj| {
            if let Some(Value::Array(links)) = obj.remove("links") {
                for link in &links {
                    let link_type = link.get("type").and_then(Value::as_str);
                    let key = LINK_KEYS
                        .iter()
                        .find(|(_, t, _)| Some(*t) == link_type)
                        .map(|(key, _, _)| *key);
                    if let (Some(key), Some(url)) = (key, link.get("url")) {
                        obj.entry(key).or_insert_with(|| url.clone());
                    }
                }
            }
            Value::Object(obj)
        }))
    }
}

//
// ──────────────────────────────────────────────────────────
// 1.0.0 current schema
// ──────────────────────────────────────────────────────────
//

pub struct CurrentProjectSchema;

impl DocumentMigration for CurrentProjectSchema {
    fn version(&self) -> &'static str {
        "1.0.0"
    }

    fn description(&self) -> &'static str {
        "Normalize to the current project schema"
    }

    fn up(&self, data: &Value) -> Result<Value, MigrationStepError> {
        object(data, self.version())?;
        Ok(legacy_transformer::transform(data))
    }

    fn validate(&self, data: &Value) -> bool {
        data.get("title").is_some_and(Value::is_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn business_context_round_trip() {
        let v1 = json!({"title": "Shop", "clientName": "ACME", "usersReached": 1200});

        let v2 = BusinessContext.up(&v1).unwrap();
        assert_eq!(v2["clientInfo"], json!({"name": "ACME"}));
        assert_eq!(v2["metrics"]["usersReached"], 1200);
        assert!(v2.get("clientName").is_none());

        let back = BusinessContext.down(&v2).unwrap().unwrap();
        assert_eq!(back, v1);
    }

    #[test]
    fn image_gallery_marks_first_image_primary() {
        let v2 = json!({"title": "Shop", "image": "https://x.io/a.png", "logo": "https://x.io/l.png"});

        let v3 = ImageGallery.up(&v2).unwrap();
        let images = v3["images"].as_array().unwrap();
        assert_eq!(images.len(), 2);
        assert_eq!(images[0]["isPrimary"], true);
        assert_eq!(images[1]["alt"], "Shop logo");
        assert_eq!(images[1]["isPrimary"], false);

        let back = ImageGallery.down(&v3).unwrap().unwrap();
        assert_eq!(back["image"], "https://x.io/a.png");
        assert!(back.get("images").is_none());
    }

    #[test]
    fn image_gallery_always_leaves_a_list() {
        let v3 = ImageGallery.up(&json!({"title": "Shop"})).unwrap();
        assert_eq!(v3["images"], json!([]));
    }

    #[test]
    fn structured_links_prefer_live_as_primary() {
        let v3 = json!({
            "title": "Shop",
            "githubUrl": "https://github.com/x/shop",
            "liveUrl": "https://shop.io"
        });

        let v4 = StructuredLinks.up(&v3).unwrap();
        let links = v4["links"].as_array().unwrap();
        let primary: Vec<_> = links.iter().filter(|l| l["isPrimary"] == true).collect();
        assert_eq!(primary.len(), 1);
        assert_eq!(primary[0]["type"], "live");

        let back = StructuredLinks.down(&v4).unwrap().unwrap();
        assert_eq!(back, v3);
    }

    #[test]
    fn current_schema_requires_a_title() {
        assert!(!CurrentProjectSchema.validate(&json!({"name": "Shop"})));
        assert!(CurrentProjectSchema.validate(&json!({"title": "Shop"})));
        assert!(CurrentProjectSchema.down(&json!({})).is_none());
    }

    #[test]
    fn steps_reject_non_objects() {
        assert_eq!(
            ImageGallery.up(&json!([1, 2])),
            Err(MigrationStepError::NotAnObject { version: "0.3.0" })
        );
    }
}
