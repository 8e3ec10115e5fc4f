use serde_json::{json, Value};

pub fn valid_project_json() -> Value {
    json!({
        "title": "Portfolio CMS",
        "description": "A content management backend for a personal portfolio site.",
        "category": "WEB_APPLICATION",
        "technologies": ["Rust", "actix-web"],
        "role": "Lead Developer",
        "images": [
            {"url": "https://cdn.example.com/cms.png", "alt": "Dashboard", "isPrimary": true}
        ],
        "links": [
            {"type": "github", "url": "https://github.com/example/cms", "label": "Source", "isPrimary": true}
        ],
        "createdAt": 1_700_000_000_000i64,
        "updatedAt": 1_700_000_500_000i64
    })
}

pub fn valid_skill_json() -> Value {
    json!({
        "name": "Rust",
        "category": "LANGUAGES",
        "level": "ADVANCED",
        "proficiency": 75,
        "createdAt": 1_700_000_000_000i64,
        "updatedAt": 1_700_000_500_000i64
    })
}

/// Pre-versioning project with flat image and URL fields.
pub fn legacy_project_json() -> Value {
    json!({
        "title": "E-Commerce Platform",
        "description": "Full-stack shop with payments and inventory",
        "category": "Web Application",
        "technologies": "React, Node.js, MongoDB",
        "role": "Full Stack Developer",
        "image": "https://example.com/shop.png",
        "liveUrl": "https://shop.example.com",
        "githubUrl": "https://github.com/me/shop",
        "clientName": "ACME"
    })
}
