use actix_web::HttpResponse;

use crate::modules::schema::application::domain::EntityType;
use crate::shared::api::ApiResponse;

/// Reads the `{entity}` path segment (`projects`, `skills` or the singular).
pub fn entity_from_path(raw: &str) -> Result<EntityType, HttpResponse> {
    raw.parse::<EntityType>()
        .map_err(|e| ApiResponse::not_found("UNKNOWN_ENTITY", &e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;

    #[test]
    fn accepts_plural_segments() {
        assert_eq!(entity_from_path("projects").ok(), Some(EntityType::Project));
        assert_eq!(entity_from_path("skill").ok(), Some(EntityType::Skill));
    }

    #[test]
    fn unknown_entity_is_not_found() {
        let resp = entity_from_path("posts").unwrap_err();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
