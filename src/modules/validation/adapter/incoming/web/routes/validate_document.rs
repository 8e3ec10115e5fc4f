use actix_web::{post, web, Responder};
use serde::Deserialize;
use serde_json::Value;

use crate::modules::schema::application::domain::SchemaMode;
use crate::modules::validation::application::ports::incoming::use_cases::{
    ValidateDocumentCommand, ValidateDocumentError,
};
use crate::shared::api::{entity_from_path, ApiResponse};
use crate::AppState;

//
// ──────────────────────────────────────────────────────────
// Query DTO
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Deserialize)]
pub struct ValidateDocumentQuery {
    #[serde(default)]
    pub mode: SchemaMode,
}

//
// ──────────────────────────────────────────────────────────
// Handler
// ──────────────────────────────────────────────────────────
//

#[post("/api/schema/{entity}/validate")]
pub async fn validate_document_handler(
    path: web::Path<String>,
    query: web::Query<ValidateDocumentQuery>,
    body: web::Json<Value>,
    data: web::Data<AppState>,
) -> impl Responder {
    let entity = match entity_from_path(&path) {
        Ok(entity) => entity,
        Err(resp) => return resp,
    };

    let command = ValidateDocumentCommand {
        entity,
        mode: query.mode,
        document: body.into_inner(),
    };

    match data.validation.document.execute(command).await {
        Ok(report) => ApiResponse::success(report),

        Err(ValidateDocumentError::Invalid(report)) => {
            ApiResponse::unprocessable(report, "VALIDATION_FAILED", "Document failed validation")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test, App};
    use serde_json::json;

    use crate::tests::support::app_state_builder::TestAppStateBuilder;
    use crate::tests::support::fixtures::{valid_project_json, valid_skill_json};

    /* --------------------------------------------------
     * Success Cases
     * -------------------------------------------------- */

    #[actix_web::test]
    async fn test_validate_project_full_mode() {
        let app_state = TestAppStateBuilder::default().build();
        let app = test::init_service(
            App::new()
                .app_data(app_state)
                .service(validate_document_handler),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/schema/projects/validate")
            .set_json(valid_project_json())
            .to_request();

        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["success"], true);
        assert_eq!(body["data"]["data"]["status"], "COMPLETED");
        assert!(body["data"]["metrics"]["durationMs"].is_number());
    }

    #[actix_web::test]
    async fn test_validate_skill_update_mode() {
        let app_state = TestAppStateBuilder::default().build();
        let app = test::init_service(
            App::new()
                .app_data(app_state)
                .service(validate_document_handler),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/schema/skills/validate?mode=update")
            .set_json(json!({"featured": true, "updatedAt": 1_700_000_000_000i64}))
            .to_request();

        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["data"]["data"]["featured"], true);
    }

    /* --------------------------------------------------
     * Error Cases
     * -------------------------------------------------- */

    #[actix_web::test]
    async fn test_validate_returns_report_on_failure() {
        let app_state = TestAppStateBuilder::default().build();
        let app = test::init_service(
            App::new()
                .app_data(app_state)
                .service(validate_document_handler),
        )
        .await;

        let mut skill = valid_skill_json();
        skill["featured"] = json!(true);
        skill["proficiency"] = json!(50);
        skill["level"] = json!("INTERMEDIATE");

        let req = test::TestRequest::post()
            .uri("/api/schema/skills/validate")
            .set_json(skill)
            .to_request();

        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["error"]["code"], "VALIDATION_FAILED");
        assert_eq!(body["data"]["errors"][0]["field"], "proficiency");
        assert!(body["data"].get("data").is_none());
    }

    #[actix_web::test]
    async fn test_validate_rejects_malformed_json() {
        let app_state = TestAppStateBuilder::default().build();
        let app = test::init_service(
            App::new()
                .app_data(app_state)
                .app_data(crate::shared::api::custom_json_config())
                .service(validate_document_handler),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/schema/projects/validate")
            .insert_header(("content-type", "application/json"))
            .set_payload("{not json")
            .to_request();

        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }
}
