use actix_web::{post, web, Responder};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::modules::migration::application::ports::incoming::use_cases::{
    RollbackDocumentCommand, RollbackDocumentError,
};
use crate::shared::api::{entity_from_path, ApiResponse};
use crate::AppState;

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RollbackDocumentRequest {
    pub document: Value,
    pub from_version: String,
    pub to_version: String,
}

#[post("/api/schema/{entity}/rollback")]
pub async fn rollback_document_handler(
    path: web::Path<String>,
    req: web::Json<RollbackDocumentRequest>,
    data: web::Data<AppState>,
) -> impl Responder {
    let entity = match entity_from_path(&path) {
        Ok(entity) => entity,
        Err(resp) => return resp,
    };
    let req = req.into_inner();

    let command = RollbackDocumentCommand {
        entity,
        document: req.document,
        from_version: req.from_version,
        to_version: req.to_version,
    };

    match data.migration.rollback.execute(command).await {
        Ok(result) => ApiResponse::success(result),

        Err(e @ RollbackDocumentError::InvalidRange { .. }) => {
            ApiResponse::bad_request("INVALID_VERSION_RANGE", &e.to_string())
        }

        Err(RollbackDocumentError::Failed(result)) => {
            warn!(%entity, errors = ?result.errors, "Rollback failed");
            ApiResponse::unprocessable(result, "ROLLBACK_FAILED", "Rollback did not complete")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test, App};
    use serde_json::json;

    use crate::tests::support::app_state_builder::TestAppStateBuilder;

    #[actix_web::test]
    async fn test_rollback_skill_certifications() {
        let app_state = TestAppStateBuilder::default().build();
        let app = test::init_service(
            App::new()
                .app_data(app_state)
                .service(rollback_document_handler),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/schema/skills/rollback")
            .set_json(json!({
                "document": {
                    "name": "AWS",
                    "certifications": [{"name": "SAA", "issuer": "Unknown", "verified": false}]
                },
                "fromVersion": "0.3.0",
                "toVersion": "0.2.0"
            }))
            .to_request();

        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["data"]["data"]["certifications"], json!(["SAA"]));
        assert_eq!(body["data"]["appliedMigrations"], json!(["0.3.0"]));
    }

    #[actix_web::test]
    async fn test_rollback_rejects_upward_range() {
        let app_state = TestAppStateBuilder::default().build();
        let app = test::init_service(
            App::new()
                .app_data(app_state)
                .service(rollback_document_handler),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/schema/projects/rollback")
            .set_json(json!({"document": {}, "fromVersion": "0.2.0", "toVersion": "1.0.0"}))
            .to_request();

        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["code"], "INVALID_VERSION_RANGE");
    }

    #[actix_web::test]
    async fn test_rollback_missing_versions_is_bad_request() {
        let app_state = TestAppStateBuilder::default().build();
        let app = test::init_service(
            App::new()
                .app_data(app_state)
                .app_data(crate::shared::api::custom_json_config())
                .service(rollback_document_handler),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/schema/projects/rollback")
            .set_json(json!({"document": {}}))
            .to_request();

        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }
}
