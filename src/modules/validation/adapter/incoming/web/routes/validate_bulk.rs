use actix_web::{post, web, Responder};
use serde_json::Value;

use crate::modules::validation::application::ports::incoming::use_cases::{
    ValidateBulkCommand, ValidateBulkError,
};
use crate::shared::api::{entity_from_path, ApiResponse};
use crate::AppState;

#[post("/api/schema/{entity}/validate/bulk")]
pub async fn validate_bulk_handler(
    path: web::Path<String>,
    body: web::Json<Vec<Value>>,
    data: web::Data<AppState>,
) -> impl Responder {
    let entity = match entity_from_path(&path) {
        Ok(entity) => entity,
        Err(resp) => return resp,
    };

    let command = ValidateBulkCommand {
        entity,
        documents: body.into_inner(),
    };

    match data.validation.bulk.execute(command).await {
        Ok(result) => ApiResponse::success(result),

        Err(ValidateBulkError::TooManyItems { max, received }) => {
            ApiResponse::payload_too_large(max, received)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test, App};
    use serde_json::json;

    use crate::tests::support::app_state_builder::TestAppStateBuilder;
    use crate::tests::support::fixtures::valid_project_json;

    #[actix_web::test]
    async fn test_bulk_validation_partitions_items() {
        let app_state = TestAppStateBuilder::default().build();
        let app = test::init_service(
            App::new()
                .app_data(app_state)
                .service(validate_bulk_handler),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/schema/projects/validate/bulk")
            .set_json(json!([valid_project_json(), {"title": "Broken"}, valid_project_json()]))
            .to_request();

        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["data"]["summary"]["total"], 3);
        assert_eq!(body["data"]["summary"]["validCount"], 2);
        assert_eq!(body["data"]["summary"]["invalidCount"], 1);
        assert_eq!(body["data"]["invalid"][0]["index"], 1);
        assert!(body["data"]["valid"][0].get("index").is_none());
    }

    #[actix_web::test]
    async fn test_bulk_validation_needs_an_array() {
        let app_state = TestAppStateBuilder::default().build();
        let app = test::init_service(
            App::new()
                .app_data(app_state)
                .app_data(crate::shared::api::custom_json_config())
                .service(validate_bulk_handler),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/schema/skills/validate/bulk")
            .set_json(json!({"name": "Go"}))
            .to_request();

        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}
