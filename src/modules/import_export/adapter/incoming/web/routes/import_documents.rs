use actix_web::{post, web, Responder};
use serde::Deserialize;

use crate::modules::import_export::application::domain::ImportFormat;
use crate::modules::import_export::application::ports::incoming::use_cases::{
    ImportDocumentsCommand, ImportDocumentsError,
};
use crate::shared::api::{entity_from_path, ApiResponse};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ImportQuery {
    #[serde(default)]
    pub format: ImportFormat,
}

/// Takes the raw JSON or CSV text as the request body.
#[post("/api/schema/{entity}/import")]
pub async fn import_documents_handler(
    path: web::Path<String>,
    query: web::Query<ImportQuery>,
    body: String,
    data: web::Data<AppState>,
) -> impl Responder {
    let entity = match entity_from_path(&path) {
        Ok(entity) => entity,
        Err(resp) => return resp,
    };

    let command = ImportDocumentsCommand {
        entity,
        format: query.format,
        text: body,
    };

    match data.transfer.import.execute(command).await {
        Ok(result) => ApiResponse::success(result),

        Err(e @ ImportDocumentsError::Malformed(_)) => {
            ApiResponse::bad_request("VALIDATION_ERROR", &e.to_string())
        }

        Err(ImportDocumentsError::TooManyItems { max, received }) => {
            ApiResponse::payload_too_large(max, received)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test, App};
    use serde_json::Value;

    use crate::tests::support::app_state_builder::TestAppStateBuilder;

    async fn post_import(uri: &str, payload: &'static str) -> (StatusCode, Value) {
        let app_state = TestAppStateBuilder::default().build();
        let app = test::init_service(
            App::new()
                .app_data(app_state)
                .service(import_documents_handler),
        )
        .await;

        let req = test::TestRequest::post()
            .uri(uri)
            .insert_header(("content-type", "text/plain"))
            .set_payload(payload)
            .to_request();
        let resp = test::call_service(&app, req).await;
        let status = resp.status();
        (status, test::read_body_json(resp).await)
    }

    #[actix_web::test]
    async fn test_import_csv_skills() {
        let (status, body) = post_import(
            "/api/schema/skills/import?format=csv",
            "name,category,level,yearsOfExperience\nDocker,devops,intermediate,1\n",
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["summary"]["validCount"], 1);
        assert_eq!(body["data"]["valid"][0]["category"], "DEVOPS");
        assert_eq!(body["data"]["valid"][0]["experience"]["years"], 1);
    }

    #[actix_web::test]
    async fn test_import_single_json_object() {
        let (status, body) = post_import(
            "/api/schema/projects/import",
            r#"{"name": "Blog", "description": "A statically generated blog", "role": "Author"}"#,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["summary"]["total"], 1);
        assert_eq!(body["data"]["valid"][0]["title"], "Blog");
    }

    #[actix_web::test]
    async fn test_import_malformed_json() {
        let (status, body) = post_import("/api/schema/projects/import?format=json", "[{").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }
}
