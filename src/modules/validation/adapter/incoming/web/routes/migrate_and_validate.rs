use actix_web::{post, web, Responder};
use serde_json::Value;

use crate::modules::validation::application::ports::incoming::use_cases::{
    MigrateAndValidateCommand, MigrateAndValidateError,
};
use crate::shared::api::{entity_from_path, ApiResponse};
use crate::AppState;

#[post("/api/schema/{entity}/migrate-and-validate")]
pub async fn migrate_and_validate_handler(
    path: web::Path<String>,
    body: web::Json<Value>,
    data: web::Data<AppState>,
) -> impl Responder {
    let entity = match entity_from_path(&path) {
        Ok(entity) => entity,
        Err(resp) => return resp,
    };

    let command = MigrateAndValidateCommand {
        entity,
        document: body.into_inner(),
    };

    match data.validation.migrate_and_validate.execute(command).await {
        Ok(outcome) => ApiResponse::success(outcome),

        Err(MigrateAndValidateError::Failed(outcome)) => ApiResponse::unprocessable(
            outcome,
            "VALIDATION_FAILED",
            "Document is not valid after migration",
        ),
    }
}
