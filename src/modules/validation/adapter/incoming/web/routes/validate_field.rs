use actix_web::{post, web, Responder};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::modules::validation::application::ports::incoming::use_cases::{
    ValidateFieldCommand, ValidateFieldError,
};
use crate::shared::api::{entity_from_path, ApiResponse};
use crate::AppState;

#[derive(Debug, Deserialize, Serialize)]
pub struct ValidateFieldRequest {
    pub path: String,
    #[serde(default)]
    pub value: Value,
}

#[post("/api/schema/{entity}/validate-field")]
pub async fn validate_field_handler(
    path: web::Path<String>,
    req: web::Json<ValidateFieldRequest>,
    data: web::Data<AppState>,
) -> impl Responder {
    let entity = match entity_from_path(&path) {
        Ok(entity) => entity,
        Err(resp) => return resp,
    };
    let req = req.into_inner();

    let command = ValidateFieldCommand {
        entity,
        path: req.path,
        value: req.value,
    };

    match data.validation.field.execute(command).await {
        Ok(report) => ApiResponse::success(report),

        Err(e @ ValidateFieldError::UnknownPath(_)) => {
            ApiResponse::bad_request("UNKNOWN_FIELD_PATH", &e.to_string())
        }

        Err(ValidateFieldError::Invalid(report)) => {
            ApiResponse::unprocessable(report, "VALIDATION_FAILED", "Field failed validation")
        }
    }
}
