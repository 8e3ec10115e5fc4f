use actix_web::{post, web, Responder};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::modules::migration::application::ports::incoming::use_cases::{
    BatchMigrateCommand, BatchMigrateError,
};
use crate::shared::api::{entity_from_path, ApiResponse};
use crate::AppState;

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchMigrateRequest {
    pub documents: Vec<Value>,
    #[serde(default)]
    pub target_version: Option<String>,
}

#[post("/api/schema/{entity}/batch-migrate")]
pub async fn batch_migrate_handler(
    path: web::Path<String>,
    req: web::Json<BatchMigrateRequest>,
    data: web::Data<AppState>,
) -> impl Responder {
    let entity = match entity_from_path(&path) {
        Ok(entity) => entity,
        Err(resp) => return resp,
    };
    let req = req.into_inner();

    let command = BatchMigrateCommand {
        entity,
        documents: req.documents,
        target_version: req.target_version,
    };

    match data.migration.batch.execute(command).await {
        Ok(result) => ApiResponse::success(result),

        Err(BatchMigrateError::TooManyItems { max, received }) => {
            ApiResponse::payload_too_large(max, received)
        }
    }
}
