use actix_web::{post, web, Responder};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::modules::migration::application::ports::incoming::use_cases::{
    MigrateDocumentCommand, MigrateDocumentError,
};
use crate::shared::api::{entity_from_path, ApiResponse};
use crate::AppState;

//
// ──────────────────────────────────────────────────────────
// Request DTO
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MigrateDocumentRequest {
    pub document: Value,
    #[serde(default)]
    pub target_version: Option<String>,
}

//
// ──────────────────────────────────────────────────────────
// Handler
// ──────────────────────────────────────────────────────────
//

#[post("/api/schema/{entity}/migrate")]
pub async fn migrate_document_handler(
    path: web::Path<String>,
    req: web::Json<MigrateDocumentRequest>,
    data: web::Data<AppState>,
) -> impl Responder {
    let entity = match entity_from_path(&path) {
        Ok(entity) => entity,
        Err(resp) => return resp,
    };
    let req = req.into_inner();

    let command = MigrateDocumentCommand {
        entity,
        document: req.document,
        target_version: req.target_version,
    };

    match data.migration.migrate.execute(command).await {
        Ok(result) => ApiResponse::success(result),

        Err(MigrateDocumentError::Failed(result)) => {
            warn!(%entity, errors = ?result.errors, "Migration failed");
            ApiResponse::unprocessable(result, "MIGRATION_FAILED", "Migration did not complete")
        }
    }
}
