use actix_web::{post, web, HttpResponse, Responder};
use serde::Deserialize;
use serde_json::Value;
use tracing::error;

use crate::modules::import_export::application::domain::ExportFormat;
use crate::modules::import_export::application::ports::incoming::use_cases::{
    ExportDocumentsCommand, ExportDocumentsError,
};
use crate::shared::api::{entity_from_path, ApiResponse};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ExportQuery {
    #[serde(default)]
    pub format: ExportFormat,
}

#[post("/api/schema/{entity}/export")]
pub async fn export_documents_handler(
    path: web::Path<String>,
    query: web::Query<ExportQuery>,
    body: web::Json<Vec<Value>>,
    data: web::Data<AppState>,
) -> impl Responder {
    let entity = match entity_from_path(&path) {
        Ok(entity) => entity,
        Err(resp) => return resp,
    };

    let command = ExportDocumentsCommand {
        entity,
        format: query.format,
        documents: body.into_inner(),
    };

    match data.transfer.export.execute(command).await {
        Ok(exported) => HttpResponse::Ok()
            .content_type(exported.content_type)
            .body(exported.body),

        Err(ExportDocumentsError::TooManyItems { max, received }) => {
            ApiResponse::payload_too_large(max, received)
        }

        Err(ExportDocumentsError::Invalid(result)) => ApiResponse::unprocessable(
            result,
            "VALIDATION_FAILED",
            "Every document must be valid to export",
        ),

        Err(ExportDocumentsError::RenderFailed(msg)) => {
            error!("Failed to render export: {}", msg);
            ApiResponse::internal_error()
        }
    }
}
