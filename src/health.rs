use actix_web::{get, web, HttpResponse, Responder};
use serde::Serialize;
use std::sync::Arc;

use crate::modules::migration::application::domain::MigrationRegistry;
use crate::modules::schema::application::domain::enums::EntityType;
use crate::modules::schema::application::domain::version::CURRENT_SCHEMA_VERSION;

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ReadinessResponse {
    status: &'static str,
    schema_version: &'static str,
    project_migrations: &'static str,
    skill_migrations: &'static str,
}

/// LIVENESS PROBE
/// - No I/O
#[get("/health")]
pub async fn health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse { status: "ok" })
}

/// READINESS PROBE
/// - Every entity's migration chain must reach the current schema version
#[get("/ready")]
pub async fn readiness(registry: web::Data<Arc<MigrationRegistry>>) -> impl Responder {
    let project = registry.latest_version(EntityType::Project);
    let skill = registry.latest_version(EntityType::Skill);

    let ready = project == CURRENT_SCHEMA_VERSION && skill == CURRENT_SCHEMA_VERSION;
    let body = ReadinessResponse {
        status: if ready { "ok" } else { "unhealthy" },
        schema_version: CURRENT_SCHEMA_VERSION,
        project_migrations: project,
        skill_migrations: skill,
    };

    if ready {
        HttpResponse::Ok().json(body)
    } else {
        HttpResponse::ServiceUnavailable().json(body)
    }
}
