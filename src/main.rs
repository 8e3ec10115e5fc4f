use actix_web::{web, App, HttpServer};
use std::env;
use std::sync::Arc;

use anyhow::Context;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use portfolio_schema::modules::migration::application::domain::MigrationRegistry;
use portfolio_schema::modules::schema::application::domain::policies::SchemaPolicy;
use portfolio_schema::modules::schema::application::domain::version::VersionOrdering;
use portfolio_schema::shared::api::custom_json_config;
use portfolio_schema::{build_app_state, init_routes};

#[actix_web::main]
#[cfg(not(tarpaulin_include))]
async fn start() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,actix_web=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting application...");

    // Environtment variable loading
    let rust_env = env::var("RUST_ENV").unwrap_or_else(|_| "development".to_string());

    // Try .env.{environment} first, then fall back to .env
    let env_file = format!(".env.{}", rust_env);
    if dotenvy::from_filename(&env_file).is_err() {
        dotenvy::dotenv().ok();
    }

    let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port = env::var("PORT").unwrap_or_else(|_| "8080".to_string());
    let server_url = format!("{host}:{port}");

    let policy = SchemaPolicy::from_env().context("invalid schema configuration")?;
    if policy.version_ordering == VersionOrdering::Lexicographic {
        warn!("SCHEMA_VERSION_ORDERING=lexicographic: versions past x.9.x will sort incorrectly");
    }
    info!(
        target_version = %policy.target_version,
        max_bulk_items = policy.max_bulk_items,
        "Schema policy loaded"
    );

    let registry = Arc::new(MigrationRegistry::with_defaults(policy.version_ordering));
    let state = build_app_state(Arc::clone(&registry), &policy);

    info!("Server run on: {}", server_url);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .app_data(web::Data::new(Arc::clone(&registry)))
            .app_data(custom_json_config())
            .configure(init_routes)
    })
    .bind(&server_url)
    .with_context(|| format!("failed to bind {server_url}"))?
    .run()
    .await?;

    Ok(())
}

#[cfg(not(tarpaulin_include))]
fn main() {
    if let Err(e) = start() {
        eprintln!("Error starting app: {e:#}");
    }
}
