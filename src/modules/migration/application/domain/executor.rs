use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, warn};

use crate::modules::migration::application::domain::registry::MigrationRegistry;
use crate::modules::schema::application::domain::enums::EntityType;

/// Outcome of one migrate or rollback run.
///
/// `data` is the document after the last step that ran, which on failure is a
/// partially migrated document.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MigrationResult {
    pub success: bool,
    pub data: Value,
    pub from_version: String,
    pub to_version: String,
    pub applied_migrations: Vec<String>,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub duration_ms: f64,
}

impl MigrationResult {
    /// Nothing to do: `data` is already at `version`.
    pub fn unchanged(data: Value, version: &str) -> Self {
        Self {
            success: true,
            data,
            from_version: version.to_string(),
            to_version: version.to_string(),
            applied_migrations: Vec::new(),
            errors: Vec::new(),
            warnings: Vec::new(),
            duration_ms: 0.0,
        }
    }
}

struct Run {
    started: Instant,
    current: Value,
    from: String,
    to: String,
    applied: Vec<String>,
    errors: Vec<String>,
    warnings: Vec<String>,
}

impl Run {
    fn start(data: &Value, from: &str, to: &str) -> Self {
        Self {
            started: Instant::now(),
            current: data.clone(),
            from: from.to_string(),
            to: to.to_string(),
            applied: Vec::new(),
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    fn finish(self) -> MigrationResult {
        MigrationResult {
            success: self.errors.is_empty(),
            data: self.current,
            from_version: self.from,
            to_version: self.to,
            applied_migrations: self.applied,
            errors: self.errors,
            warnings: self.warnings,
            duration_ms: self.started.elapsed().as_secs_f64() * 1000.0,
        }
    }
}

/// Applies registry steps to documents. Holds no state besides the shared registry.
#[derive(Clone)]
pub struct MigrationExecutor {
    registry: Arc<MigrationRegistry>,
}

impl MigrationExecutor {
    pub fn new(registry: Arc<MigrationRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &MigrationRegistry {
        &self.registry
    }

    /// Runs `up` for every step in `(from, to]`.
    ///
    /// A step whose precondition fails is skipped and recorded as an error; the
    /// remaining steps still run. An `up` error stops the run.
    pub fn migrate(&self, entity: EntityType, data: &Value, from: &str, to: &str) -> MigrationResult {
        let mut run = Run::start(data, from, to);

        for step in self.registry.find_migration_path(entity, from, to) {
            let version = step.version();
            if !step.validate(&run.current) {
                warn!(%entity, version, "Skipping migration: precondition failed");
                run.errors
                    .push(format!("Validation failed for migration {}", version));
                continue;
            }

            match step.up(&run.current) {
                Ok(next) => {
                    debug!(%entity, version, "Applied migration: {}", step.description());
                    run.current = next;
                    run.applied.push(version.to_string());
                }
                Err(e) => {
                    warn!(%entity, version, "Migration failed: {}", e);
                    run.errors.push(e.to_string());
                    return run.finish();
                }
            }
        }

        run.finish()
    }

    /// Runs `down` for every step in `(to, from]`, newest first. `from` is the
    /// document's current version and `to` the lower target.
    pub fn rollback(&self, entity: EntityType, data: &Value, from: &str, to: &str) -> MigrationResult {
        let mut run = Run::start(data, from, to);

        let mut path = self.registry.find_migration_path(entity, to, from);
        path.reverse();

        for step in path {
            let version = step.version();
            match step.down(&run.current) {
                None => {
                    warn!(%entity, version, "Migration has no rollback; data left unchanged");
                    run.warnings.push(format!(
                        "Migration {} cannot be rolled back; data left unchanged",
                        version
                    ));
                }
                Some(Ok(previous)) => {
                    debug!(%entity, version, "Rolled back migration");
                    run.current = previous;
                    run.applied.push(version.to_string());
                }
                Some(Err(e)) => {
                    warn!(%entity, version, "Rollback failed: {}", e);
                    run.errors.push(e.to_string());
                    return run.finish();
                }
            }
        }

        run.finish()
    }
}
