use serde::Serialize;
use serde_json::Value;
use std::time::Instant;
use tracing::info;
use uuid::Uuid;

use crate::modules::migration::application::domain::executor::{
    MigrationExecutor, MigrationResult,
};
use crate::modules::migration::application::domain::version_detector::detect_version;
use crate::modules::migration::application::ports::outgoing::{BatchProgress, ProgressReporter};
use crate::modules::schema::application::domain::enums::EntityType;

/// Detects the version of `data` and migrates it to `target`.
///
/// Already at `target`: returns the data untouched with `fromVersion == toVersion`.
pub fn auto_migrate(
    executor: &MigrationExecutor,
    data: &Value,
    entity: EntityType,
    target: &str,
) -> MigrationResult {
    let from = detect_version(data, entity);
    if from == target {
        return MigrationResult::unchanged(data.clone(), target);
    }
    executor.migrate(entity, data, &from, target)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchMigrationResult {
    pub batch_id: Uuid,
    pub total: usize,
    pub successful: usize,
    pub failed: usize,
    /// One entry per input item, in input order.
    pub results: Vec<MigrationResult>,
    pub duration_ms: f64,
}

/// Auto-migrates each item in order, yielding to the runtime between items.
///
/// A failing item is recorded and the batch moves on. Progress goes to
/// `reporter` every `progress_every` items and once at the end.
pub async fn batch_migrate<R>(
    executor: &MigrationExecutor,
    items: &[Value],
    entity: EntityType,
    target: &str,
    reporter: &R,
    progress_every: usize,
) -> BatchMigrationResult
where
    R: ProgressReporter + ?Sized,
{
    let started = Instant::now();
    let batch_id = Uuid::new_v4();
    let total = items.len();
    let every = progress_every.max(1);

    let mut results = Vec::with_capacity(total);
    let mut failed = 0;

    for (i, item) in items.iter().enumerate() {
        let result = auto_migrate(executor, item, entity, target);
        if !result.success {
            failed += 1;
        }
        results.push(result);

        let processed = i + 1;
        if processed % every == 0 || processed == total {
            reporter.report(BatchProgress {
                batch_id,
                processed,
                total,
                failed,
            });
        }
        tokio::task::yield_now().await;
    }

    info!(
        %batch_id,
        %entity,
        total,
        failed,
        "Batch migration finished"
    );

    BatchMigrationResult {
        batch_id,
        total,
        successful: total - failed,
        failed,
        results,
        duration_ms: started.elapsed().as_secs_f64() * 1000.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::migration::application::domain::registry::MigrationRegistry;
    use crate::modules::schema::application::domain::version::{
        VersionOrdering, CURRENT_SCHEMA_VERSION,
    };
    use serde_json::json;
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct RecordingReporter {
        seen: Mutex<Vec<BatchProgress>>,
    }

    impl ProgressReporter for RecordingReporter {
        fn report(&self, progress: BatchProgress) {
            if let Ok(mut seen) = self.seen.lock() {
                seen.push(progress);
            }
        }
    }

    fn executor() -> MigrationExecutor {
        MigrationExecutor::new(Arc::new(MigrationRegistry::with_defaults(
            VersionOrdering::Semantic,
        )))
    }

    fn legacy_skill(name: &str) -> Value {
        json!({"name": name, "category": "backend", "level": 60, "yearsOfExperience": 1})
    }

    #[test]
    fn second_auto_migrate_is_a_no_op() {
        let exec = executor();

        let first = auto_migrate(&exec, &legacy_skill("Go"), EntityType::Skill, CURRENT_SCHEMA_VERSION);
        assert!(first.success, "{:?}", first.errors);
        assert_eq!(first.from_version, "0.1.0");

        let second = auto_migrate(&exec, &first.data, EntityType::Skill, CURRENT_SCHEMA_VERSION);
        assert!(second.success);
        assert_eq!(second.from_version, second.to_version);
        assert!(second.applied_migrations.is_empty());
        assert_eq!(second.data, first.data);
    }

    #[test]
    fn skill_without_name_reports_the_skipped_step() {
        let exec = executor();
        let result = auto_migrate(
            &exec,
            &json!({"skill": "Go", "yearsOfExperience": 2}),
            EntityType::Skill,
            CURRENT_SCHEMA_VERSION,
        );

        assert!(!result.success);
        assert_eq!(result.applied_migrations, vec!["0.2.0", "0.3.0"]);
        assert_eq!(result.errors, vec!["Validation failed for migration 1.0.0"]);
    }

    #[tokio::test]
    async fn batch_keeps_going_past_failures() {
        let exec = executor();
        let items = vec![
            legacy_skill("Go"),
            json!({"yearsOfExperience": 2}),
            legacy_skill("Rust"),
        ];
        let reporter = RecordingReporter::default();

        let result = batch_migrate(
            &exec,
            &items,
            EntityType::Skill,
            CURRENT_SCHEMA_VERSION,
            &reporter,
            2,
        )
        .await;

        assert_eq!(result.total, 3);
        assert_eq!(result.successful, 2);
        assert_eq!(result.failed, 1);
        assert_eq!(result.results.len(), 3);
        assert!(!result.results[1].success);
        assert_eq!(result.results[2].data["name"], "Rust");

        let seen = reporter.seen.lock().unwrap();
        let processed: Vec<usize> = seen.iter().map(|p| p.processed).collect();
        assert_eq!(processed, vec![2, 3]);
        assert!(seen.last().unwrap().is_done());
        assert!(seen.iter().all(|p| p.batch_id == result.batch_id));
    }

    #[tokio::test]
    async fn empty_batch() {
        let exec = executor();
        let reporter = RecordingReporter::default();

        let result = batch_migrate(&exec, &[], EntityType::Project, "1.0.0", &reporter, 10).await;

        assert_eq!(result.total, 0);
        assert_eq!(result.successful, 0);
        assert!(reporter.seen.lock().unwrap().is_empty());
    }
}
