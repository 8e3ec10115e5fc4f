use async_trait::async_trait;

use crate::modules::migration::application::domain::{
    batch_migrate, BatchMigrationResult, MigrationExecutor,
};
use crate::modules::migration::application::ports::incoming::use_cases::{
    BatchMigrateCommand, BatchMigrateError, BatchMigrateUseCase,
};
use crate::modules::migration::application::ports::outgoing::ProgressReporter;
use crate::modules::schema::application::domain::policies::SchemaPolicy;

pub struct BatchMigrateService<P>
where
    P: ProgressReporter,
{
    executor: MigrationExecutor,
    reporter: P,
    policy: SchemaPolicy,
}

impl<P> BatchMigrateService<P>
where
    P: ProgressReporter,
{
    pub fn new(executor: MigrationExecutor, reporter: P, policy: SchemaPolicy) -> Self {
        Self {
            executor,
            reporter,
            policy,
        }
    }
}

#[async_trait]
impl<P> BatchMigrateUseCase for BatchMigrateService<P>
where
    P: ProgressReporter + Send + Sync,
{
    async fn execute(
        &self,
        command: BatchMigrateCommand,
    ) -> Result<BatchMigrationResult, BatchMigrateError> {
        let received = command.documents.len();
        if received > self.policy.max_bulk_items {
            return Err(BatchMigrateError::TooManyItems {
                max: self.policy.max_bulk_items,
                received,
            });
        }

        let target = command
            .target_version
            .as_deref()
            .unwrap_or(&self.policy.target_version);

        Ok(batch_migrate(
            &self.executor,
            &command.documents,
            command.entity,
            target,
            &self.reporter,
            self.policy.batch_progress_every,
        )
        .await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::mock;
    use serde_json::json;
    use std::sync::Arc;

    use crate::modules::migration::application::domain::MigrationRegistry;
    use crate::modules::migration::application::ports::outgoing::BatchProgress;
    use crate::modules::schema::application::domain::{EntityType, VersionOrdering};

    mock! {
        Reporter {}

        impl ProgressReporter for Reporter {
            fn report(&self, progress: BatchProgress);
        }
    }

    fn executor() -> MigrationExecutor {
        MigrationExecutor::new(Arc::new(MigrationRegistry::with_defaults(
            VersionOrdering::Semantic,
        )))
    }

    fn policy(max_bulk_items: usize) -> SchemaPolicy {
        SchemaPolicy {
            max_bulk_items,
            batch_progress_every: 1,
            ..SchemaPolicy::new()
        }
    }

    #[tokio::test]
    async fn test_execute_reports_each_item() {
        let mut reporter = MockReporter::new();
        reporter.expect_report().times(2).return_const(());
        let service = BatchMigrateService::new(executor(), reporter, policy(10));

        let res = service
            .execute(BatchMigrateCommand {
                entity: EntityType::Skill,
                documents: vec![
                    json!({"name": "Go", "level": "advanced", "proficiency": 70}),
                    json!({"name": "SQL", "level": 40}),
                ],
                target_version: None,
            })
            .await
            .unwrap();

        assert_eq!(res.total, 2);
        assert_eq!(res.successful, 2);
    }

    #[tokio::test]
    async fn test_execute_rejects_oversized_batch() {
        let mut reporter = MockReporter::new();
        reporter.expect_report().never();
        let service = BatchMigrateService::new(executor(), reporter, policy(1));

        let res = service
            .execute(BatchMigrateCommand {
                entity: EntityType::Skill,
                documents: vec![json!({}), json!({})],
                target_version: None,
            })
            .await;

        assert!(matches!(
            res,
            Err(BatchMigrateError::TooManyItems { max: 1, received: 2 })
        ));
    }
}
