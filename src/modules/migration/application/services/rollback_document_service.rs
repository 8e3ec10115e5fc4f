use async_trait::async_trait;

use crate::modules::migration::application::domain::{MigrationExecutor, MigrationResult};
use crate::modules::migration::application::ports::incoming::use_cases::{
    RollbackDocumentCommand, RollbackDocumentError, RollbackDocumentUseCase,
};

#[derive(Clone)]
pub struct RollbackDocumentService {
    executor: MigrationExecutor,
}

impl RollbackDocumentService {
    pub fn new(executor: MigrationExecutor) -> Self {
        Self { executor }
    }
}

#[async_trait]
impl RollbackDocumentUseCase for RollbackDocumentService {
    async fn execute(
        &self,
        command: RollbackDocumentCommand,
    ) -> Result<MigrationResult, RollbackDocumentError> {
        let ordering = self.executor.registry().ordering();
        if ordering
            .compare(&command.to_version, &command.from_version)
            .is_gt()
        {
            return Err(RollbackDocumentError::InvalidRange {
                from: command.from_version,
                to: command.to_version,
            });
        }

        let result = self.executor.rollback(
            command.entity,
            &command.document,
            &command.from_version,
            &command.to_version,
        );
        if result.success {
            Ok(result)
        } else {
            Err(RollbackDocumentError::Failed(result))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Arc;

    use crate::modules::migration::application::domain::MigrationRegistry;
    use crate::modules::schema::application::domain::{EntityType, VersionOrdering};

    fn service() -> RollbackDocumentService {
        let registry = MigrationRegistry::with_defaults(VersionOrdering::Semantic);
        RollbackDocumentService::new(MigrationExecutor::new(Arc::new(registry)))
    }

    fn command(from: &str, to: &str) -> RollbackDocumentCommand {
        RollbackDocumentCommand {
            entity: EntityType::Project,
            document: json!({
                "title": "Shop",
                "images": [{"url": "https://x.io/a.png", "alt": "Shop", "isPrimary": true}],
                "links": [{"type": "github", "url": "https://github.com/x", "label": "Code", "isPrimary": true}]
            }),
            from_version: from.to_string(),
            to_version: to.to_string(),
        }
    }

    #[tokio::test]
    async fn test_execute_rolls_back_links_and_images() {
        let res = service().execute(command("0.4.0", "0.2.0")).await.unwrap();

        assert_eq!(res.applied_migrations, vec!["0.4.0", "0.3.0"]);
        assert_eq!(res.data["githubUrl"], "https://github.com/x");
        assert_eq!(res.data["image"], "https://x.io/a.png");
    }

    #[tokio::test]
    async fn test_execute_warns_on_irreversible_step() {
        let res = service().execute(command("1.0.0", "0.4.0")).await.unwrap();

        assert!(res.applied_migrations.is_empty());
        assert_eq!(res.warnings.len(), 1);
    }

    #[tokio::test]
    async fn test_execute_rejects_upward_range() {
        let res = service().execute(command("0.2.0", "0.4.0")).await;

        assert!(matches!(
            res,
            Err(RollbackDocumentError::InvalidRange { from, to }) if from == "0.2.0" && to == "0.4.0"
        ));
    }
}
