use async_trait::async_trait;

use crate::modules::migration::application::domain::MigrationExecutor;
use crate::modules::validation::application::domain::{migrate_and_validate, MigratedValidation};
use crate::modules::validation::application::ports::incoming::use_cases::{
    MigrateAndValidateCommand, MigrateAndValidateError, MigrateAndValidateUseCase,
};

#[derive(Clone)]
pub struct MigrateAndValidateService {
    executor: MigrationExecutor,
}

impl MigrateAndValidateService {
    pub fn new(executor: MigrationExecutor) -> Self {
        Self { executor }
    }
}

#[async_trait]
impl MigrateAndValidateUseCase for MigrateAndValidateService {
    async fn execute(
        &self,
        command: MigrateAndValidateCommand,
    ) -> Result<MigratedValidation, MigrateAndValidateError> {
        let outcome = migrate_and_validate(&self.executor, &command.document, command.entity);
        if outcome.success {
            Ok(outcome)
        } else {
            Err(MigrateAndValidateError::Failed(outcome))
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

    fn service() -> MigrateAndValidateService {
        let registry = MigrationRegistry::with_defaults(VersionOrdering::Semantic);
        MigrateAndValidateService::new(MigrationExecutor::new(Arc::new(registry)))
    }

    #[tokio::test]
    async fn test_execute_upgrades_legacy_skill() {
        let res = service()
            .execute(MigrateAndValidateCommand {
                entity: EntityType::Skill,
                document: json!({
                    "name": "PostgreSQL",
                    "category": "database",
                    "level": "advanced",
                    "yearsOfExperience": 1,
                    "certifications": "Postgres Associate"
                }),
            })
            .await
            .unwrap();

        let data = res.validation.data.unwrap();
        assert_eq!(data["schemaVersion"], "1.0.0");
        assert_eq!(data["experience"]["years"], 1);
        assert_eq!(data["certifications"][0]["name"], "Postgres Associate");
    }

    #[tokio::test]
    async fn test_execute_fails_without_required_fields() {
        let res = service()
            .execute(MigrateAndValidateCommand {
                entity: EntityType::Project,
                document: json!({"description": "no title here"}),
            })
            .await;

        assert!(matches!(res, Err(MigrateAndValidateError::Failed(_))));
    }
}
