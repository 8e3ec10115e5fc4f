use async_trait::async_trait;
use serde_json::Value;

use crate::modules::validation::application::domain::{validate_bulk, BulkValidationResult};
use crate::modules::validation::application::ports::incoming::use_cases::{
    ValidateBulkCommand, ValidateBulkError, ValidateBulkUseCase,
};

#[derive(Clone)]
pub struct ValidateBulkService {
    max_items: usize,
}

impl ValidateBulkService {
    pub fn new(max_items: usize) -> Self {
        Self { max_items }
    }
}

#[async_trait]
impl ValidateBulkUseCase for ValidateBulkService {
    async fn execute(
        &self,
        command: ValidateBulkCommand,
    ) -> Result<BulkValidationResult<Value>, ValidateBulkError> {
        let received = command.documents.len();
        if received > self.max_items {
            return Err(ValidateBulkError::TooManyItems {
                max: self.max_items,
                received,
            });
        }
        Ok(validate_bulk(command.entity, &command.documents))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    use crate::modules::schema::application::domain::EntityType;

    fn skill(name: &str) -> Value {
        json!({
            "name": name,
            "category": "TOOLS",
            "level": "BEGINNER",
            "proficiency": 20,
            "createdAt": 1_700_000_000_000i64,
            "updatedAt": 1_700_000_000_000i64
        })
    }

    #[tokio::test]
    async fn test_execute_partitions_items() {
        let res = ValidateBulkService::new(10)
            .execute(ValidateBulkCommand {
                entity: EntityType::Skill,
                documents: vec![skill("Git"), skill(""), skill("Docker")],
            })
            .await
            .unwrap();

        assert_eq!(res.summary.valid_count, 2);
        assert_eq!(res.invalid[0].index, 1);
        assert_eq!(res.valid[1]["name"], "Docker");
    }

    #[tokio::test]
    async fn test_execute_enforces_item_limit() {
        let res = ValidateBulkService::new(2)
            .execute(ValidateBulkCommand {
                entity: EntityType::Skill,
                documents: vec![skill("a"), skill("b"), skill("c")],
            })
            .await;

        assert_eq!(
            res.unwrap_err(),
            ValidateBulkError::TooManyItems { max: 2, received: 3 }
        );
    }
}
