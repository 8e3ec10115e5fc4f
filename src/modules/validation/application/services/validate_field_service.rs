use async_trait::async_trait;
use serde_json::Value;

use crate::modules::schema::application::domain::ErrorCode;
use crate::modules::validation::application::domain::{validate_field, ValidationReport};
use crate::modules::validation::application::ports::incoming::use_cases::{
    ValidateFieldCommand, ValidateFieldError, ValidateFieldUseCase,
};

#[derive(Clone, Default)]
pub struct ValidateFieldService;

impl ValidateFieldService {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ValidateFieldUseCase for ValidateFieldService {
    async fn execute(
        &self,
        command: ValidateFieldCommand,
    ) -> Result<ValidationReport<Value>, ValidateFieldError> {
        let report = validate_field(command.entity, &command.path, &command.value);
        if report.success {
            return Ok(report);
        }
        if report
            .errors
            .iter()
            .any(|e| e.code == ErrorCode::UnrecognizedPath)
        {
            return Err(ValidateFieldError::UnknownPath(command.path));
        }
        Err(ValidateFieldError::Invalid(report))
    }
}
