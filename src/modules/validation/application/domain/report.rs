use serde::Serialize;
use serde_json::Value;
use std::time::Instant;

use crate::modules::schema::application::domain::{ValidationError, ValidationErrors};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationMetrics {
    pub duration_ms: f64,
    /// Top-level keys present in the input document.
    pub fields_checked: usize,
}

/// Outcome of validating one document. `data` is present only on success.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<String>,
    pub metrics: ValidationMetrics,
}

impl<T> ValidationReport<T> {
    pub(crate) fn passed(data: T, warnings: Vec<String>, started: Instant, fields_checked: usize) -> Self {
        Self {
            success: true,
            data: Some(data),
            errors: Vec::new(),
            warnings,
            metrics: ValidationMetrics {
                duration_ms: elapsed_ms(started),
                fields_checked,
            },
        }
    }

    pub(crate) fn failed(errors: ValidationErrors, started: Instant, fields_checked: usize) -> Self {
        Self {
            success: false,
            data: None,
            errors: errors.into_inner(),
            warnings: Vec::new(),
            metrics: ValidationMetrics {
                duration_ms: elapsed_ms(started),
                fields_checked,
            },
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ValidationReport<U> {
        ValidationReport {
            success: self.success,
            data: self.data.map(f),
            errors: self.errors,
            warnings: self.warnings,
            metrics: self.metrics,
        }
    }
}

impl<T: Serialize> ValidationReport<T> {
    /// Erases the entity type. A typed entity that fails to serialize turns
    /// the report into a failure carrying one `unknown` error.
    pub fn into_value(self) -> ValidationReport<Value> {
        let data = match self.data.as_ref().map(serde_json::to_value).transpose() {
            Ok(data) => data,
            Err(e) => {
                return ValidationReport {
                    success: false,
                    data: None,
                    errors: vec![ValidationError::unknown(e)],
                    warnings: self.warnings,
                    metrics: self.metrics,
                }
            }
        };
        ValidationReport {
            success: self.success,
            data,
            errors: self.errors,
            warnings: self.warnings,
            metrics: self.metrics,
        }
    }
}

/// Item that failed bulk validation, with its position in the input.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvalidItem {
    pub index: usize,
    pub data: Value,
    pub errors: Vec<ValidationError>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkSummary {
    pub total: usize,
    pub valid_count: usize,
    pub invalid_count: usize,
    /// Milliseconds.
    pub processing_time: f64,
}

/// `valid` keeps input order but not input positions; `invalid` carries them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BulkValidationResult<T> {
    pub valid: Vec<T>,
    pub invalid: Vec<InvalidItem>,
    pub summary: BulkSummary,
}

pub(crate) fn elapsed_ms(started: Instant) -> f64 {
    started.elapsed().as_secs_f64() * 1000.0
}
