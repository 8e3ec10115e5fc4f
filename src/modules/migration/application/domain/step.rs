use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MigrationStepError {
    #[error("migration {version}: expected a JSON object")]
    NotAnObject { version: &'static str },

    #[error("migration {version}: {reason}")]
    Transform {
        version: &'static str,
        reason: String,
    },
}

/// One versioned transformation of a document.
///
/// `up` moves a document to [`version`](Self::version), `down` moves it back to
/// the previous version. Steps without a reverse return `None` from `down`.
pub trait DocumentMigration: Send + Sync {
    fn version(&self) -> &'static str;

    fn description(&self) -> &'static str;

    fn up(&self, data: &Value) -> Result<Value, MigrationStepError>;

    fn down(&self, _data: &Value) -> Option<Result<Value, MigrationStepError>> {
        None
    }

    /// Precondition for `up`. A document that fails it is left untouched.
    fn validate(&self, _data: &Value) -> bool {
        true
    }
}

/// Clones `data` as an object map, or fails with [`MigrationStepError::NotAnObject`].
pub(crate) fn object(
    data: &Value,
    version: &'static str,
) -> Result<serde_json::Map<String, Value>, MigrationStepError> {
    data.as_object()
        .cloned()
        .ok_or(MigrationStepError::NotAnObject { version })
}
