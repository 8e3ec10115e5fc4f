mod schema_policy;

pub use schema_policy::{ConfigError, SchemaPolicy};
