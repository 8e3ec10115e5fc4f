use thiserror::Error;

use crate::modules::schema::application::domain::version::{
    VersionOrdering, CURRENT_SCHEMA_VERSION,
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Invalid value '{value}' for {key}: {reason}")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaPolicy {
    pub target_version: String,
    pub version_ordering: VersionOrdering,
    pub batch_progress_every: usize,
    pub max_bulk_items: usize,
}

impl Default for SchemaPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaPolicy {
    pub const DEFAULT_BATCH_PROGRESS_EVERY: usize = 10;
    pub const DEFAULT_MAX_BULK_ITEMS: usize = 1000;

    pub const TARGET_VERSION_VAR: &'static str = "SCHEMA_TARGET_VERSION";
    pub const VERSION_ORDERING_VAR: &'static str = "SCHEMA_VERSION_ORDERING";
    pub const BATCH_PROGRESS_EVERY_VAR: &'static str = "SCHEMA_BATCH_PROGRESS_EVERY";
    pub const MAX_BULK_ITEMS_VAR: &'static str = "SCHEMA_MAX_BULK_ITEMS";

    /// Handy for unit tests or custom wiring (no env reads).
    pub fn new() -> Self {
        Self {
            target_version: CURRENT_SCHEMA_VERSION.to_string(),
            version_ordering: VersionOrdering::Semantic,
            batch_progress_every: Self::DEFAULT_BATCH_PROGRESS_EVERY,
            max_bulk_items: Self::DEFAULT_MAX_BULK_ITEMS,
        }
    }

    /// Load policy from `SCHEMA_*` env vars, falling back to defaults for
    /// unset or blank values.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).filter(|s| !s.trim().is_empty());
        let mut policy = Self::new();

        if let Some(target) = read(Self::TARGET_VERSION_VAR) {
            policy.target_version = target.trim().to_string();
        }

        if let Some(raw) = read(Self::VERSION_ORDERING_VAR) {
            policy.version_ordering =
                raw.parse()
                    .map_err(|reason| ConfigError::InvalidValue {
                        key: Self::VERSION_ORDERING_VAR,
                        value: raw.clone(),
                        reason,
                    })?;
        }

        if let Some(raw) = read(Self::BATCH_PROGRESS_EVERY_VAR) {
            policy.batch_progress_every = parse_positive(Self::BATCH_PROGRESS_EVERY_VAR, &raw)?;
        }

        if let Some(raw) = read(Self::MAX_BULK_ITEMS_VAR) {
            policy.max_bulk_items = parse_positive(Self::MAX_BULK_ITEMS_VAR, &raw)?;
        }

        if policy.version_ordering == VersionOrdering::Lexicographic {
            tracing::warn!(
                "{}=lexicographic: versions are compared as plain strings, \"0.10.0\" sorts before \"0.9.0\"",
                Self::VERSION_ORDERING_VAR
            );
        }

        Ok(policy)
    }
}

fn parse_positive(key: &'static str, raw: &str) -> Result<usize, ConfigError> {
    match raw.trim().parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        Ok(_) => Err(ConfigError::InvalidValue {
            key,
            value: raw.to_string(),
            reason: "must be greater than zero".to_string(),
        }),
        Err(e) => Err(ConfigError::InvalidValue {
            key,
            value: raw.to_string(),
            reason: e.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use maplit::hashmap;
    use std::collections::HashMap;

    fn lookup_from(vars: HashMap<&'static str, &'static str>) -> impl Fn(&str) -> Option<String> {
        move |key: &str| vars.get(key).map(|v| v.to_string())
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let policy = SchemaPolicy::from_lookup(|_| None).unwrap();
        assert_eq!(policy, SchemaPolicy::new());
        assert_eq!(policy.target_version, "1.0.0");
        assert_eq!(policy.batch_progress_every, 10);
        assert_eq!(policy.max_bulk_items, 1000);
    }

    #[test]
    fn reads_every_variable() {
        let policy = SchemaPolicy::from_lookup(lookup_from(hashmap! {
            "SCHEMA_TARGET_VERSION" => "0.4.0",
            "SCHEMA_VERSION_ORDERING" => "lexicographic",
            "SCHEMA_BATCH_PROGRESS_EVERY" => "3",
            "SCHEMA_MAX_BULK_ITEMS" => "50",
        }))
        .unwrap();

        assert_eq!(policy.target_version, "0.4.0");
        assert_eq!(policy.version_ordering, VersionOrdering::Lexicographic);
        assert_eq!(policy.batch_progress_every, 3);
        assert_eq!(policy.max_bulk_items, 50);
    }

    #[test]
    fn blank_values_fall_back() {
        let policy = SchemaPolicy::from_lookup(lookup_from(hashmap! {
            "SCHEMA_TARGET_VERSION" => "  ",
        }))
        .unwrap();
        assert_eq!(policy.target_version, "1.0.0");
    }

    #[test]
    fn rejects_bad_values() {
        let err = SchemaPolicy::from_lookup(lookup_from(hashmap! {
            "SCHEMA_MAX_BULK_ITEMS" => "0",
        }))
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue { key: "SCHEMA_MAX_BULK_ITEMS", .. }
        ));

        let err = SchemaPolicy::from_lookup(lookup_from(hashmap! {
            "SCHEMA_VERSION_ORDERING" => "numeric",
        }))
        .unwrap_err();
        assert!(err.to_string().contains("SCHEMA_VERSION_ORDERING"));
    }
}
