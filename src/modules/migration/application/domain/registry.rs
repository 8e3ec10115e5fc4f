use std::collections::HashMap;
use std::sync::Arc;

use crate::modules::migration::application::domain::step::DocumentMigration;
use crate::modules::migration::application::domain::steps::{
    BusinessContext, CertificationObjects, CurrentProjectSchema, CurrentSkillSchema, ImageGallery,
    StructuredExperience, StructuredLinks,
};
use crate::modules::schema::application::domain::enums::EntityType;
use crate::modules::schema::application::domain::version::{
    VersionOrdering, BASELINE_SCHEMA_VERSION,
};

pub type MigrationRef = Arc<dyn DocumentMigration>;

/// Ordered migration steps per entity type.
///
/// Built once at start-up and shared behind an `Arc`; there is no way to add
/// steps after [`MigrationRegistryBuilder::build`].
pub struct MigrationRegistry {
    ordering: VersionOrdering,
    steps: HashMap<EntityType, Vec<MigrationRef>>,
}

pub struct MigrationRegistryBuilder {
    ordering: VersionOrdering,
    steps: HashMap<EntityType, Vec<MigrationRef>>,
}

impl MigrationRegistryBuilder {
    pub fn register(mut self, entity: EntityType, step: impl DocumentMigration + 'static) -> Self {
        self.steps.entry(entity).or_default().push(Arc::new(step));
        self
    }

    pub fn build(mut self) -> MigrationRegistry {
        let ordering = self.ordering;
        for steps in self.steps.values_mut() {
            steps.sort_by(|a, b| ordering.compare(a.version(), b.version()));
        }
        MigrationRegistry {
            ordering,
            steps: self.steps,
        }
    }
}

impl MigrationRegistry {
    pub fn builder(ordering: VersionOrdering) -> MigrationRegistryBuilder {
        MigrationRegistryBuilder {
            ordering,
            steps: HashMap::new(),
        }
    }

    /// Registry holding every project and skill step this crate ships.
    pub fn with_defaults(ordering: VersionOrdering) -> Self {
        Self::builder(ordering)
            .register(EntityType::Project, BusinessContext)
            .register(EntityType::Project, ImageGallery)
            .register(EntityType::Project, StructuredLinks)
            .register(EntityType::Project, CurrentProjectSchema)
            .register(EntityType::Skill, StructuredExperience)
            .register(EntityType::Skill, CertificationObjects)
            .register(EntityType::Skill, CurrentSkillSchema)
            .build()
    }

    pub fn ordering(&self) -> VersionOrdering {
        self.ordering
    }

    /// Steps for `entity`, sorted by version.
    pub fn steps(&self, entity: EntityType) -> &[MigrationRef] {
        self.steps.get(&entity).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The steps with `from < version <= to`, in order. Empty when `to <= from`.
    pub fn find_migration_path(&self, entity: EntityType, from: &str, to: &str) -> Vec<MigrationRef> {
        self.steps(entity)
            .iter()
            .filter(|step| {
                self.ordering.compare(step.version(), from).is_gt()
                    && self.ordering.compare(step.version(), to).is_le()
            })
            .cloned()
            .collect()
    }

    /// Highest registered version, or the baseline when nothing is registered.
    pub fn latest_version(&self, entity: EntityType) -> &'static str {
        self.steps(entity)
            .last()
            .map(|step| step.version())
            .unwrap_or(BASELINE_SCHEMA_VERSION)
    }
}
