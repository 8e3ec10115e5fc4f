pub mod auto_migration;
pub mod executor;
pub mod registry;
pub mod step;
pub mod steps;
pub mod version_detector;

pub use auto_migration::{auto_migrate, batch_migrate, BatchMigrationResult};
pub use executor::{MigrationExecutor, MigrationResult};
pub use registry::{MigrationRegistry, MigrationRegistryBuilder};
pub use step::{DocumentMigration, MigrationStepError};
pub use version_detector::detect_version;
