pub mod domain;
pub mod migration_use_cases;
pub mod ports;
pub mod services;

pub use migration_use_cases::MigrationUseCases;
