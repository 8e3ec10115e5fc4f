pub mod domain;
pub mod ports;
pub mod services;
pub mod validation_use_cases;

pub use validation_use_cases::ValidationUseCases;
