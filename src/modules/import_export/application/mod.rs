pub mod domain;
pub mod ports;
pub mod services;
pub mod transfer_use_cases;

pub use transfer_use_cases::TransferUseCases;
