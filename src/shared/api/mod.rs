mod entity_path;
mod json_config;
mod response;

pub use entity_path::entity_from_path;
pub use json_config::{custom_json_config, JSON_BODY_LIMIT};
pub use response::{ApiError, ApiResponse};
