pub mod enums;
pub mod field_validators;
pub mod legacy;
pub mod policies;
pub mod rules;
pub mod validation;
pub mod version;

pub use enums::{ClosedEnum, EntityType};
pub use rules::{FieldKind, FieldRule, ObjectSchema, ResolvedPath, SchemaMode};
pub use validation::{ErrorCode, ValidationError, ValidationErrors};
pub use version::{VersionOrdering, CURRENT_SCHEMA_VERSION};
