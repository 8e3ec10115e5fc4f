//! Registered migration steps, one file per entity type.

pub mod project;
pub mod skill;

pub use project::{BusinessContext, CurrentProjectSchema, ImageGallery, StructuredLinks};
pub use skill::{CertificationObjects, CurrentSkillSchema, StructuredExperience};
