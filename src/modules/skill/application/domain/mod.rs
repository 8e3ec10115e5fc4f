pub mod entities;
pub mod legacy_transformer;
pub mod schema;

pub use entities::{Certification, LearningResource, Skill, SkillExperience, SkillUpdate};
pub use schema::{parse_skill, parse_skill_create, parse_skill_update, SKILL_SCHEMA};
