use chrono::{DateTime, Duration, Utc};

use crate::modules::project::application::domain::Project;
use crate::modules::schema::application::domain::enums::SkillLevel;
use crate::modules::skill::application::domain::Skill;

pub const STALE_SKILL_DAYS: i64 = 730;
pub const EXPIRY_NOTICE_DAYS: i64 = 30;

/// Non-blocking notes about a valid project.
pub fn project_warnings(project: &Project) -> Vec<String> {
    let mut warnings = Vec::new();
    if project.images.is_empty() {
        warnings.push("Project has no images".to_string());
    }
    if project.links.is_empty() {
        warnings.push("Project has no links".to_string());
    }
    if project.featured && project.primary_image().is_none() {
        warnings.push("Featured project has no primary image".to_string());
    }
    warnings
}

/// Non-blocking notes about a valid skill, relative to `now`.
pub fn skill_warnings(skill: &Skill, now: DateTime<Utc>) -> Vec<String> {
    let mut warnings = Vec::new();

    if let Some(last_used) = skill.experience.last_used {
        if now - last_used > Duration::days(STALE_SKILL_DAYS) {
            warnings.push("Skill has not been used in over two years".to_string());
        }
    }

    let notice = now + Duration::days(EXPIRY_NOTICE_DAYS);
    for cert in &skill.certifications {
        if cert.expiry_date.is_some_and(|expiry| expiry <= notice) {
            warnings.push(format!(
                "Certification '{}' expires within {} days",
                cert.name, EXPIRY_NOTICE_DAYS
            ));
        }
    }

    if skill.level == SkillLevel::Expert && skill.certifications.is_empty() {
        warnings.push("Expert-level skill has no certifications".to_string());
    }
    warnings
}
