use chrono::Utc;
use serde::Serialize;
use serde_json::Value;
use std::time::Instant;

use crate::modules::project::application::domain::{parse_project, parse_project_update, Project};
use crate::modules::schema::application::domain::{ValidationError, ValidationErrors};
use crate::modules::skill::application::domain::{parse_skill, parse_skill_update, Skill};
use crate::modules::validation::application::domain::report::ValidationReport;
use crate::modules::validation::application::domain::warnings::{
    project_warnings, skill_warnings,
};

/// Overlays the fields present in `update` onto `current` and sets the next
/// version number.
fn merge<E: Serialize, U: Serialize>(
    current: &E,
    update: &U,
    next_version: u32,
) -> Result<Value, ValidationErrors> {
    let unknown = |e: serde_json::Error| ValidationErrors(vec![ValidationError::unknown(e)]);

    let mut merged = serde_json::to_value(current).map_err(unknown)?;
    let changes = serde_json::to_value(update).map_err(unknown)?;
    if let (Some(target), Value::Object(changes)) = (merged.as_object_mut(), changes) {
        target.extend(changes);
        target.insert("version".into(), Value::from(next_version));
    }
    Ok(merged)
}

/// Validates `update` as a partial project, merges it into `current` and
/// validates the merged document as a whole.
pub fn apply_project_update(current: &Project, update: &Value) -> ValidationReport<Project> {
    let started = Instant::now();
    let fields = update.as_object().map_or(0, |obj| obj.len());

    let merged = parse_project_update(update)
        .and_then(|update| merge(current, &update, current.version.saturating_add(1)))
        .and_then(|merged| parse_project(&merged));

    match merged {
        Ok(project) => {
            let warnings = project_warnings(&project);
            ValidationReport::passed(project, warnings, started, fields)
        }
        Err(errors) => ValidationReport::failed(errors, started, fields),
    }
}

pub fn apply_skill_update(current: &Skill, update: &Value) -> ValidationReport<Skill> {
    let started = Instant::now();
    let fields = update.as_object().map_or(0, |obj| obj.len());

    let merged = parse_skill_update(update)
        .and_then(|update| merge(current, &update, current.version.saturating_add(1)))
        .and_then(|merged| parse_skill(&merged));

    match merged {
        Ok(skill) => {
            let warnings = skill_warnings(&skill, Utc::now());
            ValidationReport::passed(skill, warnings, started, fields)
        }
        Err(errors) => ValidationReport::failed(errors, started, fields),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::schema::application::domain::enums::ProjectStatus;
    use chrono::TimeZone;
    use serde_json::json;

    fn project() -> Project {
        parse_project(&json!({
            "title": "Portfolio CMS",
            "description": "A content management backend for a personal portfolio site.",
            "category": "WEB_APPLICATION",
            "technologies": ["Rust"],
            "role": "Lead Developer",
            "createdAt": 1_700_000_000_000i64,
            "updatedAt": 1_700_000_500_000i64
        }))
        .unwrap()
    }

    fn skill() -> Skill {
        parse_skill(&json!({
            "name": "Rust",
            "category": "LANGUAGES",
            "level": "ADVANCED",
            "proficiency": 75,
            "experience": {"years": 3, "months": 0},
            "createdAt": 1_700_000_000_000i64,
            "updatedAt": 1_700_000_500_000i64
        }))
        .unwrap()
    }

    #[test]
    fn project_update_merges_and_bumps_version() {
        let current = project();

        let report = apply_project_update(
            &current,
            &json!({"title": "Renamed", "teamSize": 4, "updatedAt": 1_700_000_900_000i64}),
        );

        assert!(report.success, "{:?}", report.errors);
        let updated = report.data.unwrap();
        assert_eq!(updated.title, "Renamed");
        assert_eq!(updated.team_size, 4);
        assert_eq!(updated.role, current.role);
        assert_eq!(updated.version, current.version + 1);
        assert_eq!(updated.updated_at, 1_700_000_900_000);
        assert_eq!(updated.created_at, current.created_at);
    }

    #[test]
    fn project_update_is_revalidated_as_a_whole() {
        let mut current = project();
        current.description = "Short but valid".to_string();

        let report = apply_project_update(
            &current,
            &json!({"featured": true, "updatedAt": 1_700_000_900_000i64}),
        );

        assert!(!report.success);
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].field, "description");
    }

    #[test]
    fn completing_relies_on_the_stored_end_date() {
        let mut current = project();
        current.status = ProjectStatus::InProgress;
        let update = json!({
            "status": "COMPLETED",
            "startDate": "2023-01-01",
            "updatedAt": 1_700_000_900_000i64
        });

        let report = apply_project_update(&current, &update);
        assert!(!report.success);
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].field, "endDate");

        current.end_date = Some(Utc.with_ymd_and_hms(2023, 6, 1, 0, 0, 0).unwrap());
        let report = apply_project_update(&current, &update);
        assert!(report.success, "{:?}", report.errors);
        assert_eq!(report.data.unwrap().status, ProjectStatus::Completed);
    }

    #[test]
    fn invalid_update_is_rejected_before_merging() {
        let report = apply_project_update(&project(), &json!({"title": ""}));

        assert!(!report.success);
        assert!(report.errors.iter().any(|e| e.field == "title"));
        assert!(report.errors.iter().any(|e| e.field == "updatedAt"));
    }

    #[test]
    fn skill_update_recomputes_derived_experience() {
        let current = skill();

        let report = apply_skill_update(
            &current,
            &json!({
                "experience": {"years": 4, "months": 6},
                "proficiency": 90,
                "level": "EXPERT",
                "certifications": [{"name": "Rust Cert", "issuer": "RF"}],
                "updatedAt": 1_700_000_900_000i64
            }),
        );

        assert!(report.success, "{:?}", report.errors);
        let updated = report.data.unwrap();
        assert_eq!(updated.experience.total_months, 54);
        assert_eq!(updated.version, 2);
    }
}
