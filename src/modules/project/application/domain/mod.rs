pub mod entities;
pub mod legacy_transformer;
pub mod schema;

pub use entities::{
    ClientInfo, MetricValue, Project, ProjectImage, ProjectLink, ProjectMetrics, ProjectSeo,
    ProjectUpdate,
};
pub use schema::{parse_project, parse_project_create, parse_project_update, PROJECT_SCHEMA};
