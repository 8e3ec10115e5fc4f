use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

/// A closed set of string values shared by the entity schemas.
///
/// `as_str` is the serialized name; `parse` only accepts that exact name.
/// Free-text matching of legacy values lives in the transformers.
pub trait ClosedEnum: Sized + Copy + 'static {
    const ALL: &'static [Self];

    fn as_str(&self) -> &'static str;

    fn parse(raw: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|v| v.as_str() == raw)
    }

    /// Comma separated list of the accepted names, used in error messages.
    fn allowed() -> String {
        Self::ALL
            .iter()
            .map(|v| v.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

//
// ──────────────────────────────────────────────────────────
// Entity types
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityType {
    #[serde(alias = "projects")]
    Project,
    #[serde(alias = "skills")]
    Skill,
}

impl ClosedEnum for EntityType {
    const ALL: &'static [Self] = &[EntityType::Project, EntityType::Skill];

    fn as_str(&self) -> &'static str {
        match self {
            EntityType::Project => "project",
            EntityType::Skill => "skill",
        }
    }
}

impl EntityType {
    /// Plural form, used for collection names in exports.
    pub fn plural(&self) -> &'static str {
        match self {
            EntityType::Project => "projects",
            EntityType::Skill => "skills",
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for EntityType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "project" | "projects" => Ok(EntityType::Project),
            "skill" | "skills" => Ok(EntityType::Skill),
            other => Err(format!("Unknown entity type: {}", other)),
        }
    }
}

//
// ──────────────────────────────────────────────────────────
// Project enums
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProjectCategory {
    WebApplication,
    MobileApplication,
    DesktopApplication,
    ApiBackend,
    DataScience,
    MachineLearning,
    Devops,
    OpenSource,
    ECommerce,
    GameDevelopment,
    Blockchain,
    Other,
}

impl ClosedEnum for ProjectCategory {
    const ALL: &'static [Self] = &[
        ProjectCategory::WebApplication,
        ProjectCategory::MobileApplication,
        ProjectCategory::DesktopApplication,
        ProjectCategory::ApiBackend,
        ProjectCategory::DataScience,
        ProjectCategory::MachineLearning,
        ProjectCategory::Devops,
        ProjectCategory::OpenSource,
        ProjectCategory::ECommerce,
        ProjectCategory::GameDevelopment,
        ProjectCategory::Blockchain,
        ProjectCategory::Other,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            ProjectCategory::WebApplication => "WEB_APPLICATION",
            ProjectCategory::MobileApplication => "MOBILE_APPLICATION",
            ProjectCategory::DesktopApplication => "DESKTOP_APPLICATION",
            ProjectCategory::ApiBackend => "API_BACKEND",
            ProjectCategory::DataScience => "DATA_SCIENCE",
            ProjectCategory::MachineLearning => "MACHINE_LEARNING",
            ProjectCategory::Devops => "DEVOPS",
            ProjectCategory::OpenSource => "OPEN_SOURCE",
            ProjectCategory::ECommerce => "E_COMMERCE",
            ProjectCategory::GameDevelopment => "GAME_DEVELOPMENT",
            ProjectCategory::Blockchain => "BLOCKCHAIN",
            ProjectCategory::Other => "OTHER",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProjectStatus {
    Planning,
    InProgress,
    #[default]
    Completed,
    Maintenance,
    OnHold,
    Archived,
}

impl ClosedEnum for ProjectStatus {
    const ALL: &'static [Self] = &[
        ProjectStatus::Planning,
        ProjectStatus::InProgress,
        ProjectStatus::Completed,
        ProjectStatus::Maintenance,
        ProjectStatus::OnHold,
        ProjectStatus::Archived,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            ProjectStatus::Planning => "PLANNING",
            ProjectStatus::InProgress => "IN_PROGRESS",
            ProjectStatus::Completed => "COMPLETED",
            ProjectStatus::Maintenance => "MAINTENANCE",
            ProjectStatus::OnHold => "ON_HOLD",
            ProjectStatus::Archived => "ARCHIVED",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

impl ClosedEnum for Priority {
    const ALL: &'static [Self] = &[
        Priority::Low,
        Priority::Medium,
        Priority::High,
        Priority::Critical,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "LOW",
            Priority::Medium => "MEDIUM",
            Priority::High => "HIGH",
            Priority::Critical => "CRITICAL",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LinkType {
    Live,
    Github,
    Demo,
    CaseStudy,
    Documentation,
    Other,
}

impl ClosedEnum for LinkType {
    const ALL: &'static [Self] = &[
        LinkType::Live,
        LinkType::Github,
        LinkType::Demo,
        LinkType::CaseStudy,
        LinkType::Documentation,
        LinkType::Other,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            LinkType::Live => "live",
            LinkType::Github => "github",
            LinkType::Demo => "demo",
            LinkType::CaseStudy => "case-study",
            LinkType::Documentation => "documentation",
            LinkType::Other => "other",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClientSize {
    Startup,
    Small,
    Medium,
    Large,
    Enterprise,
}

impl ClosedEnum for ClientSize {
    const ALL: &'static [Self] = &[
        ClientSize::Startup,
        ClientSize::Small,
        ClientSize::Medium,
        ClientSize::Large,
        ClientSize::Enterprise,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            ClientSize::Startup => "startup",
            ClientSize::Small => "small",
            ClientSize::Medium => "medium",
            ClientSize::Large => "large",
            ClientSize::Enterprise => "enterprise",
        }
    }
}

//
// ──────────────────────────────────────────────────────────
// Skill enums
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SkillCategory {
    Frontend,
    Backend,
    Database,
    Devops,
    Cloud,
    Mobile,
    Design,
    Testing,
    DataScience,
    MachineLearning,
    Security,
    Tools,
    Languages,
    SoftSkills,
    Other,
}

impl ClosedEnum for SkillCategory {
    const ALL: &'static [Self] = &[
        SkillCategory::Frontend,
        SkillCategory::Backend,
        SkillCategory::Database,
        SkillCategory::Devops,
        SkillCategory::Cloud,
        SkillCategory::Mobile,
        SkillCategory::Design,
        SkillCategory::Testing,
        SkillCategory::DataScience,
        SkillCategory::MachineLearning,
        SkillCategory::Security,
        SkillCategory::Tools,
        SkillCategory::Languages,
        SkillCategory::SoftSkills,
        SkillCategory::Other,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            SkillCategory::Frontend => "FRONTEND",
            SkillCategory::Backend => "BACKEND",
            SkillCategory::Database => "DATABASE",
            SkillCategory::Devops => "DEVOPS",
            SkillCategory::Cloud => "CLOUD",
            SkillCategory::Mobile => "MOBILE",
            SkillCategory::Design => "DESIGN",
            SkillCategory::Testing => "TESTING",
            SkillCategory::DataScience => "DATA_SCIENCE",
            SkillCategory::MachineLearning => "MACHINE_LEARNING",
            SkillCategory::Security => "SECURITY",
            SkillCategory::Tools => "TOOLS",
            SkillCategory::Languages => "LANGUAGES",
            SkillCategory::SoftSkills => "SOFT_SKILLS",
            SkillCategory::Other => "OTHER",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SkillLevel {
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

impl ClosedEnum for SkillLevel {
    const ALL: &'static [Self] = &[
        SkillLevel::Beginner,
        SkillLevel::Intermediate,
        SkillLevel::Advanced,
        SkillLevel::Expert,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            SkillLevel::Beginner => "BEGINNER",
            SkillLevel::Intermediate => "INTERMEDIATE",
            SkillLevel::Advanced => "ADVANCED",
            SkillLevel::Expert => "EXPERT",
        }
    }
}

impl SkillLevel {
    /// Proficiency values a skill at this level may claim. Neighbouring bands overlap.
    pub fn proficiency_band(&self) -> RangeInclusive<i64> {
        match self {
            SkillLevel::Beginner => 0..=30,
            SkillLevel::Intermediate => 25..=60,
            SkillLevel::Advanced => 55..=85,
            SkillLevel::Expert => 80..=100,
        }
    }

    /// Bands a 0–100 score into a level: ≤25, ≤60, ≤85, above.
    pub fn from_score(score: f64) -> Self {
        if score <= 25.0 {
            SkillLevel::Beginner
        } else if score <= 60.0 {
            SkillLevel::Intermediate
        } else if score <= 85.0 {
            SkillLevel::Advanced
        } else {
            SkillLevel::Expert
        }
    }

    /// Proficiency assumed for a level when a document carries no score.
    pub fn default_proficiency(&self) -> i64 {
        match self {
            SkillLevel::Beginner => 20,
            SkillLevel::Intermediate => 45,
            SkillLevel::Advanced => 70,
            SkillLevel::Expert => 90,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
    #[default]
    Occasionally,
    Rarely,
}

impl ClosedEnum for Frequency {
    const ALL: &'static [Self] = &[
        Frequency::Daily,
        Frequency::Weekly,
        Frequency::Monthly,
        Frequency::Occasionally,
        Frequency::Rarely,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            Frequency::Daily => "daily",
            Frequency::Weekly => "weekly",
            Frequency::Monthly => "monthly",
            Frequency::Occasionally => "occasionally",
            Frequency::Rarely => "rarely",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    #[default]
    Public,
    Private,
}

impl ClosedEnum for Visibility {
    const ALL: &'static [Self] = &[Visibility::Public, Visibility::Private];

    fn as_str(&self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::Private => "private",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceType {
    Course,
    Book,
    Tutorial,
    Documentation,
    Video,
    Article,
    #[default]
    Other,
}

impl ClosedEnum for ResourceType {
    const ALL: &'static [Self] = &[
        ResourceType::Course,
        ResourceType::Book,
        ResourceType::Tutorial,
        ResourceType::Documentation,
        ResourceType::Video,
        ResourceType::Article,
        ResourceType::Other,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            ResourceType::Course => "course",
            ResourceType::Book => "book",
            ResourceType::Tutorial => "tutorial",
            ResourceType::Documentation => "documentation",
            ResourceType::Video => "video",
            ResourceType::Article => "article",
            ResourceType::Other => "other",
        }
    }
}
