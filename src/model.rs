//! Portfolio document types
//!
//! The whole site is one document with four fields:
//! - `hero`: the singleton profile, overwritten wholesale
//! - `experiences`: ordered list of positions held
//! - `projects`: ordered list of showcased projects
//! - `skills`: ordered list of skills with a level
//!
//! List items carry a string `id`; hero has none since only one exists.

use crate::{Error, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The single document holding everything the site displays.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PortfolioRecord {
    #[serde(default)]
    pub hero: HeroData,
    #[serde(default)]
    pub experiences: Vec<Experience>,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub skills: Vec<Skill>,
}

impl PortfolioRecord {
    /// Largest numeric item id across all lists; non-numeric ids are skipped
    pub fn max_numeric_id(&self) -> Option<u64> {
        let experiences = self.experiences.iter().map(|e| e.id.as_str());
        let projects = self.projects.iter().map(|p| p.id.as_str());
        let skills = self.skills.iter().map(|s| s.id.as_str());
        experiences
            .chain(projects)
            .chain(skills)
            .filter_map(|id| id.parse::<u64>().ok())
            .max()
    }
}

/// Profile shown in the hero banner and contact footer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeroData {
    pub name: String,
    pub title: String,
    pub bio: String,
    pub email: String,
    pub github: String,
    pub linkedin: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Experience {
    pub id: String,
    pub position: String,
    pub company: String,
    pub period: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperienceDraft {
    pub position: String,
    pub company: String,
    pub period: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub demo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectDraft {
    pub name: String,
    pub description: String,
    pub technologies: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub demo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub icon: String,
    pub level: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillDraft {
    pub name: String,
    pub icon: String,
    pub level: String,
}

/// The three array fields of the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListName {
    Experiences,
    Projects,
    Skills,
}

impl ListName {
    /// Field name inside the document
    pub fn field(&self) -> &'static str {
        match self {
            ListName::Experiences => "experiences",
            ListName::Projects => "projects",
            ListName::Skills => "skills",
        }
    }

    /// In-page anchor and dashboard tab slug
    pub fn anchor(&self) -> &'static str {
        match self {
            ListName::Experiences => "experiencia",
            ListName::Projects => "proyectos",
            ListName::Skills => "habilidades",
        }
    }

    /// Singular noun used in alerts and form titles
    pub fn noun(&self) -> &'static str {
        match self {
            ListName::Experiences => "experiencia",
            ListName::Projects => "proyecto",
            ListName::Skills => "habilidad",
        }
    }

    /// Heading shown for the section
    pub fn title(&self) -> &'static str {
        match self {
            ListName::Experiences => "Experiencia",
            ListName::Projects => "Proyectos",
            ListName::Skills => "Habilidades",
        }
    }

    pub fn all() -> &'static [ListName] {
        &[ListName::Experiences, ListName::Projects, ListName::Skills]
    }
}

impl FromStr for ListName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "experiences" | "experience" | "experiencia" | "experiencias" => Ok(ListName::Experiences),
            "projects" | "project" | "proyectos" | "proyecto" => Ok(ListName::Projects),
            "skills" | "skill" | "habilidades" | "habilidad" => Ok(ListName::Skills),
            _ => Err(Error::UnknownList(s.to_string())),
        }
    }
}

impl std::fmt::Display for ListName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.field())
    }
}

/// An element of one of the document's lists.
///
/// Ties an item type to its id-less draft and to the field it lives in, so
/// the data access layer and the dashboard can be written once for all three
/// lists.
pub trait ListItem: Clone + PartialEq + Serialize + DeserializeOwned + Send + 'static {
    type Draft: Clone + Default + PartialEq + Serialize + DeserializeOwned + Send + 'static;

    const LIST: ListName;

    fn id(&self) -> &str;

    fn from_draft(id: String, draft: Self::Draft) -> Self;

    fn to_draft(&self) -> Self::Draft;

    /// Pick this item's list out of a fetched record
    fn list_of(record: &PortfolioRecord) -> &[Self];

    /// Short label used in confirmation prompts and CLI listings
    fn label(&self) -> String;
}

impl ListItem for Experience {
    type Draft = ExperienceDraft;
    const LIST: ListName = ListName::Experiences;

    fn id(&self) -> &str {
        &self.id
    }

    fn from_draft(id: String, draft: ExperienceDraft) -> Self {
        Self {
            id,
            position: draft.position,
            company: draft.company,
            period: draft.period,
            description: draft.description,
        }
    }

    fn to_draft(&self) -> ExperienceDraft {
        ExperienceDraft {
            position: self.position.clone(),
            company: self.company.clone(),
            period: self.period.clone(),
            description: self.description.clone(),
        }
    }

    fn list_of(record: &PortfolioRecord) -> &[Self] {
        &record.experiences
    }

    fn label(&self) -> String {
        format!("{} @ {}", self.position, self.company)
    }
}

impl ListItem for Project {
    type Draft = ProjectDraft;
    const LIST: ListName = ListName::Projects;

    fn id(&self) -> &str {
        &self.id
    }

    fn from_draft(id: String, draft: ProjectDraft) -> Self {
        Self {
            id,
            name: draft.name,
            description: draft.description,
            technologies: draft.technologies,
            github: non_blank(draft.github),
            demo: non_blank(draft.demo),
            image: non_blank(draft.image),
        }
    }

    fn to_draft(&self) -> ProjectDraft {
        ProjectDraft {
            name: self.name.clone(),
            description: self.description.clone(),
            technologies: self.technologies.clone(),
            github: self.github.clone(),
            demo: self.demo.clone(),
            image: self.image.clone(),
        }
    }

    fn list_of(record: &PortfolioRecord) -> &[Self] {
        &record.projects
    }

    fn label(&self) -> String {
        self.name.clone()
    }
}

impl ListItem for Skill {
    type Draft = SkillDraft;
    const LIST: ListName = ListName::Skills;

    fn id(&self) -> &str {
        &self.id
    }

    fn from_draft(id: String, draft: SkillDraft) -> Self {
        Self {
            id,
            name: draft.name,
            icon: draft.icon,
            level: draft.level,
        }
    }

    fn to_draft(&self) -> SkillDraft {
        SkillDraft {
            name: self.name.clone(),
            icon: self.icon.clone(),
            level: self.level.clone(),
        }
    }

    fn list_of(record: &PortfolioRecord) -> &[Self] {
        &record.skills
    }

    fn label(&self) -> String {
        format!("{} ({})", self.name, self.level)
    }
}

/// Optional URL fields are stored absent rather than as empty strings.
fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_name_roundtrip() {
        for list in ListName::all() {
            let parsed: ListName = list.field().parse().unwrap();
            assert_eq!(*list, parsed);
            let parsed: ListName = list.anchor().parse().unwrap();
            assert_eq!(*list, parsed);
        }
    }

    #[test]
    fn test_unknown_list_name() {
        assert!(matches!(
            ListName::from_str("contacto"),
            Err(Error::UnknownList(_))
        ));
    }

    #[test]
    fn test_record_missing_lists_default_to_empty() {
        let json = r#"{"hero":{"name":"Ana","title":"Dev"}}"#;
        let record: PortfolioRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.hero.name, "Ana");
        assert!(record.hero.bio.is_empty());
        assert!(record.experiences.is_empty());
        assert!(record.projects.is_empty());
        assert!(record.skills.is_empty());
    }

    #[test]
    fn test_max_numeric_id_spans_lists() {
        let json = r#"{
            "experiences": [{"id": "1700000000000", "position": "", "company": "", "period": "", "description": ""}],
            "projects": [{"id": "legacy-a", "name": "", "description": ""}],
            "skills": [{"id": "1700000000500", "name": "Rust", "level": ""}]
        }"#;
        let record: PortfolioRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.max_numeric_id(), Some(1_700_000_000_500));
        assert_eq!(PortfolioRecord::default().max_numeric_id(), None);
    }

    #[test]
    fn test_project_blank_urls_are_dropped() {
        let draft = ProjectDraft {
            name: "Folio".into(),
            description: "Site".into(),
            technologies: vec!["Rust".into()],
            github: Some("  ".into()),
            demo: Some("https://demo.example".into()),
            image: None,
        };
        let project = Project::from_draft("42".into(), draft);
        assert_eq!(project.github, None);
        assert_eq!(project.demo.as_deref(), Some("https://demo.example"));

        let json = serde_json::to_value(&project).unwrap();
        assert!(json.get("github").is_none());
        assert!(json.get("image").is_none());
    }

    #[test]
    fn test_draft_conversion_keeps_fields() {
        let skill = Skill {
            id: "1".into(),
            name: "TypeScript".into(),
            icon: "🟦".into(),
            level: "Avanzado".into(),
        };
        let rebuilt = Skill::from_draft("1".into(), skill.to_draft());
        assert_eq!(rebuilt, skill);
    }
}
