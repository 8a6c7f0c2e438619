//! Dashboard editors
//!
//! Each editor is a small local state machine:
//! - `Idle`: list view, "add" control visible
//! - `Adding`: blank form
//! - `Editing(id)`: form pre-filled from the selected item
//!
//! Submissions go through [`Portfolio`](crate::Portfolio); a rejected
//! submission produces an alert and keeps the form as it was.

pub mod form;
pub mod hero_editor;
pub mod list_manager;
pub mod project_form;
pub mod view;

use crate::model::{Experience, ExperienceDraft, ListItem, ListName, Project, Skill, SkillDraft};
use crate::render::escape;
use crate::{Error, Result};
use std::str::FromStr;

pub use form::{EditorForm, FormFields};
pub use hero_editor::HeroEditor;
pub use list_manager::{Deletion, ListManager, Submission};
pub use project_form::ProjectForm;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorMode {
    Idle,
    Adding,
    Editing(String),
}

/// A list item the dashboard knows how to edit and summarise
pub trait Editable: ListItem {
    type Form: EditorForm<Draft = Self::Draft>;

    /// Card body shown in the dashboard list
    fn admin_card(&self) -> String;
}

impl Editable for Experience {
    type Form = ExperienceDraft;

    fn admin_card(&self) -> String {
        format!(
            "<h4>{}</h4><p class=\"company\">{}</p><p class=\"period\">{}</p><p>{}</p>",
            escape(&self.position),
            escape(&self.company),
            escape(&self.period),
            escape(&self.description)
        )
    }
}

impl Editable for Project {
    type Form = ProjectForm;

    fn admin_card(&self) -> String {
        let mut html = String::new();
        if let Some(image) = self.image.as_deref() {
            html.push_str(&format!(
                "<img src=\"{}\" alt=\"{}\" onerror=\"{}\">",
                escape(image),
                escape(&self.name),
                crate::render::sections::HIDE_ON_ERROR
            ));
        }
        html.push_str(&format!(
            "<h4>{}</h4><p>{}</p>",
            escape(&self.name),
            escape(&self.description)
        ));
        for tech in &self.technologies {
            html.push_str(&format!("<span class=\"tag\">{}</span>", escape(tech)));
        }
        html
    }
}

impl Editable for Skill {
    type Form = SkillDraft;

    fn admin_card(&self) -> String {
        format!(
            "<span class=\"icon\">{}</span><h4>{}</h4><p class=\"level\">{}</p>",
            escape(&self.icon),
            escape(&self.name),
            escape(&self.level)
        )
    }
}

/// Dashboard tabs, one per data section
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Profile,
    List(ListName),
}

impl Tab {
    pub fn all() -> [Tab; 4] {
        [
            Tab::Profile,
            Tab::List(ListName::Experiences),
            Tab::List(ListName::Projects),
            Tab::List(ListName::Skills),
        ]
    }

    pub fn slug(&self) -> &'static str {
        match self {
            Tab::Profile => "perfil",
            Tab::List(list) => list.anchor(),
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Tab::Profile => "Perfil",
            Tab::List(list) => list.title(),
        }
    }
}

impl FromStr for Tab {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "perfil" | "profile" | "hero" => Ok(Tab::Profile),
            other => other.parse().map(Tab::List),
        }
    }
}
