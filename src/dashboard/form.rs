//! Editor forms and the posted fields that fill them

use crate::model::{ExperienceDraft, HeroData, SkillDraft};
use crate::render::escape;

/// Posted `application/x-www-form-urlencoded` pairs, repeated keys kept
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields(Vec<(String, String)>);

impl FormFields {
    pub fn new(pairs: Vec<(String, String)>) -> Self {
        Self(pairs)
    }

    /// First value posted under `name`, or an empty string
    pub fn get(&self, name: &str) -> &str {
        self.0
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
            .unwrap_or("")
    }

    /// Every value posted under `name`, in posted order
    pub fn get_all(&self, name: &str) -> Vec<&str> {
        self.0
            .iter()
            .filter(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    pub fn has(&self, name: &str) -> bool {
        self.0.iter().any(|(k, _)| k == name)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormFields {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Local form state behind a list editor.
///
/// Most forms are just the item's draft; the project form also tracks a
/// technology input and an image failure flag.
pub trait EditorForm: Clone + Default + Send {
    type Draft;

    fn from_draft(draft: Self::Draft) -> Self;

    fn to_draft(&self) -> Self::Draft;

    fn from_fields(fields: &FormFields) -> Self;

    /// Input elements for this form, pre-filled with current values
    fn render_fields(&self) -> String;

    /// Apply an in-form action (no store call). Returns `true` when the post
    /// was such an action rather than a submission.
    fn apply_action(&mut self, _fields: &FormFields) -> bool {
        false
    }
}

impl EditorForm for ExperienceDraft {
    type Draft = ExperienceDraft;

    fn from_draft(draft: ExperienceDraft) -> Self {
        draft
    }

    fn to_draft(&self) -> ExperienceDraft {
        self.clone()
    }

    fn from_fields(fields: &FormFields) -> Self {
        Self {
            position: fields.get("position").to_string(),
            company: fields.get("company").to_string(),
            period: fields.get("period").to_string(),
            description: fields.get("description").to_string(),
        }
    }

    fn render_fields(&self) -> String {
        [
            text_input("position", "Cargo", &self.position, "", true),
            text_input("company", "Empresa", &self.company, "", true),
            text_input("period", "Periodo", &self.period, "Ej: 2020 - 2023", true),
            text_area("description", "Descripción", &self.description, true),
        ]
        .concat()
    }
}

impl EditorForm for SkillDraft {
    type Draft = SkillDraft;

    fn from_draft(draft: SkillDraft) -> Self {
        draft
    }

    fn to_draft(&self) -> SkillDraft {
        self.clone()
    }

    fn from_fields(fields: &FormFields) -> Self {
        Self {
            name: fields.get("name").to_string(),
            icon: fields.get("icon").to_string(),
            level: fields.get("level").to_string(),
        }
    }

    fn render_fields(&self) -> String {
        let mut options = String::new();
        for level in SKILL_LEVELS {
            let selected = if self.level == level { " selected" } else { "" };
            options.push_str(&format!("<option value=\"{0}\"{1}>{0}</option>", level, selected));
        }
        [
            text_input("name", "Nombre", &self.name, "Ej: JavaScript", true),
            text_input("icon", "Icono (emoji)", &self.icon, "Ej: 🟨", false),
            format!(
                "<label>Nivel<select name=\"level\" required>{}</select></label>",
                options
            ),
        ]
        .concat()
    }
}

pub const SKILL_LEVELS: [&str; 4] = ["Básico", "Intermedio", "Avanzado", "Experto"];

/// Hero fields are posted the same way but hero is not a list item
pub fn hero_from_fields(fields: &FormFields) -> HeroData {
    HeroData {
        name: fields.get("name").to_string(),
        title: fields.get("title").to_string(),
        bio: fields.get("bio").to_string(),
        email: fields.get("email").to_string(),
        github: fields.get("github").to_string(),
        linkedin: fields.get("linkedin").to_string(),
    }
}

pub(crate) fn text_input(name: &str, label: &str, value: &str, placeholder: &str, required: bool) -> String {
    input("text", name, label, value, placeholder, required)
}

pub(crate) fn input(kind: &str, name: &str, label: &str, value: &str, placeholder: &str, required: bool) -> String {
    format!(
        "<label>{}<input type=\"{}\" name=\"{}\" value=\"{}\" placeholder=\"{}\"{}></label>",
        label,
        kind,
        name,
        escape(value),
        escape(placeholder),
        if required { " required" } else { "" }
    )
}

pub(crate) fn text_area(name: &str, label: &str, value: &str, required: bool) -> String {
    format!(
        "<label>{}<textarea name=\"{}\" rows=\"3\"{}>{}</textarea></label>",
        label,
        name,
        if required { " required" } else { "" },
        escape(value)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_fields_lookup() {
        let fields: FormFields = vec![("a", "1"), ("t", "x"), ("t", "y")].into_iter().collect();
        assert_eq!(fields.get("a"), "1");
        assert_eq!(fields.get("missing"), "");
        assert_eq!(fields.get_all("t"), vec!["x", "y"]);
        assert!(fields.has("t"));
        assert!(!fields.has("z"));
    }

    #[test]
    fn test_experience_form_from_fields() {
        let fields: FormFields = vec![
            ("position", "Dev"),
            ("company", "Acme"),
            ("period", "2020 - 2023"),
            ("description", "Stuff"),
        ]
        .into_iter()
        .collect();
        let draft = ExperienceDraft::from_fields(&fields);
        assert_eq!(draft.position, "Dev");
        assert_eq!(draft.period, "2020 - 2023");
    }

    #[test]
    fn test_skill_form_marks_selected_level() {
        let draft = SkillDraft {
            name: "Go".into(),
            icon: "🐹".into(),
            level: "Básico".into(),
        };
        let html = draft.render_fields();
        assert!(html.contains("<option value=\"Básico\" selected>"));
        assert!(html.contains("value=\"Go\""));
    }

    #[test]
    fn test_rendered_values_are_escaped() {
        let draft = ExperienceDraft {
            position: "\"><script>".into(),
            ..ExperienceDraft::default()
        };
        let html = draft.render_fields();
        assert!(!html.contains("<script>"));
    }
}
