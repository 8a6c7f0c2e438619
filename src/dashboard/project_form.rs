//! Project editor form: technology tags and image preview state

use super::form::{input, text_area, text_input, EditorForm, FormFields};
use crate::model::ProjectDraft;
use crate::render::escape;

pub const IMAGE_WARNING: &str = "⚠️ No se puede cargar la imagen. Verifica que la URL sea correcta y que la imagen sea accesible públicamente.";

const DEFAULT_SUBMIT: &str = concat!(
    "<button type=\"submit\" tabindex=\"-1\" aria-hidden=\"true\" ",
    "style=\"position:absolute;left:-9999px\">Guardar</button>"
);

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectForm {
    draft: ProjectDraft,
    tech_input: String,
    image_error: bool,
}

impl ProjectForm {
    pub fn draft(&self) -> &ProjectDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut ProjectDraft {
        &mut self.draft
    }

    pub fn technologies(&self) -> &[String] {
        &self.draft.technologies
    }

    pub fn tech_input(&self) -> &str {
        &self.tech_input
    }

    pub fn set_tech_input(&mut self, value: impl Into<String>) {
        self.tech_input = value.into();
    }

    /// Move the trimmed technology input into the tag list.
    ///
    /// Blank input and exact duplicates are ignored and leave the input as
    /// typed; a new tag clears it.
    pub fn add_technology(&mut self) -> bool {
        let tech = self.tech_input.trim();
        if tech.is_empty() || self.draft.technologies.iter().any(|t| t == tech) {
            return false;
        }
        self.draft.technologies.push(tech.to_string());
        self.tech_input.clear();
        true
    }

    pub fn remove_technology(&mut self, tech: &str) {
        self.draft.technologies.retain(|t| t != tech);
    }

    pub fn image(&self) -> &str {
        self.draft.image.as_deref().unwrap_or("")
    }

    /// Changing the URL clears any previous load failure
    pub fn set_image(&mut self, url: impl Into<String>) {
        let url = url.into();
        self.draft.image = if url.is_empty() { None } else { Some(url) };
        self.image_error = false;
    }

    pub fn mark_image_failed(&mut self) {
        self.image_error = true;
    }

    pub fn image_failed(&self) -> bool {
        self.image_error
    }

    pub fn shows_preview(&self) -> bool {
        !self.image().trim().is_empty() && !self.image_error
    }

    pub fn shows_image_warning(&self) -> bool {
        !self.image().trim().is_empty() && self.image_error
    }

    fn render_image(&self) -> String {
        // Editing the URL drops the failure recorded for the previous one.
        let mut html = format!(
            concat!(
                "<label>URL de la Imagen (opcional)",
                "<input type=\"url\" name=\"image\" value=\"{}\" ",
                "placeholder=\"https://ejemplo.com/imagen-proyecto.jpg\" ",
                "oninput=\"this.form.elements['image_error'].value='';",
                "this.form.querySelector('.image-warning').style.display='none'\">",
                "</label>"
            ),
            escape(self.image())
        );
        // Holds the URL that failed to load, empty otherwise
        let failed_for = if self.image_error { escape(self.image()) } else { String::new() };
        html.push_str(&format!(
            "<input type=\"hidden\" name=\"image_error\" value=\"{}\">",
            failed_for
        ));

        // The browser reports load failures; flag the form and swap in the warning.
        let warning_style = if self.shows_image_warning() { "" } else { " style=\"display:none\"" };
        if self.shows_preview() {
            html.push_str(&format!(
                concat!(
                    "<div class=\"image-preview\">",
                    "<img src=\"{}\" alt=\"Preview\" onerror=\"",
                    "this.parentNode.style.display='none';",
                    "this.closest('form').elements['image_error'].value=this.getAttribute('src');",
                    "this.closest('form').querySelector('.image-warning').style.display='block'",
                    "\"></div>"
                ),
                escape(self.image())
            ));
        }
        html.push_str(&format!(
            "<div class=\"image-warning\" role=\"alert\"{}>{}</div>",
            warning_style, IMAGE_WARNING
        ));
        html
    }

    fn render_technologies(&self) -> String {
        let mut tags = String::new();
        for tech in &self.draft.technologies {
            tags.push_str(&format!(
                concat!(
                    "<span class=\"tag\">{0}",
                    "<input type=\"hidden\" name=\"technologies\" value=\"{0}\">",
                    "<button type=\"submit\" name=\"remove_tech\" value=\"{0}\" formnovalidate>×</button>",
                    "</span>"
                ),
                escape(tech)
            ));
        }
        format!(
            concat!(
                "<fieldset class=\"technologies\"><legend>Tecnologías</legend>",
                "<input type=\"text\" name=\"tech_input\" value=\"{}\" ",
                "placeholder=\"Escribe una tecnología y presiona Agregar\">",
                "<button type=\"submit\" name=\"action\" value=\"add_tech\" formnovalidate>Agregar</button>",
                "<div class=\"tags\">{}</div>",
                "</fieldset>"
            ),
            escape(&self.tech_input),
            tags
        )
    }
}

impl EditorForm for ProjectForm {
    type Draft = ProjectDraft;

    fn from_draft(draft: ProjectDraft) -> Self {
        Self {
            draft,
            tech_input: String::new(),
            image_error: false,
        }
    }

    fn to_draft(&self) -> ProjectDraft {
        self.draft.clone()
    }

    fn from_fields(fields: &FormFields) -> Self {
        let optional = |name: &str| {
            let value = fields.get(name).trim();
            if value.is_empty() { None } else { Some(value.to_string()) }
        };
        let mut form = Self {
            draft: ProjectDraft {
                name: fields.get("name").to_string(),
                description: fields.get("description").to_string(),
                technologies: fields
                    .get_all("technologies")
                    .into_iter()
                    .map(str::to_string)
                    .collect(),
                github: optional("github"),
                demo: optional("demo"),
                image: None,
            },
            tech_input: fields.get("tech_input").to_string(),
            image_error: false,
        };
        form.set_image(fields.get("image").trim());
        // A failure only sticks to the URL it was reported for
        if !form.image().is_empty() && fields.get("image_error").trim() == form.image() {
            form.mark_image_failed();
        }
        form
    }

    fn render_fields(&self) -> String {
        [
            // First submit button in the form, so Enter saves instead of adding a tag
            DEFAULT_SUBMIT.to_string(),
            text_input("name", "Nombre del Proyecto", &self.draft.name, "", true),
            text_area("description", "Descripción", &self.draft.description, true),
            self.render_image(),
            self.render_technologies(),
            input(
                "url",
                "github",
                "GitHub URL (opcional)",
                self.draft.github.as_deref().unwrap_or(""),
                "https://github.com/usuario/repo",
                false,
            ),
            input(
                "url",
                "demo",
                "Demo URL (opcional)",
                self.draft.demo.as_deref().unwrap_or(""),
                "https://proyecto-demo.com",
                false,
            ),
        ]
        .concat()
    }

    fn apply_action(&mut self, fields: &FormFields) -> bool {
        if fields.get("action") == "add_tech" {
            self.add_technology();
            return true;
        }
        if fields.has("remove_tech") {
            self.remove_technology(fields.get("remove_tech"));
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_technology_trims_and_dedups() {
        let mut form = ProjectForm::default();
        form.set_tech_input("  Rust ");
        assert!(form.add_technology());
        assert_eq!(form.technologies(), ["Rust".to_string()]);
        assert!(form.tech_input().is_empty());

        form.set_tech_input("Rust");
        assert!(!form.add_technology());
        assert_eq!(form.technologies().len(), 1);
        assert_eq!(form.tech_input(), "Rust");

        form.set_tech_input("   ");
        assert!(!form.add_technology());

        form.set_tech_input("rust");
        assert!(form.add_technology());
        assert_eq!(form.technologies().len(), 2);
    }

    #[test]
    fn test_remove_technology() {
        let mut form = ProjectForm::from_draft(ProjectDraft {
            technologies: vec!["Rust".into(), "Axum".into(), "SQLite".into()],
            ..ProjectDraft::default()
        });
        form.remove_technology("Axum");
        assert_eq!(form.technologies(), ["Rust".to_string(), "SQLite".to_string()]);
        form.remove_technology("Go");
        assert_eq!(form.technologies().len(), 2);
    }

    #[test]
    fn test_image_failure_flag() {
        let mut form = ProjectForm::default();
        assert!(!form.shows_preview());
        assert!(!form.shows_image_warning());

        form.set_image("https://img.example/a.png");
        assert!(form.shows_preview());

        form.mark_image_failed();
        assert!(!form.shows_preview());
        assert!(form.shows_image_warning());
        assert!(form.render_fields().contains(IMAGE_WARNING));

        form.set_image("https://img.example/b.png");
        assert!(!form.image_failed());
        assert!(form.shows_preview());
    }

    #[test]
    fn test_from_fields_roundtrips_tags_and_flag() {
        let fields: FormFields = vec![
            ("name", "Folio"),
            ("description", "Site"),
            ("technologies", "Rust"),
            ("technologies", "Axum"),
            ("tech_input", "SQLite"),
            ("image", "https://img.example/a.png"),
            ("image_error", "https://img.example/a.png"),
            ("github", ""),
        ]
        .into_iter()
        .collect();
        let mut form = ProjectForm::from_fields(&fields);
        assert_eq!(form.technologies(), ["Rust".to_string(), "Axum".to_string()]);
        assert_eq!(form.draft().github, None);
        assert!(form.image_failed());

        let action: FormFields = vec![("action", "add_tech")].into_iter().collect();
        assert!(form.apply_action(&action));
        assert_eq!(form.technologies().len(), 3);

        let remove: FormFields = vec![("remove_tech", "Rust")].into_iter().collect();
        assert!(form.apply_action(&remove));
        assert_eq!(form.technologies(), ["Axum".to_string(), "SQLite".to_string()]);

        assert!(!form.apply_action(&FormFields::default()));
    }

    #[test]
    fn test_failure_for_previous_image_is_dropped() {
        let fields: FormFields = vec![
            ("name", "Folio"),
            ("image", "https://ok.example/good.png"),
            ("image_error", "https://bad.example/old.png"),
        ]
        .into_iter()
        .collect();
        let form = ProjectForm::from_fields(&fields);
        assert!(!form.image_failed());
        assert!(form.shows_preview());

        let html = form.render_fields();
        assert!(html.contains("name=\"image_error\" value=\"\""));
        assert!(html.contains("oninput="));
    }

    #[test]
    fn test_enter_submits_save_not_add_tech() {
        let html = ProjectForm::default().render_fields();
        let first_submit = html.find("type=\"submit\"").unwrap();
        let add_tech = html.find("value=\"add_tech\"").unwrap();
        assert!(first_submit < add_tech);
        let tag_end = first_submit + html[first_submit..].find('>').unwrap();
        assert!(!html[first_submit..tag_end].contains("name=\"action\""));
    }
}
