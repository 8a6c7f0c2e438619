//! Server-side HTML rendering of the public page
//!
//! Each section is a pure function over its slice of the record. Lists
//! render one card per item in stored order, or a fixed placeholder when
//! empty. All interpolated text goes through [`escape`].

pub mod layout;
pub mod sections;

use crate::model::PortfolioRecord;

pub use layout::{footer, navbar, NAV_ANCHORS};
pub use sections::{
    experience_section, hero_section, projects_section, skills_section, NO_EXPERIENCES,
    NO_PROJECTS, NO_SKILLS,
};

/// Render the full public page.
///
/// A missing record renders every section with its defaults.
pub fn home_page(record: Option<&PortfolioRecord>, year: i32) -> String {
    let fallback = PortfolioRecord::default();
    let record = record.unwrap_or(&fallback);

    let mut body = String::new();
    body.push_str(&navbar());
    body.push_str("<main>");
    body.push_str(&hero_section(&record.hero));
    body.push_str(&experience_section(&record.experiences));
    body.push_str(&projects_section(&record.projects));
    body.push_str(&skills_section(&record.skills));
    body.push_str("</main>");
    body.push_str(&footer(&record.hero.email, year));

    let title = if record.hero.name.trim().is_empty() {
        "Mi Portafolio".to_string()
    } else {
        format!("{} | Portafolio", record.hero.name)
    };
    document(&title, &body)
}

/// Wrap a body fragment in the shared HTML shell
pub fn document(title: &str, body: &str) -> String {
    format!(
        concat!(
            "<!DOCTYPE html>",
            "<html lang=\"es\">",
            "<head>",
            "<meta charset=\"utf-8\">",
            "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">",
            "<title>{}</title>",
            "<link rel=\"stylesheet\" href=\"/static/site.css\">",
            "</head>",
            "<body>{}</body>",
            "</html>"
        ),
        escape(title),
        body
    )
}

/// Escape text for use in HTML element content and quoted attributes
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Use `value` unless it is blank
pub(crate) fn or_default<'a>(value: &'a str, default: &'a str) -> &'a str {
    if value.trim().is_empty() { default } else { value }
}
