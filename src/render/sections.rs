use super::{escape, or_default};
use crate::model::{Experience, HeroData, Project, Skill};

pub const NO_EXPERIENCES: &str = "No hay experiencias disponibles";
pub const NO_PROJECTS: &str = "No hay proyectos disponibles";
pub const NO_SKILLS: &str = "No hay habilidades disponibles";

const DEFAULT_NAME: &str = "Tu Nombre";
const DEFAULT_TITLE: &str = "Desarrollador Web Full Stack";
const DEFAULT_BIO: &str =
    "Apasionado por crear experiencias web excepcionales y soluciones innovadoras.";

/// Hides a broken image without touching the rest of the card
pub(crate) const HIDE_ON_ERROR: &str = "this.style.display='none'";

pub fn hero_section(hero: &HeroData) -> String {
    format!(
        concat!(
            "<section id=\"inicio\" class=\"hero\">",
            "<h1>{name}</h1>",
            "<h2>{title}</h2>",
            "<p class=\"bio\">{bio}</p>",
            "<div class=\"actions\">",
            "<a class=\"btn-primary\" href=\"#proyectos\">Ver Proyectos</a>",
            "<a class=\"btn-secondary\" href=\"#contacto\">Contáctame</a>",
            "</div>",
            "<div class=\"social\">",
            "<a href=\"{github}\" target=\"_blank\" rel=\"noopener noreferrer\">GitHub</a>",
            "<a href=\"{linkedin}\" target=\"_blank\" rel=\"noopener noreferrer\">LinkedIn</a>",
            "<a href=\"mailto:{email}\">Email</a>",
            "</div>",
            "</section>"
        ),
        name = escape(or_default(&hero.name, DEFAULT_NAME)),
        title = escape(or_default(&hero.title, DEFAULT_TITLE)),
        bio = escape(or_default(&hero.bio, DEFAULT_BIO)),
        github = escape(or_default(&hero.github, "#")),
        linkedin = escape(or_default(&hero.linkedin, "#")),
        email = escape(hero.email.trim()),
    )
}

pub fn experience_section(experiences: &[Experience]) -> String {
    let body = if experiences.is_empty() {
        placeholder(NO_EXPERIENCES)
    } else {
        experiences.iter().map(experience_card).collect()
    };
    section("experiencia", "Experiencia Profesional", "timeline", &body)
}

fn experience_card(exp: &Experience) -> String {
    format!(
        concat!(
            "<article class=\"experience-card\">",
            "<h3>{}</h3>",
            "<p class=\"company\">{}</p>",
            "<p class=\"period\">{}</p>",
            "<p>{}</p>",
            "</article>"
        ),
        escape(&exp.position),
        escape(&exp.company),
        escape(&exp.period),
        escape(&exp.description),
    )
}

pub fn projects_section(projects: &[Project]) -> String {
    let body = if projects.is_empty() {
        placeholder(NO_PROJECTS)
    } else {
        projects.iter().map(project_card).collect()
    };
    section("proyectos", "Proyectos Destacados", "grid", &body)
}

fn project_card(project: &Project) -> String {
    let mut card = String::from("<article class=\"project-card\">");

    if let Some(image) = project.image.as_deref().filter(|s| !s.trim().is_empty()) {
        card.push_str(&format!(
            "<img src=\"{}\" alt=\"{}\" loading=\"lazy\" onerror=\"{}\">",
            escape(image),
            escape(&project.name),
            HIDE_ON_ERROR
        ));
    }

    card.push_str(&format!(
        "<h3>{}</h3><p>{}</p>",
        escape(&project.name),
        escape(&project.description)
    ));

    if !project.technologies.is_empty() {
        card.push_str("<div class=\"technologies\"><h4>Tecnologías:</h4>");
        for tech in &project.technologies {
            card.push_str(&format!("<span class=\"tag\">{}</span>", escape(tech)));
        }
        card.push_str("</div>");
    }

    let mut links = String::new();
    if let Some(github) = project.github.as_deref().filter(|s| !s.trim().is_empty()) {
        links.push_str(&format!(
            "<a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">Código</a>",
            escape(github)
        ));
    }
    if let Some(demo) = project.demo.as_deref().filter(|s| !s.trim().is_empty()) {
        links.push_str(&format!(
            "<a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">Demo</a>",
            escape(demo)
        ));
    }
    if !links.is_empty() {
        card.push_str(&format!("<div class=\"links\">{}</div>", links));
    }

    card.push_str("</article>");
    card
}

pub fn skills_section(skills: &[Skill]) -> String {
    let body = if skills.is_empty() {
        placeholder(NO_SKILLS)
    } else {
        skills.iter().map(skill_card).collect()
    };
    section("habilidades", "Habilidades", "grid", &body)
}

fn skill_card(skill: &Skill) -> String {
    let icon = or_default(&skill.icon, "💻");
    format!(
        concat!(
            "<div class=\"skill-card\">",
            "<span class=\"icon\">{}</span>",
            "<h3>{}</h3>",
            "<p class=\"level\">{}</p>",
            "</div>"
        ),
        escape(icon),
        escape(&skill.name),
        escape(&skill.level),
    )
}

fn section(id: &str, heading: &str, class: &str, body: &str) -> String {
    format!(
        "<section id=\"{}\"><h2 class=\"section-title\">{}</h2><div class=\"{}\">{}</div></section>",
        id, heading, class, body
    )
}

fn placeholder(text: &str) -> String {
    format!("<p class=\"empty\">{}</p>", text)
}
