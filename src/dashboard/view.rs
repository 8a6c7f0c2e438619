//! Dashboard HTML

use super::{EditorForm, EditorMode, Editable, HeroEditor, ListManager, Tab};
use super::form::{input, text_area, text_input};
use crate::model::ListName;
use crate::render::{document, escape};
use std::time::Instant;

/// Shared dashboard shell: header, tab navigation and the active panel
pub fn dashboard_page(active: Tab, panel: &str) -> String {
    let mut tabs = String::new();
    for tab in Tab::all() {
        let class = if tab == active { " class=\"active\"" } else { "" };
        tabs.push_str(&format!(
            "<a href=\"/admin/{}\"{}>{}</a>",
            tab.slug(),
            class,
            tab.title()
        ));
    }

    let body = format!(
        concat!(
            "<header class=\"dashboard-header\">",
            "<h1>Panel de Administración</h1>",
            "<a href=\"/\">Ver Portafolio</a>",
            "<form method=\"post\" action=\"/logout\"><button type=\"submit\">Cerrar Sesión</button></form>",
            "</header>",
            "<div class=\"dashboard\">",
            "<nav class=\"tabs\">{}</nav>",
            "<section class=\"panel\"><h2>{}</h2>{}</section>",
            "</div>"
        ),
        tabs,
        active.title(),
        panel
    );
    document("Panel de Administración", &body)
}

pub fn hero_panel(editor: &HeroEditor, now: Instant) -> String {
    let mut html = String::new();
    if editor.banner_visible(now) {
        html.push_str(concat!(
            "<div class=\"success\" id=\"saved-banner\">✓ Cambios guardados exitosamente</div>",
            "<script>setTimeout(function(){var b=document.getElementById('saved-banner');",
            "if(b){b.remove();}},3000);</script>"
        ));
    }
    if let Some(alert) = editor.alert() {
        html.push_str(&alert_box(alert));
    }

    let hero = editor.form();
    // The browser flips the button to the saving state while the POST is in flight.
    html.push_str(concat!(
        "<form method=\"post\" action=\"/admin/perfil\" class=\"editor\" ",
        "onsubmit=\"var b=this.querySelector('button[type=submit]');",
        "b.disabled=true;b.textContent='Guardando...';\">"
    ));
    html.push_str(&text_input("name", "Nombre", &hero.name, "", true));
    html.push_str(&text_input("title", "Título Profesional", &hero.title, "", true));
    html.push_str(&text_area("bio", "Biografía", &hero.bio, true));
    html.push_str(&input("email", "email", "Email", &hero.email, "", true));
    html.push_str(&input("url", "github", "GitHub", &hero.github, "https://github.com/usuario", false));
    html.push_str(&input(
        "url",
        "linkedin",
        "LinkedIn",
        &hero.linkedin,
        "https://linkedin.com/in/usuario",
        false,
    ));
    html.push_str(&format!(
        "<button type=\"submit\"{}>{}</button></form>",
        if editor.is_saving() { " disabled" } else { "" },
        if editor.is_saving() { "Guardando..." } else { "Guardar Cambios" }
    ));
    html
}

pub fn list_panel<T: Editable>(manager: &ListManager<T>) -> String {
    let list = T::LIST;
    let slug = list.anchor();
    let mut html = String::new();

    if let Some(alert) = manager.alert() {
        html.push_str(&alert_box(alert));
    }

    if manager.shows_add_control() {
        html.push_str(&format!(
            "<a class=\"btn-primary\" href=\"/admin/{}/new\">+ {}</a>",
            slug,
            add_label(list)
        ));
    }

    let form_target = match manager.mode() {
        EditorMode::Idle => None,
        EditorMode::Adding => Some((format!("/admin/{}", slug), format!("Nuevo {}", capitalize(list.noun())))),
        EditorMode::Editing(id) => Some((
            format!("/admin/{}/{}", slug, escape(id)),
            format!("Editar {}", capitalize(list.noun())),
        )),
    };
    if let Some((action, heading)) = form_target {
        html.push_str(&format!(
            concat!(
                "<form method=\"post\" action=\"{}\" class=\"editor\">",
                "<h3>{}</h3>{}",
                "<button type=\"submit\">Guardar</button>",
                "<a class=\"btn-secondary\" href=\"/admin/{}\">Cancelar</a>",
                "</form>"
            ),
            action,
            heading,
            manager.form().render_fields(),
            slug
        ));
    }

    html.push_str("<div class=\"items\">");
    for item in manager.items() {
        let id = escape(item.id());
        html.push_str(&format!(
            concat!(
                "<article class=\"admin-card\">{}",
                "<div class=\"card-actions\">",
                "<a href=\"/admin/{slug}/{id}/edit\" title=\"Editar\">Editar</a>",
                "<a href=\"/admin/{slug}/{id}/delete\" title=\"Eliminar\">Eliminar</a>",
                "</div></article>"
            ),
            item.admin_card(),
            slug = slug,
            id = id
        ));
    }
    if manager.items().is_empty() {
        html.push_str(&format!("<p class=\"empty\">{}</p>", empty_admin_list(list)));
    }
    html.push_str("</div>");
    html
}

/// Confirmation step before a delete is sent
pub fn confirm_delete<T: Editable>(item: &T) -> String {
    let list = T::LIST;
    format!(
        concat!(
            "<form method=\"post\" action=\"/admin/{}/{}/delete\" class=\"confirm\">",
            "<p>{}</p><p><strong>{}</strong></p>",
            "<input type=\"hidden\" name=\"confirm\" value=\"yes\">",
            "<button type=\"submit\">Eliminar</button>",
            "<a class=\"btn-secondary\" href=\"/admin/{}\">Cancelar</a>",
            "</form>"
        ),
        list.anchor(),
        escape(item.id()),
        confirm_prompt(list),
        escape(&item.label()),
        list.anchor()
    )
}

pub fn login_page(error: Option<&str>) -> String {
    let error = error.map(alert_box).unwrap_or_default();
    let body = format!(
        concat!(
            "<main class=\"login\"><h1>Acceso de Administrador</h1>{}",
            "<form method=\"post\" action=\"/login\">",
            "<label>Clave<input type=\"password\" name=\"token\" required autofocus></label>",
            "<button type=\"submit\">Entrar</button>",
            "</form></main>"
        ),
        error
    );
    document("Acceso", &body)
}

/// Visible alert plus a blocking browser alert
pub fn alert_box(message: &str) -> String {
    let js = serde_json::to_string(message)
        .unwrap_or_else(|_| "\"Error\"".to_string())
        .replace("</", "<\\/");
    format!(
        "<div class=\"alert\" role=\"alert\">{}</div><script>alert({});</script>",
        escape(message),
        js
    )
}

pub fn confirm_prompt(list: ListName) -> &'static str {
    match list {
        ListName::Experiences => "¿Estás seguro de eliminar esta experiencia?",
        ListName::Projects => "¿Estás seguro de eliminar este proyecto?",
        ListName::Skills => "¿Estás seguro de eliminar esta habilidad?",
    }
}

pub fn empty_admin_list(list: ListName) -> &'static str {
    match list {
        ListName::Experiences => "No hay experiencias agregadas",
        ListName::Projects => "No hay proyectos agregados",
        ListName::Skills => "No hay habilidades agregadas",
    }
}

fn add_label(list: ListName) -> &'static str {
    match list {
        ListName::Experiences => "Nueva Experiencia",
        ListName::Projects => "Nuevo Proyecto",
        ListName::Skills => "Nueva Habilidad",
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Project, Skill};

    fn skill(id: &str) -> Skill {
        Skill {
            id: id.into(),
            name: "Rust".into(),
            icon: "🦀".into(),
            level: "Avanzado".into(),
        }
    }

    #[test]
    fn test_idle_panel_shows_add_control_and_cards() {
        let manager = ListManager::new(vec![skill("1")]);
        let html = list_panel(&manager);
        assert!(html.contains("href=\"/admin/habilidades/new\""));
        assert!(html.contains("href=\"/admin/habilidades/1/edit\""));
        assert!(!html.contains("<form"));
    }

    #[test]
    fn test_editing_panel_hides_add_control() {
        let mut manager = ListManager::new(vec![skill("1")]);
        manager.start_editing("1");
        let html = list_panel(&manager);
        assert!(!html.contains("/admin/habilidades/new"));
        assert!(html.contains("action=\"/admin/habilidades/1\""));
        assert!(html.contains("Editar Habilidad"));
    }

    #[test]
    fn test_empty_project_list_placeholder() {
        let manager: ListManager<Project> = ListManager::new(Vec::new());
        let html = list_panel(&manager);
        assert!(html.contains("No hay proyectos agregados"));
        assert_eq!(html.matches("admin-card").count(), 0);
    }

    #[test]
    fn test_confirm_page_posts_confirmation() {
        let html = confirm_delete(&skill("7"));
        assert!(html.contains("action=\"/admin/habilidades/7/delete\""));
        assert!(html.contains("name=\"confirm\" value=\"yes\""));
        assert!(html.contains(confirm_prompt(ListName::Skills)));
    }

    #[test]
    fn test_alert_box_escapes_script_close() {
        let html = alert_box("</script><b>");
        assert!(html.contains("&lt;/script&gt;"));
        assert!(html.contains("alert(\"<\\/script><b>\")"));
    }

    #[test]
    fn test_hero_panel_disables_submit_while_saving() {
        let mut editor = HeroEditor::new(None);
        editor.begin_save();
        let html = hero_panel(&editor, Instant::now());
        assert!(html.contains("<button type=\"submit\" disabled>"));
    }

    #[test]
    fn test_hero_form_disables_submit_on_submit() {
        let editor = HeroEditor::new(None);
        let html = hero_panel(&editor, Instant::now());
        assert!(html.contains("<button type=\"submit\">Guardar Cambios</button>"));
        let form_start = html.find("action=\"/admin/perfil\"").unwrap();
        let form_tag = &html[form_start..form_start + html[form_start..].find('>').unwrap()];
        assert!(form_tag.contains("onsubmit="));
        assert!(form_tag.contains("b.disabled=true"));
        assert!(form_tag.contains("Guardando..."));
    }
}
