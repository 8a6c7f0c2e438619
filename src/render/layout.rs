use super::escape;

/// In-page anchors, in navigation order
pub const NAV_ANCHORS: [&str; 5] = ["inicio", "experiencia", "proyectos", "habilidades", "contacto"];

const NAV_LABELS: [&str; 5] = ["Inicio", "Experiencia", "Proyectos", "Habilidades", "Contacto"];

pub fn navbar() -> String {
    let mut links = String::new();
    for (anchor, label) in NAV_ANCHORS.iter().zip(NAV_LABELS) {
        links.push_str(&format!("<a href=\"#{}\">{}</a>", anchor, label));
    }
    format!(
        "<nav class=\"navbar\"><a class=\"brand\" href=\"/\">Mi Portafolio</a><div class=\"nav-links\">{}</div></nav>",
        links
    )
}

/// Contact footer; the mail link falls back to an empty `mailto:`
pub fn footer(email: &str, year: i32) -> String {
    format!(
        concat!(
            "<footer id=\"contacto\" class=\"footer\">",
            "<h2>¿Trabajamos juntos?</h2>",
            "<p>Estoy disponible para nuevos proyectos y oportunidades</p>",
            "<a class=\"btn-primary\" href=\"mailto:{}\">Enviar Mensaje</a>",
            "<div class=\"copyright\">© {} Mi Portafolio.</div>",
            "</footer>"
        ),
        escape(email.trim()),
        year
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_footer_escapes_email() {
        let html = footer("a\"b@example.com", 2025);
        assert!(html.contains("mailto:a&quot;b@example.com"));
        assert!(html.contains("© 2025"));
    }
}
