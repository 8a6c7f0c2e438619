//! Admin gate
//!
//! The dashboard and the admin API require a pre-shared token, presented
//! either as `Authorization: Bearer <token>` or through the session cookie
//! set by `/login`. Comparisons go through blake3 digests, whose equality
//! is constant time.

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, StatusCode},
    middleware::Next,
    response::{Html, IntoResponse, Redirect, Response},
    Form, Json,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::dashboard::view::login_page;
use crate::server::routes::ErrorResponse;
use crate::server::AppState;

pub const SESSION_COOKIE: &str = "folio_admin";

pub struct AdminGate {
    token_hash: Option<blake3::Hash>,
}

impl AdminGate {
    /// A gate with no token refuses everyone
    pub fn new(token: Option<&str>) -> Self {
        Self {
            token_hash: token.map(|t| blake3::hash(t.as_bytes())),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.token_hash.is_some()
    }

    pub fn verify_token(&self, candidate: &str) -> bool {
        match self.token_hash {
            Some(expected) => blake3::hash(candidate.as_bytes()) == expected,
            None => false,
        }
    }

    /// Cookie value proving a successful login
    pub fn session_value(&self) -> Option<String> {
        self.token_hash.map(|h| h.to_hex().to_string())
    }

    pub fn verify_session(&self, value: &str) -> bool {
        match (self.token_hash, blake3::Hash::from_hex(value)) {
            (Some(expected), Ok(presented)) => presented == expected,
            _ => false,
        }
    }

    pub fn authorize(&self, headers: &HeaderMap) -> bool {
        if let Some(token) = bearer_token(headers) {
            return self.verify_token(token);
        }
        cookie_value(headers, SESSION_COOKIE).is_some_and(|v| self.verify_session(&v))
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
}

fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(k, _)| *k == name)
        .map(|(_, v)| v.to_string())
}

/// Middleware guarding admin routes
pub async fn require_admin(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    if !state.gate.is_enabled() {
        return (StatusCode::FORBIDDEN, "admin access is disabled").into_response();
    }
    if state.gate.authorize(request.headers()) {
        return next.run(request).await;
    }

    tracing::debug!("Rejected unauthenticated request to {}", request.uri().path());
    if request.uri().path().starts_with("/api/") {
        (
            StatusCode::UNAUTHORIZED,
            Json(ErrorResponse { error: "unauthorized".to_string() }),
        )
            .into_response()
    } else {
        Redirect::to("/login").into_response()
    }
}

#[derive(Deserialize)]
pub struct LoginForm {
    pub token: String,
}

pub async fn login_form() -> Html<String> {
    Html(login_page(None))
}

pub async fn login(State(state): State<Arc<AppState>>, Form(form): Form<LoginForm>) -> Response {
    match state.gate.session_value() {
        Some(session) if state.gate.verify_token(form.token.trim()) => {
            tracing::info!("Admin login");
            let cookie = format!(
                "{}={}; Path=/; HttpOnly; SameSite=Strict",
                SESSION_COOKIE, session
            );
            ([(header::SET_COOKIE, cookie)], Redirect::to("/admin")).into_response()
        }
        _ => {
            tracing::info!("Rejected admin login");
            (
                StatusCode::UNAUTHORIZED,
                Html(login_page(Some("Clave incorrecta"))),
            )
                .into_response()
        }
    }
}

pub async fn logout() -> Response {
    let cookie = format!("{}=; Path=/; HttpOnly; SameSite=Strict; Max-Age=0", SESSION_COOKIE);
    ([(header::SET_COOKIE, cookie)], Redirect::to("/")).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_disabled_gate_refuses_everything() {
        let gate = AdminGate::new(None);
        assert!(!gate.is_enabled());
        assert!(!gate.verify_token(""));
        assert!(gate.session_value().is_none());
    }

    #[test]
    fn test_bearer_and_cookie() {
        let gate = AdminGate::new(Some("s3cret"));

        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer s3cret"));
        assert!(gate.authorize(&headers));

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer wrong"));
        assert!(!gate.authorize(&headers));

        let session = gate.session_value().unwrap();
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_str(&format!("theme=dark; {}={}", SESSION_COOKIE, session)).unwrap(),
        );
        assert!(gate.authorize(&headers));

        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("folio_admin=nothex"));
        assert!(!gate.authorize(&headers));
    }
}
