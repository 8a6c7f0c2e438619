use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::config::{ensure_db_dir, Settings};
use crate::repository::Portfolio;
use crate::storage::SqliteStore;
use crate::ui::Icons;

pub mod admin;
pub mod auth;
pub mod routes;

pub use auth::AdminGate;

/// Directory served under `/static` when none is configured
pub const DEFAULT_STATIC_DIR: &str = "static";

/// Server state
pub struct AppState {
    pub portfolio: Mutex<Portfolio>,
    pub gate: AdminGate,
}

impl AppState {
    pub fn new(portfolio: Portfolio, admin_token: Option<&str>) -> Self {
        Self {
            portfolio: Mutex::new(portfolio),
            gate: AdminGate::new(admin_token),
        }
    }
}

pub fn build_router(state: Arc<AppState>, static_dir: &Path) -> Router {
    let gated = Router::new()
        .route("/admin", get(admin::admin_root))
        .route("/admin/{tab}", get(admin::show_tab).post(admin::submit_tab))
        .route("/admin/{tab}/new", get(admin::new_item))
        .route("/admin/{tab}/{id}", post(admin::submit_edit))
        .route("/admin/{tab}/{id}/edit", get(admin::edit_item))
        .route(
            "/admin/{tab}/{id}/delete",
            get(admin::confirm_item_delete).post(admin::delete_item),
        )
        .route("/api/admin/hero", put(routes::put_hero))
        .route("/api/admin/{list}", post(routes::post_item))
        .route(
            "/api/admin/{list}/{id}",
            put(routes::put_item).delete(routes::delete_item),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::require_admin));

    Router::new()
        .route("/", get(routes::home))
        .route("/api/portfolio", get(routes::get_portfolio))
        .route("/login", get(auth::login_form).post(auth::login))
        .route("/logout", post(auth::logout))
        .merge(gated)
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn start_server(settings: Settings) -> anyhow::Result<()> {
    ensure_db_dir(&settings.database)?;
    let store = SqliteStore::open(&settings.database)?;
    let portfolio = Portfolio::new(store, settings.document.clone());

    if portfolio.fetch_record()?.is_none() {
        tracing::warn!(
            "No portfolio record at {}; the page will show defaults until `folio init` runs",
            settings.document
        );
    }
    if settings.admin_token.is_none() {
        tracing::warn!("No admin token configured; the dashboard is disabled");
    }

    let state = Arc::new(AppState::new(portfolio, settings.admin_token.as_deref()));
    let static_dir = settings
        .static_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_STATIC_DIR));
    let app = build_router(state, &static_dir);

    let addr = SocketAddr::new(settings.bind, settings.port);
    tracing::info!("Starting server on {}", addr);
    println!("{} Server running at http://{}", Icons::GLOBE, addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
