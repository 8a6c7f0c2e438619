//! Dashboard handlers
//!
//! Each request rebuilds the editor for its tab from the stored record,
//! drives it through one transition and renders the result. Successful
//! writes redirect back to the tab; rejected ones re-render the form with
//! its alert.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use std::sync::Arc;
use std::time::Instant;

use crate::dashboard::form::hero_from_fields;
use crate::dashboard::view::{confirm_delete, dashboard_page, hero_panel, list_panel};
use crate::dashboard::{
    Deletion, EditorForm, Editable, FormFields, HeroEditor, ListManager, Submission, Tab,
};
use crate::model::{Experience, ListName, Project, Skill};
use crate::repository::Portfolio;
use crate::server::AppState;

type Fields = Form<Vec<(String, String)>>;

/// Which list view a GET asks for
enum View {
    Idle,
    New,
    Edit(String),
    ConfirmDelete(String),
}

pub async fn admin_root() -> Redirect {
    Redirect::to("/admin/perfil")
}

pub async fn show_tab(State(state): State<Arc<AppState>>, Path(tab): Path<String>) -> Response {
    let Ok(tab) = tab.parse::<Tab>() else {
        return StatusCode::NOT_FOUND.into_response();
    };
    let portfolio = state.portfolio.lock().await;
    match tab {
        Tab::Profile => profile_view(&portfolio),
        Tab::List(list) => list_view(&portfolio, list, View::Idle),
    }
}

pub async fn new_item(State(state): State<Arc<AppState>>, Path(tab): Path<String>) -> Response {
    let Some(list) = list_tab(&tab) else {
        return StatusCode::NOT_FOUND.into_response();
    };
    let portfolio = state.portfolio.lock().await;
    list_view(&portfolio, list, View::New)
}

pub async fn edit_item(
    State(state): State<Arc<AppState>>,
    Path((tab, id)): Path<(String, String)>,
) -> Response {
    let Some(list) = list_tab(&tab) else {
        return StatusCode::NOT_FOUND.into_response();
    };
    let portfolio = state.portfolio.lock().await;
    list_view(&portfolio, list, View::Edit(id))
}

pub async fn confirm_item_delete(
    State(state): State<Arc<AppState>>,
    Path((tab, id)): Path<(String, String)>,
) -> Response {
    let Some(list) = list_tab(&tab) else {
        return StatusCode::NOT_FOUND.into_response();
    };
    let portfolio = state.portfolio.lock().await;
    list_view(&portfolio, list, View::ConfirmDelete(id))
}

/// Hero save or a new list item
pub async fn submit_tab(
    State(state): State<Arc<AppState>>,
    Path(tab): Path<String>,
    Form(pairs): Fields,
) -> Response {
    let Ok(tab) = tab.parse::<Tab>() else {
        return StatusCode::NOT_FOUND.into_response();
    };
    let fields = FormFields::new(pairs);
    let portfolio = state.portfolio.lock().await;
    match tab {
        Tab::Profile => save_profile(&portfolio, &fields),
        Tab::List(list) => submit_list(&portfolio, list, None, &fields),
    }
}

pub async fn submit_edit(
    State(state): State<Arc<AppState>>,
    Path((tab, id)): Path<(String, String)>,
    Form(pairs): Fields,
) -> Response {
    let Some(list) = list_tab(&tab) else {
        return StatusCode::NOT_FOUND.into_response();
    };
    let fields = FormFields::new(pairs);
    let portfolio = state.portfolio.lock().await;
    submit_list(&portfolio, list, Some(id), &fields)
}

pub async fn delete_item(
    State(state): State<Arc<AppState>>,
    Path((tab, id)): Path<(String, String)>,
    Form(pairs): Fields,
) -> Response {
    let Some(list) = list_tab(&tab) else {
        return StatusCode::NOT_FOUND.into_response();
    };
    let confirmed = FormFields::new(pairs).get("confirm") == "yes";
    let portfolio = state.portfolio.lock().await;
    match list {
        ListName::Experiences => delete_list::<Experience>(&portfolio, &id, confirmed),
        ListName::Projects => delete_list::<Project>(&portfolio, &id, confirmed),
        ListName::Skills => delete_list::<Skill>(&portfolio, &id, confirmed),
    }
}

fn list_tab(tab: &str) -> Option<ListName> {
    match tab.parse::<Tab>() {
        Ok(Tab::List(list)) => Some(list),
        _ => None,
    }
}

fn tab_url(list: ListName) -> String {
    format!("/admin/{}", list.anchor())
}

// ========== Profile ==========

fn profile_view(portfolio: &Portfolio) -> Response {
    let hero = match portfolio.fetch_record() {
        Ok(record) => record.map(|r| r.hero),
        Err(e) => {
            tracing::error!("Failed to fetch portfolio: {}", e);
            None
        }
    };
    let editor = HeroEditor::new(hero);
    Html(dashboard_page(Tab::Profile, &hero_panel(&editor, Instant::now()))).into_response()
}

fn save_profile(portfolio: &Portfolio, fields: &FormFields) -> Response {
    let mut editor = HeroEditor::new(Some(hero_from_fields(fields)));
    let now = Instant::now();
    let status = match editor.save(portfolio, now) {
        Ok(()) => StatusCode::OK,
        Err(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Html(dashboard_page(Tab::Profile, &hero_panel(&editor, now)))).into_response()
}

// ========== Lists ==========

fn list_view(portfolio: &Portfolio, list: ListName, view: View) -> Response {
    match list {
        ListName::Experiences => render_list::<Experience>(portfolio, view),
        ListName::Projects => render_list::<Project>(portfolio, view),
        ListName::Skills => render_list::<Skill>(portfolio, view),
    }
}

fn load_manager<T: Editable>(portfolio: &Portfolio) -> ListManager<T> {
    let items = portfolio.list::<T>().unwrap_or_else(|e| {
        tracing::error!("Failed to fetch {}: {}", T::LIST, e);
        Vec::new()
    });
    ListManager::new(items)
}

fn list_page<T: Editable>(manager: &ListManager<T>) -> String {
    dashboard_page(Tab::List(T::LIST), &list_panel(manager))
}

fn render_list<T: Editable>(portfolio: &Portfolio, view: View) -> Response {
    let mut manager = load_manager::<T>(portfolio);
    match view {
        View::Idle => {}
        View::New => {
            manager.start_adding();
        }
        View::Edit(id) => {
            if !manager.start_editing(&id) {
                return Redirect::to(&tab_url(T::LIST)).into_response();
            }
        }
        View::ConfirmDelete(id) => {
            return match manager.items().iter().find(|item| item.id() == id) {
                Some(item) => Html(dashboard_page(Tab::List(T::LIST), &confirm_delete(item)))
                    .into_response(),
                None => Redirect::to(&tab_url(T::LIST)).into_response(),
            };
        }
    }
    Html(list_page(&manager)).into_response()
}

fn submit_list(
    portfolio: &Portfolio,
    list: ListName,
    id: Option<String>,
    fields: &FormFields,
) -> Response {
    match list {
        ListName::Experiences => submit_item::<Experience>(portfolio, id, fields),
        ListName::Projects => submit_item::<Project>(portfolio, id, fields),
        ListName::Skills => submit_item::<Skill>(portfolio, id, fields),
    }
}

fn submit_item<T: Editable>(portfolio: &Portfolio, id: Option<String>, fields: &FormFields) -> Response {
    let mut manager = load_manager::<T>(portfolio);
    let opened = match &id {
        Some(id) => manager.start_editing(id),
        None => manager.start_adding(),
    };
    if !opened {
        return Redirect::to(&tab_url(T::LIST)).into_response();
    }

    manager.set_form(T::Form::from_fields(fields));
    if manager.form_mut().apply_action(fields) {
        return Html(list_page(&manager)).into_response();
    }

    match manager.submit(portfolio) {
        Submission::Added(_) | Submission::Updated(_) | Submission::NothingToSubmit => {
            Redirect::to(&tab_url(T::LIST)).into_response()
        }
        Submission::Rejected(_) => {
            (StatusCode::INTERNAL_SERVER_ERROR, Html(list_page(&manager))).into_response()
        }
    }
}

fn delete_list<T: Editable>(portfolio: &Portfolio, id: &str, confirmed: bool) -> Response {
    let mut manager = load_manager::<T>(portfolio);
    match manager.delete(portfolio, id, confirmed) {
        Deletion::Cancelled | Deletion::Deleted => Redirect::to(&tab_url(T::LIST)).into_response(),
        Deletion::Rejected(_) => {
            (StatusCode::INTERNAL_SERVER_ERROR, Html(list_page(&manager))).into_response()
        }
    }
}
