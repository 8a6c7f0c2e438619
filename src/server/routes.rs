use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::{Html, IntoResponse, Response},
    Json,
};
use chrono::Datelike;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

use crate::model::{Experience, HeroData, ListItem, ListName, Project, Skill};
use crate::repository::Portfolio;
use crate::server::AppState;
use crate::{render, Error};

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(e: Error) -> ApiError {
    let status = match &e {
        Error::DocumentNotFound(_) | Error::UnknownList(_) => StatusCode::NOT_FOUND,
        Error::Serialization(_) | Error::InvalidField(_) => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    if status == StatusCode::INTERNAL_SERVER_ERROR {
        tracing::error!("Request failed: {}", e);
    }
    (status, Json(ErrorResponse { error: e.to_string() }))
}

/// Public page. A failed fetch is logged and renders the defaults.
pub async fn home(State(state): State<Arc<AppState>>) -> Html<String> {
    let portfolio = state.portfolio.lock().await;
    let record = match portfolio.fetch_record() {
        Ok(record) => record,
        Err(e) => {
            tracing::error!("Failed to fetch portfolio: {}", e);
            None
        }
    };
    Html(render::home_page(record.as_ref(), chrono::Local::now().year()))
}

pub async fn get_portfolio(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    let portfolio = state.portfolio.lock().await;
    let (Some(record), Some(digest)) = (
        portfolio.fetch_record().map_err(api_error)?,
        portfolio.record_digest().map_err(api_error)?,
    ) else {
        return Err(api_error(Error::DocumentNotFound(
            portfolio.document().to_string(),
        )));
    };

    let etag = format!("\"{}\"", digest);
    if etag_matches(&headers, &etag) {
        return Ok((StatusCode::NOT_MODIFIED, [(header::ETAG, etag)]).into_response());
    }
    Ok(([(header::ETAG, etag)], Json(record)).into_response())
}

fn etag_matches(headers: &HeaderMap, etag: &str) -> bool {
    headers
        .get(header::IF_NONE_MATCH)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| {
            v.split(',')
                .map(str::trim)
                .any(|tag| tag == "*" || tag == etag || tag.strip_prefix("W/") == Some(etag))
        })
}

// ========== Admin API ==========

pub async fn put_hero(
    State(state): State<Arc<AppState>>,
    Json(hero): Json<HeroData>,
) -> Result<StatusCode, ApiError> {
    let portfolio = state.portfolio.lock().await;
    portfolio.save_hero(&hero).map_err(api_error)?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn post_item(
    State(state): State<Arc<AppState>>,
    Path(list): Path<String>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let list: ListName = list.parse().map_err(api_error)?;
    let portfolio = state.portfolio.lock().await;
    let created = match list {
        ListName::Experiences => add_json::<Experience>(&portfolio, body),
        ListName::Projects => add_json::<Project>(&portfolio, body),
        ListName::Skills => add_json::<Skill>(&portfolio, body),
    }
    .map_err(api_error)?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn put_item(
    State(state): State<Arc<AppState>>,
    Path((list, id)): Path<(String, String)>,
    Json(body): Json<Value>,
) -> Result<StatusCode, ApiError> {
    let list: ListName = list.parse().map_err(api_error)?;
    let portfolio = state.portfolio.lock().await;
    let updated = match list {
        ListName::Experiences => update_json::<Experience>(&portfolio, id, body),
        ListName::Projects => update_json::<Project>(&portfolio, id, body),
        ListName::Skills => update_json::<Skill>(&portfolio, id, body),
    }
    .map_err(api_error)?;
    Ok(if updated { StatusCode::NO_CONTENT } else { StatusCode::NOT_FOUND })
}

pub async fn delete_item(
    State(state): State<Arc<AppState>>,
    Path((list, id)): Path<(String, String)>,
) -> Result<StatusCode, ApiError> {
    let list: ListName = list.parse().map_err(api_error)?;
    let portfolio = state.portfolio.lock().await;
    let removed = match list {
        ListName::Experiences => portfolio.remove_item::<Experience>(&id),
        ListName::Projects => portfolio.remove_item::<Project>(&id),
        ListName::Skills => portfolio.remove_item::<Skill>(&id),
    }
    .map_err(api_error)?;
    Ok(if removed { StatusCode::NO_CONTENT } else { StatusCode::NOT_FOUND })
}

fn add_json<T: ListItem>(portfolio: &Portfolio, body: Value) -> crate::Result<Value> {
    let draft: T::Draft = serde_json::from_value(body)?;
    let item = portfolio.add_item::<T>(draft)?;
    Ok(serde_json::to_value(item)?)
}

fn update_json<T: ListItem>(portfolio: &Portfolio, id: String, body: Value) -> crate::Result<bool> {
    let draft: T::Draft = serde_json::from_value(body)?;
    portfolio.update_item(&T::from_draft(id, draft))
}
