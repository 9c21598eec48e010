use askama::Template;
use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Json, Response},
};
use rust_embed::RustEmbed;
use tracing::{error, info, warn};
use uuid::Uuid;

use super::events::{ErrorBody, EventOutcome, LocationEntry, SessionCreated};
use super::sessions::SessionError;
use super::state::AppState;
use crate::html_template::PageTemplate;
use crate::projection::project;
use crate::render::render_view;
use crate::view_state::{ViewEvent, ViewSnapshot, ViewState};

#[derive(RustEmbed)]
#[folder = "frontend/"]
struct Asset;

/// Error returned by the JSON API
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error("template error: {0}")]
    Render(#[from] askama::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Session(SessionError::NotFound(_)) => StatusCode::NOT_FOUND,
            ApiError::Session(SessionError::View(_)) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            error!(%status, "request failed: {}", self);
        } else {
            warn!(%status, "request rejected: {}", self);
        }
        (status, Json(ErrorBody::new(self.to_string()))).into_response()
    }
}

fn render_fragment(state: &AppState, view: &ViewState) -> Result<String, ApiError> {
    Ok(render_view(state.registry, view).render()?)
}

// Page entry point: every load starts a fresh session
pub async fn index_html(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    let (id, view) = state.sessions.create();
    info!(%id, "new page session");
    let page = PageTemplate::new(id, render_view(state.registry, &view));
    Ok(Html(page.render()?))
}

pub async fn list_locations(State(state): State<AppState>) -> Json<Vec<LocationEntry>> {
    let entries = state
        .registry
        .iter()
        .map(|location| LocationEntry {
            location: *location,
            position: project(location.lat, location.lng).to_percent(),
        })
        .collect();
    Json(entries)
}

pub async fn create_session(State(state): State<AppState>) -> (StatusCode, Json<SessionCreated>) {
    let (session_id, view) = state.sessions.create();
    (
        StatusCode::CREATED,
        Json(SessionCreated {
            session_id,
            state: view.snapshot(),
        }),
    )
}

pub async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ViewSnapshot>, ApiError> {
    let view = state.sessions.get(id)?;
    Ok(Json(view.snapshot()))
}

pub async fn post_event(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(event): Json<ViewEvent>,
) -> Result<Json<EventOutcome>, ApiError> {
    let view = state.sessions.dispatch(id, &event)?;
    Ok(Json(EventOutcome {
        state: view.snapshot(),
        html: render_fragment(&state, &view)?,
    }))
}

pub async fn get_view(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Html<String>, ApiError> {
    let view = state.sessions.get(id)?;
    Ok(Html(render_fragment(&state, &view)?))
}

pub async fn delete_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.sessions.remove(id)?;
    info!(%id, "session closed");
    Ok(StatusCode::NO_CONTENT)
}

fn serve_asset(name: &str, content_type: &'static str) -> Response {
    match Asset::get(name) {
        Some(content) => (
            [
                (header::CONTENT_TYPE, content_type),
                (header::CACHE_CONTROL, "public, max-age=3600"),
            ],
            content.data.into_owned(),
        )
            .into_response(),
        None => {
            warn!("embedded asset missing: {}", name);
            StatusCode::NOT_FOUND.into_response()
        }
    }
}

pub async fn style_css() -> Response {
    serve_asset("style.css", "text/css")
}

pub async fn script_js() -> Response {
    serve_asset("script.js", "application/javascript")
}

pub async fn world_map_svg() -> Response {
    serve_asset("world-map.svg", "image/svg+xml")
}
