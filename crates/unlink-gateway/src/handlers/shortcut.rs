use crate::error::Result;
use crate::model::{
    CreateShortcutRequest, DeleteShortcutRequest, StatisticsQuery, StatisticsResponse,
    UpdateShortcutRequest,
};
use crate::state::AppState;
use axum::extract::{ConnectInfo, Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use axum::Json;
use std::net::SocketAddr;
use tracing::warn;
use unlink_core::{
    CreateOutcome, DeleteOutcome, Shortcut, StatisticsOutcome, UpdateOutcome,
};

fn not_found(shortcut: &str) -> Response {
    (StatusCode::NOT_FOUND, format!("{} Not Found", shortcut)).into_response()
}

fn wrong_owner() -> Response {
    (StatusCode::FORBIDDEN, "Wrong owner").into_response()
}

/// `GET /{shortcut}`: resolve and redirect, then log the visit.
///
/// Logging is best-effort: a failed append never fails the redirect.
pub async fn expand_handler(
    Path(shortcut): Path<String>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    State(state): State<AppState>,
) -> Result<Response> {
    // A syntactically invalid shortcut cannot name a record.
    let Ok(shortcut) = Shortcut::new(shortcut.as_str()) else {
        return Ok(not_found(&shortcut));
    };

    let Some(view) = state.registry().resolve(&shortcut).await? else {
        return Ok(not_found(shortcut.as_str()));
    };

    if let Err(err) = state.registry().log_visit(&shortcut, addr.ip()).await {
        warn!(shortcut = %shortcut, error = %err, "failed to log visit");
    }

    Ok(Redirect::to(&view.target_url).into_response())
}

/// `POST /create`: 201 on insertion, 409 when the shortcut is taken.
pub async fn create_handler(
    State(state): State<AppState>,
    Json(request): Json<CreateShortcutRequest>,
) -> Result<Response> {
    match state.registry().create(request.try_into()?).await? {
        CreateOutcome::Created => Ok(StatusCode::CREATED.into_response()),
        CreateOutcome::AlreadyExists => {
            Ok((StatusCode::CONFLICT, "Shortcut already exists!").into_response())
        }
    }
}

/// `PUT /update`: 204 / 404 / 403.
pub async fn update_handler(
    State(state): State<AppState>,
    Json(request): Json<UpdateShortcutRequest>,
) -> Result<Response> {
    let shortcut = request.shortcut.clone();

    match state.registry().update(request.try_into()?).await? {
        UpdateOutcome::Updated => Ok(StatusCode::NO_CONTENT.into_response()),
        UpdateOutcome::NotFound => Ok(not_found(&shortcut)),
        UpdateOutcome::WrongOwner => Ok(wrong_owner()),
    }
}

/// `DELETE /delete`: 204 / 404 / 403.
pub async fn delete_handler(
    State(state): State<AppState>,
    Json(request): Json<DeleteShortcutRequest>,
) -> Result<Response> {
    let shortcut = request.shortcut.clone();

    match state.registry().delete(request.try_into()?).await? {
        DeleteOutcome::Deleted => Ok(StatusCode::NO_CONTENT.into_response()),
        DeleteOutcome::NotFound => Ok(not_found(&shortcut)),
        DeleteOutcome::WrongOwner => Ok(wrong_owner()),
    }
}

/// `GET /stats/{shortcut}?owner=`: the owner-gated statistics view.
pub async fn statistics_handler(
    Path(shortcut): Path<String>,
    Query(query): Query<StatisticsQuery>,
    State(state): State<AppState>,
) -> Result<Response> {
    let Ok(shortcut) = Shortcut::new(shortcut.as_str()) else {
        return Ok(not_found(&shortcut));
    };

    match state
        .registry()
        .statistics(&shortcut, &query.owner)
        .await?
    {
        StatisticsOutcome::Found(view) => Ok(Json(StatisticsResponse::from(view)).into_response()),
        StatisticsOutcome::NotFound => Ok(not_found(shortcut.as_str())),
        StatisticsOutcome::WrongOwner => Ok(wrong_owner()),
    }
}
