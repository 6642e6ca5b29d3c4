use axum::{extract::Path, http::StatusCode, Json};
use contracts::domain::a001_event::{Event, EventDto};
use serde_json::json;

use crate::domain::a001_event;
use crate::system::auth::extractor::CurrentUser;

pub(crate) fn parse_id(id: &str) -> Result<uuid::Uuid, StatusCode> {
    uuid::Uuid::parse_str(id).map_err(|_| StatusCode::BAD_REQUEST)
}

/// GET /api/events
pub async fn list_all() -> Result<Json<Vec<Event>>, StatusCode> {
    a001_event::service::list_all()
        .await
        .map(Json)
        .map_err(|e| e.into_status())
}

/// GET /api/events/:id
pub async fn get_by_id(Path(id): Path<String>) -> Result<Json<Event>, StatusCode> {
    let uuid = parse_id(&id)?;
    match a001_event::service::get_by_id(uuid).await {
        Ok(Some(v)) => Ok(Json(v)),
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(e) => Err(e.into_status()),
    }
}

/// POST /api/events
pub async fn create(
    CurrentUser(user): CurrentUser,
    Json(dto): Json<EventDto>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    let id = a001_event::service::create(dto, Some(user.username))
        .await
        .map_err(|e| e.into_status())?;
    Ok(Json(json!({ "id": id.to_string() })))
}

/// PUT /api/events/:id
pub async fn update(
    Path(id): Path<String>,
    Json(mut dto): Json<EventDto>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    parse_id(&id)?;
    dto.id = Some(id.clone());
    a001_event::service::update(dto)
        .await
        .map_err(|e| e.into_status())?;
    Ok(Json(json!({ "id": id })))
}

/// DELETE /api/events/:id
pub async fn delete(Path(id): Path<String>) -> Result<(), StatusCode> {
    let uuid = parse_id(&id)?;
    match a001_event::service::delete(uuid).await {
        Ok(true) => Ok(()),
        Ok(false) => Err(StatusCode::NOT_FOUND),
        Err(e) => Err(e.into_status()),
    }
}
