use axum::{extract::Path, http::StatusCode, Json};
use contracts::domain::a003_attendee::{Attendee, AttendeeDto};
use serde_json::json;

use super::a001_event::parse_id;
use crate::domain::a003_attendee;

/// GET /api/attendees
pub async fn list_all() -> Result<Json<Vec<Attendee>>, StatusCode> {
    a003_attendee::service::list_all()
        .await
        .map(Json)
        .map_err(|e| e.into_status())
}

/// GET /api/events/:id/attendees
pub async fn list_by_event(Path(event_id): Path<String>) -> Result<Json<Vec<Attendee>>, StatusCode> {
    let uuid = parse_id(&event_id)?;
    a003_attendee::service::list_by_event(uuid)
        .await
        .map(Json)
        .map_err(|e| e.into_status())
}

/// GET /api/attendees/:id
pub async fn get_by_id(Path(id): Path<String>) -> Result<Json<Attendee>, StatusCode> {
    let uuid = parse_id(&id)?;
    match a003_attendee::service::get_by_id(uuid).await {
        Ok(Some(v)) => Ok(Json(v)),
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(e) => Err(e.into_status()),
    }
}

/// POST /api/attendees
pub async fn create(Json(dto): Json<AttendeeDto>) -> Result<Json<serde_json::Value>, StatusCode> {
    let id = a003_attendee::service::create(dto)
        .await
        .map_err(|e| e.into_status())?;
    Ok(Json(json!({ "id": id.to_string() })))
}

/// PUT /api/attendees/:id
pub async fn update(
    Path(id): Path<String>,
    Json(mut dto): Json<AttendeeDto>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    parse_id(&id)?;
    dto.id = Some(id.clone());
    a003_attendee::service::update(dto)
        .await
        .map_err(|e| e.into_status())?;
    Ok(Json(json!({ "id": id })))
}

/// DELETE /api/attendees/:id
pub async fn delete(Path(id): Path<String>) -> Result<(), StatusCode> {
    let uuid = parse_id(&id)?;
    match a003_attendee::service::delete(uuid).await {
        Ok(true) => Ok(()),
        Ok(false) => Err(StatusCode::NOT_FOUND),
        Err(e) => Err(e.into_status()),
    }
}
