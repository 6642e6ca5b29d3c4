use axum::{extract::Path, http::StatusCode, Json};
use contracts::domain::a004_sponsorship::{Sponsorship, SponsorshipDto};
use serde_json::json;

use super::a001_event::parse_id;
use crate::domain::a004_sponsorship;

/// GET /api/sponsorships
pub async fn list_all() -> Result<Json<Vec<Sponsorship>>, StatusCode> {
    a004_sponsorship::service::list_all()
        .await
        .map(Json)
        .map_err(|e| e.into_status())
}

/// GET /api/events/:id/sponsorships
pub async fn list_by_event(Path(event_id): Path<String>) -> Result<Json<Vec<Sponsorship>>, StatusCode> {
    let uuid = parse_id(&event_id)?;
    a004_sponsorship::service::list_by_event(uuid)
        .await
        .map(Json)
        .map_err(|e| e.into_status())
}

/// GET /api/sponsorships/:id
pub async fn get_by_id(Path(id): Path<String>) -> Result<Json<Sponsorship>, StatusCode> {
    let uuid = parse_id(&id)?;
    match a004_sponsorship::service::get_by_id(uuid).await {
        Ok(Some(v)) => Ok(Json(v)),
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(e) => Err(e.into_status()),
    }
}

/// POST /api/sponsorships
pub async fn create(Json(dto): Json<SponsorshipDto>) -> Result<Json<serde_json::Value>, StatusCode> {
    let id = a004_sponsorship::service::create(dto)
        .await
        .map_err(|e| e.into_status())?;
    Ok(Json(json!({ "id": id.to_string() })))
}

/// PUT /api/sponsorships/:id
pub async fn update(
    Path(id): Path<String>,
    Json(mut dto): Json<SponsorshipDto>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    parse_id(&id)?;
    dto.id = Some(id.clone());
    a004_sponsorship::service::update(dto)
        .await
        .map_err(|e| e.into_status())?;
    Ok(Json(json!({ "id": id })))
}

/// DELETE /api/sponsorships/:id
pub async fn delete(Path(id): Path<String>) -> Result<(), StatusCode> {
    let uuid = parse_id(&id)?;
    match a004_sponsorship::service::delete(uuid).await {
        Ok(true) => Ok(()),
        Ok(false) => Err(StatusCode::NOT_FOUND),
        Err(e) => Err(e.into_status()),
    }
}
