use axum::{extract::Path, http::StatusCode, Json};
use contracts::domain::a006_asset::{Asset, AssetDto};
use serde_json::json;

use super::a001_event::parse_id;
use crate::domain::a006_asset;
use crate::system::auth::extractor::CurrentUser;

/// GET /api/assets
pub async fn list_all() -> Result<Json<Vec<Asset>>, StatusCode> {
    a006_asset::service::list_all()
        .await
        .map(Json)
        .map_err(|e| e.into_status())
}

/// GET /api/events/:id/assets
pub async fn list_by_event(Path(event_id): Path<String>) -> Result<Json<Vec<Asset>>, StatusCode> {
    let uuid = parse_id(&event_id)?;
    a006_asset::service::list_by_event(uuid)
        .await
        .map(Json)
        .map_err(|e| e.into_status())
}

/// GET /api/assets/:id
pub async fn get_by_id(Path(id): Path<String>) -> Result<Json<Asset>, StatusCode> {
    let uuid = parse_id(&id)?;
    match a006_asset::service::get_by_id(uuid).await {
        Ok(Some(v)) => Ok(Json(v)),
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(e) => Err(e.into_status()),
    }
}

/// POST /api/assets
pub async fn create(
    CurrentUser(user): CurrentUser,
    Json(dto): Json<AssetDto>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    let id = a006_asset::service::create(dto, Some(user.username))
        .await
        .map_err(|e| e.into_status())?;
    Ok(Json(json!({ "id": id.to_string() })))
}

/// PUT /api/assets/:id
pub async fn update(
    Path(id): Path<String>,
    Json(mut dto): Json<AssetDto>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    parse_id(&id)?;
    dto.id = Some(id.clone());
    a006_asset::service::update(dto)
        .await
        .map_err(|e| e.into_status())?;
    Ok(Json(json!({ "id": id })))
}

/// DELETE /api/assets/:id
pub async fn delete(Path(id): Path<String>) -> Result<(), StatusCode> {
    let uuid = parse_id(&id)?;
    match a006_asset::service::delete(uuid).await {
        Ok(true) => Ok(()),
        Ok(false) => Err(StatusCode::NOT_FOUND),
        Err(e) => Err(e.into_status()),
    }
}
