use axum::{extract::Path, http::StatusCode, Json};
use contracts::domain::a002_cfp_submission::{CfpSubmission, CfpSubmissionDto};
use serde_json::json;

use super::a001_event::parse_id;
use crate::domain::a002_cfp_submission;

/// GET /api/cfp-submissions
pub async fn list_all() -> Result<Json<Vec<CfpSubmission>>, StatusCode> {
    a002_cfp_submission::service::list_all()
        .await
        .map(Json)
        .map_err(|e| e.into_status())
}

/// GET /api/events/:id/cfp-submissions
pub async fn list_by_event(Path(event_id): Path<String>) -> Result<Json<Vec<CfpSubmission>>, StatusCode> {
    let uuid = parse_id(&event_id)?;
    a002_cfp_submission::service::list_by_event(uuid)
        .await
        .map(Json)
        .map_err(|e| e.into_status())
}

/// GET /api/cfp-submissions/:id
pub async fn get_by_id(Path(id): Path<String>) -> Result<Json<CfpSubmission>, StatusCode> {
    let uuid = parse_id(&id)?;
    match a002_cfp_submission::service::get_by_id(uuid).await {
        Ok(Some(v)) => Ok(Json(v)),
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(e) => Err(e.into_status()),
    }
}

/// POST /api/cfp-submissions
pub async fn create(Json(dto): Json<CfpSubmissionDto>) -> Result<Json<serde_json::Value>, StatusCode> {
    let id = a002_cfp_submission::service::create(dto)
        .await
        .map_err(|e| e.into_status())?;
    Ok(Json(json!({ "id": id.to_string() })))
}

/// PUT /api/cfp-submissions/:id
pub async fn update(
    Path(id): Path<String>,
    Json(mut dto): Json<CfpSubmissionDto>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    parse_id(&id)?;
    dto.id = Some(id.clone());
    a002_cfp_submission::service::update(dto)
        .await
        .map_err(|e| e.into_status())?;
    Ok(Json(json!({ "id": id })))
}

/// DELETE /api/cfp-submissions/:id
pub async fn delete(Path(id): Path<String>) -> Result<(), StatusCode> {
    let uuid = parse_id(&id)?;
    match a002_cfp_submission::service::delete(uuid).await {
        Ok(true) => Ok(()),
        Ok(false) => Err(StatusCode::NOT_FOUND),
        Err(e) => Err(e.into_status()),
    }
}
