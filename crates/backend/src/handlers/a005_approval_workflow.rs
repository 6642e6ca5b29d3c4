use axum::{extract::Path, http::StatusCode, Json};
use contracts::domain::a005_approval_workflow::{
    ApprovalWorkflow, ApprovalWorkflowDto, DecisionRequest,
};
use serde_json::json;

use super::a001_event::parse_id;
use crate::domain::a005_approval_workflow::service;
use crate::system::auth::extractor::CurrentUser;

/// GET /api/approval-workflows
pub async fn list_all() -> Result<Json<Vec<ApprovalWorkflow>>, StatusCode> {
    service::list_all()
        .await
        .map(Json)
        .map_err(|e| e.into_status())
}

/// GET /api/approval-workflows/:id
pub async fn get_by_id(Path(id): Path<String>) -> Result<Json<ApprovalWorkflow>, StatusCode> {
    let uuid = parse_id(&id)?;
    match service::get_by_id(uuid).await {
        Ok(Some(v)) => Ok(Json(v)),
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(e) => Err(e.into_status()),
    }
}

/// POST /api/approval-workflows
pub async fn create(
    CurrentUser(user): CurrentUser,
    Json(dto): Json<ApprovalWorkflowDto>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    let id = service::create(dto, &user)
        .await
        .map_err(|e| e.into_status())?;
    Ok(Json(json!({ "id": id.to_string() })))
}

/// PUT /api/approval-workflows/:id
pub async fn update(
    CurrentUser(user): CurrentUser,
    Path(id): Path<String>,
    Json(mut dto): Json<ApprovalWorkflowDto>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    parse_id(&id)?;
    dto.id = Some(id.clone());
    service::update(dto, &user)
        .await
        .map_err(|e| e.into_status())?;
    Ok(Json(json!({ "id": id })))
}

/// DELETE /api/approval-workflows/:id
pub async fn delete(
    CurrentUser(user): CurrentUser,
    Path(id): Path<String>,
) -> Result<(), StatusCode> {
    let uuid = parse_id(&id)?;
    match service::delete(uuid, &user).await {
        Ok(true) => Ok(()),
        Ok(false) => Err(StatusCode::NOT_FOUND),
        Err(e) => Err(e.into_status()),
    }
}

/// POST /api/approval-workflows/:id/submit
pub async fn submit(
    CurrentUser(user): CurrentUser,
    Path(id): Path<String>,
) -> Result<Json<ApprovalWorkflow>, StatusCode> {
    let uuid = parse_id(&id)?;
    service::submit(uuid, &user)
        .await
        .map(Json)
        .map_err(|e| e.into_status())
}

/// POST /api/approval-workflows/:id/decision
pub async fn decide(
    CurrentUser(user): CurrentUser,
    Path(id): Path<String>,
    Json(request): Json<DecisionRequest>,
) -> Result<Json<ApprovalWorkflow>, StatusCode> {
    let uuid = parse_id(&id)?;
    service::decide(uuid, request, &user)
        .await
        .map(Json)
        .map_err(|e| e.into_status())
}

/// POST /api/approval-workflows/:id/resubmit
pub async fn resubmit(
    CurrentUser(user): CurrentUser,
    Path(id): Path<String>,
) -> Result<Json<ApprovalWorkflow>, StatusCode> {
    let uuid = parse_id(&id)?;
    service::resubmit(uuid, &user)
        .await
        .map(Json)
        .map_err(|e| e.into_status())
}
