use axum::{extract::Json, http::StatusCode};
use contracts::system::auth::UserInfo;

use crate::system::auth::extractor::CurrentUser;
use crate::system::users::service as user_service;

/// Current user info; registers the caller locally on first call
pub async fn current_user(CurrentUser(auth): CurrentUser) -> Result<Json<UserInfo>, StatusCode> {
    let user = user_service::upsert_from_auth(&auth).await.map_err(|e| {
        tracing::error!("Failed to sync user '{}': {}", auth.username, e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    Ok(Json(user_service::to_user_info(user)))
}
