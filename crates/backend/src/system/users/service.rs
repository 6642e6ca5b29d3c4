use anyhow::Result;
use chrono::Utc;
use contracts::system::auth::{AuthUser, UserInfo};
use contracts::system::users::User;

use super::repository;

/// Local user record for an authenticated caller, created on first sight
pub async fn upsert_from_auth(auth: &AuthUser) -> Result<User> {
    let now = Utc::now().to_rfc3339();

    match repository::get_by_keycloak_id(&auth.subject).await? {
        Some(mut user) => {
            user.username = auth.username.clone();
            user.email = auth.email.clone();
            user.full_name = auth.full_name.clone();
            user.is_admin = auth.is_admin();
            user.updated_at = now.clone();
            user.last_login_at = Some(now);
            repository::update_profile(&user).await?;
            Ok(user)
        }
        None => {
            let user = User {
                id: uuid::Uuid::new_v4().to_string(),
                keycloak_id: auth.subject.clone(),
                username: auth.username.clone(),
                email: auth.email.clone(),
                full_name: auth.full_name.clone(),
                is_admin: auth.is_admin(),
                created_at: now.clone(),
                updated_at: now.clone(),
                last_login_at: Some(now),
            };
            repository::insert(&user).await?;
            tracing::info!("Registered user '{}' ({})", user.username, user.keycloak_id);
            Ok(user)
        }
    }
}

pub fn to_user_info(user: User) -> UserInfo {
    UserInfo {
        id: user.id,
        username: user.username,
        full_name: user.full_name,
        email: user.email,
        is_admin: user.is_admin,
    }
}
