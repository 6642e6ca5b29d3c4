use anyhow::{Context, Result};
use contracts::system::users::User;
use sea_orm::{ConnectionTrait, DatabaseBackend, QueryResult, Statement};

use crate::shared::data::db::get_connection;

const USER_COLUMNS: &str =
    "id, keycloak_id, username, email, full_name, is_admin, created_at, updated_at, last_login_at";

fn user_from_row(row: &QueryResult) -> Result<User> {
    Ok(User {
        id: row.try_get("", "id")?,
        keycloak_id: row.try_get("", "keycloak_id")?,
        username: row.try_get("", "username")?,
        email: row.try_get("", "email")?,
        full_name: row.try_get("", "full_name")?,
        is_admin: row.try_get::<i32>("", "is_admin")? != 0,
        created_at: row.try_get("", "created_at")?,
        updated_at: row.try_get("", "updated_at")?,
        last_login_at: row.try_get("", "last_login_at")?,
    })
}

/// Get user by Keycloak subject
pub async fn get_by_keycloak_id(keycloak_id: &str) -> Result<Option<User>> {
    let conn = get_connection();

    let result = conn
        .query_one(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            format!("SELECT {} FROM sys_users WHERE keycloak_id = ?", USER_COLUMNS),
            [keycloak_id.into()],
        ))
        .await?;

    result.as_ref().map(user_from_row).transpose()
}

pub async fn insert(user: &User) -> Result<()> {
    let conn = get_connection();

    conn.execute(Statement::from_sql_and_values(
        DatabaseBackend::Sqlite,
        format!(
            "INSERT INTO sys_users ({}) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
            USER_COLUMNS
        ),
        [
            user.id.clone().into(),
            user.keycloak_id.clone().into(),
            user.username.clone().into(),
            user.email.clone().into(),
            user.full_name.clone().into(),
            (if user.is_admin { 1 } else { 0 }).into(),
            user.created_at.clone().into(),
            user.updated_at.clone().into(),
            user.last_login_at.clone().into(),
        ],
    ))
    .await
    .context("Failed to insert user")?;

    Ok(())
}

/// Refresh profile fields copied from the token and stamp the login time
pub async fn update_profile(user: &User) -> Result<()> {
    let conn = get_connection();

    conn.execute(Statement::from_sql_and_values(
        DatabaseBackend::Sqlite,
        "UPDATE sys_users SET username = ?, email = ?, full_name = ?, is_admin = ?, updated_at = ?, last_login_at = ?
         WHERE keycloak_id = ?",
        [
            user.username.clone().into(),
            user.email.clone().into(),
            user.full_name.clone().into(),
            (if user.is_admin { 1 } else { 0 }).into(),
            user.updated_at.clone().into(),
            user.last_login_at.clone().into(),
            user.keycloak_id.clone().into(),
        ],
    ))
    .await
    .context("Failed to update user")?;

    Ok(())
}
