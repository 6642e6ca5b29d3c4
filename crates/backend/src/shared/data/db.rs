use contracts::domain::a001_event::Event;
use contracts::domain::a002_cfp_submission::CfpSubmission;
use contracts::domain::a003_attendee::Attendee;
use contracts::domain::a004_sponsorship::Sponsorship;
use contracts::domain::a005_approval_workflow::ApprovalWorkflow;
use contracts::domain::a006_asset::Asset;
use contracts::domain::common::AggregateRoot;
use once_cell::sync::OnceCell;
use sea_orm::{ConnectionTrait, Database, DatabaseBackend, DatabaseConnection, Statement};
use std::path::Path;

static DB_CONN: OnceCell<DatabaseConnection> = OnceCell::new();

/// Columns every aggregate table carries
const LIFECYCLE_COLUMNS: &str = r#"
    is_deleted INTEGER NOT NULL DEFAULT 0,
    created_at TEXT,
    updated_at TEXT,
    version INTEGER NOT NULL DEFAULT 0
"#;

fn build_sqlite_url(path: &Path) -> anyhow::Result<String> {
    let absolute_path = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()?.join(path)
    };
    // Normalize path separators and ensure proper URL form on Windows
    let normalized = absolute_path.to_string_lossy().replace('\\', "/");
    let needs_leading_slash = !normalized.starts_with('/') && normalized.contains(':');
    let prefix = if needs_leading_slash { "/" } else { "" };
    Ok(format!("sqlite://{}{}?mode=rwc", prefix, normalized))
}

pub async fn initialize_database(db_path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let db_url = build_sqlite_url(db_path)?;
    tracing::info!("Connecting to database: {}", db_url);
    let conn = Database::connect(&db_url).await?;

    ensure_schema(&conn).await?;

    DB_CONN
        .set(conn)
        .map_err(|_| anyhow::anyhow!("Failed to set DB_CONN"))?;
    Ok(())
}

async fn table_exists(conn: &DatabaseConnection, table_name: &str) -> anyhow::Result<bool> {
    let rows = conn
        .query_all(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            "SELECT name FROM sqlite_master WHERE type='table' AND name = ?",
            [table_name.into()],
        ))
        .await?;
    Ok(!rows.is_empty())
}

async fn ensure_table(
    conn: &DatabaseConnection,
    table_name: &str,
    columns: &str,
) -> anyhow::Result<()> {
    if table_exists(conn, table_name).await? {
        return Ok(());
    }
    tracing::info!("Creating {} table", table_name);
    let sql = format!(
        "CREATE TABLE {} (\n    id TEXT PRIMARY KEY NOT NULL,\n{},\n{}\n);",
        table_name,
        columns.trim_end().trim_end_matches(','),
        LIFECYCLE_COLUMNS.trim_end()
    );
    conn.execute(Statement::from_string(DatabaseBackend::Sqlite, sql))
        .await?;
    Ok(())
}

/// Creates missing tables (minimal schema bootstrap)
pub async fn ensure_schema(conn: &DatabaseConnection) -> anyhow::Result<()> {
    ensure_table(
        conn,
        &Event::full_name(),
        r#"
    name TEXT NOT NULL,
    link TEXT,
    start_date TEXT NOT NULL,
    end_date TEXT NOT NULL,
    location TEXT NOT NULL,
    priority TEXT NOT NULL DEFAULT 'medium',
    event_type TEXT NOT NULL DEFAULT 'conference',
    goals TEXT NOT NULL DEFAULT '[]',
    cfp_deadline TEXT,
    status TEXT NOT NULL DEFAULT 'planning',
    notes TEXT,
    created_by TEXT
"#,
    )
    .await?;
    conn.execute(Statement::from_string(
        DatabaseBackend::Sqlite,
        format!(
            "CREATE INDEX IF NOT EXISTS idx_{0}_start_date ON {0} (start_date);",
            Event::full_name()
        ),
    ))
    .await?;

    ensure_table(
        conn,
        &CfpSubmission::full_name(),
        r#"
    event_id TEXT NOT NULL,
    title TEXT NOT NULL,
    abstract_text TEXT NOT NULL DEFAULT '',
    submitter_name TEXT NOT NULL,
    submitter_email TEXT,
    submission_date TEXT NOT NULL,
    status TEXT NOT NULL DEFAULT 'submitted'
"#,
    )
    .await?;

    ensure_table(
        conn,
        &Attendee::full_name(),
        r#"
    event_id TEXT NOT NULL,
    name TEXT NOT NULL,
    email TEXT,
    role TEXT,
    notes TEXT
"#,
    )
    .await?;

    ensure_table(
        conn,
        &Sponsorship::full_name(),
        r#"
    event_id TEXT NOT NULL,
    level TEXT NOT NULL,
    amount INTEGER NOT NULL DEFAULT 0,
    currency TEXT NOT NULL DEFAULT 'USD',
    status TEXT NOT NULL DEFAULT 'pending',
    contact_name TEXT,
    contact_email TEXT,
    notes TEXT
"#,
    )
    .await?;

    ensure_table(
        conn,
        &ApprovalWorkflow::full_name(),
        r#"
    title TEXT NOT NULL,
    description TEXT,
    item_type TEXT NOT NULL,
    item_id TEXT NOT NULL,
    priority TEXT NOT NULL DEFAULT 'medium',
    due_date TEXT,
    requester_id TEXT NOT NULL,
    reviewers TEXT NOT NULL DEFAULT '[]',
    status TEXT NOT NULL DEFAULT 'draft'
"#,
    )
    .await?;

    ensure_table(
        conn,
        &Asset::full_name(),
        r#"
    event_id TEXT NOT NULL,
    name TEXT NOT NULL,
    asset_type TEXT NOT NULL DEFAULT 'other',
    location TEXT NOT NULL,
    description TEXT,
    uploaded_by TEXT
"#,
    )
    .await?;

    if !table_exists(conn, "sys_users").await? {
        tracing::info!("Creating sys_users table");
        conn.execute(Statement::from_string(
            DatabaseBackend::Sqlite,
            r#"
            CREATE TABLE sys_users (
                id TEXT PRIMARY KEY NOT NULL,
                keycloak_id TEXT NOT NULL UNIQUE,
                username TEXT NOT NULL,
                email TEXT,
                full_name TEXT,
                is_admin INTEGER NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL,
                last_login_at TEXT
            );
            "#
            .to_string(),
        ))
        .await?;
    }

    Ok(())
}

pub fn get_connection() -> &'static DatabaseConnection {
    DB_CONN
        .get()
        .expect("Database connection has not been initialized")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sqlite_url_for_absolute_path() {
        let url = build_sqlite_url(Path::new("/tmp/ospo/events.db")).unwrap();
        assert_eq!(url, "sqlite:///tmp/ospo/events.db?mode=rwc");
    }
}
