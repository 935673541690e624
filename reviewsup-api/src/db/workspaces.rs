//! Workspace and form database operations
//!
//! Workspaces group forms, reviews and showcases per tenant. Only the
//! operations needed by new-account seeding and moderation scoping live
//! here; workspace management itself is handled upstream.

use chrono::Utc;
use reviewsup_common::ids::generate_short_id;
use reviewsup_common::models::{Form, Workspace};
use reviewsup_common::Result;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use super::{parse_timestamp, parse_uuid};

/// Persist a new workspace with a fresh short id
pub async fn create_workspace(
    pool: &SqlitePool,
    user_id: &str,
    name: &str,
) -> Result<Workspace> {
    let workspace = Workspace {
        id: Uuid::new_v4(),
        short_id: generate_short_id(),
        user_id: user_id.to_string(),
        name: name.to_string(),
        created_at: Utc::now(),
    };

    sqlx::query(
        "INSERT INTO workspaces (id, short_id, user_id, name, created_at) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(workspace.id.to_string())
    .bind(&workspace.short_id)
    .bind(&workspace.user_id)
    .bind(&workspace.name)
    .bind(workspace.created_at.to_rfc3339())
    .execute(pool)
    .await?;

    Ok(workspace)
}

/// Persist a new collection form under a workspace
pub async fn create_form(
    pool: &SqlitePool,
    user_id: &str,
    workspace_id: Uuid,
    name: &str,
) -> Result<Form> {
    let form = Form {
        id: Uuid::new_v4(),
        workspace_id,
        user_id: user_id.to_string(),
        name: name.to_string(),
        created_at: Utc::now(),
    };

    sqlx::query(
        "INSERT INTO forms (id, workspace_id, user_id, name, created_at) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(form.id.to_string())
    .bind(form.workspace_id.to_string())
    .bind(&form.user_id)
    .bind(&form.name)
    .bind(form.created_at.to_rfc3339())
    .execute(pool)
    .await?;

    Ok(form)
}

/// Load a workspace by id
pub async fn find_workspace(pool: &SqlitePool, id: Uuid) -> Result<Option<Workspace>> {
    let row = sqlx::query(
        "SELECT id, short_id, user_id, name, created_at FROM workspaces WHERE id = ?",
    )
    .bind(id.to_string())
    .fetch_optional(pool)
    .await?;

    match row {
        Some(row) => {
            let id: String = row.get("id");
            let created_at: String = row.get("created_at");
            Ok(Some(Workspace {
                id: parse_uuid(&id)?,
                short_id: row.get("short_id"),
                user_id: row.get("user_id"),
                name: row.get("name"),
                created_at: parse_timestamp(&created_at)?,
            }))
        }
        None => Ok(None),
    }
}
