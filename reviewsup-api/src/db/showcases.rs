//! Showcase database operations
//!
//! Owner-scoped mutations use a compound WHERE over (id, user_id) and check
//! the affected-row count: zero rows is surfaced as NotFound rather than a
//! silent success, and callers cannot tell "does not exist" from "exists
//! but not owned".

use chrono::Utc;
use reviewsup_common::ids::generate_short_id;
use reviewsup_common::models::{Showcase, ShowcaseConfig};
use reviewsup_common::pagination::{Page, PageRequest};
use reviewsup_common::{Error, Result};
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use uuid::Uuid;

use super::{parse_timestamp, parse_uuid};

const SHOWCASE_COLUMNS: &str =
    "id, short_id, user_id, workspace_id, name, config, created_at, updated_at";

fn showcase_from_row(row: &SqliteRow) -> Result<Showcase> {
    let id: String = row.get("id");
    let workspace_id: String = row.get("workspace_id");
    let config_json: String = row.get("config");
    let created_at: String = row.get("created_at");
    let updated_at: String = row.get("updated_at");

    let config: ShowcaseConfig = serde_json::from_str(&config_json)
        .map_err(|e| Error::Internal(format!("Malformed showcase config: {e}")))?;

    Ok(Showcase {
        id: parse_uuid(&id)?,
        short_id: row.get("short_id"),
        user_id: row.get("user_id"),
        workspace_id: parse_uuid(&workspace_id)?,
        name: row.get("name"),
        config,
        created_at: parse_timestamp(&created_at)?,
        updated_at: parse_timestamp(&updated_at)?,
    })
}

/// Persist a new showcase with a fresh short id and the default config
pub async fn create_showcase(
    pool: &SqlitePool,
    user_id: &str,
    workspace_id: Uuid,
    name: &str,
) -> Result<Showcase> {
    let now = Utc::now();
    let showcase = Showcase {
        id: Uuid::new_v4(),
        short_id: generate_short_id(),
        user_id: user_id.to_string(),
        workspace_id,
        name: name.to_string(),
        config: ShowcaseConfig::default(),
        created_at: now,
        updated_at: now,
    };

    let config_json = serde_json::to_string(&showcase.config)
        .map_err(|e| Error::Internal(format!("Failed to serialize config: {e}")))?;

    sqlx::query(
        r#"
        INSERT INTO showcases (
            id, short_id, user_id, workspace_id, name, config, created_at, updated_at
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(showcase.id.to_string())
    .bind(&showcase.short_id)
    .bind(&showcase.user_id)
    .bind(showcase.workspace_id.to_string())
    .bind(&showcase.name)
    .bind(&config_json)
    .bind(showcase.created_at.to_rfc3339())
    .bind(showcase.updated_at.to_rfc3339())
    .execute(pool)
    .await?;

    Ok(showcase)
}

/// Load a showcase by internal id, enforcing ownership
pub async fn find_showcase_owned(
    pool: &SqlitePool,
    user_id: &str,
    id: Uuid,
) -> Result<Showcase> {
    let row = sqlx::query(&format!(
        "SELECT {SHOWCASE_COLUMNS} FROM showcases WHERE id = ?"
    ))
    .bind(id.to_string())
    .fetch_optional(pool)
    .await?;

    match row {
        Some(row) => {
            let showcase = showcase_from_row(&row)?;
            if showcase.user_id != user_id {
                return Err(Error::NotFound("Showcase not found or access denied".into()));
            }
            Ok(showcase)
        }
        None => Err(Error::NotFound("Showcase not found or access denied".into())),
    }
}

/// Public lookup: the key may be either the short id or the raw internal id
pub async fn find_showcase_by_key(pool: &SqlitePool, key: &str) -> Result<Showcase> {
    let row = sqlx::query(&format!(
        "SELECT {SHOWCASE_COLUMNS} FROM showcases WHERE short_id = ?1 OR id = ?1"
    ))
    .bind(key)
    .fetch_optional(pool)
    .await?;

    match row {
        Some(row) => showcase_from_row(&row),
        None => Err(Error::NotFound("Showcase not found".into())),
    }
}

/// Overwrite name and config; only the owner's update affects a row
pub async fn update_showcase(
    pool: &SqlitePool,
    user_id: &str,
    id: Uuid,
    name: &str,
    config: &ShowcaseConfig,
) -> Result<Showcase> {
    let config_json = serde_json::to_string(config)
        .map_err(|e| Error::Internal(format!("Failed to serialize config: {e}")))?;

    let result = sqlx::query(
        r#"
        UPDATE showcases
        SET name = ?, config = ?, updated_at = ?
        WHERE id = ? AND user_id = ?
        "#,
    )
    .bind(name)
    .bind(&config_json)
    .bind(Utc::now().to_rfc3339())
    .bind(id.to_string())
    .bind(user_id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(Error::NotFound("Showcase not found or access denied".into()));
    }

    find_showcase_owned(pool, user_id, id).await
}

/// Owner-scoped hard delete
pub async fn delete_showcase(pool: &SqlitePool, user_id: &str, id: Uuid) -> Result<()> {
    let result = sqlx::query("DELETE FROM showcases WHERE id = ? AND user_id = ?")
        .bind(id.to_string())
        .bind(user_id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(Error::NotFound("Showcase not found or access denied".into()));
    }
    Ok(())
}

/// Paginated listing of a workspace's showcases, newest first
pub async fn list_showcases(
    pool: &SqlitePool,
    user_id: &str,
    workspace_id: Uuid,
    request: PageRequest,
) -> Result<Page<Showcase>> {
    request.validate()?;

    let total: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM showcases WHERE user_id = ? AND workspace_id = ?",
    )
    .bind(user_id)
    .bind(workspace_id.to_string())
    .fetch_one(pool)
    .await?;

    let rows = sqlx::query(&format!(
        r#"
        SELECT {SHOWCASE_COLUMNS} FROM showcases
        WHERE user_id = ? AND workspace_id = ?
        ORDER BY created_at DESC
        LIMIT ? OFFSET ?
        "#
    ))
    .bind(user_id)
    .bind(workspace_id.to_string())
    .bind(request.page_size)
    .bind(request.offset())
    .fetch_all(pool)
    .await?;

    let items = rows
        .iter()
        .map(showcase_from_row)
        .collect::<Result<Vec<_>>>()?;

    Ok(Page::new(items, request, total))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_pool;
    use reviewsup_common::models::SortBy;

    #[tokio::test]
    async fn test_create_and_find_showcase() {
        let pool = test_pool().await;
        let workspace_id = Uuid::new_v4();

        let created = create_showcase(&pool, "user-a", workspace_id, "Wall of Love")
            .await
            .expect("Failed to create showcase");

        assert_eq!(created.name, "Wall of Love");
        assert_eq!(created.config, ShowcaseConfig::default());
        assert_eq!(created.short_id.len(), 11);

        let loaded = find_showcase_owned(&pool, "user-a", created.id)
            .await
            .expect("Owner should find the showcase");
        assert_eq!(loaded.id, created.id);
        assert_eq!(loaded.config.sort_by, SortBy::Newest);
    }

    #[tokio::test]
    async fn test_owner_check_collapses_to_not_found() {
        let pool = test_pool().await;
        let created = create_showcase(&pool, "user-a", Uuid::new_v4(), "Mine")
            .await
            .unwrap();

        let err = find_showcase_owned(&pool, "user-b", created.id)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));

        let err = find_showcase_owned(&pool, "user-a", Uuid::new_v4())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[tokio::test]
    async fn test_dual_key_lookup() {
        let pool = test_pool().await;
        let created = create_showcase(&pool, "user-a", Uuid::new_v4(), "Embed")
            .await
            .unwrap();

        let by_short = find_showcase_by_key(&pool, &created.short_id).await.unwrap();
        let by_id = find_showcase_by_key(&pool, &created.id.to_string())
            .await
            .unwrap();
        assert_eq!(by_short.id, created.id);
        assert_eq!(by_id.id, created.id);

        let err = find_showcase_by_key(&pool, "missing").await.unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[tokio::test]
    async fn test_mismatched_owner_update_leaves_record_untouched() {
        let pool = test_pool().await;
        let created = create_showcase(&pool, "owner-a", Uuid::new_v4(), "Foo")
            .await
            .unwrap();

        let config = ShowcaseConfig::default();
        let err = update_showcase(&pool, "owner-b", created.id, "Bar", &config)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));

        // The true owner still sees the original name
        let fetched = find_showcase_owned(&pool, "owner-a", created.id)
            .await
            .unwrap();
        assert_eq!(fetched.name, "Foo");
    }

    #[tokio::test]
    async fn test_update_overwrites_name_and_config() {
        let pool = test_pool().await;
        let created = create_showcase(&pool, "user-a", Uuid::new_v4(), "Before")
            .await
            .unwrap();

        let mut config = ShowcaseConfig::default();
        config.count = 5;
        config.sort_by = SortBy::Rating;

        let updated = update_showcase(&pool, "user-a", created.id, "After", &config)
            .await
            .unwrap();
        assert_eq!(updated.name, "After");
        assert_eq!(updated.config.count, 5);
        assert_eq!(updated.config.sort_by, SortBy::Rating);
        // Short id is immutable after creation
        assert_eq!(updated.short_id, created.short_id);
    }

    #[tokio::test]
    async fn test_owner_scoped_delete() {
        let pool = test_pool().await;
        let created = create_showcase(&pool, "user-a", Uuid::new_v4(), "Gone")
            .await
            .unwrap();

        let err = delete_showcase(&pool, "user-b", created.id).await.unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));

        delete_showcase(&pool, "user-a", created.id)
            .await
            .expect("Owner delete should succeed");

        let err = find_showcase_owned(&pool, "user-a", created.id)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[tokio::test]
    async fn test_pagination_page_two_of_twenty_five() {
        let pool = test_pool().await;
        let workspace_id = Uuid::new_v4();

        for i in 0..25 {
            create_showcase(&pool, "user-a", workspace_id, &format!("showcase-{i:02}"))
                .await
                .unwrap();
        }

        let page = list_showcases(
            &pool,
            "user-a",
            workspace_id,
            PageRequest { page: 2, page_size: 10 },
        )
        .await
        .unwrap();

        assert_eq!(page.items.len(), 10);
        assert_eq!(page.meta.total, 25);
        assert_eq!(page.meta.page, 2);
        assert_eq!(page.meta.page_size, 10);

        let last = list_showcases(
            &pool,
            "user-a",
            workspace_id,
            PageRequest { page: 3, page_size: 10 },
        )
        .await
        .unwrap();
        assert_eq!(last.items.len(), 5);
    }

    #[tokio::test]
    async fn test_pagination_rejects_non_positive_page() {
        let pool = test_pool().await;
        let err = list_showcases(
            &pool,
            "user-a",
            Uuid::new_v4(),
            PageRequest { page: 0, page_size: 10 },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }
}
