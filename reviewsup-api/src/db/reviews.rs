//! Review database operations
//!
//! Reviews are created through the public submission path (or default-data
//! seeding) and mutated only to change their moderation status or to be
//! deleted. Moderation is owner-scoped through the review's workspace.

use chrono::Utc;
use reviewsup_common::models::{MediaKind, Review, ReviewMedia, ReviewStatus};
use reviewsup_common::pagination::{Page, PageRequest};
use reviewsup_common::{Error, Result};
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use std::collections::HashMap;
use uuid::Uuid;

use super::{parse_timestamp, parse_uuid};

const REVIEW_COLUMNS: &str = "id, workspace_id, form_id, reviewer_name, reviewer_title, \
     reviewer_image, reviewer_email, reviewer_url, source, source_url, \
     rating, text, status, created_at, updated_at";

/// Input for creating a review
#[derive(Debug, Clone)]
pub struct NewReview {
    pub workspace_id: Uuid,
    pub form_id: Option<Uuid>,
    pub reviewer_name: String,
    pub reviewer_title: Option<String>,
    pub reviewer_image: Option<String>,
    pub reviewer_email: Option<String>,
    pub reviewer_url: Option<String>,
    pub source: Option<String>,
    pub source_url: Option<String>,
    pub rating: Option<f64>,
    pub text: Option<String>,
    /// Defaults to pending when absent
    pub status: Option<ReviewStatus>,
    pub medias: Vec<NewMedia>,
}

/// Input for a media attachment
#[derive(Debug, Clone)]
pub struct NewMedia {
    pub kind: MediaKind,
    pub url: String,
}

fn review_from_row(row: &SqliteRow) -> Result<Review> {
    let id: String = row.get("id");
    let workspace_id: String = row.get("workspace_id");
    let form_id: Option<String> = row.get("form_id");
    let status: String = row.get("status");
    let created_at: String = row.get("created_at");
    let updated_at: String = row.get("updated_at");

    Ok(Review {
        id: parse_uuid(&id)?,
        workspace_id: parse_uuid(&workspace_id)?,
        form_id: form_id.as_deref().map(parse_uuid).transpose()?,
        reviewer_name: row.get("reviewer_name"),
        reviewer_title: row.get("reviewer_title"),
        reviewer_image: row.get("reviewer_image"),
        reviewer_email: row.get("reviewer_email"),
        reviewer_url: row.get("reviewer_url"),
        source: row.get("source"),
        source_url: row.get("source_url"),
        rating: row.get("rating"),
        text: row.get("text"),
        status: ReviewStatus::parse(&status)
            .ok_or_else(|| Error::Internal(format!("Unknown review status: {status}")))?,
        medias: Vec::new(),
        created_at: parse_timestamp(&created_at)?,
        updated_at: parse_timestamp(&updated_at)?,
    })
}

/// Persist a review and its media attachments
pub async fn create_review(pool: &SqlitePool, new: NewReview) -> Result<Review> {
    if new.reviewer_name.trim().is_empty() {
        return Err(Error::InvalidInput("Reviewer name is required".into()));
    }

    let now = Utc::now();
    let id = Uuid::new_v4();
    let status = new.status.unwrap_or(ReviewStatus::Pending);

    sqlx::query(
        r#"
        INSERT INTO reviews (
            id, workspace_id, form_id, reviewer_name, reviewer_title,
            reviewer_image, reviewer_email, reviewer_url, source, source_url,
            rating, text, status, created_at, updated_at
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(id.to_string())
    .bind(new.workspace_id.to_string())
    .bind(new.form_id.map(|f| f.to_string()))
    .bind(&new.reviewer_name)
    .bind(&new.reviewer_title)
    .bind(&new.reviewer_image)
    .bind(&new.reviewer_email)
    .bind(&new.reviewer_url)
    .bind(&new.source)
    .bind(&new.source_url)
    .bind(new.rating)
    .bind(&new.text)
    .bind(status.as_str())
    .bind(now.to_rfc3339())
    .bind(now.to_rfc3339())
    .execute(pool)
    .await?;

    let mut medias = Vec::with_capacity(new.medias.len());
    for media in &new.medias {
        let media_id = Uuid::new_v4();
        sqlx::query("INSERT INTO review_medias (id, review_id, kind, url) VALUES (?, ?, ?, ?)")
            .bind(media_id.to_string())
            .bind(id.to_string())
            .bind(media.kind.as_str())
            .bind(&media.url)
            .execute(pool)
            .await?;
        medias.push(ReviewMedia {
            id: media_id,
            review_id: id,
            kind: media.kind,
            url: media.url.clone(),
        });
    }

    Ok(Review {
        id,
        workspace_id: new.workspace_id,
        form_id: new.form_id,
        reviewer_name: new.reviewer_name,
        reviewer_title: new.reviewer_title,
        reviewer_image: new.reviewer_image,
        reviewer_email: new.reviewer_email,
        reviewer_url: new.reviewer_url,
        source: new.source,
        source_url: new.source_url,
        rating: new.rating,
        text: new.text,
        status,
        medias,
        created_at: now,
        updated_at: now,
    })
}

/// Load media attachments for a set of reviews, keyed by review id
async fn load_medias(
    pool: &SqlitePool,
    review_ids: &[Uuid],
) -> Result<HashMap<Uuid, Vec<ReviewMedia>>> {
    let mut by_review: HashMap<Uuid, Vec<ReviewMedia>> = HashMap::new();
    if review_ids.is_empty() {
        return Ok(by_review);
    }

    let placeholders = vec!["?"; review_ids.len()].join(", ");
    let sql = format!(
        "SELECT id, review_id, kind, url FROM review_medias WHERE review_id IN ({placeholders})"
    );
    let mut query = sqlx::query(&sql);
    for id in review_ids {
        query = query.bind(id.to_string());
    }

    for row in query.fetch_all(pool).await? {
        let id: String = row.get("id");
        let review_id: String = row.get("review_id");
        let kind: String = row.get("kind");
        let media = ReviewMedia {
            id: parse_uuid(&id)?,
            review_id: parse_uuid(&review_id)?,
            kind: MediaKind::parse(&kind)
                .ok_or_else(|| Error::Internal(format!("Unknown media kind: {kind}")))?,
            url: row.get("url"),
        };
        by_review.entry(media.review_id).or_default().push(media);
    }

    Ok(by_review)
}

fn attach_medias(reviews: &mut [Review], mut medias: HashMap<Uuid, Vec<ReviewMedia>>) {
    for review in reviews {
        review.medias = medias.remove(&review.id).unwrap_or_default();
    }
}

/// All public reviews of a workspace, media attached, newest first.
///
/// A workspace with no reviews returns an empty vec, not an error.
pub async fn list_public_reviews(pool: &SqlitePool, workspace_id: Uuid) -> Result<Vec<Review>> {
    let rows = sqlx::query(&format!(
        r#"
        SELECT {REVIEW_COLUMNS} FROM reviews
        WHERE workspace_id = ? AND status = 'public'
        ORDER BY created_at DESC
        "#
    ))
    .bind(workspace_id.to_string())
    .fetch_all(pool)
    .await?;

    let mut reviews = rows
        .iter()
        .map(review_from_row)
        .collect::<Result<Vec<_>>>()?;

    let ids: Vec<Uuid> = reviews.iter().map(|r| r.id).collect();
    let medias = load_medias(pool, &ids).await?;
    attach_medias(&mut reviews, medias);

    Ok(reviews)
}

/// Paginated dashboard listing of all of a workspace's reviews, any status.
/// Scoped to the workspace owner: pending submissions and reviewer contact
/// details never leave the tenant.
pub async fn list_reviews(
    pool: &SqlitePool,
    user_id: &str,
    workspace_id: Uuid,
    request: PageRequest,
) -> Result<Page<Review>> {
    request.validate()?;

    let owner: Option<String> =
        sqlx::query_scalar("SELECT user_id FROM workspaces WHERE id = ?")
            .bind(workspace_id.to_string())
            .fetch_optional(pool)
            .await?;
    match owner {
        Some(owner) if owner == user_id => {}
        _ => return Err(Error::NotFound("Workspace not found or access denied".into())),
    }

    let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM reviews WHERE workspace_id = ?")
        .bind(workspace_id.to_string())
        .fetch_one(pool)
        .await?;

    let rows = sqlx::query(&format!(
        r#"
        SELECT {REVIEW_COLUMNS} FROM reviews
        WHERE workspace_id = ?
        ORDER BY created_at DESC
        LIMIT ? OFFSET ?
        "#
    ))
    .bind(workspace_id.to_string())
    .bind(request.page_size)
    .bind(request.offset())
    .fetch_all(pool)
    .await?;

    let mut reviews = rows
        .iter()
        .map(review_from_row)
        .collect::<Result<Vec<_>>>()?;

    let ids: Vec<Uuid> = reviews.iter().map(|r| r.id).collect();
    let medias = load_medias(pool, &ids).await?;
    attach_medias(&mut reviews, medias);

    Ok(Page::new(reviews, request, total))
}

/// Change moderation status; scoped to workspaces the user owns
pub async fn update_review_status(
    pool: &SqlitePool,
    user_id: &str,
    id: Uuid,
    status: ReviewStatus,
) -> Result<()> {
    let result = sqlx::query(
        r#"
        UPDATE reviews
        SET status = ?, updated_at = ?
        WHERE id = ?
          AND workspace_id IN (SELECT id FROM workspaces WHERE user_id = ?)
        "#,
    )
    .bind(status.as_str())
    .bind(Utc::now().to_rfc3339())
    .bind(id.to_string())
    .bind(user_id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(Error::NotFound("Review not found or access denied".into()));
    }
    Ok(())
}

/// Owner-scoped hard delete
pub async fn delete_review(pool: &SqlitePool, user_id: &str, id: Uuid) -> Result<()> {
    let result = sqlx::query(
        r#"
        DELETE FROM reviews
        WHERE id = ?
          AND workspace_id IN (SELECT id FROM workspaces WHERE user_id = ?)
        "#,
    )
    .bind(id.to_string())
    .bind(user_id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(Error::NotFound("Review not found or access denied".into()));
    }

    // Referential cleanup for attachments (no FK cascade on detached pools
    // that skip PRAGMA foreign_keys)
    sqlx::query("DELETE FROM review_medias WHERE review_id = ?")
        .bind(id.to_string())
        .execute(pool)
        .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{test_pool, workspaces};

    fn sample(workspace_id: Uuid, name: &str, status: ReviewStatus) -> NewReview {
        NewReview {
            workspace_id,
            form_id: None,
            reviewer_name: name.to_string(),
            reviewer_title: Some("CTO".to_string()),
            reviewer_image: None,
            reviewer_email: None,
            reviewer_url: None,
            source: None,
            source_url: None,
            rating: Some(5.0),
            text: Some("Great product".to_string()),
            status: Some(status),
            medias: Vec::new(),
        }
    }

    #[tokio::test]
    async fn test_create_review_with_media() {
        let pool = test_pool().await;
        let workspace_id = Uuid::new_v4();

        let mut new = sample(workspace_id, "Ada", ReviewStatus::Public);
        new.medias.push(NewMedia {
            kind: MediaKind::Image,
            url: "https://cdn.example.com/shot.png".to_string(),
        });

        let review = create_review(&pool, new).await.expect("create failed");
        assert_eq!(review.medias.len(), 1);

        let listed = list_public_reviews(&pool, workspace_id).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].medias.len(), 1);
        assert_eq!(listed[0].medias[0].kind, MediaKind::Image);
    }

    #[tokio::test]
    async fn test_create_review_requires_name() {
        let pool = test_pool().await;
        let err = create_review(&pool, sample(Uuid::new_v4(), "  ", ReviewStatus::Public))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_only_public_reviews_are_selected() {
        let pool = test_pool().await;
        let workspace_id = Uuid::new_v4();

        create_review(&pool, sample(workspace_id, "Ada", ReviewStatus::Public))
            .await
            .unwrap();
        create_review(&pool, sample(workspace_id, "Bob", ReviewStatus::Pending))
            .await
            .unwrap();
        create_review(&pool, sample(workspace_id, "Cay", ReviewStatus::Hidden))
            .await
            .unwrap();

        let listed = list_public_reviews(&pool, workspace_id).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].reviewer_name, "Ada");
    }

    #[tokio::test]
    async fn test_empty_workspace_returns_empty_sequence() {
        let pool = test_pool().await;
        let listed = list_public_reviews(&pool, Uuid::new_v4()).await.unwrap();
        assert!(listed.is_empty());
    }

    #[tokio::test]
    async fn test_status_change_is_owner_scoped() {
        let pool = test_pool().await;
        let workspace = workspaces::create_workspace(&pool, "owner-a", "WS")
            .await
            .unwrap();
        let review = create_review(&pool, sample(workspace.id, "Ada", ReviewStatus::Pending))
            .await
            .unwrap();

        let err = update_review_status(&pool, "owner-b", review.id, ReviewStatus::Public)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));

        update_review_status(&pool, "owner-a", review.id, ReviewStatus::Public)
            .await
            .expect("Owner moderation should succeed");

        let listed = list_public_reviews(&pool, workspace.id).await.unwrap();
        assert_eq!(listed.len(), 1);
    }

    #[tokio::test]
    async fn test_delete_is_owner_scoped() {
        let pool = test_pool().await;
        let workspace = workspaces::create_workspace(&pool, "owner-a", "WS")
            .await
            .unwrap();
        let review = create_review(&pool, sample(workspace.id, "Ada", ReviewStatus::Public))
            .await
            .unwrap();

        let err = delete_review(&pool, "owner-b", review.id).await.unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));

        delete_review(&pool, "owner-a", review.id).await.unwrap();
        assert!(list_public_reviews(&pool, workspace.id)
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_dashboard_listing_pages_all_statuses() {
        let pool = test_pool().await;
        let workspace = workspaces::create_workspace(&pool, "owner-a", "WS")
            .await
            .unwrap();
        for i in 0..12 {
            let status = if i % 2 == 0 {
                ReviewStatus::Public
            } else {
                ReviewStatus::Pending
            };
            create_review(&pool, sample(workspace.id, &format!("r{i}"), status))
                .await
                .unwrap();
        }

        let page = list_reviews(
            &pool,
            "owner-a",
            workspace.id,
            PageRequest { page: 2, page_size: 5 },
        )
        .await
        .unwrap();
        assert_eq!(page.items.len(), 5);
        assert_eq!(page.meta.total, 12);
    }

    #[tokio::test]
    async fn test_dashboard_listing_is_owner_scoped() {
        let pool = test_pool().await;
        let workspace = workspaces::create_workspace(&pool, "owner-a", "WS")
            .await
            .unwrap();
        create_review(&pool, sample(workspace.id, "Ada", ReviewStatus::Pending))
            .await
            .unwrap();

        // A different authenticated user must not see the tenant's reviews
        let err = list_reviews(
            &pool,
            "owner-b",
            workspace.id,
            PageRequest { page: 1, page_size: 10 },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));

        // Nor does a workspace that does not exist leak an empty page
        let err = list_reviews(
            &pool,
            "owner-a",
            Uuid::new_v4(),
            PageRequest { page: 1, page_size: 10 },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }
}
