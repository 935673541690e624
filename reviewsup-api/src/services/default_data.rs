//! New-account default data seeding
//!
//! Every new account gets a default workspace, one collection form, a few
//! sample public reviews, and one showcase, so the dashboard and widget
//! have something to show before the first real review arrives. Each step
//! failing propagates; there is no partial-success reporting.

use reviewsup_common::models::{Form, ReviewStatus, Showcase, Workspace};
use reviewsup_common::Result;
use sqlx::SqlitePool;
use tracing::info;

use crate::db::reviews::{self, NewReview};
use crate::db::{showcases, workspaces};

const DEFAULT_WORKSPACE_NAME: &str = "My Workspace";
const DEFAULT_FORM_NAME: &str = "My First Form";
const DEFAULT_SHOWCASE_NAME: &str = "My First Showcase";

struct SampleReview {
    reviewer_name: &'static str,
    reviewer_title: &'static str,
    rating: f64,
    text: &'static str,
}

const SAMPLE_REVIEWS: &[SampleReview] = &[
    SampleReview {
        reviewer_name: "Alex Morgan",
        reviewer_title: "Founder, Acme",
        rating: 5.0,
        text: "Collecting testimonials used to take us days. Now it is one link.",
    },
    SampleReview {
        reviewer_name: "Priya Nair",
        reviewer_title: "Head of Growth",
        rating: 4.0,
        text: "The wall of love widget doubled the time visitors spend on our landing page.",
    },
    SampleReview {
        reviewer_name: "Sam Chen",
        reviewer_title: "Indie maker",
        rating: 5.0,
        text: "Dropped the embed snippet in and it just worked.",
    },
];

/// Records created for a new account
#[derive(Debug)]
pub struct SeededDefaults {
    pub workspace: Workspace,
    pub form: Form,
    pub showcase: Showcase,
}

/// Create the default workspace, form, sample reviews and showcase for a
/// newly registered user.
pub async fn seed_default_data(pool: &SqlitePool, user_id: &str) -> Result<SeededDefaults> {
    let workspace = workspaces::create_workspace(pool, user_id, DEFAULT_WORKSPACE_NAME).await?;
    let form = workspaces::create_form(pool, user_id, workspace.id, DEFAULT_FORM_NAME).await?;

    for sample in SAMPLE_REVIEWS {
        reviews::create_review(
            pool,
            NewReview {
                workspace_id: workspace.id,
                form_id: Some(form.id),
                reviewer_name: sample.reviewer_name.to_string(),
                reviewer_title: Some(sample.reviewer_title.to_string()),
                reviewer_image: None,
                reviewer_email: None,
                reviewer_url: None,
                source: None,
                source_url: None,
                rating: Some(sample.rating),
                text: Some(sample.text.to_string()),
                status: Some(ReviewStatus::Public),
                medias: Vec::new(),
            },
        )
        .await?;
    }

    let showcase =
        showcases::create_showcase(pool, user_id, workspace.id, DEFAULT_SHOWCASE_NAME).await?;

    info!(
        user_id,
        workspace = %workspace.id,
        showcase = %showcase.short_id,
        "Seeded default account data"
    );

    Ok(SeededDefaults {
        workspace,
        form,
        showcase,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_pool;
    use crate::services::composer;

    #[tokio::test]
    async fn test_seed_creates_workspace_form_reviews_showcase() {
        let pool = test_pool().await;
        let seeded = seed_default_data(&pool, "user-new").await.expect("seed failed");

        assert_eq!(seeded.workspace.name, DEFAULT_WORKSPACE_NAME);
        assert_eq!(seeded.form.workspace_id, seeded.workspace.id);
        assert_eq!(seeded.showcase.workspace_id, seeded.workspace.id);

        // Seeded reviews are public, so the default showcase renders them
        let view = composer::compose_by_key(&pool, &seeded.showcase.short_id)
            .await
            .unwrap();
        assert_eq!(view.reviews.len(), SAMPLE_REVIEWS.len());
    }
}
