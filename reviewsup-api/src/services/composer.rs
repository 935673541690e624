//! Showcase assembly pipeline
//!
//! Read-path only: resolves the workspace's public reviews, ranks and
//! truncates them per the showcase's stored configuration, and returns the
//! render-ready view. No writes happen anywhere in this module.

use reviewsup_common::models::{Showcase, ShowcaseView};
use reviewsup_common::ranking::rank_reviews;
use reviewsup_common::Result;
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::db::{reviews, showcases};

/// Assemble the composed view for an already-loaded showcase record
pub async fn compose(pool: &SqlitePool, showcase: Showcase) -> Result<ShowcaseView> {
    let eligible = reviews::list_public_reviews(pool, showcase.workspace_id).await?;

    debug!(
        showcase = %showcase.short_id,
        eligible = eligible.len(),
        strategy = ?showcase.config.sort_by,
        "Composing showcase"
    );

    let ranked = rank_reviews(&eligible, showcase.config.sort_by, showcase.config.count);

    Ok(ShowcaseView {
        showcase,
        reviews: ranked,
    })
}

/// Owner-checked composition by internal id (dashboard preview path)
pub async fn compose_owned(
    pool: &SqlitePool,
    user_id: &str,
    id: Uuid,
) -> Result<ShowcaseView> {
    let showcase = showcases::find_showcase_owned(pool, user_id, id).await?;
    compose(pool, showcase).await
}

/// Public composition by short id or raw internal id (embed/share path).
/// No ownership check: this is the surface third-party pages consume.
pub async fn compose_by_key(pool: &SqlitePool, key: &str) -> Result<ShowcaseView> {
    let showcase = showcases::find_showcase_by_key(pool, key).await?;
    compose(pool, showcase).await
}
