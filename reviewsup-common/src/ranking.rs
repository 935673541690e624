//! Review ranking strategies
//!
//! Orders a workspace's public reviews per a showcase's stored sort
//! strategy, then truncates to the configured display count. Pure: the
//! input slice is never mutated, callers get a fresh vector.

use crate::models::{Review, SortBy};
use rand::seq::SliceRandom;
use std::cmp::Ordering;

/// Rank reviews by `sort_by`, then keep at most `count` items.
///
/// Deterministic strategies use a stable sort, so ties keep their relative
/// input order. A `count` of zero or less means no truncation. Strategies
/// the service does not recognize pass the input through unchanged.
pub fn rank_reviews(reviews: &[Review], sort_by: SortBy, count: i64) -> Vec<Review> {
    let mut ranked: Vec<Review> = reviews.to_vec();

    match sort_by {
        SortBy::Newest => ranked.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        SortBy::Oldest => ranked.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
        SortBy::Random => {
            let mut rng = rand::thread_rng();
            ranked.shuffle(&mut rng);
        }
        SortBy::Rating => ranked.sort_by(|a, b| {
            // Missing rating ranks as zero
            let ra = a.rating.unwrap_or(0.0);
            let rb = b.rating.unwrap_or(0.0);
            rb.partial_cmp(&ra).unwrap_or(Ordering::Equal)
        }),
        SortBy::Unspecified => {}
    }

    if count > 0 {
        ranked.truncate(count as usize);
    }
    ranked
}
