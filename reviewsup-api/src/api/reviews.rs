//! Review API: public submission, dashboard listing, moderation

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, patch, post},
    Json, Router,
};
use reviewsup_common::models::{MediaKind, Review, ReviewStatus};
use reviewsup_common::pagination::{Page, PageRequest};
use serde::Deserialize;
use uuid::Uuid;

use crate::api::UserId;
use crate::db::reviews::{self, NewMedia, NewReview};
use crate::error::{ApiError, ApiResult};
use crate::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReviewRequest {
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
    #[serde(default)]
    pub medias: Vec<CreateMediaRequest>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMediaRequest {
    #[serde(rename = "type")]
    pub kind: MediaKind,
    pub url: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateReviewStatusRequest {
    pub status: ReviewStatus,
}

/// POST /api/reviews (public submission path, no identity required).
/// Submissions start as pending until moderated.
pub async fn create_review(
    State(state): State<AppState>,
    Json(request): Json<CreateReviewRequest>,
) -> ApiResult<Json<Review>> {
    if request.reviewer_name.trim().is_empty() {
        return Err(ApiError::BadRequest("Reviewer name is required".into()));
    }

    let review = reviews::create_review(
        &state.db,
        NewReview {
            workspace_id: request.workspace_id,
            form_id: request.form_id,
            reviewer_name: request.reviewer_name.trim().to_string(),
            reviewer_title: request.reviewer_title,
            reviewer_image: request.reviewer_image,
            reviewer_email: request.reviewer_email,
            reviewer_url: request.reviewer_url,
            source: request.source,
            source_url: request.source_url,
            rating: request.rating,
            text: request.text,
            status: None,
            medias: request
                .medias
                .into_iter()
                .map(|m| NewMedia {
                    kind: m.kind,
                    url: m.url,
                })
                .collect(),
        },
    )
    .await?;

    Ok(Json(review))
}

/// GET /api/reviews/workspace/:workspace_id?page=&pageSize=
///
/// Owner-scoped: listing someone else's workspace collapses to not-found.
pub async fn list_reviews(
    State(state): State<AppState>,
    UserId(uid): UserId,
    Path(workspace_id): Path<Uuid>,
    Query(request): Query<PageRequest>,
) -> ApiResult<Json<Page<Review>>> {
    let page = reviews::list_reviews(&state.db, &uid, workspace_id, request).await?;
    Ok(Json(page))
}

/// PATCH /api/reviews/:id/status (moderation)
pub async fn update_review_status(
    State(state): State<AppState>,
    UserId(uid): UserId,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateReviewStatusRequest>,
) -> ApiResult<StatusCode> {
    reviews::update_review_status(&state.db, &uid, id, request.status).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/reviews/:id
pub async fn delete_review(
    State(state): State<AppState>,
    UserId(uid): UserId,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    reviews::delete_review(&state.db, &uid, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Build review routes
pub fn review_routes() -> Router<AppState> {
    Router::new()
        .route("/api/reviews", post(create_review))
        .route("/api/reviews/workspace/:workspace_id", get(list_reviews))
        .route("/api/reviews/:id/status", patch(update_review_status))
        .route("/api/reviews/:id", axum::routing::delete(delete_review))
}
