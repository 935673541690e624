//! Showcase API: CRUD, composed views, and embedding verification

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use reviewsup_common::models::{RrResponse, Showcase, ShowcaseConfig, ShowcaseView};
use reviewsup_common::pagination::{Page, PageRequest};
use serde::Deserialize;
use uuid::Uuid;

use crate::api::UserId;
use crate::db::showcases;
use crate::error::{ApiError, ApiResult};
use crate::services::composer;
use crate::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateShowcaseRequest {
    pub workspace_id: Uuid,
    pub name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateShowcaseRequest {
    pub name: String,
    pub config: ShowcaseConfig,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyWidgetEmbeddingRequest {
    pub url: String,
    pub showcase_short_id: String,
}

/// POST /api/showcases
pub async fn create_showcase(
    State(state): State<AppState>,
    UserId(uid): UserId,
    Json(request): Json<CreateShowcaseRequest>,
) -> ApiResult<Json<Showcase>> {
    if request.name.trim().is_empty() {
        return Err(ApiError::BadRequest("Showcase name is required".into()));
    }

    let showcase =
        showcases::create_showcase(&state.db, &uid, request.workspace_id, request.name.trim())
            .await?;
    Ok(Json(showcase))
}

/// GET /api/showcases/workspace/:workspace_id?page=&pageSize=
pub async fn list_showcases(
    State(state): State<AppState>,
    UserId(uid): UserId,
    Path(workspace_id): Path<Uuid>,
    Query(request): Query<PageRequest>,
) -> ApiResult<Json<Page<Showcase>>> {
    let page = showcases::list_showcases(&state.db, &uid, workspace_id, request).await?;
    Ok(Json(page))
}

/// GET /api/showcases/:id (owner-checked composed view)
pub async fn get_showcase(
    State(state): State<AppState>,
    UserId(uid): UserId,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ShowcaseView>> {
    let view = composer::compose_owned(&state.db, &uid, id).await?;
    Ok(Json(view))
}

/// GET /api/showcases/short/:key (public composed view).
///
/// The key may be the short id or the raw internal id; no ownership check,
/// this is the embed/share path.
pub async fn get_showcase_by_key(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> ApiResult<Json<ShowcaseView>> {
    let view = composer::compose_by_key(&state.db, &key).await?;
    Ok(Json(view))
}

/// PATCH /api/showcases/:id
pub async fn update_showcase(
    State(state): State<AppState>,
    UserId(uid): UserId,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateShowcaseRequest>,
) -> ApiResult<Json<Showcase>> {
    if request.name.trim().is_empty() {
        return Err(ApiError::BadRequest("Showcase name is required".into()));
    }

    let showcase =
        showcases::update_showcase(&state.db, &uid, id, request.name.trim(), &request.config)
            .await?;
    Ok(Json(showcase))
}

/// DELETE /api/showcases/:id
pub async fn delete_showcase(
    State(state): State<AppState>,
    UserId(uid): UserId,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    showcases::delete_showcase(&state.db, &uid, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/showcases/verify
pub async fn verify_widget_embedding(
    State(state): State<AppState>,
    UserId(_uid): UserId,
    Json(request): Json<VerifyWidgetEmbeddingRequest>,
) -> ApiResult<Json<RrResponse<bool>>> {
    if request.url.trim().is_empty() {
        return Err(ApiError::BadRequest("Target URL is required".into()));
    }

    let result = state
        .verifier
        .verify(request.url.trim(), &request.showcase_short_id)
        .await?;
    Ok(Json(result))
}

/// Build showcase routes
pub fn showcase_routes() -> Router<AppState> {
    Router::new()
        .route("/api/showcases", post(create_showcase))
        .route("/api/showcases/verify", post(verify_widget_embedding))
        .route("/api/showcases/workspace/:workspace_id", get(list_showcases))
        .route("/api/showcases/short/:key", get(get_showcase_by_key))
        .route(
            "/api/showcases/:id",
            get(get_showcase)
                .patch(update_showcase)
                .delete(delete_showcase),
        )
}
