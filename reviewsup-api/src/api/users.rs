//! User bootstrap API

use axum::{extract::State, routing::post, Json, Router};
use serde_json::{json, Value};

use crate::api::UserId;
use crate::error::ApiResult;
use crate::services::default_data;
use crate::AppState;

/// POST /api/users/default-data
///
/// Called once when an account is created: seeds the default workspace,
/// collection form, sample reviews, and showcase.
pub async fn seed_default_data(
    State(state): State<AppState>,
    UserId(uid): UserId,
) -> ApiResult<Json<Value>> {
    let seeded = default_data::seed_default_data(&state.db, &uid).await?;

    Ok(Json(json!({
        "workspaceId": seeded.workspace.id,
        "formId": seeded.form.id,
        "showcaseId": seeded.showcase.id,
        "showcaseShortId": seeded.showcase.short_id,
    })))
}

/// Build user routes
pub fn user_routes() -> Router<AppState> {
    Router::new().route("/api/users/default-data", post(seed_default_data))
}
