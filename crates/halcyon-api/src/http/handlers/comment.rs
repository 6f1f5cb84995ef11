//! Comment board endpoint handlers.

use axum::Json;
use axum::extract::{Path, State};
use serde::Deserialize;
use serde_json::{Value, json};
use uuid::Uuid;

use crate::http::error::ApiError;
use crate::http::extractors::auth::AuthUser;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct PostCommentBody {
    #[serde(default)]
    pub text: String,
}

/// GET /api/v1/comments
///
/// Listing is public; posting and liking require a credential.
pub async fn list_comments(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let comments = state.comment_service.list().await?;
    Ok(Json(json!({
        "success": true,
        "comments": comments,
    })))
}

/// POST /api/v1/comments
pub async fn post_comment(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(body): Json<PostCommentBody>,
) -> Result<Json<Value>, ApiError> {
    let comment = state.comment_service.post(&user, &body.text).await?;
    Ok(Json(json!({
        "success": true,
        "comment": comment,
    })))
}

/// POST /api/v1/comments/{id}/like
pub async fn toggle_like(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(comment_id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    let comment = state.comment_service.toggle_like(&user, comment_id).await?;
    Ok(Json(json!({
        "success": true,
        "comment": comment,
    })))
}
