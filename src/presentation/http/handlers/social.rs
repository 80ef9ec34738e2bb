use crate::{
    application::engagement::dto::{BookmarkOutcome, CreateCommentRequest},
    domain::{
        prompt::entity::LikeOutcome,
        social::comment::{Comment, CommentView},
    },
    presentation::http::{
        errors::AppError, extract::ApiJson, middleware::user::CurrentUser, state::AppState,
    },
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;

pub async fn like_prompt(
    State(state): State<AppState>,
    CurrentUser(actor): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<LikeOutcome>, AppError> {
    Ok(Json(state.engagement.toggle_like(actor, id).await?))
}

pub async fn bookmark_prompt(
    State(state): State<AppState>,
    CurrentUser(actor): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<BookmarkOutcome>, AppError> {
    Ok(Json(state.engagement.toggle_bookmark(actor, id).await?))
}

pub async fn add_comment(
    State(state): State<AppState>,
    CurrentUser(actor): CurrentUser,
    ApiJson(body): ApiJson<CreateCommentRequest>,
) -> Result<(StatusCode, Json<CommentView>), AppError> {
    let comment = state.engagement.create_comment(actor, body).await?;
    Ok((StatusCode::CREATED, Json(comment)))
}

pub async fn get_comments(
    State(state): State<AppState>,
    Path(prompt_id): Path<Uuid>,
) -> Result<Json<Vec<CommentView>>, AppError> {
    Ok(Json(state.engagement.list_comments(prompt_id).await?))
}

pub async fn get_comment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Comment>, AppError> {
    Ok(Json(state.engagement.get_comment(id).await?))
}
