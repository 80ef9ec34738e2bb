use crate::{
    application::prompts::dto::{
        CreatePromptRequest, DownvoteOutcome, PromptView, UpvoteOutcome,
    },
    domain::prompt::entity::Prompt,
    presentation::http::{
        errors::AppError, extract::ApiJson, middleware::user::CurrentUser, state::AppState,
    },
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

pub async fn feed(
    State(state): State<AppState>,
    CurrentUser(actor): CurrentUser,
) -> Result<Json<Vec<PromptView>>, AppError> {
    Ok(Json(state.prompts.feed(actor).await?))
}

pub async fn create_prompt(
    State(state): State<AppState>,
    CurrentUser(actor): CurrentUser,
    ApiJson(body): ApiJson<CreatePromptRequest>,
) -> Result<(StatusCode, Json<Prompt>), AppError> {
    let prompt = state.prompts.create(actor, body).await?;
    Ok((StatusCode::CREATED, Json(prompt)))
}

pub async fn get_prompt(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Prompt>, AppError> {
    Ok(Json(state.prompts.get(id).await?))
}

pub async fn search_prompts(
    State(state): State<AppState>,
    CurrentUser(actor): CurrentUser,
    Query(params): Query<SearchQuery>,
) -> Result<Json<Vec<PromptView>>, AppError> {
    Ok(Json(state.prompts.search(actor, &params.q).await?))
}

pub async fn upvote(
    State(state): State<AppState>,
    CurrentUser(_): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<UpvoteOutcome>, AppError> {
    Ok(Json(state.prompts.upvote(id).await?))
}

pub async fn downvote(
    State(state): State<AppState>,
    CurrentUser(_): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<DownvoteOutcome>, AppError> {
    Ok(Json(state.prompts.downvote(id).await?))
}
