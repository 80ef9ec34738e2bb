use crate::{
    application::prompts::dto::{ProfileView, PromptView},
    domain::user::entity::User,
    presentation::http::{errors::AppError, middleware::user::CurrentUser, state::AppState},
};
use axum::{Json, extract::State};

pub async fn profile(
    State(state): State<AppState>,
    CurrentUser(actor): CurrentUser,
) -> Result<Json<ProfileView>, AppError> {
    Ok(Json(state.prompts.profile(actor).await?))
}

pub async fn bookmarks(
    State(state): State<AppState>,
    CurrentUser(actor): CurrentUser,
) -> Result<Json<Vec<PromptView>>, AppError> {
    Ok(Json(state.prompts.bookmarks(actor).await?))
}

pub async fn leaderboard(
    State(state): State<AppState>,
    CurrentUser(_): CurrentUser,
) -> Result<Json<Vec<User>>, AppError> {
    Ok(Json(state.prompts.leaderboard().await?))
}
