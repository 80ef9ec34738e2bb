use crate::{
    application::admin::dto::{AssignRoleRequest, UserDeletionOutcome},
    domain::user::entity::User,
    presentation::http::{
        errors::AppError, extract::ApiJson, middleware::user::CurrentUser, state::AppState,
    },
};
use axum::{
    Json,
    extract::{Path, State},
};
use serde_json::{Value, json};
use uuid::Uuid;

pub async fn assign_role(
    State(state): State<AppState>,
    CurrentUser(actor): CurrentUser,
    ApiJson(body): ApiJson<AssignRoleRequest>,
) -> Result<Json<Value>, AppError> {
    let user = state.admin.assign_role(actor, body).await?;
    Ok(Json(json!({ "message": "Role updated successfully", "user": user })))
}

pub async fn list_users(
    State(state): State<AppState>,
    CurrentUser(actor): CurrentUser,
) -> Result<Json<Vec<User>>, AppError> {
    Ok(Json(state.admin.list_users(actor).await?))
}

pub async fn delete_user(
    State(state): State<AppState>,
    CurrentUser(actor): CurrentUser,
    Path(user_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let UserDeletionOutcome {
        user_id,
        prompts_deleted,
        comments_deleted,
    } = state.admin.delete_user(actor, user_id).await?;
    Ok(Json(json!({
        "message": "User and associated data deleted successfully",
        "user_id": user_id,
        "prompts_deleted": prompts_deleted,
        "comments_deleted": comments_deleted,
    })))
}
