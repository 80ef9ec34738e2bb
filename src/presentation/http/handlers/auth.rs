use crate::{
    application::auth::dto::{
        LoginRequest, LoginResponse, RegisterRequest, TwoFactorCodeRequest,
        TwoFactorSetupResponse,
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
use serde_json::{Value, json};

pub async fn register(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<RegisterRequest>,
) -> Result<Json<Value>, AppError> {
    state.auth.register(body).await?;
    Ok(Json(
        json!({ "message": "Verification email sent. Please check your inbox." }),
    ))
}

pub async fn verify_email(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let user = state.auth.verify_email(&token).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Email verified successfully", "user": user })),
    ))
}

pub async fn login(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    Ok(Json(state.auth.login(body).await?))
}

pub async fn setup_two_factor(
    State(state): State<AppState>,
    CurrentUser(actor): CurrentUser,
) -> Result<Json<TwoFactorSetupResponse>, AppError> {
    Ok(Json(state.auth.setup_two_factor(actor).await?))
}

pub async fn enable_two_factor(
    State(state): State<AppState>,
    CurrentUser(actor): CurrentUser,
    ApiJson(body): ApiJson<TwoFactorCodeRequest>,
) -> Result<Json<Value>, AppError> {
    state.auth.enable_two_factor(actor, &body.code).await?;
    Ok(Json(
        json!({ "message": "Two-factor authentication enabled" }),
    ))
}

pub async fn disable_two_factor(
    State(state): State<AppState>,
    CurrentUser(actor): CurrentUser,
    ApiJson(body): ApiJson<TwoFactorCodeRequest>,
) -> Result<Json<Value>, AppError> {
    state.auth.disable_two_factor(actor, &body.code).await?;
    Ok(Json(
        json!({ "message": "Two-factor authentication disabled" }),
    ))
}
