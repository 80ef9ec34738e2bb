use crate::{
    domain::user::role::Actor,
    presentation::http::{errors::AppError, state::AppState},
};
use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, header, request::Parts},
};

pub fn extract_bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// The authenticated caller, resolved from `Authorization: Bearer <jwt>`.
///
/// The role comes from the stored user, not from the token claims.
#[derive(Debug, Clone, Copy)]
pub struct CurrentUser(pub Actor);

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = extract_bearer_token(&parts.headers).ok_or(AppError::Unauthorized)?;
        let actor = state.auth.authenticate(token).await?;
        tracing::Span::current().record("user_id", tracing::field::display(actor.id));
        Ok(CurrentUser(actor))
    }
}
