use crate::{
    application::events::dto::AddEventRequest,
    domain::event::entity::Event,
    presentation::http::{
        errors::AppError, extract::ApiJson, middleware::user::CurrentUser, state::AppState,
    },
};
use axum::{Json, extract::State, http::StatusCode};
use serde_json::{Value, json};

pub async fn add_event(
    State(state): State<AppState>,
    CurrentUser(actor): CurrentUser,
    ApiJson(body): ApiJson<AddEventRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let event = state.events.add(actor, body).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Event created successfully", "event": event })),
    ))
}

pub async fn upcoming_events(
    State(state): State<AppState>,
) -> Result<Json<Vec<Event>>, AppError> {
    Ok(Json(state.events.upcoming().await?))
}
