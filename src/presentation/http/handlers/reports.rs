use crate::{
    application::{
        moderation::dto::{DeleteReportedContentRequest, ModerationOutcome},
        reports::dto::{
            ApproveReportRequest, ApproveReportResponse, ReportView, SubmitReportRequest,
            SubmitReportResponse,
        },
    },
    presentation::http::{
        errors::AppError, extract::ApiJson, middleware::user::CurrentUser, state::AppState,
    },
};
use axum::{Json, extract::State, http::StatusCode};
use serde::Serialize;

pub async fn submit_report(
    State(state): State<AppState>,
    CurrentUser(actor): CurrentUser,
    ApiJson(body): ApiJson<SubmitReportRequest>,
) -> Result<(StatusCode, Json<SubmitReportResponse>), AppError> {
    let outcome = state.reports.submit(actor, body).await?;
    let (status, message) = if outcome.created {
        (StatusCode::CREATED, "Report submitted successfully")
    } else {
        (StatusCode::OK, "Report updated successfully")
    };
    Ok((
        status,
        Json(SubmitReportResponse {
            message: message.into(),
            report_id: outcome.report.id,
            report_count: outcome.report.report_count(),
        }),
    ))
}

pub async fn list_reports(
    State(state): State<AppState>,
    CurrentUser(actor): CurrentUser,
) -> Result<Json<Vec<ReportView>>, AppError> {
    Ok(Json(state.reports.list_all(actor).await?))
}

#[derive(Debug, Serialize)]
pub struct DeleteReportedContentResponse {
    pub message: &'static str,
    #[serde(flatten)]
    pub outcome: ModerationOutcome,
}

pub async fn delete_reported_content(
    State(state): State<AppState>,
    CurrentUser(actor): CurrentUser,
    ApiJson(body): ApiJson<DeleteReportedContentRequest>,
) -> Result<Json<DeleteReportedContentResponse>, AppError> {
    let outcome = state.moderation.delete_reported_content(actor, body).await?;
    Ok(Json(DeleteReportedContentResponse {
        message: "Reported content deleted and user flagged successfully",
        outcome,
    }))
}

pub async fn approve_reported_content(
    State(state): State<AppState>,
    CurrentUser(actor): CurrentUser,
    ApiJson(body): ApiJson<ApproveReportRequest>,
) -> Result<Json<ApproveReportResponse>, AppError> {
    let removed = state
        .reports
        .approve(actor, body.target_id, body.target_type.as_deref())
        .await?;
    Ok(Json(ApproveReportResponse {
        message: "Reports removed. Item approved.".into(),
        removed,
    }))
}
