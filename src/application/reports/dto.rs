use crate::domain::{
    prompt::value_objects::PromptOutput, report::entity::TargetType,
    user::entity::ReporterSummary,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// `target_type` stays a raw string so an unknown kind surfaces as
/// `InvalidArgument` rather than a body-parsing failure.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SubmitReportRequest {
    pub target_id: Uuid,
    pub target_type: String,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SubmitReportResponse {
    pub message: String,
    pub report_id: Uuid,
    pub report_count: usize,
}

/// Dismisses reports for a target. Without `target_type` every report for
/// `target_id` is removed.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ApproveReportRequest {
    pub target_id: Uuid,
    #[serde(default)]
    pub target_type: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ApproveReportResponse {
    pub message: String,
    pub removed: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, PartialEq)]
#[ts(export)]
pub struct ReportEntryView {
    pub reporter_id: Uuid,
    /// `None` once the reporting account has been deleted.
    pub reporter: Option<ReporterSummary>,
    pub reason: String,
    pub reported_at: DateTime<Utc>,
}

/// What a moderator sees of the reported item.
#[derive(Debug, Clone, Serialize, Deserialize, TS, PartialEq)]
#[serde(tag = "kind", rename_all = "lowercase")]
#[ts(export)]
pub enum ContentPreview {
    Prompt {
        title: String,
        input: String,
        output: PromptOutput,
        user_id: Uuid,
    },
    Comment {
        text: String,
        prompt_id: Uuid,
        user_id: Uuid,
    },
}

/// A report group as listed for moderators.
#[derive(Debug, Clone, Serialize, Deserialize, TS, PartialEq)]
#[ts(export)]
pub struct ReportView {
    pub id: Uuid,
    pub target_id: Uuid,
    pub target_type: TargetType,
    pub report_count: usize,
    pub entries: Vec<ReportEntryView>,
    /// `None` when the reported content no longer exists.
    pub content: Option<ContentPreview>,
}
