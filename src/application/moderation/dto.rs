use crate::domain::report::entity::TargetType;
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// Identifies both the report being acted on and the content it points at.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DeleteReportedContentRequest {
    pub report_id: Uuid,
    pub target_id: Uuid,
    pub target_type: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, PartialEq)]
#[ts(export)]
pub struct ModerationOutcome {
    pub report_id: Uuid,
    pub target_id: Uuid,
    pub target_type: TargetType,
    /// Author whose flag count was incremented, when the account still exists.
    pub flagged_user_id: Option<Uuid>,
}
