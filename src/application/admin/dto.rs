use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// `role` stays a raw string so an unknown value surfaces as
/// `InvalidArgument` rather than a body-parsing failure.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AssignRoleRequest {
    pub user_id: Uuid,
    pub role: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, TS, PartialEq, Eq)]
#[ts(export)]
pub struct UserDeletionOutcome {
    pub user_id: Uuid,
    pub prompts_deleted: u64,
    pub comments_deleted: u64,
}
