use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, TS)]
#[ts(export)]
pub struct CreateCommentRequest {
    pub prompt_id: Uuid,
    #[validate(length(min = 1, max = 1000, message = "Comment text must be 1-1000 characters"))]
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct BookmarkOutcome {
    pub is_bookmarked: bool,
}
