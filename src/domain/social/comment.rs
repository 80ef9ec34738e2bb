use crate::domain::user::entity::AuthorSummary;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use ts_rs::TS;
use uuid::Uuid;

/// A comment belongs to exactly one prompt and one author.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, TS, PartialEq)]
#[ts(export)]
pub struct Comment {
    pub id: Uuid,
    pub prompt_id: Uuid,
    pub user_id: Uuid,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewComment {
    pub prompt_id: Uuid,
    pub user_id: Uuid,
    pub text: String,
}

/// A comment annotated with its author's public fields.
///
/// `author` is `None` when the author account no longer exists.
#[derive(Debug, Clone, Serialize, Deserialize, TS, PartialEq)]
#[ts(export)]
pub struct CommentView {
    #[serde(flatten)]
    pub comment: Comment,
    pub author: Option<AuthorSummary>,
}
