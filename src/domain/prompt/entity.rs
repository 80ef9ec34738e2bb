use super::value_objects::PromptOutput;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// A shared input/output pair produced with some AI model.
///
/// # Invariants
/// - `likes == liked_by.len()` after any sequence of like toggles
/// - `liked_by` holds each user at most once
/// - `comments_count` never drops below zero
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Prompt {
    pub id: Uuid,
    pub title: String,
    pub tags: Vec<String>,
    /// Owning user.
    pub user_id: Uuid,
    pub input: String,
    pub output: PromptOutput,
    pub ai_model: String,
    pub likes: i32,
    pub liked_by: Vec<Uuid>,
    pub comments_count: i32,
    pub upvotes: i32,
    pub downvotes: i32,
    pub created_at: DateTime<Utc>,
}

impl Prompt {
    pub fn is_liked_by(&self, user_id: Uuid) -> bool {
        self.liked_by.contains(&user_id)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewPrompt {
    pub title: String,
    pub tags: Vec<String>,
    pub user_id: Uuid,
    pub input: String,
    pub output: PromptOutput,
    pub ai_model: String,
}

/// Result of a like toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LikeOutcome {
    pub likes: i32,
    pub is_liked: bool,
}
