use crate::domain::{
    prompt::{
        entity::Prompt,
        value_objects::{normalize_tags, parse_tags},
    },
    user::entity::{AuthorSummary, User},
};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use validator::Validate;

/// Tags arrive either as the legacy comma separated string or as a list.
#[derive(Debug, Clone, Serialize, Deserialize, TS, PartialEq)]
#[serde(untagged)]
#[ts(export)]
pub enum TagsInput {
    List(Vec<String>),
    Csv(String),
}

impl Default for TagsInput {
    fn default() -> Self {
        TagsInput::List(Vec::new())
    }
}

impl TagsInput {
    pub fn into_tags(self) -> Vec<String> {
        match self {
            TagsInput::List(list) => normalize_tags(list.iter().map(String::as_str)),
            TagsInput::Csv(raw) => parse_tags(&raw),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, TS)]
#[ts(export)]
pub struct CreatePromptRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,
    #[serde(default)]
    pub tags: TagsInput,
    #[validate(length(min = 1, message = "Input is required"))]
    pub input: String,
    #[validate(length(min = 1, message = "Output is required"))]
    pub output: String,
    /// Already-hosted image shown with the output.
    #[serde(default)]
    #[validate(url(message = "Output image must be a valid URL"))]
    pub output_image_url: Option<String>,
    #[validate(length(min = 1, max = 100, message = "AI model must be 1-100 characters"))]
    pub ai_model: String,
}

/// A prompt as shown to a signed-in viewer.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PromptView {
    #[serde(flatten)]
    pub prompt: Prompt,
    /// `None` once the author account has been deleted.
    pub author: Option<AuthorSummary>,
    pub is_liked: bool,
    pub is_bookmarked: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProfileView {
    pub user: User,
    pub prompts: Vec<Prompt>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, TS, PartialEq, Eq)]
#[ts(export)]
pub struct UpvoteOutcome {
    pub upvotes: i32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, TS, PartialEq, Eq)]
#[ts(export)]
pub struct DownvoteOutcome {
    pub downvotes: i32,
}
