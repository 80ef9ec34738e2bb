use super::entity::{LikeOutcome, NewPrompt, Prompt};
use crate::domain::errors::DomainError;
use async_trait::async_trait;
use uuid::Uuid;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PromptRepository: Send + Sync {
    async fn create(&self, prompt: &NewPrompt) -> Result<Prompt, DomainError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Prompt>, DomainError>;
    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Prompt>, DomainError>;
    /// Newest first.
    async fn list_all(&self) -> Result<Vec<Prompt>, DomainError>;
    async fn list_by_author(&self, user_id: Uuid) -> Result<Vec<Prompt>, DomainError>;
    /// Prompts whose title, input or output text contains any of `terms`
    /// (case-insensitive). Ranking is left to the caller.
    async fn search(&self, terms: &[String]) -> Result<Vec<Prompt>, DomainError>;
    /// Atomically adds `user_id` to `liked_by` (incrementing `likes`) or removes it
    /// (decrementing `likes`). `NotFound` when the prompt does not exist.
    async fn toggle_like(&self, prompt_id: Uuid, user_id: Uuid)
    -> Result<LikeOutcome, DomainError>;
    /// Atomically shifts `comments_count` by `delta`, flooring at zero.
    /// No-op when the prompt is gone.
    async fn adjust_comment_count(&self, prompt_id: Uuid, delta: i32) -> Result<(), DomainError>;
    async fn increment_upvotes(&self, prompt_id: Uuid) -> Result<i32, DomainError>;
    async fn increment_downvotes(&self, prompt_id: Uuid) -> Result<i32, DomainError>;
    /// Returns `false` when no such prompt existed.
    async fn delete(&self, id: Uuid) -> Result<bool, DomainError>;
    /// Removes every prompt owned by `user_id`; returns how many were removed.
    async fn delete_by_author(&self, user_id: Uuid) -> Result<u64, DomainError>;
}
