use super::comment::{Comment, NewComment};
use crate::domain::errors::DomainError;
use async_trait::async_trait;
use uuid::Uuid;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommentRepository: Send + Sync {
    async fn create(&self, comment: &NewComment) -> Result<Comment, DomainError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Comment>, DomainError>;
    /// Newest first.
    async fn list_for_prompt(&self, prompt_id: Uuid) -> Result<Vec<Comment>, DomainError>;
    /// Returns `false` when no such comment existed.
    async fn delete(&self, id: Uuid) -> Result<bool, DomainError>;
    /// Removes every comment written by `user_id` and returns the removed records.
    async fn delete_by_author(&self, user_id: Uuid) -> Result<Vec<Comment>, DomainError>;
}
