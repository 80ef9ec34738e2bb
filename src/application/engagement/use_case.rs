use super::dto::{BookmarkOutcome, CreateCommentRequest};
use crate::{
    application::users_by_id,
    domain::{
        errors::DomainError,
        prompt::{entity::LikeOutcome, repository::PromptRepository},
        social::{
            comment::{Comment, CommentView, NewComment},
            repository::CommentRepository,
        },
        user::{repository::UserRepository, role::Actor},
    },
};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;
use validator::Validate;

/// Like, bookmark and comment mutations.
///
/// Every counter or membership change is delegated to a single atomic
/// repository primitive; nothing here reads a document, edits it and writes
/// it back.
pub struct EngagementUseCase {
    prompts: Arc<dyn PromptRepository>,
    users: Arc<dyn UserRepository>,
    comments: Arc<dyn CommentRepository>,
}

impl EngagementUseCase {
    pub fn new(
        prompts: Arc<dyn PromptRepository>,
        users: Arc<dyn UserRepository>,
        comments: Arc<dyn CommentRepository>,
    ) -> Self {
        Self {
            prompts,
            users,
            comments,
        }
    }

    /// Adds the caller to the prompt's likers, or removes them if present.
    #[instrument(skip(self), fields(user_id = %actor.id))]
    pub async fn toggle_like(
        &self,
        actor: Actor,
        prompt_id: Uuid,
    ) -> Result<LikeOutcome, DomainError> {
        let outcome = self.prompts.toggle_like(prompt_id, actor.id).await?;
        debug!(likes = outcome.likes, is_liked = outcome.is_liked, "Like toggled");
        Ok(outcome)
    }

    /// Flips membership of `prompt_id` in the caller's bookmark list. The
    /// prompt document itself is never written.
    #[instrument(skip(self), fields(user_id = %actor.id))]
    pub async fn toggle_bookmark(
        &self,
        actor: Actor,
        prompt_id: Uuid,
    ) -> Result<BookmarkOutcome, DomainError> {
        if self.prompts.find_by_id(prompt_id).await?.is_none() {
            return Err(DomainError::NotFound("Prompt not found".into()));
        }
        let is_bookmarked = self.users.toggle_bookmark(actor.id, prompt_id).await?;
        debug!(is_bookmarked, "Bookmark toggled");
        Ok(BookmarkOutcome { is_bookmarked })
    }

    /// Stores the comment, then bumps the parent prompt's `comments_count`.
    ///
    /// The two writes are independent; a failure between them leaves a
    /// comment that is not reflected in the count.
    #[instrument(skip(self, request), fields(user_id = %actor.id, prompt_id = %request.prompt_id))]
    pub async fn create_comment(
        &self,
        actor: Actor,
        request: CreateCommentRequest,
    ) -> Result<CommentView, DomainError> {
        let request = CreateCommentRequest {
            text: request.text.trim().to_string(),
            ..request
        };
        request.validate()?;

        if self.prompts.find_by_id(request.prompt_id).await?.is_none() {
            return Err(DomainError::NotFound("Prompt not found".into()));
        }

        let comment = self
            .comments
            .create(&NewComment {
                prompt_id: request.prompt_id,
                user_id: actor.id,
                text: request.text,
            })
            .await?;

        if let Err(e) = self.prompts.adjust_comment_count(comment.prompt_id, 1).await {
            warn!(comment_id = %comment.id, error = %e, "Comment stored but count not incremented");
            return Err(e);
        }

        info!(comment_id = %comment.id, "Comment created");
        let author = self
            .users
            .find_by_id(actor.id)
            .await?
            .map(|u| u.author_summary());
        Ok(CommentView { comment, author })
    }

    /// Comments on a prompt, newest first, each with its author's public fields.
    pub async fn list_comments(&self, prompt_id: Uuid) -> Result<Vec<CommentView>, DomainError> {
        let comments = self.comments.list_for_prompt(prompt_id).await?;
        let author_ids: Vec<Uuid> = comments.iter().map(|c| c.user_id).collect();
        let authors = users_by_id(self.users.as_ref(), author_ids).await?;
        Ok(comments
            .into_iter()
            .map(|comment| CommentView {
                author: authors.get(&comment.user_id).map(|u| u.author_summary()),
                comment,
            })
            .collect())
    }

    pub async fn get_comment(&self, id: Uuid) -> Result<Comment, DomainError> {
        self.comments
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::NotFound("Comment not found".into()))
    }
}
