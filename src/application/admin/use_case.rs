use super::dto::{AssignRoleRequest, UserDeletionOutcome};
use crate::domain::{
    errors::DomainError,
    prompt::repository::PromptRepository,
    social::repository::CommentRepository,
    user::{
        entity::User,
        repository::UserRepository,
        role::{ADMIN_ONLY, Actor, Role},
    },
};
use std::{collections::HashMap, sync::Arc};
use tracing::{info, instrument, warn};
use uuid::Uuid;

/// Administrative user management, restricted to admins.
pub struct AdminUseCase {
    users: Arc<dyn UserRepository>,
    prompts: Arc<dyn PromptRepository>,
    comments: Arc<dyn CommentRepository>,
}

impl AdminUseCase {
    pub fn new(
        users: Arc<dyn UserRepository>,
        prompts: Arc<dyn PromptRepository>,
        comments: Arc<dyn CommentRepository>,
    ) -> Self {
        Self {
            users,
            prompts,
            comments,
        }
    }

    #[instrument(skip(self, request), fields(actor_id = %actor.id, user_id = %request.user_id))]
    pub async fn assign_role(
        &self,
        actor: Actor,
        request: AssignRoleRequest,
    ) -> Result<User, DomainError> {
        actor.require_role(ADMIN_ONLY)?;
        let role: Role = request.role.trim().parse()?;

        self.users.set_role(request.user_id, role).await?;
        info!(%role, "Role assigned");
        self.users
            .find_by_id(request.user_id)
            .await?
            .ok_or_else(|| DomainError::NotFound("User not found".into()))
    }

    /// All accounts in registration order. Credentials are never serialized.
    pub async fn list_users(&self, actor: Actor) -> Result<Vec<User>, DomainError> {
        actor.require_role(ADMIN_ONLY)?;
        self.users.list_all().await
    }

    /// Deletes every prompt and comment the account authored, then the
    /// account itself.
    ///
    /// The account row goes last, so a call that fails partway can simply be
    /// repeated to finish the cascade. Prompts that lose comments get their
    /// `comments_count` lowered by the number removed. Reports against the
    /// removed content are left in place and later list without a content
    /// preview.
    #[instrument(skip(self), fields(actor_id = %actor.id))]
    pub async fn delete_user(
        &self,
        actor: Actor,
        user_id: Uuid,
    ) -> Result<UserDeletionOutcome, DomainError> {
        actor.require_role(ADMIN_ONLY)?;

        if self.users.find_by_id(user_id).await?.is_none() {
            return Err(DomainError::NotFound("User not found".into()));
        }

        let prompts_deleted = self.prompts.delete_by_author(user_id).await?;
        let comments = self.comments.delete_by_author(user_id).await?;

        let mut per_prompt: HashMap<Uuid, i32> = HashMap::new();
        for comment in &comments {
            *per_prompt.entry(comment.prompt_id).or_default() += 1;
        }
        for (prompt_id, removed) in per_prompt {
            if let Err(e) = self.prompts.adjust_comment_count(prompt_id, -removed).await {
                warn!(%prompt_id, error = %e, "Failed to adjust comment count after user deletion");
            }
        }

        if !self.users.delete(user_id).await? {
            warn!(%user_id, "Account vanished during its own deletion");
        }

        info!(
            prompts_deleted,
            comments_deleted = comments.len(),
            "User and authored content deleted"
        );
        Ok(UserDeletionOutcome {
            user_id,
            prompts_deleted,
            comments_deleted: comments.len() as u64,
        })
    }
}
