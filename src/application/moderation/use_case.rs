use super::dto::{DeleteReportedContentRequest, ModerationOutcome};
use crate::domain::{
    errors::DomainError,
    prompt::repository::PromptRepository,
    report::{entity::ReportTarget, repository::ReportRepository},
    social::repository::CommentRepository,
    user::{
        repository::UserRepository,
        role::{Actor, STAFF},
    },
};
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Removes reported content and penalizes its author.
pub struct ModerationUseCase {
    reports: Arc<dyn ReportRepository>,
    prompts: Arc<dyn PromptRepository>,
    comments: Arc<dyn CommentRepository>,
    users: Arc<dyn UserRepository>,
}

impl ModerationUseCase {
    pub fn new(
        reports: Arc<dyn ReportRepository>,
        prompts: Arc<dyn PromptRepository>,
        comments: Arc<dyn CommentRepository>,
        users: Arc<dyn UserRepository>,
    ) -> Self {
        Self {
            reports,
            prompts,
            comments,
            users,
        }
    }

    /// Deletes the reported prompt or comment, increments its author's flag
    /// count exactly once, and removes the report identified by
    /// `request.report_id`.
    ///
    /// # Errors
    /// - `Forbidden` for callers outside `{moderator, admin}`
    /// - `InvalidArgument` for an unknown target type, or a target that does
    ///   not belong to the given report
    /// - `NotFound` when the report or the content is gone, which is also what
    ///   a repeated call yields
    #[instrument(skip(self, request), fields(
        actor_id = %actor.id,
        report_id = %request.report_id,
        target_id = %request.target_id
    ))]
    pub async fn delete_reported_content(
        &self,
        actor: Actor,
        request: DeleteReportedContentRequest,
    ) -> Result<ModerationOutcome, DomainError> {
        actor.require_role(STAFF)?;

        let target = ReportTarget::new(request.target_type.trim().parse()?, request.target_id);

        let report = self
            .reports
            .find_by_id(request.report_id)
            .await?
            .ok_or_else(|| DomainError::NotFound("Report not found".into()))?;
        if report.target != target {
            return Err(DomainError::InvalidArgument(
                "Report does not refer to the given target".into(),
            ));
        }

        let author_id = match target {
            ReportTarget::Prompt(id) => {
                let prompt = self
                    .prompts
                    .find_by_id(id)
                    .await?
                    .ok_or_else(|| DomainError::NotFound("Prompt not found".into()))?;
                self.prompts.delete(id).await?;
                prompt.user_id
            }
            ReportTarget::Comment(id) => {
                let comment = self
                    .comments
                    .find_by_id(id)
                    .await?
                    .ok_or_else(|| DomainError::NotFound("Comment not found".into()))?;
                if self.comments.delete(id).await? {
                    self.prompts
                        .adjust_comment_count(comment.prompt_id, -1)
                        .await?;
                }
                comment.user_id
            }
        };

        let flagged_user_id = if self.users.increment_flag_count(author_id).await? {
            Some(author_id)
        } else {
            warn!(user_id = %author_id, "Author of removed content no longer exists");
            None
        };

        if !self.reports.delete_by_id(report.id).await? {
            warn!(report_id = %report.id, "Report vanished before it could be removed");
        }

        info!(
            target_type = %target.target_type(),
            flagged = flagged_user_id.is_some(),
            "Reported content removed"
        );
        Ok(ModerationOutcome {
            report_id: report.id,
            target_id: target.id(),
            target_type: target.target_type(),
            flagged_user_id,
        })
    }
}
