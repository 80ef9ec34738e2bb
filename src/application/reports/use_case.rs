use super::dto::{ContentPreview, ReportEntryView, ReportView, SubmitReportRequest};
use crate::{
    application::users_by_id,
    domain::{
        errors::DomainError,
        prompt::repository::PromptRepository,
        report::{
            entity::{Report, ReportEntry, ReportTarget, SubmitOutcome, TargetType},
            repository::ReportRepository,
        },
        social::repository::CommentRepository,
        user::{
            repository::UserRepository,
            role::{Actor, STAFF},
        },
    },
};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

/// Report Ledger operations: submission by any user, listing and
/// dismissal by staff.
pub struct ReportsUseCase {
    reports: Arc<dyn ReportRepository>,
    prompts: Arc<dyn PromptRepository>,
    comments: Arc<dyn CommentRepository>,
    users: Arc<dyn UserRepository>,
}

impl ReportsUseCase {
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

    /// Records the caller's report against a prompt or comment.
    ///
    /// The first report of a target creates its group; later reports by
    /// other users append to it. A second report by the same user fails with
    /// `AlreadyReported` and leaves the group unchanged.
    #[instrument(skip(self, request), fields(reporter_id = %actor.id, target_id = %request.target_id))]
    pub async fn submit(
        &self,
        actor: Actor,
        request: SubmitReportRequest,
    ) -> Result<SubmitOutcome, DomainError> {
        let target_type: TargetType = request.target_type.trim().parse()?;
        let reason = request.reason.trim();
        if reason.is_empty() {
            return Err(DomainError::InvalidArgument(
                "Report reason is required".into(),
            ));
        }

        let target = ReportTarget::new(target_type, request.target_id);
        self.ensure_target_exists(target).await?;

        let outcome = self
            .reports
            .submit(target, ReportEntry::new(actor.id, reason))
            .await?;
        info!(
            report_id = %outcome.report.id,
            report_count = outcome.report.report_count(),
            created = outcome.created,
            "Report recorded"
        );
        Ok(outcome)
    }

    /// Every report group, with reporters resolved and a preview of the
    /// reported content attached.
    #[instrument(skip(self), fields(actor_id = %actor.id))]
    pub async fn list_all(&self, actor: Actor) -> Result<Vec<ReportView>, DomainError> {
        actor.require_role(STAFF)?;

        let reports = self.reports.list_all().await?;
        let reporter_ids: Vec<Uuid> = reports
            .iter()
            .flat_map(|r| r.entries.iter().map(|e| e.reporter_id))
            .collect();
        let reporters = users_by_id(self.users.as_ref(), reporter_ids).await?;

        let mut views = Vec::with_capacity(reports.len());
        for report in reports {
            let content = self.preview(report.target).await?;
            if content.is_none() {
                debug!(report_id = %report.id, "Reported content no longer exists");
            }
            views.push(ReportView {
                id: report.id,
                target_id: report.target.id(),
                target_type: report.target.target_type(),
                report_count: report.report_count(),
                entries: report
                    .entries
                    .into_iter()
                    .map(|e| ReportEntryView {
                        reporter: reporters.get(&e.reporter_id).map(|u| u.reporter_summary()),
                        reporter_id: e.reporter_id,
                        reason: e.reason,
                        reported_at: e.reported_at,
                    })
                    .collect(),
                content,
            });
        }
        Ok(views)
    }

    /// Dismisses a target: its reports are removed and the content and its
    /// author are left untouched.
    ///
    /// Without `target_type` every report whose target id matches is removed,
    /// whatever its kind. Returns how many report groups were removed;
    /// `NotFound` when there were none.
    #[instrument(skip(self), fields(actor_id = %actor.id))]
    pub async fn approve(
        &self,
        actor: Actor,
        target_id: Uuid,
        target_type: Option<&str>,
    ) -> Result<usize, DomainError> {
        actor.require_role(STAFF)?;

        let removed = match target_type {
            Some(raw) => {
                let target = ReportTarget::new(raw.trim().parse()?, target_id);
                usize::from(self.reports.delete_by_target(target).await?)
            }
            None => {
                let removed: Vec<Report> = self.reports.delete_by_target_id(target_id).await?;
                let mixed = removed
                    .windows(2)
                    .any(|w| w[0].target.target_type() != w[1].target.target_type());
                if mixed {
                    warn!(%target_id, "Approval removed reports of more than one target type");
                }
                removed.len()
            }
        };

        if removed == 0 {
            return Err(DomainError::NotFound("Report not found".into()));
        }
        info!(%target_id, removed, "Reports dismissed");
        Ok(removed)
    }

    async fn ensure_target_exists(&self, target: ReportTarget) -> Result<(), DomainError> {
        let exists = match target {
            ReportTarget::Prompt(id) => self.prompts.find_by_id(id).await?.is_some(),
            ReportTarget::Comment(id) => self.comments.find_by_id(id).await?.is_some(),
        };
        if exists {
            Ok(())
        } else {
            Err(DomainError::NotFound(format!(
                "{} not found",
                capitalize(target.target_type().as_str())
            )))
        }
    }

    async fn preview(&self, target: ReportTarget) -> Result<Option<ContentPreview>, DomainError> {
        Ok(match target {
            ReportTarget::Prompt(id) => {
                self.prompts
                    .find_by_id(id)
                    .await?
                    .map(|p| ContentPreview::Prompt {
                        title: p.title,
                        input: p.input,
                        output: p.output,
                        user_id: p.user_id,
                    })
            }
            ReportTarget::Comment(id) => {
                self.comments
                    .find_by_id(id)
                    .await?
                    .map(|c| ContentPreview::Comment {
                        text: c.text,
                        prompt_id: c.prompt_id,
                        user_id: c.user_id,
                    })
            }
        })
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{
            prompt::{entity::NewPrompt, repository::MockPromptRepository, value_objects::PromptOutput},
            report::repository::MockReportRepository,
            social::{comment::NewComment, repository::MockCommentRepository},
            user::{entity::NewUser, repository::MockUserRepository, role::Role},
        },
        infrastructure::repositories::in_memory::{
            InMemoryCommentRepository, InMemoryPromptRepository, InMemoryReportRepository,
            InMemoryUserRepository,
        },
    };

    struct Fixture {
        use_case: ReportsUseCase,
        prompts: Arc<InMemoryPromptRepository>,
        comments: Arc<InMemoryCommentRepository>,
        users: Arc<InMemoryUserRepository>,
        reports: Arc<InMemoryReportRepository>,
    }

    fn fixture() -> Fixture {
        let prompts = Arc::new(InMemoryPromptRepository::new());
        let comments = Arc::new(InMemoryCommentRepository::new());
        let users = Arc::new(InMemoryUserRepository::new());
        let reports = Arc::new(InMemoryReportRepository::new());
        Fixture {
            use_case: ReportsUseCase::new(
                reports.clone(),
                prompts.clone(),
                comments.clone(),
                users.clone(),
            ),
            prompts,
            comments,
            users,
            reports,
        }
    }

    async fn user(f: &Fixture, name: &str, role: Role) -> Actor {
        let u = f
            .users
            .create(&NewUser {
                username: name.into(),
                email: format!("{}@example.com", name),
                password_hash: "hash".into(),
                profile_picture: None,
            })
            .await
            .unwrap();
        Actor::new(u.id, role)
    }

    async fn prompt(f: &Fixture, owner: Uuid) -> Uuid {
        f.prompts
            .create(&NewPrompt {
                title: "Logo".into(),
                tags: vec!["design".into()],
                user_id: owner,
                input: "draw a logo".into(),
                output: PromptOutput::new("a fox", Some("https://img.example/fox.png".into())),
                ai_model: "midjourney".into(),
            })
            .await
            .unwrap()
            .id
    }

    fn request(target_id: Uuid, kind: &str, reason: &str) -> SubmitReportRequest {
        SubmitReportRequest {
            target_id,
            target_type: kind.into(),
            reason: reason.into(),
        }
    }

    #[tokio::test]
    async fn same_user_cannot_report_twice() {
        let f = fixture();
        let author = user(&f, "author", Role::User).await;
        let bob = user(&f, "bob", Role::User).await;
        let p = prompt(&f, author.id).await;

        let first = f.use_case.submit(bob, request(p, "prompt", "Spam")).await.unwrap();
        assert!(first.created);

        let again = f.use_case.submit(bob, request(p, "prompt", "Abuse")).await;
        assert_eq!(again.unwrap_err(), DomainError::AlreadyReported);

        let stored = f.reports.find_by_target(ReportTarget::Prompt(p)).await.unwrap().unwrap();
        assert_eq!(stored.report_count(), 1);
        assert_eq!(stored.reasons(), vec!["Spam"]);
    }

    #[tokio::test]
    async fn distinct_reporters_accumulate_in_order() {
        let f = fixture();
        let author = user(&f, "author", Role::User).await;
        let bob = user(&f, "bob", Role::User).await;
        let carol = user(&f, "carol", Role::User).await;
        let p = prompt(&f, author.id).await;

        f.use_case.submit(bob, request(p, "prompt", "Spam")).await.unwrap();
        let second = f.use_case.submit(carol, request(p, "prompt", "Spam")).await.unwrap();

        assert!(!second.created);
        assert_eq!(second.report.report_count(), 2);
        let reporters: Vec<Uuid> = second.report.entries.iter().map(|e| e.reporter_id).collect();
        assert_eq!(reporters, vec![bob.id, carol.id]);
        assert_eq!(second.report.reasons(), vec!["Spam", "Spam"]);
    }

    #[tokio::test]
    async fn unknown_target_type_is_invalid() {
        let f = fixture();
        let bob = user(&f, "bob", Role::User).await;
        let result = f.use_case.submit(bob, request(Uuid::now_v7(), "user", "Spam")).await;
        assert!(matches!(result, Err(DomainError::InvalidArgument(_))));
    }

    #[tokio::test]
    async fn reporting_missing_content_is_not_found() {
        let f = fixture();
        let bob = user(&f, "bob", Role::User).await;
        let result = f
            .use_case
            .submit(bob, request(Uuid::now_v7(), "comment", "Spam"))
            .await;
        assert!(matches!(result, Err(DomainError::NotFound(_))));
    }

    #[tokio::test]
    async fn blank_reason_is_rejected() {
        let f = fixture();
        let author = user(&f, "author", Role::User).await;
        let p = prompt(&f, author.id).await;
        let result = f.use_case.submit(author, request(p, "prompt", "  ")).await;
        assert!(matches!(result, Err(DomainError::InvalidArgument(_))));
    }

    #[tokio::test]
    async fn listing_resolves_reporters_and_marks_missing_content() {
        let f = fixture();
        let author = user(&f, "author", Role::User).await;
        let bob = user(&f, "bob", Role::User).await;
        let moderator = user(&f, "mod", Role::Moderator).await;
        let p = prompt(&f, author.id).await;
        let comment = f
            .comments
            .create(&NewComment {
                prompt_id: p,
                user_id: author.id,
                text: "rude".into(),
            })
            .await
            .unwrap();

        f.use_case.submit(bob, request(p, "prompt", "Spam")).await.unwrap();
        f.use_case
            .submit(bob, request(comment.id, "comment", "Rude"))
            .await
            .unwrap();
        f.comments.delete(comment.id).await.unwrap();

        let views = f.use_case.list_all(moderator).await.unwrap();
        assert_eq!(views.len(), 2);

        let prompt_view = views.iter().find(|v| v.target_id == p).unwrap();
        assert_eq!(prompt_view.report_count, 1);
        assert_eq!(
            prompt_view.entries[0].reporter.as_ref().unwrap().username,
            "bob"
        );
        assert!(matches!(
            prompt_view.content,
            Some(ContentPreview::Prompt { .. })
        ));

        let comment_view = views.iter().find(|v| v.target_id == comment.id).unwrap();
        assert_eq!(comment_view.target_type, TargetType::Comment);
        assert!(comment_view.content.is_none());
    }

    #[tokio::test]
    async fn approve_clears_all_groups_for_target() {
        let f = fixture();
        let author = user(&f, "author", Role::User).await;
        let bob = user(&f, "bob", Role::User).await;
        let carol = user(&f, "carol", Role::User).await;
        let admin = user(&f, "admin", Role::Admin).await;
        let p = prompt(&f, author.id).await;
        f.use_case.submit(bob, request(p, "prompt", "Spam")).await.unwrap();
        f.use_case.submit(carol, request(p, "prompt", "Off-topic")).await.unwrap();

        let removed = f.use_case.approve(admin, p, None).await.unwrap();
        assert_eq!(removed, 1);
        assert!(f.reports.list_all().await.unwrap().is_empty());
        assert!(f.prompts.find_by_id(p).await.unwrap().is_some());

        let again = f.use_case.approve(admin, p, None).await;
        assert!(matches!(again, Err(DomainError::NotFound(_))));
    }

    #[tokio::test]
    async fn typed_approve_only_touches_that_kind() {
        let f = fixture();
        let author = user(&f, "author", Role::User).await;
        let bob = user(&f, "bob", Role::User).await;
        let moderator = user(&f, "mod", Role::Moderator).await;
        let p = prompt(&f, author.id).await;
        f.use_case.submit(bob, request(p, "prompt", "Spam")).await.unwrap();

        let wrong_kind = f.use_case.approve(moderator, p, Some("comment")).await;
        assert!(matches!(wrong_kind, Err(DomainError::NotFound(_))));

        let removed = f.use_case.approve(moderator, p, Some("prompt")).await.unwrap();
        assert_eq!(removed, 1);
    }

    #[tokio::test]
    async fn regular_users_are_refused_without_storage_access() {
        let mut reports = MockReportRepository::new();
        reports.expect_list_all().never();
        reports.expect_delete_by_target_id().never();
        reports.expect_delete_by_target().never();
        let use_case = ReportsUseCase::new(
            Arc::new(reports),
            Arc::new(MockPromptRepository::new()),
            Arc::new(MockCommentRepository::new()),
            Arc::new(MockUserRepository::new()),
        );
        let caller = Actor::new(Uuid::now_v7(), Role::User);

        assert!(matches!(
            use_case.list_all(caller).await,
            Err(DomainError::Forbidden(_))
        ));
        assert!(matches!(
            use_case.approve(caller, Uuid::now_v7(), None).await,
            Err(DomainError::Forbidden(_))
        ));
    }
}
