pub mod in_memory;
pub mod sqlx_comment_repository;
pub mod sqlx_event_repository;
pub mod sqlx_prompt_repository;
pub mod sqlx_report_repository;
pub mod sqlx_user_repository;

use crate::domain::{
    event::repository::EventRepository, prompt::repository::PromptRepository,
    report::repository::ReportRepository, social::repository::CommentRepository,
    user::repository::UserRepository,
};
use in_memory::{
    InMemoryCommentRepository, InMemoryEventRepository, InMemoryPromptRepository,
    InMemoryReportRepository, InMemoryUserRepository,
};
use sqlx::PgPool;
use sqlx_comment_repository::SqlxCommentRepository;
use sqlx_event_repository::SqlxEventRepository;
use sqlx_prompt_repository::SqlxPromptRepository;
use sqlx_report_repository::SqlxReportRepository;
use sqlx_user_repository::SqlxUserRepository;
use std::sync::Arc;

/// One handle per store, shared by every use case.
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub prompts: Arc<dyn PromptRepository>,
    pub comments: Arc<dyn CommentRepository>,
    pub reports: Arc<dyn ReportRepository>,
    pub events: Arc<dyn EventRepository>,
}

impl Repositories {
    pub fn postgres(pool: PgPool, output_separator: &str) -> Self {
        Self {
            users: Arc::new(SqlxUserRepository::new(pool.clone())),
            prompts: Arc::new(SqlxPromptRepository::new(pool.clone(), output_separator)),
            comments: Arc::new(SqlxCommentRepository::new(pool.clone())),
            reports: Arc::new(SqlxReportRepository::new(pool.clone())),
            events: Arc::new(SqlxEventRepository::new(pool)),
        }
    }

    pub fn in_memory() -> Self {
        Self {
            users: Arc::new(InMemoryUserRepository::new()),
            prompts: Arc::new(InMemoryPromptRepository::new()),
            comments: Arc::new(InMemoryCommentRepository::new()),
            reports: Arc::new(InMemoryReportRepository::new()),
            events: Arc::new(InMemoryEventRepository::new()),
        }
    }
}
