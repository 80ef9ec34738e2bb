use crate::{
    application::{
        admin::use_case::AdminUseCase,
        auth::use_case::{AuthSettings, AuthUseCase},
        engagement::use_case::EngagementUseCase,
        events::use_case::EventsUseCase,
        moderation::use_case::ModerationUseCase,
        prompts::use_case::PromptsUseCase,
        reports::use_case::ReportsUseCase,
    },
    config::Config,
    infrastructure::{
        mail::traits::Mailer, repositories::Repositories, security::tokens::TokenService,
    },
};
use sqlx::PgPool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    /// `None` when running on the in-memory store.
    pub db: Option<PgPool>,
    pub config: Config,
    pub auth: Arc<AuthUseCase>,
    pub prompts: Arc<PromptsUseCase>,
    pub engagement: Arc<EngagementUseCase>,
    pub reports: Arc<ReportsUseCase>,
    pub moderation: Arc<ModerationUseCase>,
    pub admin: Arc<AdminUseCase>,
    pub events: Arc<EventsUseCase>,
}

impl AppState {
    pub fn new(
        config: Config,
        db: Option<PgPool>,
        repos: Repositories,
        mailer: Arc<dyn Mailer>,
    ) -> Self {
        let tokens = TokenService::new(
            config.jwt_secret.clone(),
            config.email_secret.clone(),
            config.jwt_ttl_hours,
        );
        let auth = AuthUseCase::new(
            repos.users.clone(),
            tokens,
            mailer,
            AuthSettings {
                client_url: config.client_url.clone(),
                bcrypt_cost: config.bcrypt_cost,
                totp_issuer: config.totp_issuer.clone(),
            },
        );

        Self {
            db,
            auth: Arc::new(auth),
            prompts: Arc::new(PromptsUseCase::new(
                repos.prompts.clone(),
                repos.users.clone(),
                config.output_separator.clone(),
            )),
            engagement: Arc::new(EngagementUseCase::new(
                repos.prompts.clone(),
                repos.users.clone(),
                repos.comments.clone(),
            )),
            reports: Arc::new(ReportsUseCase::new(
                repos.reports.clone(),
                repos.prompts.clone(),
                repos.comments.clone(),
                repos.users.clone(),
            )),
            moderation: Arc::new(ModerationUseCase::new(
                repos.reports.clone(),
                repos.prompts.clone(),
                repos.comments.clone(),
                repos.users.clone(),
            )),
            admin: Arc::new(AdminUseCase::new(
                repos.users.clone(),
                repos.prompts.clone(),
                repos.comments.clone(),
            )),
            events: Arc::new(EventsUseCase::new(repos.events)),
            config,
        }
    }
}
