use super::{
    handlers::{admin, auth, events, health, prompts, reports, social, users},
    middleware::request_id::request_id_middleware,
    state::AppState,
};
use axum::{
    Router, middleware,
    routing::{delete, get, post},
};

pub fn create_router(state: AppState) -> Router {
    let api = Router::new()
        // Auth
        .route("/auth/register", post(auth::register))
        .route("/auth/verify-email/{token}", get(auth::verify_email))
        .route("/auth/login", post(auth::login))
        .route("/auth/2fa/setup", post(auth::setup_two_factor))
        .route("/auth/2fa/enable", post(auth::enable_two_factor))
        .route("/auth/2fa/disable", post(auth::disable_two_factor))
        // Prompts
        .route("/prompts", get(prompts::feed).post(prompts::create_prompt))
        .route("/prompts/search", get(prompts::search_prompts))
        .route("/prompts/{id}", get(prompts::get_prompt))
        .route("/prompts/{id}/like", post(social::like_prompt))
        .route("/prompts/{id}/bookmark", post(social::bookmark_prompt))
        .route("/prompts/{id}/upvote", post(prompts::upvote))
        .route("/prompts/{id}/downvote", post(prompts::downvote))
        // Comments
        .route("/comments", post(social::add_comment))
        .route("/comments/{prompt_id}", get(social::get_comments))
        .route("/comments/single/{id}", get(social::get_comment))
        // Users
        .route("/user/profile", get(users::profile))
        .route("/user/bookmarks", get(users::bookmarks))
        .route("/user/leaderboard", get(users::leaderboard))
        // Reports and moderation
        .route("/reports/submit", post(reports::submit_report))
        .route("/reports/all", get(reports::list_reports))
        .route("/reports/delete", delete(reports::delete_reported_content))
        .route("/reports/approve", post(reports::approve_reported_content))
        // Administration
        .route("/admin/assign-role", post(admin::assign_role))
        .route("/admin/users", get(admin::list_users))
        .route("/admin/delete-user/{user_id}", delete(admin::delete_user))
        // Events
        .route("/events/add", post(events::add_event))
        .route("/events/upcoming", get(events::upcoming_events));

    Router::new()
        .route("/health", get(health::health_check))
        .nest("/api", api)
        .layer(middleware::from_fn(request_id_middleware))
        .with_state(state)
}
