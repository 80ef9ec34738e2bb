pub mod admin;
pub mod auth;
pub mod engagement;
pub mod events;
pub mod moderation;
pub mod prompts;
pub mod reports;

use crate::domain::{
    errors::DomainError,
    user::{entity::User, repository::UserRepository},
};
use std::collections::HashMap;
use uuid::Uuid;

/// Loads the distinct users referenced by `wanted`, keyed by id. Missing
/// users are simply absent from the map.
pub(crate) async fn users_by_id(
    users: &dyn UserRepository,
    mut wanted: Vec<Uuid>,
) -> Result<HashMap<Uuid, User>, DomainError> {
    wanted.sort_unstable();
    wanted.dedup();
    if wanted.is_empty() {
        return Ok(HashMap::new());
    }
    let found = users.find_by_ids(&wanted).await?;
    Ok(found.into_iter().map(|u| (u.id, u)).collect())
}
