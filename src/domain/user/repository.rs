use super::{
    entity::{NewUser, User},
    role::Role,
};
use crate::domain::errors::DomainError;
use async_trait::async_trait;
use uuid::Uuid;

/// Identity Store.
///
/// Counter and list mutations are single atomic operations on the user document,
/// never read-modify-write in the caller.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: &NewUser) -> Result<User, DomainError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError>;
    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<User>, DomainError>;
    async fn list_all(&self) -> Result<Vec<User>, DomainError>;
    async fn top_by_total_prompts(&self, limit: i64) -> Result<Vec<User>, DomainError>;
    /// Overwrites the role. `NotFound` when the user does not exist.
    async fn set_role(&self, id: Uuid, role: Role) -> Result<(), DomainError>;
    async fn increment_total_prompts(&self, id: Uuid) -> Result<(), DomainError>;
    /// Returns `false` when no such user exists.
    async fn increment_flag_count(&self, id: Uuid) -> Result<bool, DomainError>;
    /// Adds the prompt to the bookmark set if absent, removes it otherwise.
    /// Returns the new membership.
    async fn toggle_bookmark(&self, user_id: Uuid, prompt_id: Uuid) -> Result<bool, DomainError>;
    async fn set_two_factor(
        &self,
        id: Uuid,
        secret: Option<String>,
        enabled: bool,
    ) -> Result<(), DomainError>;
    /// Returns `false` when no such user existed.
    async fn delete(&self, id: Uuid) -> Result<bool, DomainError>;
}
