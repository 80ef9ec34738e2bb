use super::entity::{Event, NewEvent};
use crate::domain::errors::DomainError;
use async_trait::async_trait;
use chrono::NaiveDate;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventRepository: Send + Sync {
    async fn create(&self, event: &NewEvent) -> Result<Event, DomainError>;
    /// Events dated on or after `from`, soonest first.
    async fn upcoming(&self, from: NaiveDate, limit: i64) -> Result<Vec<Event>, DomainError>;
}
