use super::dto::AddEventRequest;
use crate::domain::{
    errors::DomainError,
    event::{
        entity::{Event, NewEvent},
        repository::EventRepository,
    },
    user::role::{Actor, STAFF},
};
use chrono::{NaiveDate, Utc};
use std::sync::Arc;
use tracing::{info, instrument};
use validator::Validate;

const UPCOMING_LIMIT: i64 = 3;

pub struct EventsUseCase {
    events: Arc<dyn EventRepository>,
}

impl EventsUseCase {
    pub fn new(events: Arc<dyn EventRepository>) -> Self {
        Self { events }
    }

    #[instrument(skip(self, request), fields(actor_id = %actor.id))]
    pub async fn add(&self, actor: Actor, request: AddEventRequest) -> Result<Event, DomainError> {
        actor.require_role(STAFF)?;

        let request = AddEventRequest {
            title: request.title.trim().to_string(),
            event_time: request.event_time.trim().to_string(),
            organizer: request.organizer.trim().to_string(),
            registration_link: request.registration_link.trim().to_string(),
            event_date: request.event_date,
        };
        request.validate()?;

        let event = self
            .events
            .create(&NewEvent {
                title: request.title,
                event_date: request.event_date,
                event_time: request.event_time,
                organizer: request.organizer,
                registration_link: request.registration_link,
            })
            .await?;
        info!(event_id = %event.id, event_date = %event.event_date, "Event added");
        Ok(event)
    }

    /// Up to three events dated today or later, soonest first.
    pub async fn upcoming(&self) -> Result<Vec<Event>, DomainError> {
        self.upcoming_from(Utc::now().date_naive()).await
    }

    pub async fn upcoming_from(&self, today: NaiveDate) -> Result<Vec<Event>, DomainError> {
        self.events.upcoming(today, UPCOMING_LIMIT).await
    }
}
