use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use ts_rs::TS;
use uuid::Uuid;

/// A community event announced by staff.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, TS, PartialEq)]
#[ts(export)]
pub struct Event {
    pub id: Uuid,
    pub title: String,
    pub event_date: NaiveDate,
    /// Free-form time of day as entered by the organizer, e.g. "18:30 IST".
    pub event_time: String,
    pub organizer: String,
    pub registration_link: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewEvent {
    pub title: String,
    pub event_date: NaiveDate,
    pub event_time: String,
    pub organizer: String,
    pub registration_link: String,
}
