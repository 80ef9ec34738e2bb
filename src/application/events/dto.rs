use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, TS)]
#[ts(export)]
pub struct AddEventRequest {
    #[validate(length(min = 1, max = 200, message = "Title is required"))]
    pub title: String,
    pub event_date: NaiveDate,
    #[validate(length(min = 1, max = 50, message = "Event time is required"))]
    pub event_time: String,
    #[validate(length(min = 1, max = 200, message = "Organizer is required"))]
    pub organizer: String,
    #[validate(url(message = "Registration link must be a valid URL"))]
    pub registration_link: String,
}
