use crate::domain::{
    errors::DomainError,
    event::{
        entity::{Event, NewEvent},
        repository::EventRepository,
    },
};
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

pub struct SqlxEventRepository {
    pub pool: PgPool,
}

impl SqlxEventRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EventRepository for SqlxEventRepository {
    async fn create(&self, event: &NewEvent) -> Result<Event, DomainError> {
        let row = sqlx::query_as::<_, Event>(
            "INSERT INTO events (id, title, event_date, event_time, organizer, registration_link) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING id, title, event_date, event_time, organizer, registration_link, created_at",
        )
        .bind(Uuid::now_v7())
        .bind(&event.title)
        .bind(event.event_date)
        .bind(&event.event_time)
        .bind(&event.organizer)
        .bind(&event.registration_link)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn upcoming(&self, from: NaiveDate, limit: i64) -> Result<Vec<Event>, DomainError> {
        let rows = sqlx::query_as::<_, Event>(
            "SELECT id, title, event_date, event_time, organizer, registration_link, created_at \
             FROM events \
             WHERE event_date >= $1 \
             ORDER BY event_date, id \
             LIMIT $2",
        )
        .bind(from)
        .bind(limit.max(0))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
