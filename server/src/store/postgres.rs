use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use super::Store;
use crate::models::{Event, Participant, ValidEvent, ValidParticipant};
use crate::utils::error::AppError;
use crate::validation::Rejection;

const EVENT_COLUMNS: &str = "id, name, location, event_date, additional_info, created_at";

const PARTICIPANT_COLUMNS: &str = "id, event_id, participant_type, payment_method, \
     first_name, last_name, personal_code, company_name, registration_code, \
     number_of_participants, additional_info, created_at";

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct EventHeadcountRow {
    id: i64,
    name: String,
    location: String,
    event_date: DateTime<Utc>,
    additional_info: String,
    created_at: DateTime<Utc>,
    participant_count: i64,
}

impl EventHeadcountRow {
    fn split(self) -> (Event, i64) {
        let event = Event {
            id: self.id,
            name: self.name,
            location: self.location,
            event_date: self.event_date,
            additional_info: self.additional_info,
            created_at: self.created_at,
        };
        (event, self.participant_count)
    }
}

/// The parent event vanished between lookup and insert.
fn missing_parent(err: sqlx::Error) -> AppError {
    match &err {
        sqlx::Error::Database(db) if db.is_foreign_key_violation() => {
            Rejection::EventNotFound.into()
        }
        _ => err.into(),
    }
}

#[async_trait]
impl Store for PgStore {
    async fn list_events(&self) -> Result<Vec<(Event, i64)>, AppError> {
        let rows = sqlx::query_as::<_, EventHeadcountRow>(
            "SELECT e.id, e.name, e.location, e.event_date, e.additional_info, e.created_at, \
             COALESCE(SUM(CASE WHEN p.participant_type = 'individual' THEN 1 \
                               ELSE COALESCE(p.number_of_participants, 0) END), 0)::BIGINT \
                 AS participant_count \
             FROM events e LEFT JOIN participants p ON p.event_id = e.id \
             GROUP BY e.id ORDER BY e.id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(EventHeadcountRow::split).collect())
    }

    async fn find_event(&self, id: i64) -> Result<Option<Event>, AppError> {
        let event = sqlx::query_as::<_, Event>(&format!(
            "SELECT {EVENT_COLUMNS} FROM events WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(event)
    }

    async fn insert_event(&self, event: &ValidEvent) -> Result<Event, AppError> {
        let event = sqlx::query_as::<_, Event>(&format!(
            "INSERT INTO events (name, location, event_date, additional_info) \
             VALUES ($1, $2, $3, $4) RETURNING {EVENT_COLUMNS}"
        ))
        .bind(&event.name)
        .bind(&event.location)
        .bind(event.event_date)
        .bind(&event.additional_info)
        .fetch_one(&self.pool)
        .await?;

        Ok(event)
    }

    async fn update_event(&self, id: i64, event: &ValidEvent) -> Result<Option<Event>, AppError> {
        let event = sqlx::query_as::<_, Event>(&format!(
            "UPDATE events SET name = $1, location = $2, event_date = $3, additional_info = $4 \
             WHERE id = $5 RETURNING {EVENT_COLUMNS}"
        ))
        .bind(&event.name)
        .bind(&event.location)
        .bind(event.event_date)
        .bind(&event.additional_info)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(event)
    }

    async fn delete_event(&self, id: i64) -> Result<bool, AppError> {
        // participants go with it through ON DELETE CASCADE
        let result = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_participants(&self, event_id: i64) -> Result<Vec<Participant>, AppError> {
        let participants = sqlx::query_as::<_, Participant>(&format!(
            "SELECT {PARTICIPANT_COLUMNS} FROM participants WHERE event_id = $1 ORDER BY id"
        ))
        .bind(event_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(participants)
    }

    async fn find_participant(&self, id: i64) -> Result<Option<Participant>, AppError> {
        let participant = sqlx::query_as::<_, Participant>(&format!(
            "SELECT {PARTICIPANT_COLUMNS} FROM participants WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(participant)
    }

    async fn insert_participant(
        &self,
        participant: &ValidParticipant,
    ) -> Result<Participant, AppError> {
        let participant = sqlx::query_as::<_, Participant>(&format!(
            "INSERT INTO participants (event_id, participant_type, payment_method, \
             first_name, last_name, personal_code, company_name, registration_code, \
             number_of_participants, additional_info) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) RETURNING {PARTICIPANT_COLUMNS}"
        ))
        .bind(participant.event_id)
        .bind(participant.participant_type)
        .bind(participant.payment_method)
        .bind(&participant.first_name)
        .bind(&participant.last_name)
        .bind(&participant.personal_code)
        .bind(&participant.company_name)
        .bind(&participant.registration_code)
        .bind(participant.number_of_participants)
        .bind(&participant.additional_info)
        .fetch_one(&self.pool)
        .await
        .map_err(missing_parent)?;

        Ok(participant)
    }

    async fn update_participant(
        &self,
        id: i64,
        participant: &ValidParticipant,
    ) -> Result<Option<Participant>, AppError> {
        let participant = sqlx::query_as::<_, Participant>(&format!(
            "UPDATE participants SET participant_type = $1, payment_method = $2, \
             first_name = $3, last_name = $4, personal_code = $5, company_name = $6, \
             registration_code = $7, number_of_participants = $8, additional_info = $9 \
             WHERE id = $10 RETURNING {PARTICIPANT_COLUMNS}"
        ))
        .bind(participant.participant_type)
        .bind(participant.payment_method)
        .bind(&participant.first_name)
        .bind(&participant.last_name)
        .bind(&participant.personal_code)
        .bind(&participant.company_name)
        .bind(&participant.registration_code)
        .bind(participant.number_of_participants)
        .bind(&participant.additional_info)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(participant)
    }

    async fn delete_participant(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM participants WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
