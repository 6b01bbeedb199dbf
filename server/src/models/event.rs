use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::participant::{Participant, ParticipantView};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Event {
    pub id: i64,
    pub name: String,
    pub location: String,
    pub event_date: DateTime<Utc>,
    pub additional_info: String,
    pub created_at: DateTime<Utc>,
}

impl Event {
    /// An event is past once its scheduled time is at or before `now`.
    pub fn is_past(&self, now: DateTime<Utc>) -> bool {
        self.event_date <= now
    }
}

/// Request body for creating or updating an event.
#[derive(Debug, Clone, Deserialize)]
pub struct EventInput {
    pub name: Option<String>,
    pub location: Option<String>,
    pub event_date: DateTime<Utc>,
    #[serde(default)]
    pub additional_info: Option<String>,
}

/// Event fields that passed validation and are ready for the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidEvent {
    pub name: String,
    pub location: String,
    pub event_date: DateTime<Utc>,
    pub additional_info: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct EventSummary {
    pub id: i64,
    pub name: String,
    pub event_date: DateTime<Utc>,
    pub location: String,
    pub additional_info: String,
    pub participant_count: i64,
    pub is_past_event: bool,
}

impl EventSummary {
    pub fn new(event: Event, participant_count: i64, now: DateTime<Utc>) -> Self {
        let is_past_event = event.is_past(now);
        Self {
            id: event.id,
            name: event.name,
            event_date: event.event_date,
            location: event.location,
            additional_info: event.additional_info,
            participant_count,
            is_past_event,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct EventDetail {
    #[serde(flatten)]
    pub summary: EventSummary,
    pub participants: Vec<ParticipantView>,
}

impl EventDetail {
    pub fn new(event: Event, participants: Vec<Participant>, now: DateTime<Utc>) -> Self {
        let participant_count = headcount(&participants);
        Self {
            summary: EventSummary::new(event, participant_count, now),
            participants: participants.into_iter().map(ParticipantView::from).collect(),
        }
    }
}

/// Number of people attending: one per individual, the declared count per company.
pub fn headcount(participants: &[Participant]) -> i64 {
    participants.iter().map(Participant::headcount).sum()
}
