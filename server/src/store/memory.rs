use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::Store;
use crate::models::{headcount, Event, Participant, ValidEvent, ValidParticipant};
use crate::utils::error::AppError;
use crate::validation::Rejection;

/// In-process store with the same semantics as the Postgres one,
/// including cascading participant removal.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

#[derive(Default)]
struct Tables {
    events: BTreeMap<i64, Event>,
    participants: BTreeMap<i64, Participant>,
    last_event_id: i64,
    last_participant_id: i64,
}

impl Tables {
    fn participants_of(&self, event_id: i64) -> Vec<Participant> {
        self.participants
            .values()
            .filter(|p| p.event_id == event_id)
            .cloned()
            .collect()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an event as-is, bypassing validation. Lets callers seed
    /// events that are already in the past.
    pub async fn seed_event(&self, mut event: Event) -> Event {
        let mut tables = self.tables.write().await;
        tables.last_event_id = tables.last_event_id.max(event.id);
        if event.id == 0 {
            tables.last_event_id += 1;
            event.id = tables.last_event_id;
        }
        tables.events.insert(event.id, event.clone());
        event
    }

    /// Inserts a participant as-is, bypassing validation.
    pub async fn seed_participant(&self, participant: &ValidParticipant) -> Participant {
        let mut tables = self.tables.write().await;
        tables.last_participant_id += 1;
        let participant = build_participant(tables.last_participant_id, participant);
        tables.participants.insert(participant.id, participant.clone());
        participant
    }
}

fn build_participant(id: i64, valid: &ValidParticipant) -> Participant {
    Participant {
        id,
        event_id: valid.event_id,
        participant_type: valid.participant_type,
        payment_method: valid.payment_method,
        first_name: valid.first_name.clone(),
        last_name: valid.last_name.clone(),
        personal_code: valid.personal_code.clone(),
        company_name: valid.company_name.clone(),
        registration_code: valid.registration_code.clone(),
        number_of_participants: valid.number_of_participants,
        additional_info: valid.additional_info.clone(),
        created_at: Utc::now(),
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn list_events(&self) -> Result<Vec<(Event, i64)>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables
            .events
            .values()
            .map(|event| (event.clone(), headcount(&tables.participants_of(event.id))))
            .collect())
    }

    async fn find_event(&self, id: i64) -> Result<Option<Event>, AppError> {
        Ok(self.tables.read().await.events.get(&id).cloned())
    }

    async fn insert_event(&self, event: &ValidEvent) -> Result<Event, AppError> {
        let mut tables = self.tables.write().await;
        tables.last_event_id += 1;
        let event = Event {
            id: tables.last_event_id,
            name: event.name.clone(),
            location: event.location.clone(),
            event_date: event.event_date,
            additional_info: event.additional_info.clone(),
            created_at: Utc::now(),
        };
        tables.events.insert(event.id, event.clone());
        Ok(event)
    }

    async fn update_event(&self, id: i64, event: &ValidEvent) -> Result<Option<Event>, AppError> {
        let mut tables = self.tables.write().await;
        let Some(existing) = tables.events.get_mut(&id) else {
            return Ok(None);
        };
        existing.name = event.name.clone();
        existing.location = event.location.clone();
        existing.event_date = event.event_date;
        existing.additional_info = event.additional_info.clone();
        Ok(Some(existing.clone()))
    }

    async fn delete_event(&self, id: i64) -> Result<bool, AppError> {
        let mut tables = self.tables.write().await;
        if tables.events.remove(&id).is_none() {
            return Ok(false);
        }
        tables.participants.retain(|_, p| p.event_id != id);
        Ok(true)
    }

    async fn list_participants(&self, event_id: i64) -> Result<Vec<Participant>, AppError> {
        Ok(self.tables.read().await.participants_of(event_id))
    }

    async fn find_participant(&self, id: i64) -> Result<Option<Participant>, AppError> {
        Ok(self.tables.read().await.participants.get(&id).cloned())
    }

    async fn insert_participant(
        &self,
        participant: &ValidParticipant,
    ) -> Result<Participant, AppError> {
        let mut tables = self.tables.write().await;
        if !tables.events.contains_key(&participant.event_id) {
            return Err(Rejection::EventNotFound.into());
        }
        tables.last_participant_id += 1;
        let participant = build_participant(tables.last_participant_id, participant);
        tables.participants.insert(participant.id, participant.clone());
        Ok(participant)
    }

    async fn update_participant(
        &self,
        id: i64,
        participant: &ValidParticipant,
    ) -> Result<Option<Participant>, AppError> {
        let mut tables = self.tables.write().await;
        let Some(existing) = tables.participants.get_mut(&id) else {
            return Ok(None);
        };
        let created_at = existing.created_at;
        *existing = Participant {
            created_at,
            ..build_participant(id, participant)
        };
        Ok(Some(existing.clone()))
    }

    async fn delete_participant(&self, id: i64) -> Result<bool, AppError> {
        Ok(self.tables.write().await.participants.remove(&id).is_some())
    }
}
