//! Persistence behind a trait so handlers don't care where rows live.

use async_trait::async_trait;

use crate::models::{Event, Participant, ValidEvent, ValidParticipant};
use crate::utils::error::AppError;

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[async_trait]
pub trait Store: Send + Sync {
    /// All events ordered by id, each paired with its headcount.
    async fn list_events(&self) -> Result<Vec<(Event, i64)>, AppError>;

    async fn find_event(&self, id: i64) -> Result<Option<Event>, AppError>;

    async fn insert_event(&self, event: &ValidEvent) -> Result<Event, AppError>;

    /// Returns `None` when no event has the given id.
    async fn update_event(&self, id: i64, event: &ValidEvent) -> Result<Option<Event>, AppError>;

    /// Removes the event and all of its participants. Returns whether a row was deleted.
    async fn delete_event(&self, id: i64) -> Result<bool, AppError>;

    async fn list_participants(&self, event_id: i64) -> Result<Vec<Participant>, AppError>;

    async fn find_participant(&self, id: i64) -> Result<Option<Participant>, AppError>;

    async fn insert_participant(
        &self,
        participant: &ValidParticipant,
    ) -> Result<Participant, AppError>;

    async fn update_participant(
        &self,
        id: i64,
        participant: &ValidParticipant,
    ) -> Result<Option<Participant>, AppError>;

    async fn delete_participant(&self, id: i64) -> Result<bool, AppError>;
}
