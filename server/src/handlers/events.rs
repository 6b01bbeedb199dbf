use axum::extract::{Path, State};
use axum::response::Response;
use tracing::info;

use super::participants::register;
use crate::models::{EventDetail, EventInput, EventSummary, ParticipantDraft, ParticipantView};
use crate::state::AppState;
use crate::utils::error::AppError;
use crate::utils::json::JsonBody;
use crate::utils::response::{created, empty_success, success};
use crate::validation::{check_event, check_event_removal, check_event_update};

fn event_not_found(id: i64) -> AppError {
    AppError::NotFound(format!("Event with id '{}' was not found", id))
}

pub async fn list_events(State(state): State<AppState>) -> Result<Response, AppError> {
    let now = state.now();
    let events: Vec<EventSummary> = state
        .store
        .list_events()
        .await?
        .into_iter()
        .map(|(event, participant_count)| EventSummary::new(event, participant_count, now))
        .collect();

    Ok(success(events, "Events retrieved"))
}

pub async fn get_event(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Response, AppError> {
    let event = state
        .store
        .find_event(id)
        .await?
        .ok_or_else(|| event_not_found(id))?;
    let participants = state.store.list_participants(id).await?;

    Ok(success(
        EventDetail::new(event, participants, state.now()),
        "Event retrieved",
    ))
}

pub async fn create_event(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<EventInput>,
) -> Result<Response, AppError> {
    let valid = check_event(&input, state.now())?;
    let event = state.store.insert_event(&valid).await?;
    info!(event_id = event.id, "Event created");

    Ok(created(event, "Event created"))
}

pub async fn update_event(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    JsonBody(input): JsonBody<EventInput>,
) -> Result<Response, AppError> {
    let existing = state
        .store
        .find_event(id)
        .await?
        .ok_or_else(|| event_not_found(id))?;
    let valid = check_event_update(&existing, &input, state.now())?;
    let event = state
        .store
        .update_event(id, &valid)
        .await?
        .ok_or_else(|| event_not_found(id))?;
    info!(event_id = id, "Event updated");

    Ok(success(event, "Event updated"))
}

pub async fn delete_event(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Response, AppError> {
    let existing = state
        .store
        .find_event(id)
        .await?
        .ok_or_else(|| event_not_found(id))?;
    check_event_removal(&existing, state.now())?;

    if !state.store.delete_event(id).await? {
        return Err(event_not_found(id));
    }
    info!(event_id = id, "Event deleted");

    Ok(empty_success("Event deleted"))
}

pub async fn add_participant(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    JsonBody(draft): JsonBody<ParticipantDraft>,
) -> Result<Response, AppError> {
    let participant = register(&state, id, &draft).await?;
    Ok(created(ParticipantView::from(participant), "Participant registered"))
}
