use axum::extract::{Path, State};
use axum::response::Response;
use tracing::info;

use crate::models::{CreateParticipantRequest, Participant, ParticipantDraft, ParticipantView};
use crate::state::AppState;
use crate::utils::error::AppError;
use crate::utils::json::JsonBody;
use crate::utils::response::{created, empty_success, success};
use crate::validation::{check_participant, check_participant_removal};

fn participant_not_found(id: i64) -> AppError {
    AppError::NotFound(format!("Participant with id '{}' was not found", id))
}

/// Looks up the event, validates the draft against it and stores the result.
pub(crate) async fn register(
    state: &AppState,
    event_id: i64,
    draft: &ParticipantDraft,
) -> Result<Participant, AppError> {
    let event = state.store.find_event(event_id).await?;
    let valid = check_participant(draft, event.as_ref(), state.now())?;
    let participant = state.store.insert_participant(&valid).await?;
    info!(
        event_id,
        participant_id = participant.id,
        participant_type = ?participant.participant_type,
        "Participant registered"
    );

    Ok(participant)
}

async fn find_participant(state: &AppState, id: i64) -> Result<Participant, AppError> {
    state
        .store
        .find_participant(id)
        .await?
        .ok_or_else(|| participant_not_found(id))
}

pub async fn list_event_participants(
    State(state): State<AppState>,
    Path(event_id): Path<i64>,
) -> Result<Response, AppError> {
    let participants: Vec<ParticipantView> = state
        .store
        .list_participants(event_id)
        .await?
        .into_iter()
        .map(ParticipantView::from)
        .collect();

    Ok(success(participants, "Participants retrieved"))
}

pub async fn get_participant(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Response, AppError> {
    let participant = find_participant(&state, id).await?;
    Ok(success(
        ParticipantView::from(participant),
        "Participant retrieved",
    ))
}

pub async fn create_participant(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<CreateParticipantRequest>,
) -> Result<Response, AppError> {
    let participant = register(&state, request.event_id, &request.draft).await?;
    Ok(created(
        ParticipantView::from(participant),
        "Participant registered",
    ))
}

pub async fn update_participant(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    JsonBody(draft): JsonBody<ParticipantDraft>,
) -> Result<Response, AppError> {
    let existing = find_participant(&state, id).await?;
    let event = state.store.find_event(existing.event_id).await?;
    let valid = check_participant(&draft, event.as_ref(), state.now())?;

    let participant = state
        .store
        .update_participant(id, &valid)
        .await?
        .ok_or_else(|| participant_not_found(id))?;
    info!(participant_id = id, "Participant updated");

    Ok(success(
        ParticipantView::from(participant),
        "Participant updated",
    ))
}

pub async fn delete_participant(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Response, AppError> {
    let existing = find_participant(&state, id).await?;
    let event = state.store.find_event(existing.event_id).await?;
    check_participant_removal(event.as_ref(), state.now())?;

    if !state.store.delete_participant(id).await? {
        return Err(participant_not_found(id));
    }
    info!(participant_id = id, "Participant deleted");

    Ok(empty_success("Participant deleted"))
}
