use chrono::{DateTime, Utc};

use super::{at_most, ensure_open, is_valid_personal_code, required, Rejection, PARTICIPANT_INFO_MAX};
use crate::models::{Event, ParticipantDraft, ParticipantType, ValidParticipant};

/// Validates a participant registration (or edit) against its target event.
///
/// On success the returned record carries only the fields of its own type;
/// the other type's fields are cleared.
pub fn check_participant(
    draft: &ParticipantDraft,
    event: Option<&Event>,
    now: DateTime<Utc>,
) -> Result<ValidParticipant, Rejection> {
    let event = ensure_open(event, now)?;

    let mut participant = ValidParticipant {
        event_id: event.id,
        participant_type: draft.participant_type,
        payment_method: draft.payment_method,
        first_name: String::new(),
        last_name: String::new(),
        personal_code: String::new(),
        company_name: String::new(),
        registration_code: String::new(),
        number_of_participants: None,
        additional_info: draft.additional_info.clone(),
    };

    match draft.participant_type {
        ParticipantType::Individual => {
            let first_name = required(draft.first_name.as_deref(), "first_name")?;
            let last_name = required(draft.last_name.as_deref(), "last_name")?;
            let personal_code = required(draft.personal_code.as_deref(), "personal_code")?;
            if !is_valid_personal_code(personal_code) {
                return Err(Rejection::InvalidPersonalCode);
            }

            participant.first_name = first_name.to_owned();
            participant.last_name = last_name.to_owned();
            participant.personal_code = personal_code.to_owned();
        }
        ParticipantType::Company => {
            let company_name = required(draft.company_name.as_deref(), "company_name")?;
            let registration_code =
                required(draft.registration_code.as_deref(), "registration_code")?;
            let count = participant_count(draft.number_of_participants.as_deref())?;

            participant.company_name = company_name.to_owned();
            participant.registration_code = registration_code.to_owned();
            participant.number_of_participants = Some(count);
        }
    }

    if let Some(info) = &participant.additional_info {
        at_most(info, "additional_info", PARTICIPANT_INFO_MAX)?;
    }

    Ok(participant)
}

/// A participant can only be removed while its event is still upcoming.
pub fn check_participant_removal(event: Option<&Event>, now: DateTime<Utc>) -> Result<(), Rejection> {
    ensure_open(event, now).map(|_| ())
}

fn participant_count(value: Option<&str>) -> Result<i32, Rejection> {
    value
        .and_then(|v| v.trim().parse::<i32>().ok())
        .filter(|count| *count > 0)
        .ok_or(Rejection::InvalidParticipantCount)
}
