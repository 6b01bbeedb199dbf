//! Business rules for events and participants.
//!
//! Everything in here is pure: no I/O, no clock reads. Callers look up the
//! event through the store and pass the current instant explicitly. Rules
//! short-circuit, so a rejection always names the first rule that failed.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::models::Event;

pub mod event;
pub mod participant;
pub mod personal_code;

pub use event::{check_event, check_event_removal, check_event_update};
pub use participant::{check_participant, check_participant_removal};
pub use personal_code::is_valid_personal_code;

pub const EVENT_NAME_MAX: usize = 200;
pub const EVENT_LOCATION_MAX: usize = 200;
pub const EVENT_INFO_MAX: usize = 1000;
pub const PARTICIPANT_INFO_MAX: usize = 5000;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("Event not found")]
    EventNotFound,

    #[error("Event has already taken place and can no longer be changed")]
    EventIsPast,

    #[error("Missing required field: {0}")]
    MissingRequiredField(&'static str),

    #[error("Invalid Estonian personal code")]
    InvalidPersonalCode,

    #[error("Number of participants must be a positive integer")]
    InvalidParticipantCount,

    #[error("Field '{field}' must be at most {max} characters")]
    FieldTooLong { field: &'static str, max: usize },

    #[error("Event date must be in the future")]
    EventDateNotInFuture,
}

impl Rejection {
    pub fn code(&self) -> &'static str {
        match self {
            Rejection::EventNotFound => "EVENT_NOT_FOUND",
            Rejection::EventIsPast => "EVENT_IS_PAST",
            Rejection::MissingRequiredField(_) => "MISSING_REQUIRED_FIELD",
            Rejection::InvalidPersonalCode => "INVALID_PERSONAL_CODE",
            Rejection::InvalidParticipantCount => "INVALID_PARTICIPANT_COUNT",
            Rejection::FieldTooLong { .. } => "FIELD_TOO_LONG",
            Rejection::EventDateNotInFuture => "EVENT_DATE_NOT_IN_FUTURE",
        }
    }
}

/// Returns the event if it exists and is still in the future.
pub fn ensure_open(event: Option<&Event>, now: DateTime<Utc>) -> Result<&Event, Rejection> {
    let event = event.ok_or(Rejection::EventNotFound)?;
    if event.is_past(now) {
        return Err(Rejection::EventIsPast);
    }
    Ok(event)
}

/// Whitespace-only counts as missing.
fn required<'a>(value: Option<&'a str>, field: &'static str) -> Result<&'a str, Rejection> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(Rejection::MissingRequiredField(field)),
    }
}

fn at_most(value: &str, field: &'static str, max: usize) -> Result<(), Rejection> {
    if value.chars().count() > max {
        return Err(Rejection::FieldTooLong { field, max });
    }
    Ok(())
}
